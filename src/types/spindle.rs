//! Spindle configuration: component enums and the immutable parameter set

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unknown display name for one of the spindle component enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Match `s` against the display names of `all`, case-insensitively.
fn parse_named<T: Copy + std::fmt::Display>(
    s: &str,
    all: &[T],
    kind: &'static str,
) -> Result<T, ParseEnumError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|v| v.to_string().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseEnumError {
            kind,
            value: s.to_string(),
            expected: all.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        })
}

// ============================================================================
// Component Enums
// ============================================================================

/// Spindle drive arrangement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpindleType {
    #[serde(rename = "Belt-Driven")]
    BeltDriven,
    #[serde(rename = "Direct-Drive")]
    DirectDrive,
    Motorized,
}

impl SpindleType {
    pub const ALL: [Self; 3] = [Self::BeltDriven, Self::DirectDrive, Self::Motorized];
}

impl std::fmt::Display for SpindleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpindleType::BeltDriven => write!(f, "Belt-Driven"),
            SpindleType::DirectDrive => write!(f, "Direct-Drive"),
            SpindleType::Motorized => write!(f, "Motorized"),
        }
    }
}

impl FromStr for SpindleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, "spindle type")
    }
}

/// Spindle bearing construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BearingType {
    #[serde(rename = "Angular Contact")]
    AngularContact,
    #[serde(rename = "Hybrid Ceramic")]
    HybridCeramic,
}

impl BearingType {
    pub const ALL: [Self; 2] = [Self::AngularContact, Self::HybridCeramic];
}

impl std::fmt::Display for BearingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BearingType::AngularContact => write!(f, "Angular Contact"),
            BearingType::HybridCeramic => write!(f, "Hybrid Ceramic"),
        }
    }
}

impl FromStr for BearingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, "bearing type")
    }
}

/// Spindle cooling medium
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CoolingType {
    Liquid,
    Air,
}

impl CoolingType {
    pub const ALL: [Self; 2] = [Self::Liquid, Self::Air];
}

impl std::fmt::Display for CoolingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoolingType::Liquid => write!(f, "Liquid"),
            CoolingType::Air => write!(f, "Air"),
        }
    }
}

impl FromStr for CoolingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, "cooling type")
    }
}

/// Bearing lubrication method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LubricationType {
    Grease,
    #[serde(rename = "Oil-Mist")]
    OilMist,
    #[serde(rename = "Oil-Air")]
    OilAir,
}

impl LubricationType {
    pub const ALL: [Self; 3] = [Self::Grease, Self::OilMist, Self::OilAir];
}

impl std::fmt::Display for LubricationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LubricationType::Grease => write!(f, "Grease"),
            LubricationType::OilMist => write!(f, "Oil-Mist"),
            LubricationType::OilAir => write!(f, "Oil-Air"),
        }
    }
}

impl FromStr for LubricationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, "lubrication type")
    }
}

/// Wheel/tool clamping interface
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ToolInterface {
    #[serde(rename = "Precision Collet")]
    PrecisionCollet,
    #[serde(rename = "Hydraulic Chuck")]
    HydraulicChuck,
    #[serde(rename = "HSK")]
    Hsk,
}

impl ToolInterface {
    pub const ALL: [Self; 3] = [Self::PrecisionCollet, Self::HydraulicChuck, Self::Hsk];
}

impl std::fmt::Display for ToolInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolInterface::PrecisionCollet => write!(f, "Precision Collet"),
            ToolInterface::HydraulicChuck => write!(f, "Hydraulic Chuck"),
            ToolInterface::Hsk => write!(f, "HSK"),
        }
    }
}

impl FromStr for ToolInterface {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, "tool interface")
    }
}

// ============================================================================
// Spindle Parameters
// ============================================================================

/// Complete operating configuration for one simulation run.
///
/// Every field is required at construction. Derived views (a scenario running
/// at reduced speed, a trial run at a fraction of max speed) are produced with
/// the `with_*` copy-with-override methods rather than by mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpindleParameters {
    pub spindle_type: SpindleType,
    /// Rated motor power (kW)
    pub power_rating_kw: f64,
    /// Maximum spindle speed (RPM)
    pub max_speed_rpm: u32,
    /// Nominal grinding wheel diameter (mm)
    pub wheel_diameter_mm: f64,
    pub bearing_type: BearingType,
    /// Axial bearing preload (N)
    pub bearing_preload_n: f64,
    pub cooling_type: CoolingType,
    pub lubrication_type: LubricationType,
    pub tool_interface: ToolInterface,
    /// Spindle-to-wheel alignment tolerance (mm)
    pub alignment_tolerance_mm: f64,
}

impl SpindleParameters {
    /// Same configuration running at a different speed.
    #[must_use]
    pub const fn with_max_speed(self, max_speed_rpm: u32) -> Self {
        Self { max_speed_rpm, ..self }
    }

    /// Same configuration with the speed scaled by `factor`, truncated to whole RPM.
    #[must_use]
    pub fn with_speed_factor(self, factor: f64) -> Self {
        // Negative or NaN products saturate to 0 under `as`.
        let rpm = (f64::from(self.max_speed_rpm) * factor) as u32;
        self.with_max_speed(rpm)
    }

    /// Same configuration with a different bearing preload.
    #[must_use]
    pub const fn with_bearing_preload(self, bearing_preload_n: f64) -> Self {
        Self { bearing_preload_n, ..self }
    }

    /// Speed as a float for the closed-form models.
    pub fn rpm(&self) -> f64 {
        f64::from(self.max_speed_rpm)
    }

    /// Wheel diameter in metres.
    pub fn wheel_diameter_m(&self) -> f64 {
        self.wheel_diameter_mm / 1000.0
    }
}

// ============================================================================
// Builder
// ============================================================================

/// A required field was never set on a `SpindleParametersBuilder`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Spindle parameter '{0}' was not set")]
pub struct MissingParameter(pub &'static str);

/// Collects every field before producing a `SpindleParameters`.
///
/// No field has a default; `build()` names the first one left unset.
#[derive(Debug, Clone, Default)]
pub struct SpindleParametersBuilder {
    spindle_type: Option<SpindleType>,
    power_rating_kw: Option<f64>,
    max_speed_rpm: Option<u32>,
    wheel_diameter_mm: Option<f64>,
    bearing_type: Option<BearingType>,
    bearing_preload_n: Option<f64>,
    cooling_type: Option<CoolingType>,
    lubrication_type: Option<LubricationType>,
    tool_interface: Option<ToolInterface>,
    alignment_tolerance_mm: Option<f64>,
}

macro_rules! builder_setter {
    ($name:ident: $ty:ty) => {
        #[must_use]
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

impl SpindleParametersBuilder {
    builder_setter!(spindle_type: SpindleType);
    builder_setter!(power_rating_kw: f64);
    builder_setter!(max_speed_rpm: u32);
    builder_setter!(wheel_diameter_mm: f64);
    builder_setter!(bearing_type: BearingType);
    builder_setter!(bearing_preload_n: f64);
    builder_setter!(cooling_type: CoolingType);
    builder_setter!(lubrication_type: LubricationType);
    builder_setter!(tool_interface: ToolInterface);
    builder_setter!(alignment_tolerance_mm: f64);

    /// Range checks are left to `validator::validate`.
    pub fn build(self) -> Result<SpindleParameters, MissingParameter> {
        Ok(SpindleParameters {
            spindle_type: self.spindle_type.ok_or(MissingParameter("spindle_type"))?,
            power_rating_kw: self.power_rating_kw.ok_or(MissingParameter("power_rating_kw"))?,
            max_speed_rpm: self.max_speed_rpm.ok_or(MissingParameter("max_speed_rpm"))?,
            wheel_diameter_mm: self.wheel_diameter_mm.ok_or(MissingParameter("wheel_diameter_mm"))?,
            bearing_type: self.bearing_type.ok_or(MissingParameter("bearing_type"))?,
            bearing_preload_n: self.bearing_preload_n.ok_or(MissingParameter("bearing_preload_n"))?,
            cooling_type: self.cooling_type.ok_or(MissingParameter("cooling_type"))?,
            lubrication_type: self.lubrication_type.ok_or(MissingParameter("lubrication_type"))?,
            tool_interface: self.tool_interface.ok_or(MissingParameter("tool_interface"))?,
            alignment_tolerance_mm: self
                .alignment_tolerance_mm
                .ok_or(MissingParameter("alignment_tolerance_mm"))?,
        })
    }
}

impl SpindleParameters {
    pub fn builder() -> SpindleParametersBuilder {
        SpindleParametersBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpindleParameters {
        SpindleParameters {
            spindle_type: SpindleType::Motorized,
            power_rating_kw: 5.0,
            max_speed_rpm: 16_000,
            wheel_diameter_mm: 200.0,
            bearing_type: BearingType::HybridCeramic,
            bearing_preload_n: 500.0,
            cooling_type: CoolingType::Liquid,
            lubrication_type: LubricationType::OilAir,
            tool_interface: ToolInterface::Hsk,
            alignment_tolerance_mm: 0.001,
        }
    }

    #[test]
    fn test_enum_display_names_parse_back() {
        for t in SpindleType::ALL {
            assert_eq!(t.to_string().parse::<SpindleType>(), Ok(t));
        }
        for t in ToolInterface::ALL {
            assert_eq!(t.to_string().parse::<ToolInterface>(), Ok(t));
        }
        assert_eq!("oil-mist".parse::<LubricationType>(), Ok(LubricationType::OilMist));
        assert_eq!(" Hybrid Ceramic ".parse::<BearingType>(), Ok(BearingType::HybridCeramic));
    }

    #[test]
    fn test_unknown_enum_name_is_an_error() {
        let err = "Water".parse::<CoolingType>().expect_err("unknown cooling medium");
        assert_eq!(err.kind, "cooling type");
        assert!(err.to_string().contains("Liquid, Air"));
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&sample()).expect("serialize");
        assert!(json.contains("\"Hybrid Ceramic\""));
        assert!(json.contains("\"Oil-Air\""));
        assert!(json.contains("\"HSK\""));
        let back: SpindleParameters = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sample());
    }

    #[test]
    fn test_speed_override_leaves_original_untouched() {
        let base = sample();
        let slow = base.with_speed_factor(0.6);
        assert_eq!(slow.max_speed_rpm, 9_600);
        assert_eq!(base.max_speed_rpm, 16_000);
        assert_eq!(slow.bearing_type, base.bearing_type);
    }

    #[test]
    fn test_speed_factor_truncates() {
        let p = sample().with_max_speed(1_001);
        assert_eq!(p.with_speed_factor(0.5).max_speed_rpm, 500);
    }

    #[test]
    fn test_builder_requires_every_field() {
        let partial = SpindleParameters::builder()
            .spindle_type(SpindleType::Motorized)
            .power_rating_kw(5.0)
            .max_speed_rpm(16_000);
        assert_eq!(partial.clone().build(), Err(MissingParameter("wheel_diameter_mm")));

        let built = partial
            .wheel_diameter_mm(200.0)
            .bearing_type(BearingType::HybridCeramic)
            .bearing_preload_n(500.0)
            .cooling_type(CoolingType::Liquid)
            .lubrication_type(LubricationType::OilAir)
            .tool_interface(ToolInterface::Hsk)
            .alignment_tolerance_mm(0.001)
            .build();
        assert_eq!(built, Ok(sample()));
    }
}
