//! Spindle Parameter Validation
//!
//! Range checks that gate every simulation, plus non-blocking design notes.
//!
//! `validate()` checks rules in a fixed order and stops at the first
//! violation. `assess()` never fails; it returns advisory remarks about how
//! well the chosen components suit the operating point.

use thiserror::Error;

use crate::types::{BearingType, SpindleParameters, SpindleType, ToolInterface};

/// Admissible parameter ranges (inclusive)
pub mod limits {
    pub const POWER_RATING_KW: (f64, f64) = (0.5, 50.0);
    pub const MAX_SPEED_RPM: (u32, u32) = (1_000, 30_000);
    pub const WHEEL_DIAMETER_MM: (f64, f64) = (50.0, 1_000.0);
    pub const BEARING_PRELOAD_N: (f64, f64) = (100.0, 2_000.0);
    pub const ALIGNMENT_TOLERANCE_MM: (f64, f64) = (0.0001, 0.01);

    /// Preload window giving neither excess heat nor play (N)
    pub const OPTIMAL_PRELOAD_N: (f64, f64) = (300.0, 1_000.0);
    /// Alignment beyond this causes chatter marks (mm)
    pub const ALIGNMENT_SPEC_MM: f64 = 0.002;
    /// Speed above which HSK / hybrid bearings are the preferred choice (RPM)
    pub const HIGH_SPEED_RPM: u32 = 10_000;
    /// Motorized spindles are optimal above this speed (RPM)
    pub const MOTORIZED_OPTIMAL_RPM: u32 = 15_000;
    /// Belt drives are cost-effective up to this speed (RPM)
    pub const BELT_DRIVEN_MAX_RPM: u32 = 8_000;
}

/// First out-of-range field found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Power rating must be between 0.5 and 50 kW (got {0})")]
    PowerRating(f64),

    #[error("Max speed must be between 1000 and 30000 RPM (got {0})")]
    MaxSpeed(u32),

    #[error("Wheel diameter must be between 50 and 1000 mm (got {0})")]
    WheelDiameter(f64),

    #[error("Bearing preload must be between 100 and 2000 N (got {0})")]
    BearingPreload(f64),

    #[error("Alignment tolerance must be between 0.0001 and 0.01 mm (got {0})")]
    AlignmentTolerance(f64),
}

/// NaN fails every comparison, so it is rejected here too.
fn within(value: f64, (lo, hi): (f64, f64)) -> bool {
    value >= lo && value <= hi
}

/// Check a configuration against the admissible ranges.
///
/// Order: power rating, max speed, wheel diameter, bearing preload,
/// alignment tolerance. Only the first violation is reported.
pub fn validate(params: &SpindleParameters) -> Result<(), ParameterError> {
    if !within(params.power_rating_kw, limits::POWER_RATING_KW) {
        return Err(ParameterError::PowerRating(params.power_rating_kw));
    }
    let (min_rpm, max_rpm) = limits::MAX_SPEED_RPM;
    if !(min_rpm..=max_rpm).contains(&params.max_speed_rpm) {
        return Err(ParameterError::MaxSpeed(params.max_speed_rpm));
    }
    if !within(params.wheel_diameter_mm, limits::WHEEL_DIAMETER_MM) {
        return Err(ParameterError::WheelDiameter(params.wheel_diameter_mm));
    }
    if !within(params.bearing_preload_n, limits::BEARING_PRELOAD_N) {
        return Err(ParameterError::BearingPreload(params.bearing_preload_n));
    }
    if !within(params.alignment_tolerance_mm, limits::ALIGNMENT_TOLERANCE_MM) {
        return Err(ParameterError::AlignmentTolerance(params.alignment_tolerance_mm));
    }
    Ok(())
}

// ============================================================================
// Design Assessment (advisory only)
// ============================================================================

/// How well the drive arrangement suits the configured speed.
pub fn spindle_type_note(params: &SpindleParameters) -> &'static str {
    match params.spindle_type {
        SpindleType::Motorized if params.max_speed_rpm > limits::MOTORIZED_OPTIMAL_RPM => {
            "Motorized spindle optimal for high-speed precision grinding"
        }
        SpindleType::BeltDriven if params.max_speed_rpm <= limits::BELT_DRIVEN_MAX_RPM => {
            "Belt-driven spindle cost-effective for high-torque applications"
        }
        SpindleType::DirectDrive => "Direct-drive spindle balances speed and torque effectively",
        _ => "Spindle type may not be optimal for specified parameters",
    }
}

/// How well the bearing construction suits the configured speed.
pub fn bearing_note(params: &SpindleParameters) -> &'static str {
    match params.bearing_type {
        BearingType::HybridCeramic if params.max_speed_rpm > limits::HIGH_SPEED_RPM => {
            "Hybrid ceramic bearings optimal for high-speed, low-friction operation"
        }
        BearingType::AngularContact => {
            "Angular contact bearings provide excellent rigidity for medium speeds"
        }
        BearingType::HybridCeramic => "Bearing type may need review for optimal performance",
    }
}

/// How well the tool interface suits the configured speed.
pub fn tool_interface_note(params: &SpindleParameters) -> &'static str {
    if params.tool_interface == ToolInterface::Hsk && params.max_speed_rpm > limits::HIGH_SPEED_RPM {
        "HSK interface optimal for high-speed operation"
    } else {
        "Tool interface suitable for specified parameters"
    }
}

pub fn preload_optimal(params: &SpindleParameters) -> bool {
    within(params.bearing_preload_n, limits::OPTIMAL_PRELOAD_N)
}

pub fn alignment_within_spec(params: &SpindleParameters) -> bool {
    params.alignment_tolerance_mm <= limits::ALIGNMENT_SPEC_MM
}

/// Advisory remarks for a configuration. Never blocks a simulation.
pub fn assess(params: &SpindleParameters) -> Vec<String> {
    let mut notes = vec![
        bearing_note(params).to_string(),
        tool_interface_note(params).to_string(),
    ];
    if !preload_optimal(params) {
        notes.push("Warning: Preload may cause excessive heat or play".to_string());
    }
    if !alignment_within_spec(params) {
        notes.push("Warning: Alignment may cause chatter marks".to_string());
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoolingType, LubricationType};

    fn valid() -> SpindleParameters {
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
    fn test_valid_configuration_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let low = SpindleParameters {
            power_rating_kw: 0.5,
            max_speed_rpm: 1_000,
            wheel_diameter_mm: 50.0,
            bearing_preload_n: 100.0,
            alignment_tolerance_mm: 0.0001,
            ..valid()
        };
        assert_eq!(validate(&low), Ok(()));
        let high = SpindleParameters {
            power_rating_kw: 50.0,
            max_speed_rpm: 30_000,
            wheel_diameter_mm: 1_000.0,
            bearing_preload_n: 2_000.0,
            alignment_tolerance_mm: 0.01,
            ..valid()
        };
        assert_eq!(validate(&high), Ok(()));
    }

    #[test]
    fn test_each_rule_reports_its_field() {
        assert_eq!(
            validate(&SpindleParameters { power_rating_kw: 0.4, ..valid() }),
            Err(ParameterError::PowerRating(0.4))
        );
        assert_eq!(
            validate(&valid().with_max_speed(30_001)),
            Err(ParameterError::MaxSpeed(30_001))
        );
        assert_eq!(
            validate(&SpindleParameters { wheel_diameter_mm: 1_200.0, ..valid() }),
            Err(ParameterError::WheelDiameter(1_200.0))
        );
        assert_eq!(
            validate(&valid().with_bearing_preload(50.0)),
            Err(ParameterError::BearingPreload(50.0))
        );
        assert_eq!(
            validate(&SpindleParameters { alignment_tolerance_mm: 0.02, ..valid() }),
            Err(ParameterError::AlignmentTolerance(0.02))
        );
    }

    #[test]
    fn test_first_violation_short_circuits() {
        let bad = SpindleParameters {
            power_rating_kw: 100.0,
            max_speed_rpm: 10,
            wheel_diameter_mm: 5.0,
            ..valid()
        };
        assert_eq!(validate(&bad), Err(ParameterError::PowerRating(100.0)));
    }

    #[test]
    fn test_nan_is_rejected() {
        let bad = SpindleParameters { wheel_diameter_mm: f64::NAN, ..valid() };
        assert!(matches!(validate(&bad), Err(ParameterError::WheelDiameter(_))));
    }

    #[test]
    fn test_error_message_matches_legacy_wording() {
        let err = validate(&valid().with_max_speed(500)).expect_err("speed below range");
        assert!(err.to_string().starts_with("Max speed must be between 1000 and 30000 RPM"));
    }

    #[test]
    fn test_assessment_notes() {
        let p = valid();
        assert_eq!(spindle_type_note(&p), "Motorized spindle optimal for high-speed precision grinding");
        let notes = assess(&p);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].starts_with("Hybrid ceramic"));
        assert!(notes[1].starts_with("HSK"));

        let slow_belt = SpindleParameters {
            spindle_type: SpindleType::BeltDriven,
            alignment_tolerance_mm: 0.005,
            ..p.with_max_speed(6_000).with_bearing_preload(1_500.0)
        };
        assert!(spindle_type_note(&slow_belt).starts_with("Belt-driven"));
        let notes = assess(&slow_belt);
        assert!(notes.iter().any(|n| n.contains("Preload")));
        assert!(notes.iter().any(|n| n.contains("chatter")));
    }
}
