//! Structured simulation results: steady-state, fatigue/wear, and run reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Observation, SpindleParameters};

// ============================================================================
// Physics Results
// ============================================================================

/// Closed-form steady-state values for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateReport {
    /// Power needed to drive the wheel at max speed (kW)
    pub required_power_kw: f64,
    /// Rated motor power (kW)
    pub power_rating_kw: f64,
    /// `required_power_kw <= power_rating_kw`
    pub power_sufficient: bool,
    /// Temperature rise above ambient (°C)
    pub temperature_rise_c: f64,
    /// Axial shaft growth from the temperature rise (mm)
    pub thermal_expansion_mm: f64,
    /// Baseline vibration velocity (mm/s)
    pub vibration_mm_s: f64,
    /// First bending resonance of the wheel/spindle system (Hz)
    pub resonance_frequency_hz: f64,
    /// Static radial load estimate (N)
    pub estimated_load_n: f64,
}

/// Power and vibration at one trial speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRun {
    pub speed_rpm: u32,
    pub required_power_kw: f64,
    pub vibration_mm_s: f64,
}

/// Life and wear figures derived from one load profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueWearReport {
    /// Bearing L10 life (hours), never below the floor
    pub bearing_life_hours: f64,
    /// Remaining shaft fatigue life (0-1)
    pub spindle_life_fraction: f64,
    /// Wheel diameter lost to wear (mm)
    pub wheel_wear_mm: f64,
    /// Vibration caused by wear imbalance (mm/s)
    pub wear_induced_vibration_mm_s: f64,
}

// ============================================================================
// Maintenance Prediction
// ============================================================================

/// Which label a completed run contributes to the historical pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Re-derive the label with the composite threshold rule
    #[default]
    ThresholdRule,
    /// Record the classifier's own vote
    ClassifierVerdict,
}

/// One of the k nearest pool members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Insertion index in the historical pool
    pub index: usize,
    /// Normalised Euclidean distance to the query
    pub distance: f64,
    pub maintenance_needed: bool,
}

/// Majority vote of the k nearest neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceVerdict {
    pub maintenance_needed: bool,
    /// Neighbours voting "maintenance needed"
    pub votes_for: usize,
    pub neighbors: Vec<Neighbor>,
}

/// Prediction and history bookkeeping for one completed run.
///
/// The classifier's verdict and the threshold rule can disagree; both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceOutcome {
    pub observation: Observation,
    pub verdict: MaintenanceVerdict,
    /// Label from the composite threshold rule
    pub rule_label: bool,
    /// Label actually appended to history (per `LabelPolicy`)
    pub recorded_label: bool,
    /// Pool size after this run was appended
    pub history_size: usize,
}

impl MaintenanceOutcome {
    pub fn maintenance_needed(&self) -> bool {
        self.verdict.maintenance_needed
    }
}

// ============================================================================
// Checks and Recommendations
// ============================================================================

/// Pass/fail checks on steady-state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteadyStateChecks {
    pub power_sufficient: bool,
    pub preload_optimal: bool,
    pub thermal_acceptable: bool,
    pub vibration_acceptable: bool,
    pub alignment_within_spec: bool,
}

/// Pass/fail checks on fatigue and wear results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatigueChecks {
    pub bearing_life_acceptable: bool,
    pub spindle_life_acceptable: bool,
    pub wheel_condition_acceptable: bool,
    pub wear_vibration_acceptable: bool,
}

/// Configuration change suggested by the multi-scenario summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ReduceVibration,
    ImproveCooling,
    ExtendBearingLife,
    ConfigurationRobust,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ReduceVibration => {
                "Consider upgrading to Hybrid Ceramic bearings or HSK tool interface to reduce vibration."
            }
            Recommendation::ImproveCooling => {
                "Switch to Liquid cooling to improve thermal performance."
            }
            Recommendation::ExtendBearingLife => {
                "Optimize lubrication type (e.g., Oil-Air) or reduce bearing preload to extend bearing life."
            }
            Recommendation::ConfigurationRobust => {
                "Current configuration is robust across tested scenarios."
            }
        }
    }
}

// ============================================================================
// Run Reports
// ============================================================================

/// Results of one scenario in a multi-scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub speed_factor: f64,
    pub load_factor: f64,
    pub duration_secs: f64,
    /// Configuration with the scenario's speed applied
    pub parameters: SpindleParameters,
    pub steady_state: SteadyStateReport,
    pub steady_checks: SteadyStateChecks,
    /// Advisory remarks from the configuration assessment
    pub notes: Vec<String>,
    pub time_step_secs: f64,
    pub load_profile: Vec<f64>,
    pub fatigue: FatigueWearReport,
    pub fatigue_checks: FatigueChecks,
    pub remaining_wheel_diameter_mm: f64,
    pub maintenance: MaintenanceOutcome,
}

impl ScenarioResult {
    /// Steady vibration plus wear-induced vibration (mm/s).
    pub fn total_vibration(&self) -> f64 {
        self.steady_state.vibration_mm_s + self.fatigue.wear_induced_vibration_mm_s
    }
}

/// Multi-scenario report with aggregate recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: SpindleParameters,
    pub spindle_type_note: String,
    pub trial_runs: Vec<TrialRun>,
    pub scenarios: Vec<ScenarioResult>,
    pub recommendations: Vec<Recommendation>,
}

impl ScenarioReport {
    /// True if any scenario's classifier vote called for maintenance.
    pub fn any_maintenance_needed(&self) -> bool {
        self.scenarios.iter().any(|s| s.maintenance.maintenance_needed())
    }
}

/// State at one step of a time-based walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeStepSample {
    pub time_secs: f64,
    pub load_n: f64,
    pub vibration_mm_s: f64,
    pub temperature_c: f64,
}

/// Step-by-step run over a single load profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: SpindleParameters,
    pub duration_secs: f64,
    pub time_step_secs: f64,
    /// Steps between rendered samples
    pub log_interval_steps: usize,
    pub samples: Vec<TimeStepSample>,
    pub avg_vibration_mm_s: f64,
    pub max_vibration_mm_s: f64,
    pub avg_temperature_c: f64,
    pub max_temperature_c: f64,
    pub fatigue: FatigueWearReport,
    pub fatigue_checks: FatigueChecks,
    pub remaining_wheel_diameter_mm: f64,
    pub maintenance: MaintenanceOutcome,
}
