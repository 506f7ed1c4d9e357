//! Engine Configuration - Scenarios, history and thresholds as TOML values
//!
//! Every tunable of the simulation engine lives in this module. Each struct
//! implements `Default` with the values in `defaults.rs`, so an absent or
//! empty config file behaves exactly like the built-in engine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{LabelPolicy, MaintenanceRule, TimeStep};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the simulation engine.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$SPINDLE_SIM_CONFIG` env var
/// 2. `./spindle_sim.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Clock and ambient conditions
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Operating scenarios of a multi-scenario run, in report order
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,

    /// Historical pool and classifier
    #[serde(default)]
    pub history: HistoryConfig,

    /// Label, check and recommendation limits
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            scenarios: default_scenarios(),
            history: HistoryConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SPINDLE_SIM_CONFIG` environment variable
    /// 2. `./spindle_sim.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), scenarios = config.scenarios.len(), "Loaded engine config from SPINDLE_SIM_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from SPINDLE_SIM_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "SPINDLE_SIM_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./spindle_sim.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(scenarios = config.scenarios.len(), "Loaded engine config from ./spindle_sim.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./spindle_sim.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No spindle_sim.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        let typo_warnings = super::validation::validate_unknown_keys(contents);
        for w in &typo_warnings {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Time step, scenario factors and durations must be positive
    /// - At least one scenario, with unique names
    /// - k must be odd and no larger than the seed pool
    /// - Bearing life target must be >= the maintenance label limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let s = &self.simulation;
        if TimeStep::new(s.time_step_secs).is_none() {
            errors.push(format!(
                "simulation.time_step_secs must be a positive number (got {})",
                s.time_step_secs
            ));
        }
        if s.time_log_interval_steps == 0 {
            errors.push("simulation.time_log_interval_steps must be > 0".to_string());
        }

        // Scenarios
        if self.scenarios.is_empty() {
            errors.push("scenarios: at least one scenario is required".to_string());
        }
        for (i, sc) in self.scenarios.iter().enumerate() {
            let label = if sc.name.trim().is_empty() {
                errors.push(format!("scenarios[{i}].name must not be empty"));
                format!("scenarios[{i}]")
            } else {
                format!("scenarios[{i}] ({})", sc.name)
            };
            Self::check_positive(sc.speed_factor, &format!("{label}.speed_factor"), &mut errors);
            Self::check_positive(sc.load_factor, &format!("{label}.load_factor"), &mut errors);
            Self::check_positive(sc.duration_secs, &format!("{label}.duration_secs"), &mut errors);
            if self.scenarios[..i].iter().any(|prev| prev.name == sc.name) {
                errors.push(format!("{label}: duplicate scenario name"));
            }
        }

        // History
        let h = &self.history;
        if h.k_neighbors == 0 || h.k_neighbors % 2 == 0 {
            errors.push(format!(
                "history.k_neighbors must be odd and >= 1 (got {})",
                h.k_neighbors
            ));
        }
        if h.seed_samples < h.k_neighbors {
            errors.push(format!(
                "history.seed_samples ({}) must be >= k_neighbors ({})",
                h.seed_samples, h.k_neighbors
            ));
        }

        // Thresholds
        let t = &self.thresholds;
        if t.target_bearing_life_hours < t.label_min_bearing_life_hours {
            errors.push(format!(
                "thresholds.target_bearing_life_hours ({:.0}) must be >= label_min_bearing_life_hours ({:.0})",
                t.target_bearing_life_hours, t.label_min_bearing_life_hours
            ));
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(s) = toml::to_string(self) {
            if ["= nan", "= inf", "= -inf", "= +inf"].iter().any(|v| s.contains(v)) {
                errors.push("Config contains NaN or Inf values, all values must be finite numbers".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a positive number (got {value})"));
        }
    }

    /// Simulation clock, falling back to 0.1 s for an invalid step.
    pub fn time_step(&self) -> TimeStep {
        TimeStep::new(self.simulation.time_step_secs).unwrap_or_default()
    }

    /// Threshold rule used to label observations.
    pub fn maintenance_rule(&self) -> MaintenanceRule {
        let t = &self.thresholds;
        MaintenanceRule {
            vibration_limit: t.vibration_limit_mm_s,
            min_bearing_life_hours: t.label_min_bearing_life_hours,
            min_spindle_life: t.min_spindle_life_fraction,
            wheel_wear_limit_mm: t.wheel_wear_label_mm,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Simulation
// ============================================================================

/// Clock, ambient conditions and randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Load profile sampling interval (seconds)
    #[serde(default = "default_time_step")]
    pub time_step_secs: f64,

    /// Temperature the spindle starts from (°C)
    #[serde(default = "default_ambient")]
    pub ambient_temperature_c: f64,

    /// Steps between rendered samples in a time-based run
    #[serde(default = "default_log_interval")]
    pub time_log_interval_steps: usize,

    /// Seed for load profile generation; absent means OS entropy
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_time_step() -> f64 {
    defaults::TIME_STEP_SECS
}
fn default_ambient() -> f64 {
    defaults::AMBIENT_TEMPERATURE_C
}
fn default_log_interval() -> usize {
    defaults::TIME_LOG_INTERVAL_STEPS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step_secs: default_time_step(),
            ambient_temperature_c: default_ambient(),
            time_log_interval_steps: default_log_interval(),
            rng_seed: None,
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

/// One operating point of a multi-scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,

    /// Multiplier on max speed (RPM is truncated to an integer)
    pub speed_factor: f64,

    /// Multiplier on the static load estimate
    pub load_factor: f64,

    /// Simulated grinding time (seconds)
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
}

fn default_duration() -> f64 {
    defaults::RUN_DURATION_SECS
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, speed_factor: f64, load_factor: f64, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            speed_factor,
            load_factor,
            duration_secs,
        }
    }
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    defaults::SCENARIOS
        .iter()
        .map(|&(name, speed, load)| ScenarioConfig::new(name, speed, load, default_duration()))
        .collect()
}

// ============================================================================
// History
// ============================================================================

/// Historical pool seeding and classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Synthetic samples generated on first use
    #[serde(default = "default_seed_samples")]
    pub seed_samples: usize,

    /// Neighbours per vote
    #[serde(default = "default_k")]
    pub k_neighbors: usize,

    /// Seed for synthetic history; absent means OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Which label a completed run contributes to the pool
    #[serde(default)]
    pub label_policy: LabelPolicy,
}

fn default_seed_samples() -> usize {
    defaults::HISTORY_SEED_SAMPLES
}
fn default_k() -> usize {
    defaults::K_NEIGHBORS
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            seed_samples: default_seed_samples(),
            k_neighbors: default_k(),
            seed: None,
            label_policy: LabelPolicy::default(),
        }
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// Limits for maintenance labels, pass/fail checks and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Vibration limit for checks, labels and recommendations (mm/s)
    #[serde(default = "default_vibration_limit")]
    pub vibration_limit_mm_s: f64,

    /// Bearing life below this labels a run for maintenance (hours)
    #[serde(default = "default_label_bearing_life")]
    pub label_min_bearing_life_hours: f64,

    /// Bearing life below this fails the check and prompts a recommendation (hours)
    #[serde(default = "default_target_bearing_life")]
    pub target_bearing_life_hours: f64,

    /// Remaining shaft life below this is premature failure (fraction)
    #[serde(default = "default_min_spindle_life")]
    pub min_spindle_life_fraction: f64,

    /// Wheel wear above this labels a run for maintenance (mm)
    #[serde(default = "default_wheel_wear_label")]
    pub wheel_wear_label_mm: f64,

    /// Temperature rise above this is a thermal issue (°C)
    #[serde(default = "default_max_temperature_rise")]
    pub max_temperature_rise_c: f64,

    /// Wear-induced vibration above this indicates imbalance (mm/s)
    #[serde(default = "default_wear_vibration_limit")]
    pub wear_vibration_limit_mm_s: f64,

    /// Remaining wheel diameter fraction below this is excessive wear
    #[serde(default = "default_min_remaining_wheel")]
    pub min_remaining_wheel_fraction: f64,
}

fn default_vibration_limit() -> f64 {
    defaults::VIBRATION_LIMIT_MM_S
}
fn default_label_bearing_life() -> f64 {
    defaults::LABEL_MIN_BEARING_LIFE_HOURS
}
fn default_target_bearing_life() -> f64 {
    defaults::TARGET_BEARING_LIFE_HOURS
}
fn default_min_spindle_life() -> f64 {
    defaults::MIN_SPINDLE_LIFE_FRACTION
}
fn default_wheel_wear_label() -> f64 {
    defaults::WHEEL_WEAR_LABEL_MM
}
fn default_max_temperature_rise() -> f64 {
    defaults::MAX_TEMPERATURE_RISE_C
}
fn default_wear_vibration_limit() -> f64 {
    defaults::WEAR_VIBRATION_LIMIT_MM_S
}
fn default_min_remaining_wheel() -> f64 {
    defaults::MIN_REMAINING_WHEEL_FRACTION
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            vibration_limit_mm_s: default_vibration_limit(),
            label_min_bearing_life_hours: default_label_bearing_life(),
            target_bearing_life_hours: default_target_bearing_life(),
            min_spindle_life_fraction: default_min_spindle_life(),
            wheel_wear_label_mm: default_wheel_wear_label(),
            max_temperature_rise_c: default_max_temperature_rise(),
            wear_vibration_limit_mm_s: default_wear_vibration_limit(),
            min_remaining_wheel_fraction: default_min_remaining_wheel(),
        }
    }
}
