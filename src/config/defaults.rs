//! Engine-wide default constants.
//!
//! Grouped by subsystem. Values that operators may tune are mirrored as
//! `#[serde(default = ...)]` fields in `engine_config.rs`; these are the
//! fallbacks used when the field is absent.

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SPINDLE_SIM_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "spindle_sim.toml";

// ============================================================================
// Simulation Clock
// ============================================================================

/// Load profile sampling interval (seconds).
pub const TIME_STEP_SECS: f64 = 0.1;

/// Spindle housing temperature before a run starts (°C).
pub const AMBIENT_TEMPERATURE_C: f64 = 20.0;

/// Steps between rendered samples in a time-based run.
///
/// 10 steps at 0.1 s = one line per simulated second.
pub const TIME_LOG_INTERVAL_STEPS: usize = 10;

/// Default length of each scenario and of a time-based run (seconds).
pub const RUN_DURATION_SECS: f64 = 10.0;

// ============================================================================
// Scenarios
// ============================================================================

/// (name, speed factor, load factor) of the built-in scenarios.
pub const SCENARIOS: [(&str, f64, f64); 3] = [
    ("High-Speed", 1.0, 0.8),
    ("High-Torque", 0.6, 1.2),
    ("Balanced", 0.8, 1.0),
];

// ============================================================================
// Maintenance History
// ============================================================================

/// Synthetic samples the pool is seeded with on first use.
pub const HISTORY_SEED_SAMPLES: usize = 100;

/// Neighbours per classifier vote.
pub const K_NEIGHBORS: usize = 3;

// ============================================================================
// Thresholds
// ============================================================================

/// Vibration above this is excessive (mm/s, ISO 1940 G1).
pub const VIBRATION_LIMIT_MM_S: f64 = 1.0;

/// Bearing life below this labels a run for maintenance (hours).
pub const LABEL_MIN_BEARING_LIFE_HOURS: f64 = 5_000.0;

/// Bearing life below this triggers a lubrication/preload recommendation (hours).
pub const TARGET_BEARING_LIFE_HOURS: f64 = 20_000.0;

/// Remaining shaft life below this is premature failure (fraction).
pub const MIN_SPINDLE_LIFE_FRACTION: f64 = 0.5;

/// Wheel wear above this labels a run for maintenance (mm).
pub const WHEEL_WEAR_LABEL_MM: f64 = 20.0;

/// Temperature rise above this is a thermal issue (°C).
pub const MAX_TEMPERATURE_RISE_C: f64 = 30.0;

/// Wear-induced vibration above this indicates wheel imbalance (mm/s).
pub const WEAR_VIBRATION_LIMIT_MM_S: f64 = 0.5;

/// Remaining wheel diameter below this fraction of nominal is excessive wear.
pub const MIN_REMAINING_WHEEL_FRACTION: f64 = 0.8;
