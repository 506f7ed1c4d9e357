//! Engine Configuration Module
//!
//! Scenario definitions, history settings and maintenance thresholds loaded
//! from TOML, replacing hardcoded constants with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `SPINDLE_SIM_CONFIG` environment variable (path to TOML file)
//! 2. `spindle_sim.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(EngineConfig::load());
//!
//! // Anywhere in the codebase:
//! let rule = config::get().maintenance_rule();
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Built-in defaults, used when `get()` runs before `init()`.
static DEFAULT_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Initialize the global engine configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: EngineConfig) {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global engine configuration.
///
/// Falls back to built-in defaults if `init()` has not been called, so
/// library users and tests need no setup.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT_CONFIG.get_or_init(EngineConfig::default))
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    ENGINE_CONFIG.get().is_some()
}
