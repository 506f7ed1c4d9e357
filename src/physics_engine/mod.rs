//! Physics Engine Module
//!
//! Deterministic spindle physics. Nothing here touches shared state; the only
//! non-determinism is the random source handed to the load profile generator.
//!
//! ## Steady state (`analytic`)
//! - `required_power()` - Grinding power at a speed
//! - `temperature_rise()` / `thermal_expansion()` - Thermal behaviour
//! - `vibration()` / `resonance_frequency()` - Dynamics
//! - `steady_state()` / `trial_runs()` - Composite reports
//!
//! ## Dynamic load (`load_profile`)
//! - `generate_load_profile()` - Sinusoidal load with random spikes
//!
//! ## Fatigue and wear (`models`)
//! - `bearing_l10_life_hours()` - ISO 281 life with lubrication/cooling adjustment
//! - `spindle_fatigue_life()` - S-N curve with Miner's rule accumulation
//! - `wheel_wear()` / `wear_induced_vibration()` - Archard wear and imbalance

pub mod analytic;
pub mod load_profile;
pub mod models;

pub use analytic::{
    estimated_load, required_power, resonance_frequency, steady_state, temperature_rise,
    thermal_expansion, trial_runs, vibration,
};
pub use load_profile::{generate_load_profile, generate_load_profile_with_step, LoadProfile};
pub use models::{
    bearing_l10_life_hours, fatigue_and_wear, l10_life, miners_rule, spindle_fatigue_life,
    wear_induced_vibration, wheel_wear,
};
