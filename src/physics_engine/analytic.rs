//! Closed-form steady-state spindle models
//!
//! Power, temperature rise, thermal growth, vibration, resonance and static
//! load as pure functions of the configuration:
//! - Required power from wheel size and speed
//! - Temperature rise from cooling, speed, preload (and optionally load)
//! - Vibration from bearings, speed, alignment, tool interface (and optionally load)
//! - Resonance from bearing stiffness and wheel mass

use std::f64::consts::PI;

use crate::types::{
    BearingType, CoolingType, SpindleParameters, SteadyStateReport, ToolInterface, TrialRun,
};

// ============================================================================
// Empirical Constants
// ============================================================================

/// Specific grinding power per unit (wheel m × kRPM) (kW)
const POWER_COEFFICIENT: f64 = 2.5;
/// Workpiece material factor on grinding power
const MATERIAL_FACTOR: f64 = 1.2;

/// Base temperature rise with liquid cooling (°C)
const LIQUID_BASE_RISE_C: f64 = 18.0;
/// Base temperature rise with air cooling (°C)
const AIR_BASE_RISE_C: f64 = 22.0;

/// Shaft length subject to thermal growth (m)
const SHAFT_LENGTH_M: f64 = 0.2;
/// Linear expansion coefficient of spindle steel (1/°C)
const THERMAL_COEFFICIENT: f64 = 12e-6;

/// Base vibration velocity per 10 000 RPM (mm/s)
const HYBRID_BASE_VIBRATION: f64 = 0.4;
const ANGULAR_BASE_VIBRATION: f64 = 0.6;
/// Vibration multiplier when alignment is outside specification
const MISALIGNMENT_FACTOR: f64 = 1.2;
/// Vibration multiplier for the stiffer HSK interface
const HSK_FACTOR: f64 = 0.9;
/// Tolerance beyond which misalignment amplifies vibration (mm)
const ALIGNMENT_SPEC_MM: f64 = 0.002;

/// Radial bearing stiffness (N/m)
const HYBRID_STIFFNESS: f64 = 1.5e8;
const ANGULAR_STIFFNESS: f64 = 1.2e8;

/// Static radial load per (wheel m × kRPM) (N)
const LOAD_COEFFICIENT: f64 = 100.0;

/// Trial speeds as fractions of max speed: (numerator, denominator)
const TRIAL_SPEED_FRACTIONS: [(u64, u64); 3] = [(1, 2), (3, 4), (1, 1)];

// ============================================================================
// Power
// ============================================================================

/// Power required to drive a wheel of `wheel_diameter_mm` at `speed_rpm` (kW).
pub fn required_power(wheel_diameter_mm: f64, speed_rpm: u32) -> f64 {
    (wheel_diameter_mm / 1000.0) * (f64::from(speed_rpm) / 1000.0) * POWER_COEFFICIENT * MATERIAL_FACTOR
}

// ============================================================================
// Thermal
// ============================================================================

/// Temperature rise above ambient (°C).
///
/// With `load` supplied, adds 2 °C per kN of instantaneous radial load.
pub fn temperature_rise(params: &SpindleParameters, load: Option<f64>) -> f64 {
    let base = match params.cooling_type {
        CoolingType::Liquid => LIQUID_BASE_RISE_C,
        CoolingType::Air => AIR_BASE_RISE_C,
    };
    let speed_term = (params.rpm() / 10_000.0) * 5.0;
    let preload_term = (params.bearing_preload_n / 500.0) * 2.0;
    let load_term = load.map_or(0.0, |l| (l / 1000.0) * 2.0);
    base + speed_term + preload_term + load_term
}

/// Axial shaft growth for a temperature rise (mm).
pub fn thermal_expansion(temperature_rise_c: f64) -> f64 {
    SHAFT_LENGTH_M * THERMAL_COEFFICIENT * temperature_rise_c * 1000.0
}

// ============================================================================
// Dynamics
// ============================================================================

/// Vibration velocity (mm/s).
///
/// With `load` supplied, scales by 1 + 0.5 per kN of instantaneous load.
pub fn vibration(params: &SpindleParameters, load: Option<f64>) -> f64 {
    let base = match params.bearing_type {
        BearingType::HybridCeramic => HYBRID_BASE_VIBRATION,
        BearingType::AngularContact => ANGULAR_BASE_VIBRATION,
    };
    let speed_factor = params.rpm() / 10_000.0;
    let alignment_factor = if params.alignment_tolerance_mm > ALIGNMENT_SPEC_MM {
        MISALIGNMENT_FACTOR
    } else {
        1.0
    };
    let tool_factor = if params.tool_interface == ToolInterface::Hsk {
        HSK_FACTOR
    } else {
        1.0
    };
    let load_factor = load.map_or(1.0, |l| 1.0 + (l / 1000.0) * 0.5);
    base * speed_factor * alignment_factor * tool_factor * load_factor
}

/// First resonance of the wheel on its bearings (Hz).
pub fn resonance_frequency(params: &SpindleParameters) -> f64 {
    let stiffness = match params.bearing_type {
        BearingType::HybridCeramic => HYBRID_STIFFNESS,
        BearingType::AngularContact => ANGULAR_STIFFNESS,
    };
    let mass = params.wheel_diameter_m() * 2.0;
    (stiffness / mass).sqrt() / (2.0 * PI)
}

/// Static radial load estimate (N).
pub fn estimated_load(params: &SpindleParameters) -> f64 {
    params.wheel_diameter_m() * (params.rpm() / 1000.0) * LOAD_COEFFICIENT
}

// ============================================================================
// Composite
// ============================================================================

/// All steady-state values for a configuration.
pub fn steady_state(params: &SpindleParameters) -> SteadyStateReport {
    let required_power_kw = required_power(params.wheel_diameter_mm, params.max_speed_rpm);
    let temperature_rise_c = temperature_rise(params, None);

    SteadyStateReport {
        required_power_kw,
        power_rating_kw: params.power_rating_kw,
        power_sufficient: required_power_kw <= params.power_rating_kw,
        temperature_rise_c,
        thermal_expansion_mm: thermal_expansion(temperature_rise_c),
        vibration_mm_s: vibration(params, None),
        resonance_frequency_hz: resonance_frequency(params),
        estimated_load_n: estimated_load(params),
    }
}

/// Power and vibration at 50 %, 75 % and 100 % of max speed.
pub fn trial_runs(params: &SpindleParameters) -> Vec<TrialRun> {
    TRIAL_SPEED_FRACTIONS
        .iter()
        .map(|&(num, den)| {
            // num/den <= 1, so the result always fits back in u32
            let speed_rpm = (u64::from(params.max_speed_rpm) * num / den) as u32;
            let trial = params.with_max_speed(speed_rpm);
            TrialRun {
                speed_rpm,
                required_power_kw: required_power(trial.wheel_diameter_mm, speed_rpm),
                vibration_mm_s: vibration(&trial, None),
            }
        })
        .collect()
}
