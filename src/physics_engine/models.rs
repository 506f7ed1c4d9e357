//! Physics-based fatigue and wear models
//!
//! Everything here consumes a load profile and returns a bounded figure:
//! bearing L10 life is floored, remaining shaft life is clamped to [0, 1],
//! wheel wear is capped at a fraction of the diameter and wear-induced
//! vibration is capped at a fixed amplitude.

use std::f64::consts::PI;

use super::analytic::estimated_load;
use super::load_profile::LoadProfile;
use crate::types::{
    BearingType, CoolingType, FatigueWearReport, LubricationType, SpindleParameters,
};

// ============================================================================
// Constants
// ============================================================================

/// Dynamic load rating (kN)
const HYBRID_LOAD_RATING_KN: f64 = 50.0;
const ANGULAR_LOAD_RATING_KN: f64 = 40.0;
/// Life adjustment for the lubrication regime
const GREASE_LIFE_FACTOR: f64 = 0.8;
const OIL_AIR_LIFE_FACTOR: f64 = 1.2;
const OIL_MIST_LIFE_FACTOR: f64 = 1.0;
/// Life adjustment for liquid cooling
const LIQUID_COOLING_LIFE_FACTOR: f64 = 1.1;
/// Bearing life never reported below this (hours)
pub const MIN_BEARING_LIFE_HOURS: f64 = 1_000.0;

/// Basquin S-N curve: log10(N) = A - B·log10(σ / 1 MPa)
const SN_INTERCEPT: f64 = 20.0;
const SN_SLOPE: f64 = 6.0;
/// Shaft diameter at the critical section (m)
const SHAFT_DIAMETER_M: f64 = 0.05;
/// Overhang from bearing to wheel contact (m)
const MOMENT_ARM_M: f64 = 0.1;

/// Archard wear coefficient (m³ per N·m of sliding)
const WEAR_COEFFICIENT: f64 = 1e-6;
/// Wheel width (m)
const WHEEL_THICKNESS_M: f64 = 0.02;
/// Wear is capped at this fraction of the wheel diameter
pub const MAX_WEAR_FRACTION: f64 = 0.2;

/// Abrasive wheel density (kg/m³)
const WHEEL_DENSITY: f64 = 2_500.0;
/// Radial stiffness seen by the wheel imbalance (N/m)
const SYSTEM_STIFFNESS: f64 = 1e8;
/// Wear-induced vibration cap (mm/s)
pub const MAX_WEAR_VIBRATION: f64 = 2.0;

// ============================================================================
// Generic Fatigue Relations
// ============================================================================

/// Miner's Rule for cumulative fatigue damage
///
/// D = n / N where n = applied cycles, N = cycles to failure at that stress.
/// Summing this over every load level gives the total damage fraction.
pub fn miners_rule(cycles: u64, cycles_to_failure: f64) -> f64 {
    if cycles_to_failure.is_nan() || cycles_to_failure <= 0.0 {
        return 1.0; // Fully damaged if invalid rating
    }
    cycles as f64 / cycles_to_failure
}

/// ISO 281 bearing life calculation (L10 life in hours)
///
/// L10 = (1,000,000 / (60 * rpm)) * (C / P)^3
///
/// C and P only need to share a unit. Returns 0 for non-positive inputs.
pub fn l10_life(rpm: f64, load: f64, rating: f64) -> f64 {
    if rpm <= 0.0 || load <= 0.0 || rating <= 0.0 {
        return 0.0;
    }

    let load_ratio = rating / load;
    (1_000_000.0 / (60.0 * rpm)) * load_ratio.powi(3)
}

// ============================================================================
// Bearings
// ============================================================================

fn life_adjustment(params: &SpindleParameters) -> f64 {
    let lubrication = match params.lubrication_type {
        LubricationType::Grease => GREASE_LIFE_FACTOR,
        LubricationType::OilAir => OIL_AIR_LIFE_FACTOR,
        LubricationType::OilMist => OIL_MIST_LIFE_FACTOR,
    };
    let cooling = match params.cooling_type {
        CoolingType::Liquid => LIQUID_COOLING_LIFE_FACTOR,
        CoolingType::Air => 1.0,
    };
    lubrication * cooling
}

/// Adjusted bearing L10 life for a load profile (hours, >= 1000).
///
/// Equivalent load is mean profile load plus preload. An empty profile
/// falls back to the static load estimate.
pub fn bearing_l10_life_hours(params: &SpindleParameters, profile: &LoadProfile) -> f64 {
    let rating_kn = match params.bearing_type {
        BearingType::HybridCeramic => HYBRID_LOAD_RATING_KN,
        BearingType::AngularContact => ANGULAR_LOAD_RATING_KN,
    };
    let mean_load = profile.mean_or(estimated_load(params));
    let equivalent_kn = (mean_load + params.bearing_preload_n) / 1000.0;

    let life = l10_life(params.rpm(), equivalent_kn, rating_kn) * life_adjustment(params);
    // NaN from a degenerate configuration still lands on the floor
    if life.is_nan() {
        return MIN_BEARING_LIFE_HOURS;
    }
    life.max(MIN_BEARING_LIFE_HOURS)
}

// ============================================================================
// Shaft
// ============================================================================

/// Cycles to failure for a shaft bending stress (Pa).
fn cycles_to_failure(stress_pa: f64) -> f64 {
    let log_n = SN_INTERCEPT - SN_SLOPE * (stress_pa / 1e6).log10();
    10f64.powf(log_n)
}

/// Remaining shaft fatigue life as a fraction in [0, 1].
///
/// Each profile sample is one bending cycle; damage accumulates by
/// Miner's rule. Unloaded samples contribute nothing.
pub fn spindle_fatigue_life(profile: &LoadProfile) -> f64 {
    let section_modulus = PI * SHAFT_DIAMETER_M.powi(3) / 32.0;

    let damage: f64 = profile
        .samples()
        .iter()
        .filter(|&&load| load > 0.0)
        .map(|&load| {
            let stress = load * MOMENT_ARM_M / section_modulus;
            miners_rule(1, cycles_to_failure(stress))
        })
        .sum();

    (1.0 - damage).clamp(0.0, 1.0)
}

// ============================================================================
// Wheel
// ============================================================================

/// Wheel diameter lost over `duration_secs` of grinding (mm).
///
/// Archard wear over the peripheral sliding distance, capped at 20 % of
/// the diameter. Never negative.
pub fn wheel_wear(params: &SpindleParameters, profile: &LoadProfile, duration_secs: f64) -> f64 {
    let diameter_m = params.wheel_diameter_m();
    let mean_load = profile.mean_or(estimated_load(params));
    let peripheral_speed = PI * diameter_m * params.rpm() / 60.0;
    let sliding_distance = peripheral_speed * duration_secs.max(0.0);
    let wear_volume = WEAR_COEFFICIENT * mean_load * sliding_distance;
    let reduction = wear_volume / (PI * diameter_m * WHEEL_THICKNESS_M * 1000.0);

    let cap = params.wheel_diameter_mm * MAX_WEAR_FRACTION;
    if reduction.is_nan() {
        return 0.0;
    }
    reduction.clamp(0.0, cap.max(0.0))
}

/// Vibration from the imbalance left by `wear_mm` of wheel wear (mm/s, <= 2).
pub fn wear_induced_vibration(params: &SpindleParameters, wear_mm: f64) -> f64 {
    let diameter_m = params.wheel_diameter_m();
    let radius_m = diameter_m / 2.0;

    let wear_volume = wear_mm * PI * diameter_m * WHEEL_THICKNESS_M * 1000.0;
    let imbalance_mass = WHEEL_DENSITY * wear_volume * 1e-9;
    let wheel_mass = WHEEL_DENSITY * PI * radius_m.powi(2) * WHEEL_THICKNESS_M;
    if wheel_mass <= 0.0 {
        return 0.0;
    }
    let eccentricity = imbalance_mass * radius_m / wheel_mass;

    let omega = 2.0 * PI * params.rpm() / 60.0;
    let force = imbalance_mass * omega.powi(2) * eccentricity;
    let amplitude = force / SYSTEM_STIFFNESS * 1000.0;

    amplitude.clamp(0.0, MAX_WEAR_VIBRATION)
}

// ============================================================================
// Composite
// ============================================================================

/// Bearing, shaft and wheel figures for one profile.
pub fn fatigue_and_wear(
    params: &SpindleParameters,
    profile: &LoadProfile,
    duration_secs: f64,
) -> FatigueWearReport {
    let wheel_wear_mm = wheel_wear(params, profile, duration_secs);
    FatigueWearReport {
        bearing_life_hours: bearing_l10_life_hours(params, profile),
        spindle_life_fraction: spindle_fatigue_life(profile),
        wheel_wear_mm,
        wear_induced_vibration_mm_s: wear_induced_vibration(params, wheel_wear_mm),
    }
}
