//! Stochastic radial load profiles
//!
//! A profile is the static load estimate modulated by a 2 s sinusoid
//! (±30 %), with random 1.5× spikes on about one sample in ten. The random
//! source is passed in so seeded runs are reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::f64::consts::PI;

use super::analytic::estimated_load;
use crate::types::{SpindleParameters, TimeStep};

/// Period of the cyclic load variation (s)
const LOAD_CYCLE_PERIOD_SECS: f64 = 2.0;
/// Peak relative amplitude of the cyclic variation
const LOAD_VARIATION_AMPLITUDE: f64 = 0.3;
/// Per-sample probability of a load spike
pub const SPIKE_PROBABILITY: f64 = 0.1;
/// Load multiplier during a spike
pub const SPIKE_FACTOR: f64 = 1.5;

/// Evenly sampled radial load history (N).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    time_step: TimeStep,
    samples: Vec<f64>,
}

impl LoadProfile {
    pub fn new(time_step: TimeStep, samples: Vec<f64>) -> Self {
        Self { time_step, samples }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn time_step(&self) -> TimeStep {
        self.time_step
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean load, or `None` for an empty profile.
    pub fn mean(&self) -> Option<f64> {
        (!self.samples.is_empty()).then(|| self.samples.iter().mean())
    }

    /// Mean load, falling back to `fallback` for an empty profile.
    pub fn mean_or(&self, fallback: f64) -> f64 {
        self.mean().unwrap_or(fallback)
    }

    /// Peak load, or `None` for an empty profile.
    pub fn max(&self) -> Option<f64> {
        (!self.samples.is_empty()).then(|| Statistics::max(self.samples.iter()))
    }

    /// `(time, load)` pairs.
    pub fn iter_timed(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &load)| (self.time_step.time_at(i), load))
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Generate a load profile at the default 0.1 s step.
///
/// Produces `floor(duration_secs / 0.1)` samples; zero, negative or
/// non-finite durations give an empty profile.
pub fn generate_load_profile<R: Rng + ?Sized>(
    params: &SpindleParameters,
    duration_secs: f64,
    load_scale: f64,
    rng: &mut R,
) -> LoadProfile {
    generate_load_profile_with_step(params, duration_secs, load_scale, TimeStep::DEFAULT, rng)
}

/// Generate a load profile at an explicit time step.
pub fn generate_load_profile_with_step<R: Rng + ?Sized>(
    params: &SpindleParameters,
    duration_secs: f64,
    load_scale: f64,
    time_step: TimeStep,
    rng: &mut R,
) -> LoadProfile {
    let base_load = estimated_load(params) * load_scale;
    let steps = time_step.steps_for(duration_secs);

    let samples = (0..steps)
        .map(|i| {
            let t = time_step.time_at(i);
            let variation = (2.0 * PI * t / LOAD_CYCLE_PERIOD_SECS).sin() * LOAD_VARIATION_AMPLITUDE;
            let mut load = base_load * (1.0 + variation);
            if rng.gen_bool(SPIKE_PROBABILITY) {
                load *= SPIKE_FACTOR;
            }
            load.max(0.0)
        })
        .collect();

    LoadProfile::new(time_step, samples)
}
