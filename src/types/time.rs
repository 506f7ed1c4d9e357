//! Fixed-step simulation clock

use serde::{Deserialize, Serialize};

/// Simulation time step in seconds. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeStep(f64);

impl TimeStep {
    /// 0.1 s, the sampling interval of every load profile.
    pub const DEFAULT: Self = Self(0.1);

    /// Returns `None` for zero, negative or non-finite steps.
    pub fn new(secs: f64) -> Option<Self> {
        (secs.is_finite() && secs > 0.0).then_some(Self(secs))
    }

    pub const fn secs(self) -> f64 {
        self.0
    }

    /// Number of whole steps that fit in `duration_secs` (truncating).
    ///
    /// Zero, negative and non-finite durations give zero steps.
    pub fn steps_for(self, duration_secs: f64) -> usize {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return 0;
        }
        (duration_secs / self.0) as usize
    }

    /// Elapsed time at the start of step `index`.
    pub fn time_at(self, index: usize) -> f64 {
        index as f64 * self.0
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for TimeStep {
    type Error = String;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::new(secs).ok_or_else(|| format!("time step must be positive and finite, got {secs}"))
    }
}

impl From<TimeStep> for f64 {
    fn from(step: TimeStep) -> Self {
        step.0
    }
}
