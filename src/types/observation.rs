//! Observation vectors for nearest-neighbour maintenance prediction

use serde::{Deserialize, Serialize};

/// Six-feature summary of one simulation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Total vibration velocity (mm/s)
    pub vibration: f64,
    /// Spindle temperature (°C)
    pub temperature: f64,
    /// Mean radial load (N)
    pub load: f64,
    /// Bearing L10 life (hours)
    pub bearing_life: f64,
    /// Remaining shaft fatigue life (fraction 0-1)
    pub spindle_life: f64,
    /// Wheel diameter lost to wear (mm)
    pub wheel_wear: f64,
}

impl Observation {
    /// Feature values in a fixed order matching `feature_scales::ALL`.
    pub fn features(&self) -> [f64; 6] {
        [
            self.vibration,
            self.temperature,
            self.load,
            self.bearing_life,
            self.spindle_life,
            self.wheel_wear,
        ]
    }
}

/// Typical range of each feature, used to normalise distances.
pub mod feature_scales {
    pub const VIBRATION: f64 = 2.0;
    pub const TEMPERATURE: f64 = 30.0;
    pub const LOAD: f64 = 1500.0;
    pub const BEARING_LIFE: f64 = 50_000.0;
    pub const SPINDLE_LIFE: f64 = 1.0;
    pub const WHEEL_WEAR: f64 = 40.0;

    /// Same order as `Observation::features()`.
    pub const ALL: [f64; 6] = [VIBRATION, TEMPERATURE, LOAD, BEARING_LIFE, SPINDLE_LIFE, WHEEL_WEAR];
}

/// Observation paired with its maintenance label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledObservation {
    pub observation: Observation,
    pub maintenance_needed: bool,
}

/// Composite threshold rule deciding whether an observation needs maintenance.
///
/// Any single exceeded limit flags the observation. Used both to label
/// synthetic history and to label completed runs before they are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRule {
    /// Vibration above this flags maintenance (mm/s)
    pub vibration_limit: f64,
    /// Bearing life below this flags maintenance (hours)
    pub min_bearing_life_hours: f64,
    /// Shaft life below this flags maintenance (fraction)
    pub min_spindle_life: f64,
    /// Wheel wear above this flags maintenance (mm)
    pub wheel_wear_limit_mm: f64,
}

impl Default for MaintenanceRule {
    fn default() -> Self {
        Self {
            vibration_limit: 1.0,
            min_bearing_life_hours: 5000.0,
            min_spindle_life: 0.5,
            wheel_wear_limit_mm: 20.0,
        }
    }
}

impl MaintenanceRule {
    pub fn needs_maintenance(&self, obs: &Observation) -> bool {
        obs.vibration > self.vibration_limit
            || obs.bearing_life < self.min_bearing_life_hours
            || obs.spindle_life < self.min_spindle_life
            || obs.wheel_wear > self.wheel_wear_limit_mm
    }

    pub fn label(&self, observation: Observation) -> LabeledObservation {
        LabeledObservation {
            observation,
            maintenance_needed: self.needs_maintenance(&observation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> Observation {
        Observation {
            vibration: 0.5,
            temperature: 35.0,
            load: 800.0,
            bearing_life: 30_000.0,
            spindle_life: 0.9,
            wheel_wear: 2.0,
        }
    }

    #[test]
    fn test_healthy_observation_passes_rule() {
        assert!(!MaintenanceRule::default().needs_maintenance(&healthy()));
    }

    #[test]
    fn test_any_single_limit_flags_maintenance() {
        let rule = MaintenanceRule::default();
        let cases = [
            Observation { vibration: 1.01, ..healthy() },
            Observation { bearing_life: 4_999.0, ..healthy() },
            Observation { spindle_life: 0.49, ..healthy() },
            Observation { wheel_wear: 20.5, ..healthy() },
        ];
        for obs in cases {
            assert!(rule.needs_maintenance(&obs), "should flag {obs:?}");
        }
    }

    #[test]
    fn test_limits_are_exclusive() {
        let rule = MaintenanceRule::default();
        let edge = Observation {
            vibration: 1.0,
            bearing_life: 5_000.0,
            spindle_life: 0.5,
            wheel_wear: 20.0,
            ..healthy()
        };
        assert!(!rule.needs_maintenance(&edge));
    }
}
