//! Historical Observation Pool
//!
//! Labeled observations the maintenance classifier votes over. The pool is
//! seeded lazily with synthetic samples the first time it is queried, then
//! grows by one entry per completed simulation run. Entries are never
//! removed, so growth is monotonic for the life of the process.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::types::{LabeledObservation, MaintenanceRule, Observation};

/// Synthetic samples generated on first use
pub const DEFAULT_SEED_SAMPLES: usize = 100;

/// Pool shared between orchestrator runs.
pub type SharedHistory = Arc<Mutex<HistoricalDataset>>;

/// Append-only pool of labeled observations.
#[derive(Debug)]
pub struct HistoricalDataset {
    entries: Vec<LabeledObservation>,
    rng: StdRng,
    seed_samples: usize,
    rule: MaintenanceRule,
}

impl HistoricalDataset {
    /// Empty pool whose synthetic seed data is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Empty pool seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            entries: Vec::new(),
            rng,
            seed_samples: DEFAULT_SEED_SAMPLES,
            rule: MaintenanceRule::default(),
        }
    }

    /// Override how many synthetic samples `ensure_seeded` generates.
    pub fn with_seed_samples(mut self, seed_samples: usize) -> Self {
        self.seed_samples = seed_samples;
        self
    }

    /// Override the rule used to label synthetic samples.
    pub fn with_rule(mut self, rule: MaintenanceRule) -> Self {
        self.rule = rule;
        self
    }

    /// Wrap in the `Arc<Mutex<_>>` the orchestrator expects.
    pub fn into_shared(self) -> SharedHistory {
        Arc::new(Mutex::new(self))
    }

    /// Fill an empty pool with synthetic labeled samples.
    ///
    /// Returns how many samples were added; a non-empty pool is left
    /// untouched and 0 is returned.
    pub fn ensure_seeded(&mut self) -> usize {
        if !self.entries.is_empty() {
            return 0;
        }

        for _ in 0..self.seed_samples {
            let observation = synthetic_observation(&mut self.rng);
            self.entries.push(self.rule.label(observation));
        }

        info!(
            samples = self.seed_samples,
            maintenance_ratio = format!("{:.2}", self.maintenance_ratio()),
            "Seeded historical pool with synthetic observations"
        );
        self.seed_samples
    }

    /// Append one labeled observation. Never deduplicates.
    pub fn append(&mut self, entry: LabeledObservation) {
        self.entries.push(entry);
        debug!(
            size = self.entries.len(),
            maintenance_needed = entry.maintenance_needed,
            "Recorded observation in history"
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LabeledObservation> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[LabeledObservation] {
        &self.entries
    }

    /// Fraction of entries labeled "maintenance needed" (0 when empty).
    pub fn maintenance_ratio(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let flagged = self.entries.iter().filter(|e| e.maintenance_needed).count();
        flagged as f64 / self.entries.len() as f64
    }
}

/// Uniform draw over the operating envelope seen in the field.
fn synthetic_observation<R: Rng + ?Sized>(rng: &mut R) -> Observation {
    Observation {
        vibration: 0.2 + rng.gen::<f64>() * 2.0,
        temperature: 20.0 + rng.gen::<f64>() * 30.0,
        load: 500.0 + rng.gen::<f64>() * 1500.0,
        bearing_life: 1000.0 + rng.gen::<f64>() * 49_000.0,
        spindle_life: rng.gen::<f64>(),
        wheel_wear: rng.gen::<f64>() * 40.0,
    }
}
