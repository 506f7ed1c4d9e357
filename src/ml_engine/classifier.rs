//! k-Nearest-Neighbour Maintenance Classifier
//!
//! Majority vote over the k pool members closest to a query observation.
//! Each feature difference is divided by that feature's typical range
//! before the Euclidean norm is taken, so no single unit dominates.

use tracing::debug;

use super::history::HistoricalDataset;
use crate::types::{feature_scales, MaintenanceVerdict, Neighbor, Observation};

/// Neighbours consulted per vote
pub const DEFAULT_K: usize = 3;

/// Normalised Euclidean distance between two observations.
pub fn normalized_distance(a: &Observation, b: &Observation) -> f64 {
    a.features()
        .iter()
        .zip(b.features().iter())
        .zip(feature_scales::ALL.iter())
        .map(|((x, y), scale)| {
            let d = (x - y) / scale;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Nearest-neighbour vote over a historical pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceClassifier {
    k: usize,
}

impl Default for MaintenanceClassifier {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

impl MaintenanceClassifier {
    /// `k` of zero is raised to one.
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The k closest pool members, nearest first.
    ///
    /// Sorting is stable, so equidistant members keep insertion order.
    pub fn nearest(&self, pool: &HistoricalDataset, query: &Observation) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = pool
            .iter()
            .enumerate()
            .map(|(index, entry)| Neighbor {
                index,
                distance: normalized_distance(&entry.observation, query),
                maintenance_needed: entry.maintenance_needed,
            })
            .collect();

        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(self.k);
        neighbors
    }

    /// Seed the pool if needed, then vote.
    ///
    /// Maintenance is predicted when more than half of the k neighbours are
    /// labeled as needing it. With fewer than k members, the absent
    /// neighbours count as "no".
    pub fn classify(&self, pool: &mut HistoricalDataset, query: &Observation) -> MaintenanceVerdict {
        pool.ensure_seeded();

        let neighbors = self.nearest(pool, query);
        let votes_for = neighbors.iter().filter(|n| n.maintenance_needed).count();
        let maintenance_needed = votes_for > self.k / 2;

        debug!(
            k = self.k,
            votes_for,
            pool_size = pool.len(),
            maintenance_needed,
            "Maintenance vote"
        );

        MaintenanceVerdict {
            maintenance_needed,
            votes_for,
            neighbors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LabeledObservation, MaintenanceRule};

    fn obs(vibration: f64, bearing_life: f64) -> Observation {
        Observation {
            vibration,
            temperature: 30.0,
            load: 800.0,
            bearing_life,
            spindle_life: 0.9,
            wheel_wear: 1.0,
        }
    }

    fn labeled(observation: Observation, maintenance_needed: bool) -> LabeledObservation {
        LabeledObservation {
            observation,
            maintenance_needed,
        }
    }

    fn manual_pool(entries: &[LabeledObservation]) -> HistoricalDataset {
        let mut pool = HistoricalDataset::with_seed(0).with_seed_samples(0);
        for &e in entries {
            pool.append(e);
        }
        pool
    }

    #[test]
    fn test_distance_is_scaled_per_feature() {
        let a = obs(0.5, 30_000.0);
        assert_eq!(normalized_distance(&a, &a), 0.0);
        // 2 mm/s vibration gap and 50 000 h life gap both count as 1.0
        let b = obs(2.5, 30_000.0);
        let c = obs(0.5, 80_000.0);
        assert!((normalized_distance(&a, &b) - 1.0).abs() < 1e-12);
        assert!((normalized_distance(&a, &c) - 1.0).abs() < 1e-12);
        assert!((normalized_distance(&b, &c) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_querying_member_returns_its_label_when_it_wins() {
        let far = obs(2.0, 2_000.0);
        let near = obs(0.4, 40_000.0);
        let mut pool = manual_pool(&[
            labeled(near, false),
            labeled(obs(0.41, 40_000.0), false),
            labeled(far, true),
            labeled(obs(2.01, 2_000.0), true),
            labeled(obs(2.02, 2_000.0), true),
        ]);

        let verdict = MaintenanceClassifier::default().classify(&mut pool, &near);
        assert!(!verdict.maintenance_needed);
        assert_eq!(verdict.neighbors[0].index, 0);
        assert_eq!(verdict.neighbors[0].distance, 0.0);

        let verdict = MaintenanceClassifier::default().classify(&mut pool, &far);
        assert!(verdict.maintenance_needed);
        assert_eq!(verdict.votes_for, 3);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let q = obs(1.0, 20_000.0);
        let pool = manual_pool(&[
            labeled(obs(1.5, 20_000.0), true),
            labeled(obs(0.5, 20_000.0), false),
            labeled(obs(1.5, 20_000.0), false),
            labeled(obs(0.5, 20_000.0), true),
        ]);
        let indices: Vec<usize> = MaintenanceClassifier::default()
            .nearest(&pool, &q)
            .iter()
            .map(|n| n.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_majority_threshold() {
        let q = obs(0.5, 30_000.0);
        let two_of_three = manual_pool(&[
            labeled(obs(0.5, 30_000.0), true),
            labeled(obs(0.5, 30_000.0), true),
            labeled(obs(0.5, 30_000.0), false),
        ]);
        let mut pool = two_of_three;
        let verdict = MaintenanceClassifier::new(3).classify(&mut pool, &q);
        assert!(verdict.maintenance_needed);
        assert_eq!(verdict.votes_for, 2);

        // k = 4 needs three "yes" votes
        let mut pool = manual_pool(&[
            labeled(obs(0.5, 30_000.0), true),
            labeled(obs(0.5, 30_000.0), true),
            labeled(obs(0.5, 30_000.0), false),
            labeled(obs(0.5, 30_000.0), false),
        ]);
        assert!(!MaintenanceClassifier::new(4).classify(&mut pool, &q).maintenance_needed);
    }

    #[test]
    fn test_classify_seeds_empty_pool() {
        let mut pool = HistoricalDataset::with_seed(5);
        let verdict = MaintenanceClassifier::default().classify(&mut pool, &obs(0.5, 30_000.0));
        assert_eq!(pool.len(), 100);
        assert_eq!(verdict.neighbors.len(), 3);
        assert!(verdict.neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_zero_k_is_raised_to_one() {
        assert_eq!(MaintenanceClassifier::new(0).k(), 1);
    }

    #[test]
    fn test_verdict_on_clearly_failing_observation() {
        let mut pool = HistoricalDataset::with_seed(11).with_rule(MaintenanceRule::default());
        let failing = Observation {
            vibration: 2.1,
            temperature: 48.0,
            load: 1_900.0,
            bearing_life: 1_500.0,
            spindle_life: 0.1,
            wheel_wear: 38.0,
        };
        assert!(MaintenanceClassifier::default().classify(&mut pool, &failing).maintenance_needed);
    }
}
