//! ML Engine for Maintenance Prediction
//!
//! Nearest-neighbour classification over a pool of labeled observations.
//!
//! ## Architecture
//! - `history`: Append-only observation pool with lazy synthetic seeding
//! - `classifier`: k-NN majority vote with per-feature distance scaling

pub mod classifier;
pub mod history;

// Re-export public types
pub use classifier::{normalized_distance, MaintenanceClassifier, DEFAULT_K};
pub use history::{HistoricalDataset, SharedHistory, DEFAULT_SEED_SAMPLES};
