//! Shared data structures for spindle simulation and maintenance prediction
//!
//! - `SpindleParameters` and its component enums (the run configuration)
//! - `TimeStep` (the fixed simulation clock)
//! - `Observation` / `MaintenanceRule` (classifier features and labels)
//! - Report structs returned by the physics engine and the orchestrator

mod spindle;
mod time;
mod observation;
mod report;

pub use spindle::*;
pub use time::*;
pub use observation::*;
pub use report::*;
