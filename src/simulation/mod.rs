//! Simulation runs: orchestration of the engine stages and report rendering
//!
//! `SimulationOrchestrator` owns the run configuration, the load-profile RNG
//! and a handle to the shared historical pool. Reports it returns are plain
//! data (`serde`) with a `Display` rendering of the classic text layout.

mod orchestrator;
mod render;

pub use orchestrator::{SimulationError, SimulationOrchestrator};
