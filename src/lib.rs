//! Spindle Sim: Grinding Spindle Simulation and Maintenance Prediction
//!
//! Physics-informed simulation of a grinding spindle under stochastic load,
//! with nearest-neighbour prediction of maintenance need.
//!
//! ## Architecture
//!
//! - **Validator**: Admissible parameter ranges and advisory design notes
//! - **Physics Engine**: Closed-form steady-state models, load profiles,
//!   bearing/shaft fatigue and wheel wear
//! - **ML Engine**: Growing historical pool and k-nearest-neighbour vote
//! - **Simulation**: Scenario sweeps and time-based runs tying it together

pub mod config;
pub mod ml_engine;
pub mod physics_engine;
pub mod simulation;
pub mod types;
pub mod validator;

// Re-export engine configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    BearingType, CoolingType, LabelPolicy, LubricationType, MaintenanceOutcome, Observation,
    ScenarioReport, ScenarioResult, SpindleParameters, SpindleType, TimeBasedReport, TimeStep,
    ToolInterface,
};

// Re-export ML Engine types
pub use ml_engine::{HistoricalDataset, MaintenanceClassifier, SharedHistory};

// Re-export the orchestrator
pub use simulation::{SimulationError, SimulationOrchestrator};

pub use validator::ParameterError;
