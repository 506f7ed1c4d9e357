//! Grinding Spindle Simulation CLI
//!
//! Runs the multi-scenario sweep or a single time-based run for one spindle
//! configuration and prints the report to stdout. Logs go to stderr.
//!
//! # Usage
//! ```bash
//! ./spindle-sim --spindle-type Motorized --power 5 --speed 16000 --wheel-diameter 200 \
//!     --bearing "Hybrid Ceramic" --preload 500 --cooling Liquid --lubrication Oil-Air \
//!     --tool-interface HSK --alignment 0.001 --mode time --duration 10 --seed 7
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use spindle_sim::config::{self, defaults, EngineConfig};
use spindle_sim::types::{
    BearingType, CoolingType, LubricationType, SpindleParameters, SpindleType, ToolInterface,
};
use spindle_sim::SimulationOrchestrator;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Every configured scenario plus recommendations
    Scenarios,
    /// One step-by-step run over a single load profile
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "spindle-sim")]
#[command(about = "Grinding spindle simulation and maintenance prediction")]
#[command(version)]
struct Args {
    /// Spindle type: Belt-Driven, Direct-Drive or Motorized
    #[arg(long)]
    spindle_type: SpindleType,

    /// Rated motor power (kW, 0.5-50)
    #[arg(long = "power")]
    power_rating_kw: f64,

    /// Maximum spindle speed (RPM, 1000-30000)
    #[arg(long = "speed")]
    max_speed_rpm: u32,

    /// Grinding wheel diameter (mm, 50-1000)
    #[arg(long = "wheel-diameter")]
    wheel_diameter_mm: f64,

    /// Bearing type: "Angular Contact" or "Hybrid Ceramic"
    #[arg(long = "bearing")]
    bearing_type: BearingType,

    /// Axial bearing preload (N, 100-2000)
    #[arg(long = "preload")]
    bearing_preload_n: f64,

    /// Cooling type: Liquid or Air
    #[arg(long = "cooling")]
    cooling_type: CoolingType,

    /// Lubrication: Grease, Oil-Mist or Oil-Air
    #[arg(long = "lubrication")]
    lubrication_type: LubricationType,

    /// Tool interface: "Precision Collet", "Hydraulic Chuck" or HSK
    #[arg(long)]
    tool_interface: ToolInterface,

    /// Spindle-to-wheel alignment tolerance (mm, 0.0001-0.01)
    #[arg(long = "alignment")]
    alignment_tolerance_mm: f64,

    /// Run type
    #[arg(short, long, value_enum, default_value = "scenarios")]
    mode: Mode,

    /// Duration of a time-based run (seconds)
    #[arg(short, long, default_value_t = defaults::RUN_DURATION_SECS)]
    duration: f64,

    /// Random seed for load profiles and synthetic history
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Engine config file (overrides SPINDLE_SIM_CONFIG and ./spindle_sim.toml)
    #[arg(short, long, env = "SPINDLE_SIM_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn parameters(&self) -> SpindleParameters {
        SpindleParameters {
            spindle_type: self.spindle_type,
            power_rating_kw: self.power_rating_kw,
            max_speed_rpm: self.max_speed_rpm,
            wheel_diameter_mm: self.wheel_diameter_mm,
            bearing_type: self.bearing_type,
            bearing_preload_n: self.bearing_preload_n,
            cooling_type: self.cooling_type,
            lubrication_type: self.lubrication_type,
            tool_interface: self.tool_interface,
            alignment_tolerance_mm: self.alignment_tolerance_mm,
        }
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let mut engine = match &self.config {
            Some(path) => EngineConfig::load_from_file(path)
                .with_context(|| format!("Failed to load engine config from {}", path.display()))?,
            None => EngineConfig::load(),
        };
        // One seed drives both the load profiles and the synthetic history
        if let Some(seed) = self.seed {
            engine.simulation.rng_seed = Some(seed);
            engine.history.seed = Some(seed);
        }
        Ok(engine)
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params = args.parameters();

    config::init(args.engine_config()?);
    let engine = config::get().clone();
    info!(
        scenarios = engine.scenarios.len(),
        k = engine.history.k_neighbors,
        seeded = args.seed.is_some(),
        "Engine configured"
    );

    let mut orchestrator = SimulationOrchestrator::from_config(engine);

    let output = match (args.mode, args.format) {
        (Mode::Scenarios, format) => {
            let report = orchestrator
                .run_scenario_report(&params)
                .context("Scenario simulation failed")?;
            match format {
                OutputFormat::Text => report.to_string(),
                OutputFormat::Json => serde_json::to_string_pretty(&report)
                    .context("Failed to serialize scenario report")?,
            }
        }
        (Mode::Time, format) => {
            let report = orchestrator
                .run_time_based_report(&params, args.duration)
                .context("Time-based simulation failed")?;
            match format {
                OutputFormat::Text => report.to_string(),
                OutputFormat::Json => serde_json::to_string_pretty(&report)
                    .context("Failed to serialize time-based report")?,
            }
        }
    };

    println!("{output}");
    Ok(())
}
