//! Engine Regression Tests
//!
//! Runs the public engine stages end to end on the reference spindle and on
//! a deliberately poor configuration, checking reference values, bounds and
//! history bookkeeping.

use rand::rngs::StdRng;
use rand::SeedableRng;

use spindle_sim::config::EngineConfig;
use spindle_sim::physics_engine::{self, fatigue_and_wear, generate_load_profile, steady_state};
use spindle_sim::types::Observation;
use spindle_sim::{
    validator, BearingType, CoolingType, HistoricalDataset, LubricationType,
    MaintenanceClassifier, ParameterError, SimulationError, SimulationOrchestrator,
    SpindleParameters, SpindleType, ToolInterface,
};

fn reference() -> SpindleParameters {
    SpindleParameters::builder()
        .spindle_type(SpindleType::Motorized)
        .power_rating_kw(5.0)
        .max_speed_rpm(16_000)
        .wheel_diameter_mm(200.0)
        .bearing_type(BearingType::HybridCeramic)
        .bearing_preload_n(500.0)
        .cooling_type(CoolingType::Liquid)
        .lubrication_type(LubricationType::OilAir)
        .tool_interface(ToolInterface::Hsk)
        .alignment_tolerance_mm(0.001)
        .build()
        .expect("all fields set")
}

fn worn_out() -> SpindleParameters {
    SpindleParameters {
        spindle_type: SpindleType::BeltDriven,
        power_rating_kw: 2.0,
        max_speed_rpm: 30_000,
        wheel_diameter_mm: 900.0,
        bearing_type: BearingType::AngularContact,
        bearing_preload_n: 2_000.0,
        cooling_type: CoolingType::Air,
        lubrication_type: LubricationType::Grease,
        tool_interface: ToolInterface::PrecisionCollet,
        alignment_tolerance_mm: 0.01,
    }
}

fn seeded_config(seed: u64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.history.seed = Some(seed);
    config.simulation.rng_seed = Some(seed + 1);
    config
}

// ============================================================================
// Stage-by-stage
// ============================================================================

#[test]
fn reference_steady_state_values() {
    let params = reference();
    assert!(validator::validate(&params).is_ok());

    let s = steady_state(&params);
    assert!((s.required_power_kw - 9.6).abs() < 1e-9);
    assert!(!s.power_sufficient);
    assert!((s.vibration_mm_s - 0.576).abs() < 1e-9);
    assert_eq!(s, steady_state(&params), "steady state must be pure");
}

#[test]
fn reference_pipeline_stays_in_bounds() {
    let params = reference();
    let mut rng = StdRng::seed_from_u64(2024);
    let profile = generate_load_profile(&params, 10.0, 1.0, &mut rng);
    assert_eq!(profile.len(), 100);
    assert!(profile.samples().iter().all(|&l| l >= 0.0));

    let f = fatigue_and_wear(&params, &profile, 10.0);
    assert!(f.bearing_life_hours >= 1_000.0);
    assert!((0.0..=1.0).contains(&f.spindle_life_fraction));
    assert!(f.wheel_wear_mm <= params.wheel_diameter_mm * 0.2);
    assert!((0.0..=2.0).contains(&f.wear_induced_vibration_mm_s));
}

#[test]
fn zero_duration_is_total() {
    let params = reference();
    let mut rng = StdRng::seed_from_u64(1);
    let profile = generate_load_profile(&params, 0.0, 1.0, &mut rng);
    assert!(profile.is_empty());

    let f = fatigue_and_wear(&params, &profile, 0.0);
    assert!(f.bearing_life_hours.is_finite());
    assert_eq!(f.spindle_life_fraction, 1.0);
    assert_eq!(f.wheel_wear_mm, 0.0);
    // 0.2 m × 16 kRPM × 100 N
    assert!((profile.mean_or(physics_engine::estimated_load(&params)) - 320.0).abs() < 1e-9);
}

#[test]
fn classifier_flags_failing_observation_without_growing_pool() {
    let mut pool = HistoricalDataset::with_seed(8);
    pool.ensure_seeded();
    let classifier = MaintenanceClassifier::default();

    let healthy = Observation {
        vibration: 0.3,
        temperature: 25.0,
        load: 600.0,
        bearing_life: 45_000.0,
        spindle_life: 0.95,
        wheel_wear: 1.0,
    };
    let failing = Observation {
        vibration: 2.1,
        temperature: 48.0,
        load: 1_900.0,
        bearing_life: 1_200.0,
        spindle_life: 0.05,
        wheel_wear: 38.0,
    };
    assert!(classifier.classify(&mut pool, &failing).maintenance_needed);
    assert_eq!(pool.len(), 100, "classify must not append");
    let verdict = classifier.classify(&mut pool, &healthy);
    assert_eq!(verdict.neighbors.len(), 3);
    assert!(verdict.neighbors.iter().all(|n| n.index < 100));
}

// ============================================================================
// Orchestrated runs
// ============================================================================

#[test]
fn scenario_and_time_runs_grow_shared_history() {
    let mut orch = SimulationOrchestrator::from_config(seeded_config(10));

    let report = orch.run_scenario_report(&reference()).expect("scenario run");
    assert_eq!(report.scenarios.len(), 3);
    let sizes: Vec<usize> = report.scenarios.iter().map(|s| s.maintenance.history_size).collect();
    assert_eq!(sizes, vec![101, 102, 103]);

    let timed = orch.run_time_based_report(&reference(), 10.0).expect("time run");
    assert_eq!(timed.maintenance.history_size, 104);
    assert_eq!(timed.samples.len(), 100);
    assert_eq!(orch.runs_recorded(), 4);
}

#[test]
fn poor_configuration_is_flagged() {
    let params = worn_out();
    assert!(validator::validate(&params).is_ok());

    let mut orch = SimulationOrchestrator::from_config(seeded_config(30));
    let report = orch.run_scenario_report(&params).expect("scenario run");

    let high_speed = &report.scenarios[0];
    assert!(!high_speed.steady_checks.power_sufficient);
    assert!(!high_speed.steady_checks.vibration_acceptable);
    assert!(high_speed.maintenance.rule_label);
    assert!(report.any_maintenance_needed());
    assert!(report.to_string().contains("Warning: Excessive vibration predicted"));
}

#[test]
fn invalid_parameters_surface_as_typed_error() {
    let mut orch = SimulationOrchestrator::from_config(seeded_config(40));
    let params = SpindleParameters {
        alignment_tolerance_mm: 0.05,
        ..reference()
    };
    let err = orch.run_time_based_report(&params, 10.0).expect_err("out of range");
    assert!(matches!(
        err,
        SimulationError::InvalidParameters(ParameterError::AlignmentTolerance(_))
    ));
}

#[test]
fn json_report_carries_structured_fields() {
    let mut orch = SimulationOrchestrator::from_config(seeded_config(50));
    let report = orch.run_time_based_report(&reference(), 2.0).expect("time run");
    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["samples"].as_array().map(Vec::len), Some(20));
    assert_eq!(json["parameters"]["tool_interface"], "HSK");
    assert_eq!(json["parameters"]["bearing_type"], "Hybrid Ceramic");
    assert!(json["maintenance"]["verdict"]["neighbors"].is_array());
}
