//! Simulation Orchestrator - scenario sweeps and time-based runs
//!
//! Chains validation, steady-state physics, load profile generation, fatigue
//! and wear accumulation and the maintenance classifier into complete runs.
//!
//! ## Run Types
//!
//! - **Scenario report**: every configured scenario (speed factor, load
//!   factor, duration) is simulated in order and summarised with
//!   configuration recommendations.
//! - **Time-based report**: one profile is walked step by step, tracking
//!   load-dependent vibration and a heating spindle temperature.
//!
//! ## History
//!
//! Each scenario and each time-based run appends exactly one labeled
//! observation to the shared pool. Seeding, the vote and the append happen
//! under a single lock so concurrent runs never interleave them.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::statistics::Statistics;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{EngineConfig, ScenarioConfig};
use crate::ml_engine::{HistoricalDataset, MaintenanceClassifier, SharedHistory};
use crate::physics_engine::{self, analytic, load_profile, models, LoadProfile};
use crate::types::{
    FatigueChecks, FatigueWearReport, LabelPolicy, LabeledObservation, MaintenanceOutcome,
    Observation, Recommendation, ScenarioReport, ScenarioResult, SpindleParameters,
    SteadyStateChecks, SteadyStateReport, TimeBasedReport, TimeStepSample,
};
use crate::validator::{self, ParameterError};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("Simulation duration {duration} s is shorter than one {time_step} s time step")]
    DurationTooShort { duration: f64, time_step: f64 },

    #[error("Historical maintenance data unavailable (lock poisoned)")]
    HistoryUnavailable,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs simulations against a shared historical pool.
pub struct SimulationOrchestrator {
    config: EngineConfig,
    history: SharedHistory,
    classifier: MaintenanceClassifier,
    rng: StdRng,
    /// Observations this orchestrator has appended to history
    runs_recorded: u64,
}

impl SimulationOrchestrator {
    /// Orchestrator over an existing pool.
    ///
    /// `rng_seed` drives load profile generation; `None` falls back to
    /// `simulation.rng_seed` from config, then to OS entropy.
    pub fn new(config: EngineConfig, history: SharedHistory, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed.or(config.simulation.rng_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let classifier = MaintenanceClassifier::new(config.history.k_neighbors);
        Self {
            config,
            history,
            classifier,
            rng,
            runs_recorded: 0,
        }
    }

    /// Orchestrator with a fresh pool built from the `[history]` section.
    pub fn from_config(config: EngineConfig) -> Self {
        let pool = match config.history.seed {
            Some(seed) => HistoricalDataset::with_seed(seed),
            None => HistoricalDataset::from_entropy(),
        }
        .with_seed_samples(config.history.seed_samples)
        .with_rule(config.maintenance_rule());
        Self::new(config, pool.into_shared(), None)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle to the shared pool, for other orchestrators or inspection.
    pub fn history(&self) -> SharedHistory {
        SharedHistory::clone(&self.history)
    }

    pub fn runs_recorded(&self) -> u64 {
        self.runs_recorded
    }

    // ------------------------------------------------------------------------
    // Multi-scenario run
    // ------------------------------------------------------------------------

    /// Simulate every configured scenario and summarise them.
    pub fn run_scenario_report(
        &mut self,
        params: &SpindleParameters,
    ) -> Result<ScenarioReport, SimulationError> {
        validator::validate(params)?;

        info!(
            spindle = %params.spindle_type,
            rpm = params.max_speed_rpm,
            scenarios = self.config.scenarios.len(),
            "Starting scenario simulation"
        );

        let scenarios = self.config.scenarios.clone();
        let results = scenarios
            .iter()
            .map(|scenario| self.run_scenario(params, scenario))
            .collect::<Result<Vec<_>, _>>()?;

        let recommendations = self.recommendations(&results);
        info!(
            maintenance_flags = results.iter().filter(|r| r.maintenance.maintenance_needed()).count(),
            recommendations = recommendations.len(),
            "Scenario simulation complete"
        );

        Ok(ScenarioReport {
            generated_at: Utc::now(),
            parameters: *params,
            spindle_type_note: validator::spindle_type_note(params).to_string(),
            trial_runs: analytic::trial_runs(params),
            scenarios: results,
            recommendations,
        })
    }

    fn run_scenario(
        &mut self,
        base: &SpindleParameters,
        scenario: &ScenarioConfig,
    ) -> Result<ScenarioResult, SimulationError> {
        let params = base.with_speed_factor(scenario.speed_factor);
        let steady_state = analytic::steady_state(&params);
        let time_step = self.config.time_step();

        let profile = load_profile::generate_load_profile_with_step(
            &params,
            scenario.duration_secs,
            scenario.load_factor,
            time_step,
            &mut self.rng,
        );
        let fatigue = models::fatigue_and_wear(&params, &profile, scenario.duration_secs);

        let observation = Observation {
            vibration: steady_state.vibration_mm_s + fatigue.wear_induced_vibration_mm_s,
            temperature: steady_state.temperature_rise_c + self.config.simulation.ambient_temperature_c,
            load: profile.mean_or(steady_state.estimated_load_n),
            bearing_life: fatigue.bearing_life_hours,
            spindle_life: fatigue.spindle_life_fraction,
            wheel_wear: fatigue.wheel_wear_mm,
        };
        let maintenance = self.predict_and_record(observation)?;

        info!(
            scenario = %scenario.name,
            rpm = params.max_speed_rpm,
            vibration = format!("{:.2}", observation.vibration),
            bearing_life_h = format!("{:.0}", fatigue.bearing_life_hours),
            maintenance = maintenance.maintenance_needed(),
            "Scenario complete"
        );

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            speed_factor: scenario.speed_factor,
            load_factor: scenario.load_factor,
            duration_secs: scenario.duration_secs,
            parameters: params,
            steady_checks: self.steady_checks(&params, &steady_state),
            steady_state,
            notes: validator::assess(&params),
            time_step_secs: time_step.secs(),
            load_profile: profile.into_samples(),
            fatigue_checks: self.fatigue_checks(&params, &fatigue),
            remaining_wheel_diameter_mm: params.wheel_diameter_mm - fatigue.wheel_wear_mm,
            fatigue,
            maintenance,
        })
    }

    fn recommendations(&self, results: &[ScenarioResult]) -> Vec<Recommendation> {
        let t = &self.config.thresholds;
        let mut recs = Vec::new();
        if results.iter().any(|r| r.total_vibration() > t.vibration_limit_mm_s) {
            recs.push(Recommendation::ReduceVibration);
        }
        if results
            .iter()
            .any(|r| r.steady_state.temperature_rise_c > t.max_temperature_rise_c)
        {
            recs.push(Recommendation::ImproveCooling);
        }
        if results
            .iter()
            .any(|r| r.fatigue.bearing_life_hours < t.target_bearing_life_hours)
        {
            recs.push(Recommendation::ExtendBearingLife);
        }
        if recs.is_empty() {
            recs.push(Recommendation::ConfigurationRobust);
        }
        recs
    }

    // ------------------------------------------------------------------------
    // Time-based run
    // ------------------------------------------------------------------------

    /// Walk one load profile step by step for `duration_secs`.
    ///
    /// The spindle starts at ambient temperature and heats by a tenth of the
    /// instantaneous temperature rise per second of simulated time.
    pub fn run_time_based_report(
        &mut self,
        params: &SpindleParameters,
        duration_secs: f64,
    ) -> Result<TimeBasedReport, SimulationError> {
        validator::validate(params)?;

        let time_step = self.config.time_step();
        if time_step.steps_for(duration_secs) == 0 {
            return Err(SimulationError::DurationTooShort {
                duration: duration_secs,
                time_step: time_step.secs(),
            });
        }

        info!(
            spindle = %params.spindle_type,
            rpm = params.max_speed_rpm,
            duration_secs,
            "Starting time-based simulation"
        );

        let profile =
            load_profile::generate_load_profile_with_step(params, duration_secs, 1.0, time_step, &mut self.rng);
        let samples = self.walk_profile(params, &profile);

        let vibrations: Vec<f64> = samples.iter().map(|s| s.vibration_mm_s).collect();
        let temperatures: Vec<f64> = samples.iter().map(|s| s.temperature_c).collect();
        // steps_for() > 0 above, so neither series is empty
        let avg_vibration = vibrations.iter().mean();
        let max_vibration = Statistics::max(vibrations.iter());
        let avg_temperature = temperatures.iter().mean();
        let max_temperature = Statistics::max(temperatures.iter());

        let fatigue = models::fatigue_and_wear(params, &profile, duration_secs);
        let observation = Observation {
            vibration: max_vibration + fatigue.wear_induced_vibration_mm_s,
            temperature: max_temperature,
            load: profile.mean_or(physics_engine::estimated_load(params)),
            bearing_life: fatigue.bearing_life_hours,
            spindle_life: fatigue.spindle_life_fraction,
            wheel_wear: fatigue.wheel_wear_mm,
        };
        let maintenance = self.predict_and_record(observation)?;

        info!(
            steps = samples.len(),
            max_vibration = format!("{max_vibration:.2}"),
            max_temperature = format!("{max_temperature:.1}"),
            maintenance = maintenance.maintenance_needed(),
            "Time-based simulation complete"
        );

        Ok(TimeBasedReport {
            generated_at: Utc::now(),
            parameters: *params,
            duration_secs,
            time_step_secs: time_step.secs(),
            log_interval_steps: self.config.simulation.time_log_interval_steps,
            samples,
            avg_vibration_mm_s: avg_vibration,
            max_vibration_mm_s: max_vibration,
            avg_temperature_c: avg_temperature,
            max_temperature_c: max_temperature,
            fatigue_checks: self.fatigue_checks(params, &fatigue),
            remaining_wheel_diameter_mm: params.wheel_diameter_mm - fatigue.wheel_wear_mm,
            fatigue,
            maintenance,
        })
    }

    fn walk_profile(&self, params: &SpindleParameters, profile: &LoadProfile) -> Vec<TimeStepSample> {
        let step_secs = profile.time_step().secs();
        let log_interval = self.config.simulation.time_log_interval_steps.max(1);
        let mut temperature = self.config.simulation.ambient_temperature_c;

        profile
            .iter_timed()
            .enumerate()
            .map(|(i, (time_secs, load))| {
                let vibration = analytic::vibration(params, Some(load));
                temperature += analytic::temperature_rise(params, Some(load)) * step_secs / 10.0;
                if i % log_interval == 0 {
                    debug!(
                        t = format!("{time_secs:.1}"),
                        load = format!("{load:.0}"),
                        vibration = format!("{vibration:.2}"),
                        temperature = format!("{temperature:.1}"),
                        "Time step"
                    );
                }
                TimeStepSample {
                    time_secs,
                    load_n: load,
                    vibration_mm_s: vibration,
                    temperature_c: temperature,
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------------

    fn steady_checks(&self, params: &SpindleParameters, s: &SteadyStateReport) -> SteadyStateChecks {
        let t = &self.config.thresholds;
        SteadyStateChecks {
            power_sufficient: s.power_sufficient,
            preload_optimal: validator::preload_optimal(params),
            thermal_acceptable: s.temperature_rise_c <= t.max_temperature_rise_c,
            vibration_acceptable: s.vibration_mm_s <= t.vibration_limit_mm_s,
            alignment_within_spec: validator::alignment_within_spec(params),
        }
    }

    fn fatigue_checks(&self, params: &SpindleParameters, f: &FatigueWearReport) -> FatigueChecks {
        let t = &self.config.thresholds;
        let remaining = params.wheel_diameter_mm - f.wheel_wear_mm;
        FatigueChecks {
            bearing_life_acceptable: f.bearing_life_hours >= t.target_bearing_life_hours,
            spindle_life_acceptable: f.spindle_life_fraction >= t.min_spindle_life_fraction,
            wheel_condition_acceptable: remaining
                >= params.wheel_diameter_mm * t.min_remaining_wheel_fraction,
            wear_vibration_acceptable: f.wear_induced_vibration_mm_s <= t.wear_vibration_limit_mm_s,
        }
    }

    // ------------------------------------------------------------------------
    // Prediction and recording
    // ------------------------------------------------------------------------

    /// Vote on `observation`, then append it to history under one lock.
    fn predict_and_record(
        &mut self,
        observation: Observation,
    ) -> Result<MaintenanceOutcome, SimulationError> {
        let rule = self.config.maintenance_rule();
        let policy = self.config.history.label_policy;

        let mut pool = match self.history.lock() {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "History mutex poisoned, maintenance prediction halted");
                return Err(SimulationError::HistoryUnavailable);
            }
        };

        let verdict = self.classifier.classify(&mut pool, &observation);
        let rule_label = rule.needs_maintenance(&observation);
        let recorded_label = match policy {
            LabelPolicy::ThresholdRule => rule_label,
            LabelPolicy::ClassifierVerdict => verdict.maintenance_needed,
        };
        if recorded_label != verdict.maintenance_needed {
            debug!(
                rule_label,
                classifier = verdict.maintenance_needed,
                "Threshold rule and classifier disagree"
            );
        }

        pool.append(LabeledObservation {
            observation,
            maintenance_needed: recorded_label,
        });
        let history_size = pool.len();
        drop(pool);

        self.runs_recorded += 1;
        Ok(MaintenanceOutcome {
            observation,
            verdict,
            rule_label,
            recorded_label,
            history_size,
        })
    }
}
