//! Plain-text rendering of simulation reports

use std::fmt::{self, Display, Formatter};

use crate::types::{
    FatigueChecks, FatigueWearReport, MaintenanceOutcome, ScenarioReport, ScenarioResult,
    SpindleParameters, TimeBasedReport,
};
use crate::validator;

fn pick(ok: bool, pass: &'static str, fail: &'static str) -> &'static str {
    if ok {
        pass
    } else {
        fail
    }
}

/// Fatigue, wheel wear and maintenance sections shared by both report types.
fn write_life_sections(
    f: &mut Formatter<'_>,
    params: &SpindleParameters,
    fatigue: &FatigueWearReport,
    checks: &FatigueChecks,
    remaining_wheel_mm: f64,
    maintenance: &MaintenanceOutcome,
) -> fmt::Result {
    writeln!(f, "Fatigue Analysis:")?;
    writeln!(f, "Bearing L10 Life: {:.0} hours", fatigue.bearing_life_hours)?;
    writeln!(
        f,
        "{}",
        pick(checks.bearing_life_acceptable, "Bearing life acceptable", "Warning: Short bearing life predicted")
    )?;
    writeln!(f, "Spindle Shaft Remaining Life: {:.1}%", fatigue.spindle_life_fraction * 100.0)?;
    writeln!(
        f,
        "{}",
        pick(
            checks.spindle_life_acceptable,
            "Spindle shaft life acceptable",
            "Warning: Spindle shaft may fail prematurely"
        )
    )?;
    writeln!(f)?;

    writeln!(f, "Grinding Wheel Wear Analysis:")?;
    writeln!(f, "Initial Wheel Diameter: {:.1} mm", params.wheel_diameter_mm)?;
    writeln!(f, "Remaining Wheel Diameter: {remaining_wheel_mm:.1} mm")?;
    writeln!(f, "Wear-Induced Vibration: {:.2} mm/s", fatigue.wear_induced_vibration_mm_s)?;
    writeln!(
        f,
        "{}",
        pick(checks.wheel_condition_acceptable, "Wheel condition acceptable", "Warning: Excessive wheel wear detected")
    )?;
    writeln!(
        f,
        "{}",
        pick(
            checks.wear_vibration_acceptable,
            "Wear-induced vibration within limits",
            "Warning: Increased vibration due to wheel imbalance"
        )
    )?;
    writeln!(f)?;

    writeln!(f, "Maintenance Prediction:")?;
    if maintenance.maintenance_needed() {
        writeln!(f, "Maintenance Needed: Yes (e.g., bearing replacement, wheel dressing)")
    } else {
        writeln!(f, "Maintenance Needed: No")
    }
}

// ============================================================================
// Scenario Report
// ============================================================================

impl Display for ScenarioResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        let s = &self.steady_state;
        let c = &self.steady_checks;

        writeln!(f, "=== Scenario: {} ===", self.name)?;
        writeln!(
            f,
            "Power Analysis: {:.2} kW required, {:.2} kW provided",
            s.required_power_kw, s.power_rating_kw
        )?;
        writeln!(
            f,
            "{}",
            pick(c.power_sufficient, "Power rating sufficient", "Warning: Power rating may be insufficient")
        )?;
        writeln!(f)?;

        writeln!(f, "Bearing Analysis:")?;
        writeln!(f, "{}", validator::bearing_note(p))?;
        writeln!(f, "Bearing Preload: {:.0} N", p.bearing_preload_n)?;
        writeln!(
            f,
            "{}",
            pick(
                c.preload_optimal,
                "Preload within optimal range",
                "Warning: Preload may cause excessive heat or play"
            )
        )?;
        writeln!(f)?;

        writeln!(f, "Thermal Analysis:")?;
        writeln!(f, "Estimated temperature rise: {:.1}°C", s.temperature_rise_c)?;
        writeln!(f, "Thermal expansion: {:.4} mm", s.thermal_expansion_mm)?;
        writeln!(
            f,
            "{}",
            pick(c.thermal_acceptable, "Thermal performance acceptable", "Warning: Potential thermal issues")
        )?;
        writeln!(f)?;

        writeln!(f, "Vibration Analysis:")?;
        writeln!(f, "Estimated vibration level: {:.2} mm/s", s.vibration_mm_s)?;
        writeln!(f, "Resonance frequency: {:.0} Hz", s.resonance_frequency_hz)?;
        writeln!(
            f,
            "{}",
            pick(
                c.vibration_acceptable,
                "Vibration within ISO 1940 G1 standards",
                "Warning: Excessive vibration predicted"
            )
        )?;
        writeln!(f)?;

        writeln!(f, "Alignment Analysis:")?;
        writeln!(f, "Alignment tolerance: {:.4} mm", p.alignment_tolerance_mm)?;
        writeln!(
            f,
            "{}",
            pick(
                c.alignment_within_spec,
                "Alignment within specifications",
                "Warning: Alignment may cause chatter marks"
            )
        )?;
        writeln!(f)?;

        writeln!(f, "Tool Interface Analysis:")?;
        writeln!(f, "Tool Interface: {}", p.tool_interface)?;
        writeln!(f, "{}", validator::tool_interface_note(p))?;
        writeln!(f)?;

        writeln!(f, "Dynamic Load Profile:")?;
        writeln!(f, "Dynamic Load (N) over {:.1} seconds:", self.duration_secs)?;
        for (i, load) in self.load_profile.iter().enumerate() {
            writeln!(f, "t={:.1} s: {load:.0} N", i as f64 * self.time_step_secs)?;
        }
        writeln!(f)?;

        write_life_sections(
            f,
            p,
            &self.fatigue,
            &self.fatigue_checks,
            self.remaining_wheel_diameter_mm,
            &self.maintenance,
        )
    }
}

impl Display for ScenarioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Systematic Spindle Simulation Results ===")?;
        for trial in &self.trial_runs {
            writeln!(
                f,
                "Trial at {} RPM: Power = {:.2} kW, Vibration = {:.2} mm/s",
                trial.speed_rpm, trial.required_power_kw, trial.vibration_mm_s
            )?;
        }
        writeln!(f)?;

        for scenario in &self.scenarios {
            writeln!(f, "{scenario}")?;
        }

        writeln!(f, "=== Comprehensive Analysis ===")?;
        writeln!(f, "Spindle Type: {}", self.parameters.spindle_type)?;
        writeln!(f, "{}", self.spindle_type_note)?;
        writeln!(f)?;

        writeln!(f, "Summary Across Scenarios:")?;
        for s in &self.scenarios {
            writeln!(f, "Scenario: {}", s.name)?;
            writeln!(f, " - Vibration: {:.2} mm/s", s.total_vibration())?;
            writeln!(f, " - Temperature Rise: {:.1}°C", s.steady_state.temperature_rise_c)?;
            writeln!(f, " - Bearing Life: {:.0} hours", s.fatigue.bearing_life_hours)?;
            writeln!(f, " - Spindle Life: {:.1}%", s.fatigue.spindle_life_fraction * 100.0)?;
            writeln!(f, " - Wheel Wear: {:.1} mm", s.fatigue.wheel_wear_mm)?;
        }
        writeln!(f)?;

        writeln!(f, "Recommendations:")?;
        for rec in &self.recommendations {
            writeln!(f, " - {}", rec.message())?;
        }
        Ok(())
    }
}

// ============================================================================
// Time-Based Report
// ============================================================================

impl Display for TimeBasedReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Time-Based Spindle Simulation (Duration: {:.1} s) ===", self.duration_secs)?;
        for sample in self.samples.iter().step_by(self.log_interval_steps.max(1)) {
            writeln!(
                f,
                "t={:.1} s: Vibration={:.2} mm/s, Temperature={:.1}°C, Load={:.0} N",
                sample.time_secs, sample.vibration_mm_s, sample.temperature_c, sample.load_n
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Summary:")?;
        writeln!(f, "Average Vibration: {:.2} mm/s", self.avg_vibration_mm_s)?;
        writeln!(f, "Maximum Vibration: {:.2} mm/s", self.max_vibration_mm_s)?;
        writeln!(f, "Average Temperature: {:.1}°C", self.avg_temperature_c)?;
        writeln!(f, "Maximum Temperature: {:.1}°C", self.max_temperature_c)?;
        writeln!(f)?;

        write_life_sections(
            f,
            &self.parameters,
            &self.fatigue,
            &self.fatigue_checks,
            self.remaining_wheel_diameter_mm,
            &self.maintenance,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::simulation::SimulationOrchestrator;
    use crate::types::{
        BearingType, CoolingType, LubricationType, SpindleParameters, SpindleType, ToolInterface,
    };

    fn reference() -> SpindleParameters {
        SpindleParameters {
            spindle_type: SpindleType::Motorized,
            power_rating_kw: 5.0,
            max_speed_rpm: 16_000,
            wheel_diameter_mm: 200.0,
            bearing_type: BearingType::HybridCeramic,
            bearing_preload_n: 500.0,
            cooling_type: CoolingType::Liquid,
            lubrication_type: LubricationType::OilAir,
            tool_interface: ToolInterface::Hsk,
            alignment_tolerance_mm: 0.001,
        }
    }

    fn orchestrator() -> SimulationOrchestrator {
        let mut config = EngineConfig::default();
        config.history.seed = Some(21);
        config.simulation.rng_seed = Some(22);
        SimulationOrchestrator::from_config(config)
    }

    #[test]
    fn test_scenario_report_text_layout() {
        let report = orchestrator().run_scenario_report(&reference()).expect("valid parameters");
        let text = report.to_string();

        assert!(text.starts_with("=== Systematic Spindle Simulation Results ===\n"));
        assert!(text.contains("Trial at 8000 RPM: Power = 4.80 kW"));
        assert!(text.contains("=== Scenario: High-Speed ==="));
        assert!(text.contains("=== Scenario: Balanced ==="));
        // 0.2 m × 16 kRPM × 2.5 × 1.2
        assert!(text.contains("Power Analysis: 9.60 kW required, 5.00 kW provided"));
        assert!(text.contains("Warning: Power rating may be insufficient"));
        assert!(text.contains("Hybrid ceramic bearings optimal for high-speed, low-friction operation"));
        assert!(text.contains("Estimated temperature rise: 28.0°C"));
        assert!(text.contains("Tool Interface: HSK"));
        assert!(text.contains("Dynamic Load (N) over 10.0 seconds:"));
        assert!(text.contains("t=0.0 s: "));
        assert!(text.contains("Spindle Type: Motorized"));
        assert!(text.contains("Motorized spindle optimal for high-speed precision grinding"));
        assert!(text.contains("Recommendations:\n - "));
        assert!(text.contains("Maintenance Needed: "));
    }

    #[test]
    fn test_time_based_text_logs_every_interval() {
        let report = orchestrator()
            .run_time_based_report(&reference(), 5.0)
            .expect("valid run");
        let text = report.to_string();

        assert!(text.starts_with("=== Time-Based Spindle Simulation (Duration: 5.0 s) ===\n"));
        let logged = text.lines().filter(|l| l.contains("s: Vibration=")).count();
        assert_eq!(logged, 5);
        assert!(text.contains("t=1.0 s: Vibration="));
        assert!(text.contains("Summary:\nAverage Vibration: "));
        assert!(text.contains("Grinding Wheel Wear Analysis:\nInitial Wheel Diameter: 200.0 mm"));
    }
}
