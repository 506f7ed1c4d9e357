//! Config Validation Tests
//!
//! Typo detection and range validation exercised through the public config
//! API, independently from the simulation engine.

use spindle_sim::config::validation::{
    suggest_correction, validate_physical_ranges, validate_unknown_keys, KNOWN_CONFIG_KEYS,
};
use spindle_sim::config::{ConfigError, EngineConfig};
use spindle_sim::LabelPolicy;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_threshold_warns_with_suggestion() {
    let toml_str = r#"
[thresholds]
vibraton_limit_mm_s = 1.2
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("vibraton_limit_mm_s"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("thresholds.vibration_limit_mm_s"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_in_history_section_warns() {
    let toml_str = r#"
[history]
k_neighbours = 5
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("history.k_neighbors"));
    assert!(warnings[0].to_string().contains("did you mean"));
}

#[test]
fn typo_in_second_scenario_warns_once() {
    let toml_str = r#"
[[scenarios]]
name = "A"
speed_factor = 1.0
load_factor = 1.0

[[scenarios]]
name = "B"
speed_factor = 0.5
lod_factor = 1.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "scenarios.lod_factor");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("scenarios.load_factor"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[simulation]
time_step_secs = 0.05
ambient_temperature_c = 22.0
time_log_interval_steps = 20
rng_seed = 99

[[scenarios]]
name = "Finishing"
speed_factor = 0.9
load_factor = 0.6
duration_secs = 15.0

[history]
seed_samples = 200
k_neighbors = 5
seed = 1
label_policy = "classifier_verdict"

[thresholds]
vibration_limit_mm_s = 1.1
label_min_bearing_life_hours = 4000.0
target_bearing_life_hours = 25000.0
min_spindle_life_fraction = 0.4
wheel_wear_label_mm = 18.0
max_temperature_rise_c = 32.0
wear_vibration_limit_mm_s = 0.6
min_remaining_wheel_fraction = 0.85
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Valid config should produce zero warnings, got: {warnings:?}");

    let config = EngineConfig::from_toml_str(toml_str).expect("valid config should load");
    assert_eq!(config.history.label_policy, LabelPolicy::ClassifierVerdict);
    assert_eq!(config.time_step().secs(), 0.05);
}

#[test]
fn every_known_key_is_reachable_from_default_serialization() {
    let toml_str = EngineConfig::default().to_toml().expect("serialize defaults");
    let warnings = validate_unknown_keys(&toml_str);
    assert!(warnings.is_empty(), "Defaults must only use known keys: {warnings:?}");
    assert!(KNOWN_CONFIG_KEYS.contains(&"history.label_policy"));
}

#[test]
fn garbage_key_gets_no_suggestion() {
    assert!(suggest_correction("zzzzzzzzzzzzzzzzzzzzzzz", KNOWN_CONFIG_KEYS).is_none());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn default_config_has_no_range_issues() {
    let (errors, warnings) = validate_physical_ranges(&EngineConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn impossible_ambient_is_rejected_on_load() {
    let toml_str = r#"
[simulation]
ambient_temperature_c = 400.0
"#;
    let err = EngineConfig::from_toml_str(toml_str).expect_err("400 °C ambient");
    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("ambient_temperature_c")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn even_k_is_rejected_on_load() {
    let toml_str = r#"
[history]
k_neighbors = 4
"#;
    let err = EngineConfig::from_toml_str(toml_str).expect_err("even k");
    assert!(err.to_string().contains("k_neighbors must be odd"), "got: {err}");
}

#[test]
fn seed_pool_smaller_than_k_is_rejected() {
    let mut config = EngineConfig::default();
    config.history.seed_samples = 1;
    assert!(config.validate().is_err());
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn save_then_load_preserves_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("spindle_sim.toml");

    let mut original = EngineConfig::default();
    original.history.seed = Some(123);
    original.thresholds.wheel_wear_label_mm = 12.5;
    original.save_to_file(&path).expect("save");

    let loaded = EngineConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded, original);
    assert_eq!(loaded.maintenance_rule().wheel_wear_limit_mm, 12.5);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = EngineConfig::load_from_file(&dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(err, ConfigError::Io(..)));
}
