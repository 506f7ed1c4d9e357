//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use super::EngineConfig;
use crate::physics_engine::models::MAX_WEAR_FRACTION;
use crate::validator::limits;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `EngineConfig`.
///
/// Entries of the `[[scenarios]]` array share the `scenarios.` prefix.
/// Any new field added to `EngineConfig` must be added here too.
pub const KNOWN_CONFIG_KEYS: &[&str] = &[
    // [simulation]
    "simulation",
    "simulation.time_step_secs",
    "simulation.ambient_temperature_c",
    "simulation.time_log_interval_steps",
    "simulation.rng_seed",
    // [[scenarios]]
    "scenarios",
    "scenarios.name",
    "scenarios.speed_factor",
    "scenarios.load_factor",
    "scenarios.duration_secs",
    // [history]
    "history",
    "history.seed_samples",
    "history.k_neighbors",
    "history.seed",
    "history.label_policy",
    // [thresholds]
    "thresholds",
    "thresholds.vibration_limit_mm_s",
    "thresholds.label_min_bearing_life_hours",
    "thresholds.target_bearing_life_hours",
    "thresholds.min_spindle_life_fraction",
    "thresholds.wheel_wear_label_mm",
    "thresholds.max_temperature_rise_c",
    "thresholds.wear_vibration_limit_mm_s",
    "thresholds.min_remaining_wheel_fraction",
];

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// A table `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`. Tables
/// inside an array are walked under the array's own key, so
/// `[[s]] x = 1` yields `["s", "s.x"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let Some(table) = value.as_table() else {
        return keys;
    };
    for (k, v) in table {
        let path = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        keys.push(path.clone());
        match v {
            toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
            toml::Value::Array(items) => {
                for item in items.iter().filter(|i| i.is_table()) {
                    for nested in walk_toml_keys(item, &path) {
                        if !keys.contains(&nested) {
                            keys.push(nested);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Levenshtein edit distance, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known key within edit distance 3. Ties go to the earlier entry.
pub fn suggest_correction(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by_key(|&(_, dist)| dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns. Parse errors are left
/// for the serde pass to report.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !KNOWN_CONFIG_KEYS.contains(&key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, KNOWN_CONFIG_KEYS),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

fn range_warning(field: &str, message: String) -> ValidationWarning {
    ValidationWarning {
        field: field.to_string(),
        message,
        suggestion: None,
    }
}

/// Validate physical ranges on a parsed `EngineConfig`.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent a run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Ambient: outside -50..150 °C no spindle lubricant survives
    let ambient = config.simulation.ambient_temperature_c;
    if !(-50.0..=150.0).contains(&ambient) {
        errors.push(format!(
            "simulation.ambient_temperature_c = {ambient:.1} is outside physical range (-50-150 °C)"
        ));
    } else if !(0.0..=45.0).contains(&ambient) {
        warnings.push(range_warning(
            "simulation.ambient_temperature_c",
            format!("ambient_temperature_c = {ambient:.1} is outside typical workshop range (0-45 °C)"),
        ));
    }

    if config.simulation.time_step_secs > 1.0 {
        warnings.push(range_warning(
            "simulation.time_step_secs",
            format!(
                "time_step_secs = {:.2} is coarser than the 2 s load cycle can resolve",
                config.simulation.time_step_secs
            ),
        ));
    }

    for sc in &config.scenarios {
        if sc.speed_factor > 1.0 {
            warnings.push(range_warning(
                "scenarios.speed_factor",
                format!(
                    "scenario '{}' speed_factor = {:.2} runs above rated max speed",
                    sc.name, sc.speed_factor
                ),
            ));
        }
        if sc.duration_secs > 3_600.0 {
            warnings.push(range_warning(
                "scenarios.duration_secs",
                format!(
                    "scenario '{}' duration_secs = {:.0} produces a very large load profile",
                    sc.name, sc.duration_secs
                ),
            ));
        }
    }

    let t = &config.thresholds;
    for (field, value) in [
        ("thresholds.vibration_limit_mm_s", t.vibration_limit_mm_s),
        ("thresholds.max_temperature_rise_c", t.max_temperature_rise_c),
        ("thresholds.label_min_bearing_life_hours", t.label_min_bearing_life_hours),
    ] {
        if value <= 0.0 {
            errors.push(format!("{field} = {value} must be > 0"));
        }
    }
    for (field, value) in [
        ("thresholds.wear_vibration_limit_mm_s", t.wear_vibration_limit_mm_s),
        ("thresholds.wheel_wear_label_mm", t.wheel_wear_label_mm),
    ] {
        if value < 0.0 {
            errors.push(format!("{field} = {value} cannot be negative"));
        }
    }
    if !(0.0..=1.0).contains(&t.min_spindle_life_fraction) {
        errors.push(format!(
            "thresholds.min_spindle_life_fraction = {:.2} must be within 0-1",
            t.min_spindle_life_fraction
        ));
    }
    if !(t.min_remaining_wheel_fraction > 0.0 && t.min_remaining_wheel_fraction <= 1.0) {
        errors.push(format!(
            "thresholds.min_remaining_wheel_fraction = {:.2} must be within (0, 1]",
            t.min_remaining_wheel_fraction
        ));
    }

    // Modeled wear never exceeds 20 % of the largest admissible wheel
    let max_modeled_wear = limits::WHEEL_DIAMETER_MM.1 * MAX_WEAR_FRACTION;
    if t.wheel_wear_label_mm > max_modeled_wear {
        warnings.push(range_warning(
            "thresholds.wheel_wear_label_mm",
            format!(
                "wheel_wear_label_mm = {:.1} exceeds the largest modeled wear ({max_modeled_wear:.0} mm) and can never trigger",
                t.wheel_wear_label_mm
            ),
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
