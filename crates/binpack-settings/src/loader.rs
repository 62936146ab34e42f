//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`BinpackSettings::default()`]
//! 2. If `~/.binpack/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `BINPACK_*` environment variable overrides (highest priority)
//! 4. Validate
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::BinpackSettings;

/// Capacity override.
pub const ENV_CAPACITY: &str = "BINPACK_CAPACITY";
/// Log filter override.
pub const ENV_LOG_LEVEL: &str = "BINPACK_LOG_LEVEL";
/// Logging-listener toggle.
pub const ENV_LOG_EVENTS: &str = "BINPACK_LOG_EVENTS";

/// Resolve the path to the settings file (`~/.binpack/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".binpack").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<BinpackSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<BinpackSettings> {
    load_with_overrides(path, |key| std::env::var(key).ok())
}

/// Load settings from `path`, reading overrides through `lookup`.
pub fn load_with_overrides<F>(path: &Path, lookup: F) -> Result<BinpackSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = serde_json::to_value(BinpackSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: BinpackSettings = serde_json::from_value(merged)?;
    apply_overrides(&mut settings, lookup);
    validate(&settings)?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides read through `lookup`.
///
/// Invalid values are ignored with a warning and the file/default value is
/// kept.
pub fn apply_overrides<F>(settings: &mut BinpackSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_CAPACITY) {
        match parse_usize_range(&raw, 1, usize::MAX) {
            Some(v) => settings.packer.capacity = v,
            None => warn!(key = ENV_CAPACITY, value = %raw, "invalid capacity env var, ignoring"),
        }
    }
    if let Some(v) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        settings.logging.level = v;
    }
    if let Some(raw) = lookup(ENV_LOG_EVENTS) {
        match parse_bool(&raw) {
            Some(v) => settings.logging.log_events = v,
            None => warn!(key = ENV_LOG_EVENTS, value = %raw, "invalid boolean env var, ignoring"),
        }
    }
}

/// Reject values the packer cannot work with.
pub fn validate(settings: &BinpackSettings) -> Result<()> {
    if settings.packer.capacity < 1 {
        return Err(SettingsError::InvalidValue(
            "packer.capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_settings(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"packer": {"capacity": 100}, "version": "0.1.0"});
        let source = serde_json::json!({"packer": {"capacity": 512}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["packer"]["capacity"], 512);
        assert_eq!(merged["version"], "0.1.0");
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4]});
        assert_eq!(deep_merge(target, source)["items"], serde_json::json!([4]));
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    // ── loading ─────────────────────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let path = Path::new("/nonexistent/settings.json");
        let settings = load_with_overrides(path, no_env).unwrap();
        assert_eq!(settings, BinpackSettings::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let (_dir, path) = write_settings(r#"{"packer": {"capacity": 4096}}"#);
        let settings = load_with_overrides(&path, no_env).unwrap();
        assert_eq!(settings.packer.capacity, 4096);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let (_dir, path) = write_settings("not valid json");
        assert_matches!(
            load_with_overrides(&path, no_env),
            Err(SettingsError::Json(_))
        );
    }

    #[test]
    fn load_zero_capacity_is_invalid() {
        let (_dir, path) = write_settings(r#"{"packer": {"capacity": 0}}"#);
        assert_matches!(
            load_with_overrides(&path, no_env),
            Err(SettingsError::InvalidValue(_))
        );
    }

    #[test]
    fn env_beats_file() {
        let (_dir, path) = write_settings(r#"{"packer": {"capacity": 64}}"#);
        let settings = load_with_overrides(
            &path,
            env(&[
                (ENV_CAPACITY, "128"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_LOG_EVENTS, "yes"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.packer.capacity, 128);
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.log_events);
    }

    #[test]
    fn env_rescues_zero_capacity_file() {
        let (_dir, path) = write_settings(r#"{"packer": {"capacity": 0}}"#);
        let settings = load_with_overrides(&path, env(&[(ENV_CAPACITY, "10")])).unwrap();
        assert_eq!(settings.packer.capacity, 10);
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut settings = BinpackSettings::default();
        apply_overrides(
            &mut settings,
            env(&[
                (ENV_CAPACITY, "0"),
                (ENV_LOG_LEVEL, ""),
                (ENV_LOG_EVENTS, "maybe"),
            ]),
        );
        assert_eq!(settings, BinpackSettings::default());
    }

    #[test]
    fn parse_bool_variants() {
        for val in ["true", "1", "yes", "on", "TRUE", "On"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
        for val in ["false", "0", "no", "off", "FALSE", "Off"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn parse_usize_range_bounds() {
        assert_eq!(parse_usize_range("50", 1, 100), Some(50));
        assert_eq!(parse_usize_range(" 7 ", 1, 100), Some(7));
        assert_eq!(parse_usize_range("0", 1, 100), None);
        assert_eq!(parse_usize_range("101", 1, 100), None);
        assert_eq!(parse_usize_range("-3", 1, 100), None);
        assert_eq!(parse_usize_range("abc", 1, 100), None);
    }
}
