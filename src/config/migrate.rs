//! Configuration file upgrades: detect keys missing from an existing file and
//! fill them from the defaults without touching the values already set.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Comment injected after `carry_over_balance:` when the key is added.
const CARRY_OVER_HINT: &str = "  # carry_over_balance: opening balance in hours per year, e.g.\n\
                               #   2025: 12.5\n";

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let yaml: Value = serde_yaml::from_str(&content)?;
    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Configuration(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Other("default configuration is not a mapping".into())),
    }
}

/// Top-level keys present in the defaults but absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Existing values are kept
/// as they are. Returns the keys that were added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');
        if line.starts_with("carry_over_balance:") && added.iter().any(|k| k == "carry_over_balance") {
            new_content.push_str(CARRY_OVER_HINT);
        }
    }

    fs::write(path, new_content)?;
    tracing::info!(path = %path.display(), keys = ?added, "config file migrated");
    Ok(added)
}
