//! Bring an older configuration file up to the current set of keys.

use super::{CONFIG_KEYS, Config};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a key/value document",
            path.display()
        ))),
    }
}

/// Keys present in `CONFIG_KEYS` but absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(CONFIG_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add every missing key with its default value, keeping existing values
/// untouched.
///
/// Returns:
///   Ok(true)  → file updated
///   Ok(false) → no change needed
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(false);
    }

    let mut map = read_mapping(path)?;
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    for key in &missing {
        let k = Value::String((*key).to_string());
        if let Some(v) = defaults.get(*key) {
            map.insert(k, v.clone());
        }
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration migrated: added {}",
        missing.join(", ")
    ));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> std::path::PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_pacepower.conf", name));
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn adds_missing_keys_and_keeps_values() {
        let p = temp_conf("cfg_migrate", "database: /tmp/keep.sqlite\nuser: alice\n");

        let missing = missing_keys(&p).unwrap();
        assert!(missing.contains(&"history_limit"));
        assert!(!missing.contains(&"user"));

        assert!(migrate_config_file(&p).unwrap());
        assert!(missing_keys(&p).unwrap().is_empty());

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.user, "alice");
        assert_eq!(cfg.database, "/tmp/keep.sqlite");

        assert!(!migrate_config_file(&p).unwrap());
        fs::remove_file(&p).ok();
    }
}
