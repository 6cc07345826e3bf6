use crate::errors::{AppError, AppResult};
use crate::models::distance_unit::DistanceUnit;
use crate::models::profile::GUEST;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Identity used for every operation; `guest` means "not signed in".
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub default_unit: DistanceUnit,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_reminder_prefix")]
    pub reminder_prefix: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_user() -> String {
    GUEST.to_string()
}
fn default_history_limit() -> usize {
    50
}
fn default_reminder_prefix() -> String {
    "pacepower_reminders".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

/// Every key a current config file is expected to carry.
pub const CONFIG_KEYS: [&str; 6] = [
    "database",
    "user",
    "default_unit",
    "history_limit",
    "reminder_prefix",
    "separator_char",
];

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            user: default_user(),
            default_unit: DistanceUnit::default(),
            history_limit: default_history_limit(),
            reminder_prefix: default_reminder_prefix(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("pacepower")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".pacepower")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pacepower.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pacepower.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// First char of `separator_char`, `-` when empty.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        // An existing config keeps its user and preferences
        let mut config = Self::load().unwrap_or_default();
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
