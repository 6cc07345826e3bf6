use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Open the file in `editor`, `$EDITOR`, or a platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = if cfg!(windows) { "notepad" } else { "nano" };
        let ed = editor
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| default_editor.into());

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("'{ed}' exited with {status}")));
        }
        Ok(())
    }

    /// Report keys missing from the file and whether it parses.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        let missing = missing_keys(path)?;
        Config::load_from(path)?;

        if missing.is_empty() {
            success("Configuration is complete.");
        } else {
            warning(format!(
                "Missing keys (defaults apply): {}",
                missing.join(", ")
            ));
        }
        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<bool> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} not found, run `pacepower init` first",
                path.display()
            )));
        }
        migrate_config_file(path)
    }
}
