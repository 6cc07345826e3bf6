use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use super::open_pool;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        if !*yes && !ask_confirmation(&format!("Delete run {}? This action is irreversible.", id)) {
            info("Operation cancelled.");
            return Ok(());
        }

        let pool = open_pool(cfg)?;
        let log = DeleteLogic::apply(&pool.conn, &cfg.user, id)?;
        success(format!(
            "Run {} of {} {} has been deleted.",
            log.id,
            log.date_str(),
            log.time_str()
        ));
    }

    Ok(())
}
