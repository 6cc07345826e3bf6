use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, limit, all } = cmd {
        let pool = open_pool(cfg)?;

        let limit = if *all {
            None
        } else {
            Some(limit.unwrap_or(cfg.history_limit))
        };

        let logs = HistoryLogic::runs(&pool.conn, &cfg.user, period.as_deref(), limit)?;

        if logs.is_empty() {
            info("No runs logged yet.");
            return Ok(());
        }

        header("Run history");
        print!("{}", HistoryLogic::render_table(&logs, cfg.separator()));
        println!("\n{} run(s)", logs.len());
    }

    Ok(())
}
