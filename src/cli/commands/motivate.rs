use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::motivation::message_for;
use crate::core::streak::{compute_streak_at, compute_today_completed_at};
use crate::db::queries::load_run_logs;
use crate::errors::AppResult;
use chrono::{Datelike, Local};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Motivate = cmd {
        let pool = open_pool(cfg)?;
        let logs = load_run_logs(&pool.conn, &cfg.user, None)?;
        let now = Local::now();

        let msg = message_for(
            compute_streak_at(&logs, &now),
            compute_today_completed_at(&logs, &now),
            logs.len(),
            now.ordinal(),
        );
        println!("💬 {msg}");
    }

    Ok(())
}
