use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::ReminderLogic;
use crate::errors::AppResult;
use crate::models::reminder::ReminderPreferences;
use crate::ui::messages::{info, success};

use super::open_pool;

fn describe(prefs: &ReminderPreferences) -> String {
    format!(
        "Reminder {} at {}",
        if prefs.enabled { "enabled" } else { "disabled" },
        prefs.time
    )
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reminder {
        show,
        enable,
        disable,
        time,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        let enabled = match (*enable, *disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        if enabled.is_some() || time.is_some() {
            let prefs = ReminderLogic::update(
                &pool.conn,
                &cfg.reminder_prefix,
                &cfg.user,
                enabled,
                time.as_deref(),
            )?;
            success(describe(&prefs));
        } else if *show {
            let prefs = ReminderLogic::load(&pool.conn, &cfg.reminder_prefix, &cfg.user)?;
            info(describe(&prefs));
        }
    }

    Ok(())
}
