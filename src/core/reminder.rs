use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::reminder::{ReminderPreferences, storage_key};
use crate::utils::time::parse_time;
use chrono::NaiveTime;
use rusqlite::Connection;

/// The banner shows when reminders are on, today has no run yet and the
/// configured time has passed. An unreadable time never fires.
pub fn is_reminder_due(prefs: &ReminderPreferences, today_completed: bool, now: NaiveTime) -> bool {
    if !prefs.enabled || today_completed {
        return false;
    }
    match parse_time(&prefs.time) {
        Some(at) => now >= at,
        None => false,
    }
}

pub struct ReminderLogic;

impl ReminderLogic {
    pub fn load(conn: &Connection, prefix: &str, identity: &str) -> AppResult<ReminderPreferences> {
        queries::load_preferences(conn, &storage_key(prefix, identity))
    }

    /// Apply the requested changes on top of the stored value and save it.
    pub fn update(
        conn: &Connection,
        prefix: &str,
        identity: &str,
        enabled: Option<bool>,
        time: Option<&str>,
    ) -> AppResult<ReminderPreferences> {
        let mut prefs = Self::load(conn, prefix, identity)?;

        if let Some(e) = enabled {
            prefs.enabled = e;
        }
        if let Some(t) = time {
            let parsed = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
            prefs.time = parsed.format("%H:%M").to_string();
        }

        let key = storage_key(prefix, identity);
        queries::save_preferences(conn, &key, &prefs)?;
        ttlog_quiet(
            conn,
            "reminder",
            &key,
            &format!(
                "Reminders {} at {}",
                if prefs.enabled { "enabled" } else { "disabled" },
                prefs.time
            ),
        );

        Ok(prefs)
    }
}
