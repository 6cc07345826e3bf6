//! Achievement unlock rules.

use crate::core::streak::compute_streak_at;
use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::achievement::{
    Achievement, CATALOG, CatalogEntry, FIRST_RUN, MARATHON, RUNS_100, STREAK_3, STREAK_7,
    STREAK_30,
};
use crate::models::run_log::{RunLog, datetime_to_nanos};
use chrono::{DateTime, TimeZone};
use rusqlite::Connection;

pub const MARATHON_KM: f64 = 42.195;

/// "26.2 mi" converts to 42.16 km; accept it as a marathon.
const MARATHON_TOLERANCE_KM: f64 = 0.05;

/// Catalog ids whose rule holds for `logs` as of `now`.
pub fn earned_ids<Tz: TimeZone>(logs: &[RunLog], now: &DateTime<Tz>) -> Vec<u32> {
    let mut ids = Vec::new();
    if logs.is_empty() {
        return ids;
    }

    let streak = compute_streak_at(logs, now);
    let longest_km = logs
        .iter()
        .filter_map(RunLog::distance_km)
        .fold(0.0_f64, f64::max);

    ids.push(FIRST_RUN);
    if streak >= 3 {
        ids.push(STREAK_3);
    }
    if streak >= 7 {
        ids.push(STREAK_7);
    }
    if longest_km >= MARATHON_KM - MARATHON_TOLERANCE_KM {
        ids.push(MARATHON);
    }
    if streak >= 30 {
        ids.push(STREAK_30);
    }
    if logs.len() >= 100 {
        ids.push(RUNS_100);
    }

    ids
}

/// Each catalog entry with its unlock, if any.
pub fn catalog_view(unlocked: &[Achievement]) -> Vec<(CatalogEntry, Option<&Achievement>)> {
    CATALOG
        .iter()
        .map(|entry| (*entry, unlocked.iter().find(|a| a.id == entry.id)))
        .collect()
}

pub struct AchievementLogic;

impl AchievementLogic {
    /// Store every newly earned achievement and return those.
    pub fn evaluate_and_unlock<Tz: TimeZone>(
        conn: &Connection,
        user: &str,
        now: &DateTime<Tz>,
    ) -> AppResult<Vec<Achievement>> {
        let logs = queries::load_run_logs(conn, user, None)?;
        let now_ns = datetime_to_nanos(now)
            .ok_or_else(|| AppError::InvalidDate(now.naive_utc().to_string()))?;

        let mut unlocked = Vec::new();
        for id in earned_ids(&logs, now) {
            if queries::insert_achievement(conn, user, id, now_ns)?
                && let Some(entry) = CATALOG.iter().find(|e| e.id == id)
            {
                ttlog_quiet(conn, "achievement", user, entry.name);
                unlocked.push(Achievement {
                    id,
                    name: entry.name.to_string(),
                    description: entry.description.to_string(),
                    unlocked_date: now_ns,
                });
            }
        }

        Ok(unlocked)
    }
}
