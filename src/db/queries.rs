use crate::core::submit_guard::SubmitGuard;
use crate::errors::{AppError, AppResult};
use crate::models::achievement::{Achievement, catalog_entry};
use crate::models::distance_unit::DistanceUnit;
use crate::models::goal::Goal;
use crate::models::profile::{UserProfile, UserRole};
use crate::models::reminder::ReminderPreferences;
use crate::models::run_log::RunLog;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

fn unit_from_row(row: &Row, col: &str) -> Result<DistanceUnit> {
    let unit_str: String = row.get(col)?;
    DistanceUnit::from_db_str(&unit_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidUnit(unit_str.clone())),
        )
    })
}

// ---------------------------
// Run logs
// ---------------------------

pub fn map_run_log(row: &Row) -> Result<RunLog> {
    Ok(RunLog {
        id: row.get("id")?,
        user: row.get("user")?,
        timestamp: row.get("timestamp")?,
        time_minutes: row.get("time_minutes")?,
        distance: row.get("distance")?,
        unit: unit_from_row(row, "unit")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_run_log(conn: &Connection, log: &RunLog) -> AppResult<()> {
    conn.execute(
        "INSERT INTO run_logs (id, user, timestamp, time_minutes, distance, unit, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            log.id,
            log.user,
            log.timestamp,
            log.time_minutes,
            log.distance,
            log.unit.to_db_str(),
            log.notes,
            log.created_at,
        ],
    )?;
    Ok(())
}

/// Runs of `user`, newest first, optionally capped to `limit` rows.
pub fn load_run_logs(
    conn: &Connection,
    user: &str,
    limit: Option<usize>,
) -> AppResult<Vec<RunLog>> {
    // SQLite: a negative LIMIT means "no limit"
    let limit = limit.map(|l| l as i64).unwrap_or(-1);

    let mut stmt = conn.prepare(
        "SELECT * FROM run_logs
         WHERE user = ?1
         ORDER BY timestamp DESC, created_at DESC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![user, limit], map_run_log)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Runs of `user` whose timestamp lies in `[from_ns, to_ns)`, oldest first.
pub fn load_run_logs_between(
    conn: &Connection,
    user: &str,
    from_ns: i64,
    to_ns: i64,
) -> AppResult<Vec<RunLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM run_logs
         WHERE user = ?1 AND timestamp >= ?2 AND timestamp < ?3
         ORDER BY timestamp ASC",
    )?;

    let rows = stmt.query_map(params![user, from_ns, to_ns], map_run_log)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_run_log_by_id(conn: &Connection, user: &str, id: &str) -> AppResult<Option<RunLog>> {
    let log = conn
        .query_row(
            "SELECT * FROM run_logs WHERE user = ?1 AND id = ?2",
            params![user, id],
            map_run_log,
        )
        .optional()?;
    Ok(log)
}

/// Returns the number of deleted rows (0 or 1).
pub fn delete_run_log(conn: &Connection, user: &str, id: &str) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM run_logs WHERE user = ?1 AND id = ?2",
        params![user, id],
    )?;
    Ok(n)
}

pub fn count_run_logs(conn: &Connection, user: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM run_logs WHERE user = ?1",
        [user],
        |row| row.get(0),
    )?;
    Ok(n)
}

// ---------------------------
// Goals
// ---------------------------

pub fn map_goal(row: &Row) -> Result<Goal> {
    Ok(Goal {
        id: row.get("id")?,
        user: row.get("user")?,
        target_time_minutes: row.get("target_time_minutes")?,
        target_distance: row.get("target_distance")?,
        unit: unit_from_row(row, "unit")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_goal(conn: &Connection, goal: &Goal) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO goals (user, target_time_minutes, target_distance, unit, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            goal.user,
            goal.target_time_minutes,
            goal.target_distance,
            goal.unit.to_db_str(),
            goal.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Goals of `user`, oldest first. The last element is the current goal.
pub fn load_goals(conn: &Connection, user: &str) -> AppResult<Vec<Goal>> {
    let mut stmt = conn.prepare("SELECT * FROM goals WHERE user = ?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([user], map_goal)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_current_goal(conn: &Connection, user: &str) -> AppResult<Option<Goal>> {
    let goal = conn
        .query_row(
            "SELECT * FROM goals WHERE user = ?1 ORDER BY id DESC LIMIT 1",
            [user],
            map_goal,
        )
        .optional()?;
    Ok(goal)
}

/// Delete the goal at position `idx` (0-based) of [`load_goals`].
pub fn delete_goal(conn: &Connection, user: &str, idx: usize) -> AppResult<Goal> {
    let goals = load_goals(conn, user)?;
    let goal = goals
        .into_iter()
        .nth(idx)
        .ok_or(AppError::InvalidGoal(idx))?;

    conn.execute("DELETE FROM goals WHERE id = ?1", [goal.id])?;
    Ok(goal)
}

// ---------------------------
// Achievements
// ---------------------------

/// Record an unlock. Returns `false` when it was already unlocked.
pub fn insert_achievement(
    conn: &Connection,
    user: &str,
    achievement_id: u32,
    unlocked_date: i64,
) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO achievements (user, achievement_id, unlocked_date)
         VALUES (?1, ?2, ?3)",
        params![user, achievement_id, unlocked_date],
    )?;
    Ok(n == 1)
}

/// Unlocked achievements, oldest first. With `within_days`, only those
/// unlocked in the last N days before `now_ns`.
pub fn load_achievements(
    conn: &Connection,
    user: &str,
    within_days: Option<i64>,
    now_ns: i64,
) -> AppResult<Vec<Achievement>> {
    let since = within_days
        .map(|d| now_ns.saturating_sub(d.saturating_mul(NANOS_PER_DAY)))
        .unwrap_or(i64::MIN);

    let mut stmt = conn.prepare(
        "SELECT achievement_id, unlocked_date FROM achievements
         WHERE user = ?1 AND unlocked_date >= ?2
         ORDER BY unlocked_date ASC, achievement_id ASC",
    )?;

    let rows = stmt.query_map(params![user, since], |row| {
        Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, unlocked_date) = r?;
        // unknown ids come from a newer catalog; skip them
        if let Some(entry) = catalog_entry(id) {
            out.push(Achievement {
                id,
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                unlocked_date,
            });
        }
    }
    Ok(out)
}

// ---------------------------
// Profiles and roles
// ---------------------------

pub fn load_profile(conn: &Connection, user: &str) -> AppResult<Option<UserProfile>> {
    let profile = conn
        .query_row(
            "SELECT display_name FROM profiles WHERE user = ?1",
            [user],
            |row| {
                Ok(UserProfile {
                    display_name: row.get(0)?,
                })
            },
        )
        .optional()?;
    Ok(profile)
}

pub fn save_profile(conn: &Connection, user: &str, profile: &UserProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (user, display_name) VALUES (?1, ?2)
         ON CONFLICT(user) DO UPDATE SET display_name = excluded.display_name",
        params![user, profile.display_name],
    )?;
    Ok(())
}

/// Stored role, if any. Callers apply the defaults (see `core::profile`).
pub fn load_role(conn: &Connection, user: &str) -> AppResult<Option<UserRole>> {
    let raw: Option<Option<String>> = conn
        .query_row("SELECT role FROM profiles WHERE user = ?1", [user], |row| {
            row.get(0)
        })
        .optional()?;

    match raw.flatten() {
        None => Ok(None),
        Some(s) => UserRole::from_db_str(&s)
            .map(Some)
            .ok_or(AppError::InvalidRole(s)),
    }
}

pub fn save_role(conn: &Connection, user: &str, role: UserRole) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (user, role) VALUES (?1, ?2)
         ON CONFLICT(user) DO UPDATE SET role = excluded.role",
        params![user, role.to_db_str()],
    )?;
    Ok(())
}

pub fn count_admins(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM profiles WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

// ---------------------------
// Preferences (key/value JSON)
// ---------------------------

/// Stored preferences merged over the defaults. A missing or unreadable
/// value yields the defaults.
pub fn load_preferences(conn: &Connection, key: &str) -> AppResult<ReminderPreferences> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM preferences WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(raw
        .and_then(|s| serde_json::from_str::<ReminderPreferences>(&s).ok())
        .unwrap_or_default())
}

/// Replace the stored value wholesale.
pub fn save_preferences(
    conn: &Connection,
    key: &str,
    prefs: &ReminderPreferences,
) -> AppResult<()> {
    let json = serde_json::to_string(prefs)?;
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, json],
    )?;
    Ok(())
}

// ---------------------------
// Submit guard slots
// ---------------------------

pub fn load_guard(conn: &Connection, scope: &str) -> AppResult<SubmitGuard> {
    let row: Option<(Option<String>, Option<i64>)> = conn
        .query_row(
            "SELECT last_hash, last_time FROM submit_guard WHERE scope = ?1",
            [scope],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    Ok(match row {
        Some((last_hash, last_time)) => SubmitGuard {
            last_hash,
            last_time: last_time.and_then(DateTime::<Utc>::from_timestamp_millis),
        },
        None => SubmitGuard::default(),
    })
}

pub fn save_guard(conn: &Connection, scope: &str, guard: &SubmitGuard) -> AppResult<()> {
    conn.execute(
        "INSERT INTO submit_guard (scope, last_hash, last_time) VALUES (?1, ?2, ?3)
         ON CONFLICT(scope) DO UPDATE SET last_hash = excluded.last_hash,
                                          last_time = excluded.last_time",
        params![
            scope,
            guard.last_hash,
            guard.last_time.map(|t| t.timestamp_millis()),
        ],
    )?;
    Ok(())
}

// ---------------------------
// Internal log
// ---------------------------

pub type LogRow = (i64, String, String, String, String);

/// `(id, date, operation, target, message)`, oldest first.
pub fn load_log(conn: &Connection) -> Result<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use chrono::TimeZone;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    fn run(user: &str, day: u32, minutes: f64) -> RunLog {
        let when = Utc.with_ymd_and_hms(2025, 5, day, 7, 0, 0).unwrap();
        RunLog::new(user, &when, minutes, Some(5.0), DistanceUnit::Kilometers, None).unwrap()
    }

    #[test]
    fn run_logs_are_per_user_and_newest_first() {
        let c = conn();
        insert_run_log(&c, &run("alice", 1, 30.0)).unwrap();
        insert_run_log(&c, &run("alice", 3, 40.0)).unwrap();
        insert_run_log(&c, &run("bob", 2, 50.0)).unwrap();

        let logs = load_run_logs(&c, "alice", None).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].time_minutes, 40.0);

        let capped = load_run_logs(&c, "alice", Some(1)).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(count_run_logs(&c, "bob").unwrap(), 1);
    }

    #[test]
    fn run_log_lookup_and_delete() {
        let c = conn();
        let log = run("alice", 1, 30.0);
        insert_run_log(&c, &log).unwrap();

        assert_eq!(load_run_log_by_id(&c, "alice", &log.id).unwrap(), Some(log.clone()));
        assert_eq!(load_run_log_by_id(&c, "bob", &log.id).unwrap(), None);
        assert_eq!(delete_run_log(&c, "bob", &log.id).unwrap(), 0);
        assert_eq!(delete_run_log(&c, "alice", &log.id).unwrap(), 1);
        assert_eq!(count_run_logs(&c, "alice").unwrap(), 0);
    }

    #[test]
    fn goals_current_and_delete() {
        let c = conn();
        for (i, t) in [20.0, 30.0].into_iter().enumerate() {
            insert_goal(
                &c,
                &Goal {
                    id: 0,
                    user: "alice".into(),
                    target_time_minutes: t,
                    target_distance: None,
                    unit: DistanceUnit::Kilometers,
                    created_at: i as i64,
                },
            )
            .unwrap();
        }

        let current = load_current_goal(&c, "alice").unwrap().unwrap();
        assert_eq!(current.target_time_minutes, 30.0);

        let removed = delete_goal(&c, "alice", 1).unwrap();
        assert_eq!(removed.target_time_minutes, 30.0);
        assert_eq!(load_goals(&c, "alice").unwrap().len(), 1);
        assert!(matches!(delete_goal(&c, "alice", 5), Err(AppError::InvalidGoal(5))));
    }

    #[test]
    fn achievements_unlock_once_and_window() {
        let c = conn();
        let now = 100 * NANOS_PER_DAY;
        assert!(insert_achievement(&c, "alice", 0, now - 10 * NANOS_PER_DAY).unwrap());
        assert!(!insert_achievement(&c, "alice", 0, now).unwrap());
        assert!(insert_achievement(&c, "alice", 1, now - NANOS_PER_DAY).unwrap());

        assert_eq!(load_achievements(&c, "alice", None, now).unwrap().len(), 2);
        let recent = load_achievements(&c, "alice", Some(7), now).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "3 Day Streak");
    }

    #[test]
    fn profile_and_role_share_a_row() {
        let c = conn();
        assert_eq!(load_profile(&c, "alice").unwrap(), None);
        assert_eq!(load_role(&c, "alice").unwrap(), None);

        save_role(&c, "alice", UserRole::Admin).unwrap();
        save_profile(
            &c,
            "alice",
            &UserProfile {
                display_name: Some("Alice".into()),
            },
        )
        .unwrap();

        assert_eq!(load_role(&c, "alice").unwrap(), Some(UserRole::Admin));
        assert_eq!(
            load_profile(&c, "alice").unwrap().unwrap().display_name.as_deref(),
            Some("Alice")
        );
        assert_eq!(count_admins(&c).unwrap(), 1);
    }

    #[test]
    fn preferences_merge_defaults_and_replace() {
        let c = conn();
        let key = "pacepower_reminders_alice";
        assert_eq!(load_preferences(&c, key).unwrap(), ReminderPreferences::default());

        c.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, r#"{"enabled":true}"#],
        )
        .unwrap();
        let merged = load_preferences(&c, key).unwrap();
        assert!(merged.enabled);
        assert_eq!(merged.time, "18:00");

        let prefs = ReminderPreferences {
            enabled: false,
            time: "07:15".into(),
        };
        save_preferences(&c, key, &prefs).unwrap();
        assert_eq!(load_preferences(&c, key).unwrap(), prefs);
        assert_eq!(
            load_preferences(&c, "pacepower_reminders_bob").unwrap(),
            ReminderPreferences::default()
        );
    }

    #[test]
    fn guard_slot_roundtrip() {
        let c = conn();
        assert_eq!(load_guard(&c, "run").unwrap(), SubmitGuard::default());

        let mut g = SubmitGuard::new();
        let t = Utc.with_ymd_and_hms(2025, 5, 1, 7, 0, 0).unwrap();
        assert!(g.allow_submit_at(&"payload", t).unwrap());
        save_guard(&c, "run", &g).unwrap();

        assert_eq!(load_guard(&c, "run").unwrap(), g);
        assert_eq!(load_guard(&c, "goal").unwrap(), SubmitGuard::default());
    }
}
