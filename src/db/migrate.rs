use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A forward-only schema step, applied at most once.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_run_logs",
        description: "Created run_logs table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS run_logs (
            id            TEXT PRIMARY KEY,
            user          TEXT NOT NULL,
            timestamp     INTEGER NOT NULL,
            time_minutes  REAL NOT NULL CHECK(time_minutes > 0),
            distance      REAL CHECK(distance IS NULL OR distance >= 0),
            unit          TEXT NOT NULL DEFAULT 'kilometers'
                          CHECK(unit IN ('kilometers','miles','meters')),
            notes         TEXT,
            created_at    INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_run_logs_user_ts ON run_logs(user, timestamp);
        "#,
    },
    Migration {
        version: "20250301_0002_create_goals",
        description: "Created goals table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS goals (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            user                TEXT NOT NULL,
            target_time_minutes REAL NOT NULL,
            target_distance     REAL,
            unit                TEXT NOT NULL DEFAULT 'kilometers'
                                CHECK(unit IN ('kilometers','miles','meters')),
            created_at          INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user, id);
        "#,
    },
    Migration {
        version: "20250301_0003_create_achievements",
        description: "Created achievements table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS achievements (
            user            TEXT NOT NULL,
            achievement_id  INTEGER NOT NULL,
            unlocked_date   INTEGER NOT NULL,
            PRIMARY KEY (user, achievement_id)
        );
        "#,
    },
    Migration {
        version: "20250315_0004_create_profiles",
        description: "Created profiles table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user          TEXT PRIMARY KEY,
            display_name  TEXT,
            role          TEXT CHECK(role IS NULL OR role IN ('admin','user','guest'))
        );
        "#,
    },
    Migration {
        version: "20250315_0005_create_preferences",
        description: "Created preferences key/value table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS preferences (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250402_0006_create_submit_guard",
        description: "Created submit_guard table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS submit_guard (
            scope      TEXT PRIMARY KEY,
            last_hash  TEXT,
            last_time  INTEGER
        );
        "#,
    },
];

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
