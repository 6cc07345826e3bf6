use crate::models::run_log::nanos_to_datetime;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::Local;
use rusqlite::Connection;
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Run logs", "run_logs"),
        ("Goals", "goals"),
        ("Achievements unlocked", "achievements"),
        ("Profiles", "profiles"),
    ] {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let (first, last): (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM run_logs",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let fmt = |ns: Option<i64>| {
        ns.map(|n| nanos_to_datetime(n, &Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
