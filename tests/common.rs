#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch directory so that the
/// developer's own configuration is never read.
pub fn pp() -> Command {
    let home = env::temp_dir().join("pacepower_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("pacepower");
    cmd.env("HOME", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pacepower.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pacepower_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `pacepower --db <db> --test init`
pub fn init(db_path: &str) {
    pp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Log a run as `user` on a past date.
pub fn add_run(db_path: &str, user: &str, date: &str, minutes: &str, km: &str) {
    pp().args([
        "--db", db_path, "--user", user, "add", minutes, "--distance", km, "--date", date,
        "--time", "07:00",
    ])
    .assert()
    .success();
}

/// Fresh DB with three runs of `alice`.
pub fn init_db_with_runs(db_path: &str) {
    init(db_path);
    add_run(db_path, "alice", "2025-09-01", "30", "5");
    add_run(db_path, "alice", "2025-09-15", "45", "8.5");
    add_run(db_path, "alice", "2024-09-10", "20", "3");
}
