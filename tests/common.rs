#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cld() -> Command {
    cargo_bin_cmd!("crewledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_crewledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema and register the fixtures most tests need:
/// job 1, crew member 1 (U1), supervisor 2 (S1), crew member 3 (U2).
pub fn init_db_with_fixtures(db_path: &str) {
    cld()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    cld()
        .args(["--db", db_path, "--test", "job", "add", "Maple St re-roof"])
        .assert()
        .success();

    cld()
        .args(["--db", db_path, "--test", "crew", "add", "U1", "--role", "crew"])
        .assert()
        .success();

    cld()
        .args([
            "--db",
            db_path,
            "--test",
            "crew",
            "add",
            "S1",
            "--role",
            "supervisor",
        ])
        .assert()
        .success();

    cld()
        .args(["--db", db_path, "--test", "crew", "add", "U2", "--role", "crew"])
        .assert()
        .success();
}

/// Clock user 1 in and out on job 1 so a submitted entry (id 1) exists.
pub fn submit_time_entry(db_path: &str) {
    cld()
        .args([
            "--db",
            db_path,
            "--test",
            "clock",
            "in",
            "--job",
            "1",
            "--user",
            "1",
            "--at",
            "2025-06-02 07:30",
        ])
        .assert()
        .success();

    cld()
        .args([
            "--db",
            db_path,
            "--test",
            "clock",
            "out",
            "--entry",
            "1",
            "--at",
            "2025-06-02 15:30",
        ])
        .assert()
        .success();
}

/// Count activity rows, optionally filtered by action tag.
pub fn activity_count(db_path: &str, action: Option<&str>) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    match action {
        Some(tag) => conn
            .query_row(
                "SELECT COUNT(*) FROM activity_log WHERE action = ?1",
                [tag],
                |row| row.get(0),
            )
            .expect("count"),
        None => conn
            .query_row("SELECT COUNT(*) FROM activity_log", [], |row| row.get(0))
            .expect("count"),
    }
}

/// Read one column of a time entry as a string (NULL → None).
pub fn time_entry_field(db_path: &str, id: i64, column: &str) -> Option<String> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let sql = format!("SELECT CAST({} AS TEXT) FROM time_entries WHERE id = ?1", column);
    conn.query_row(&sql, [id], |row| row.get(0)).expect("field")
}

pub fn time_entry_status(db_path: &str, id: i64) -> String {
    time_entry_field(db_path, id, "status").expect("status")
}
