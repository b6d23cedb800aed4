//! End-to-end CLI tests. Every test runs against its own database under
//! the system temp dir, with --test so the user config is never touched.

mod common;

use chrono::{Local, Timelike};
use common::{init_db, setup_test_db, temp_out, tp};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("init");

    tp().args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database:"));

    assert!(fs::metadata(&db).is_ok());
}

#[test]
fn test_status_without_day() {
    let db = setup_test_db("status_idle");
    init_db(&db);

    tp().args(["--db", &db, "--test", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active day"));
}

#[test]
fn test_punch_without_day_is_rejected() {
    let db = setup_test_db("punch_no_day");
    init_db(&db);

    tp().args(["--db", &db, "--test", "punch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active day."));
}

#[test]
fn test_start_then_status() {
    let db = setup_test_db("start_status");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day started at"));

    tp().args(["--db", &db, "--test", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("working")
                .and(predicate::str::contains("Day started:"))
                .and(predicate::str::contains("Remaining work:")),
        );
}

#[test]
fn test_start_twice_is_rejected() {
    let db = setup_test_db("start_twice");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A day is already in progress."));
}

#[test]
fn test_start_with_invalid_time() {
    let db = setup_test_db("start_bad_time");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start", "--at", "25:99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time format"));
}

#[test]
fn test_punch_toggles_between_break_and_work() {
    let db = setup_test_db("punch_toggle");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "punch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Punched out"));

    tp().args(["--db", &db, "--test", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on break"));

    tp().args(["--db", &db, "--test", "punch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Punched in"));
}

#[test]
fn test_break_recalibrates_running_day() {
    let now = Local::now();
    // Needs two whole past minutes today; right after midnight there are none.
    if now.hour() == 0 && now.minute() < 3 {
        return;
    }

    let db = setup_test_db("break_recal");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start", "--at", "00:00"])
        .assert()
        .success();

    let from_t = now - chrono::Duration::minutes(2);
    let to_t = now - chrono::Duration::minutes(1);
    let from = from_t.format("%H:%M").to_string();
    let to = to_t.format("%H:%M").to_string();

    tp().args(["--db", &db, "--test", "break", "--from", &from, "--to", &to])
        .assert()
        .success()
        .stdout(predicate::str::contains("recorded"));
}

#[test]
fn test_break_rejects_inverted_interval() {
    let db = setup_test_db("break_inverted");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start", "--at", "00:00"])
        .assert()
        .success();

    tp().args([
        "--db", &db, "--test", "break", "--from", "00:30", "--to", "00:10",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
        "Punch-In time must be after Punch-Out time.",
    ));
}

#[test]
fn test_calendar_table_shows_open_session() {
    let db = setup_test_db("calendar_table");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "calendar"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("work")
                .and(predicate::str::contains("(ongoing)"))
                .and(predicate::str::contains("DATE")),
        );
}

#[test]
fn test_calendar_json_output() {
    let db = setup_test_db("calendar_json");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "calendar", "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"type\"").and(predicate::str::contains("\"work\"")),
        );
}

#[test]
fn test_calendar_csv_to_file() {
    let db = setup_test_db("calendar_csv");
    init_db(&db);
    let out = temp_out("calendar_csv", "csv");

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args([
        "--db", &db, "--test", "calendar", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Calendar written to"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("type,start,end,duration_minutes,row_ids,active"));
    assert!(content.contains("work"));
    fs::remove_file(&out).ok();
}

#[test]
fn test_calendar_empty_period() {
    let db = setup_test_db("calendar_empty");
    init_db(&db);

    tp().args(["--db", &db, "--test", "calendar", "--period", "1999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calendar events"));
}

#[test]
fn test_calendar_invalid_period() {
    let db = setup_test_db("calendar_bad_period");
    init_db(&db);

    tp().args(["--db", &db, "--test", "calendar", "--period", "01/02/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_del_work_row() {
    let db = setup_test_db("del_work");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "del", "--work", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted work row #1."));

    tp().args(["--db", &db, "--test", "del", "--work", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Work-log row not found: 1"));
}

#[test]
fn test_del_requires_exactly_one_target() {
    let db = setup_test_db("del_no_target");
    init_db(&db);

    tp().args(["--db", &db, "--test", "del"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify exactly one"));
}

#[test]
fn test_del_break_merges_rows() {
    let db = setup_test_db("del_break");
    init_db(&db);

    // start opens row 1, punch closes it, punch reopens as row 2.
    tp().args(["--db", &db, "--test", "start"]).assert().success();
    tp().args(["--db", &db, "--test", "punch"]).assert().success();
    tp().args(["--db", &db, "--test", "punch"]).assert().success();

    tp().args(["--db", &db, "--test", "del", "--break", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merged row #2 into #1"));
}

#[test]
fn test_merge_rows() {
    let db = setup_test_db("merge_rows");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();
    tp().args(["--db", &db, "--test", "punch"]).assert().success();
    tp().args(["--db", &db, "--test", "punch"]).assert().success();

    tp().args(["--db", &db, "--test", "merge", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged row #2 into #1."));

    // The surviving open row still shows as ongoing.
    tp().args(["--db", &db, "--test", "calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(ongoing)"));
}

#[test]
fn test_reset_keeps_work_log() {
    let db = setup_test_db("reset");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timer reset"));

    tp().args(["--db", &db, "--test", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active day"));

    // The punch-in row survives the reset.
    tp().args(["--db", &db, "--test", "calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work"));
}

#[test]
fn test_clear_deletes_today() {
    let db = setup_test_db("clear");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared today"));

    tp().args(["--db", &db, "--test", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active day"));

    tp().args(["--db", &db, "--test", "calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calendar events"));
}

#[test]
fn test_watch_stops_after_ticks() {
    let db = setup_test_db("watch_ticks");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "watch", "--ticks", "2"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("work"));
}

#[test]
fn test_watch_without_day_exits_immediately() {
    let db = setup_test_db("watch_idle");
    init_db(&db);

    tp().args(["--db", &db, "--test", "watch", "--ticks", "5"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("stopping watch"));
}

#[test]
fn test_status_logs_flag_prints_actions() {
    let db = setup_test_db("status_logs");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();
    tp().args(["--db", &db, "--test", "punch"]).assert().success();

    tp().args(["--db", &db, "--test", "status", "--logs"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Recent actions:")
                .and(predicate::str::contains("Start"))
                .and(predicate::str::contains("Punch Out (Break)")),
        );
}

#[test]
fn test_log_print_shows_operations() {
    let db = setup_test_db("log_print");
    init_db(&db);

    tp().args(["--db", &db, "--test", "start"]).assert().success();

    tp().args(["--db", &db, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Internal log")
                .and(predicate::str::contains("start")),
        );
}

#[test]
fn test_user_isolation() {
    let db = setup_test_db("user_isolation");
    init_db(&db);

    tp().args(["--db", &db, "--test", "--user", "alice", "start"])
        .assert()
        .success();

    // Bob sees no active day and an empty calendar.
    tp().args(["--db", &db, "--test", "--user", "bob", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active day"));

    tp().args(["--db", &db, "--test", "--user", "bob", "calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calendar events"));
}

#[test]
fn test_config_without_print() {
    let db = setup_test_db("config_noop");

    tp().args(["--db", &db, "--test", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}
