//! Snapshot sync gateway tests: load precedence and best-effort push.

use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use timepunch::core::sync::SyncGateway;
use timepunch::db::initialize::init_db;
use timepunch::db::snapshot_store::{load_snapshot, save_snapshot};
use timepunch::models::snapshot::{TimerSnapshot, TimerStatus};

const USER: &str = "tester";

fn mem_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_db(&conn).unwrap();
    conn
}

fn cache_path(name: &str) -> PathBuf {
    let mut p = env::temp_dir();
    p.push(format!("{}_timepunch_cache.json", name));
    fs::remove_file(&p).ok();
    p
}

fn active_snapshot() -> TimerSnapshot {
    TimerSnapshot {
        is_active: true,
        start_time_ms: Some(1_000_000),
        target_work_ms: 8 * 3_600_000,
        target_break_ms: 30 * 60_000,
        accumulated_work_ms: 42_000,
        last_status_change_ms: Some(1_042_000),
        status: TimerStatus::Working,
        ..Default::default()
    }
}

#[test]
fn load_defaults_to_idle_when_nothing_saved() {
    let conn = mem_db();
    let gw = SyncGateway::new(USER, cache_path("load_default"));

    let snap = gw.load(&conn);
    assert!(!snap.is_active);
    assert_eq!(snap.status, TimerStatus::Idle);
}

#[test]
fn push_saves_durably_and_mirrors_cache() {
    let conn = mem_db();
    let path = cache_path("push_active");
    let gw = SyncGateway::new(USER, path.clone());

    let snap = active_snapshot();
    gw.push(&conn, &snap);

    let durable = load_snapshot(&conn, USER).unwrap().unwrap();
    assert_eq!(durable, snap);
    assert!(path.exists());

    let loaded = gw.load(&conn);
    assert_eq!(loaded, snap);

    fs::remove_file(&path).ok();
}

#[test]
fn push_of_inactive_snapshot_skips_cache() {
    let conn = mem_db();
    let path = cache_path("push_inactive");
    let gw = SyncGateway::new(USER, path.clone());

    gw.push(&conn, &TimerSnapshot::default());

    assert!(load_snapshot(&conn, USER).unwrap().is_some());
    assert!(!path.exists());
}

#[test]
fn cache_wins_when_durable_snapshot_is_inactive() {
    let conn = mem_db();
    let path = cache_path("cache_fallback");
    let gw = SyncGateway::new(USER, path.clone());

    // Mirror an active day into the cache, then overwrite the durable
    // snapshot with an idle one (a cleared store on another machine).
    let snap = active_snapshot();
    gw.push(&conn, &snap);
    save_snapshot(&conn, USER, &TimerSnapshot::default()).unwrap();

    let loaded = gw.load(&conn);
    assert!(loaded.is_active);
    assert_eq!(loaded.accumulated_work_ms, snap.accumulated_work_ms);

    fs::remove_file(&path).ok();
}

#[test]
fn inactive_cache_is_ignored() {
    let conn = mem_db();
    let path = cache_path("stale_cache");
    fs::write(
        &path,
        serde_json::to_string(&TimerSnapshot::default()).unwrap(),
    )
    .unwrap();
    let gw = SyncGateway::new(USER, path.clone());

    let loaded = gw.load(&conn);
    assert!(!loaded.is_active);

    fs::remove_file(&path).ok();
}

#[test]
fn corrupt_cache_falls_back_to_default() {
    let conn = mem_db();
    let path = cache_path("corrupt_cache");
    fs::write(&path, "{not json").unwrap();
    let gw = SyncGateway::new(USER, path.clone());

    let loaded = gw.load(&conn);
    assert!(!loaded.is_active);
    assert_eq!(loaded.status, TimerStatus::Idle);

    fs::remove_file(&path).ok();
}

#[test]
fn clear_removes_durable_row_and_cache_file() {
    let conn = mem_db();
    let path = cache_path("clear_both");
    let gw = SyncGateway::new(USER, path.clone());

    gw.push(&conn, &active_snapshot());
    assert!(path.exists());

    gw.clear(&conn);
    assert!(load_snapshot(&conn, USER).unwrap().is_none());
    assert!(!path.exists());
}
