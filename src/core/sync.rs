//! Snapshot Sync Gateway: best-effort persistence of the timer snapshot
//! and the load precedence between the durable store and the local cache.
//!
//! Pushes never fail the calling operation: a failed save is recorded in
//! the operation log and overwritten by the next push with fresher state.
//! The local cache file is only ever written while a day is active, and
//! only read when the durable snapshot is missing or unreadable.

use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::{snapshot_store, tplog};
use crate::models::snapshot::TimerSnapshot;
use crate::ui::messages::warning;

pub struct SyncGateway {
    user: String,
    cache_path: PathBuf,
}

impl SyncGateway {
    pub fn new(user: &str, cache_path: PathBuf) -> Self {
        Self {
            user: user.to_string(),
            cache_path,
        }
    }

    /// Load precedence: durable snapshot first; if it is missing, inactive
    /// or unreadable, fall back to the local cache; otherwise start from a
    /// fresh idle snapshot.
    pub fn load(&self, conn: &Connection) -> TimerSnapshot {
        match snapshot_store::load_snapshot(conn, &self.user) {
            Ok(Some(snap)) if snap.is_active => return snap,
            Ok(_) => {}
            Err(e) => warning(format!("Failed to load timer snapshot: {}", e)),
        }
        self.load_cache().unwrap_or_default()
    }

    /// Best-effort push of the snapshot to the durable store, mirroring it
    /// into the local cache while a day is active.
    pub fn push(&self, conn: &Connection, snap: &TimerSnapshot) {
        if let Err(e) = snapshot_store::save_snapshot(conn, &self.user, snap) {
            warning(format!("Failed to sync timer snapshot: {}", e));
            let _ = tplog(conn, "sync_failed", &self.user, &e.to_string());
        }

        if snap.is_active {
            self.write_cache(snap);
        }
    }

    /// Best-effort delete of the durable snapshot and the cache file.
    pub fn clear(&self, conn: &Connection) {
        if let Err(e) = snapshot_store::delete_snapshot(conn, &self.user) {
            warning(format!("Failed to delete timer snapshot: {}", e));
            let _ = tplog(conn, "sync_failed", &self.user, &e.to_string());
        }
        let _ = fs::remove_file(&self.cache_path);
    }

    fn load_cache(&self) -> Option<TimerSnapshot> {
        let content = fs::read_to_string(&self.cache_path).ok()?;
        let snap: TimerSnapshot = serde_json::from_str(&content).ok()?;
        if snap.is_active { Some(snap) } else { None }
    }

    fn write_cache(&self, snap: &TimerSnapshot) {
        if let Some(parent) = self.cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string(snap) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.cache_path, json) {
                    warning(format!("Failed to write snapshot cache: {}", e));
                }
            }
            Err(e) => warning(format!("Failed to encode snapshot cache: {}", e)),
        }
    }
}
