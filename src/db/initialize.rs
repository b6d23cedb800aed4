use rusqlite::{Connection, Result};

/// Initialize the database schema.
///
/// `work_log` holds one row per contiguous work interval (breaks are the
/// gaps between rows, never stored). `timer_snapshot` holds the single
/// durable snapshot per user; all millisecond fields are INTEGERs so a
/// save/load round-trip is exact.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS work_log (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user         TEXT NOT NULL,
            date         TEXT NOT NULL,          -- YYYY-MM-DD (local day)
            punch_in     INTEGER NOT NULL,       -- epoch ms
            punch_out    INTEGER,                -- epoch ms, NULL while open
            total_hours  REAL,                   -- frozen once closed
            status       TEXT NOT NULL CHECK (status IN ('active','completed')),
            updated_at   INTEGER NOT NULL        -- epoch ms
        );

        CREATE INDEX IF NOT EXISTS idx_work_log_user_date ON work_log (user, date);

        CREATE TABLE IF NOT EXISTS timer_snapshot (
            user                 TEXT PRIMARY KEY,
            is_active            INTEGER NOT NULL DEFAULT 0,
            start_time           INTEGER,
            target_work_ms       INTEGER NOT NULL DEFAULT 0,
            target_break_ms      INTEGER NOT NULL DEFAULT 0,
            accumulated_work_ms  INTEGER NOT NULL DEFAULT 0,
            accumulated_break_ms INTEGER NOT NULL DEFAULT 0,
            last_status_change   INTEGER,
            status               TEXT NOT NULL DEFAULT 'idle'
                                 CHECK (status IN ('idle','working','break','completed')),
            logs                 TEXT NOT NULL DEFAULT '[]',  -- JSON, newest first
            ot_notified          INTEGER NOT NULL DEFAULT 0,
            updated_at           INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            operation TEXT NOT NULL,
            target TEXT DEFAULT '',
            message TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}
