//! Durable timer snapshot: one row per user, overwritten in place.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{LogEntry, TimerSnapshot, TimerStatus};
use crate::utils::time::now_ms;

/// Load the snapshot for a user, or None if no active day was ever saved.
pub fn load_snapshot(conn: &Connection, user: &str) -> AppResult<Option<TimerSnapshot>> {
    let mut stmt = conn.prepare_cached(
        "SELECT is_active, start_time, target_work_ms, target_break_ms,
                accumulated_work_ms, accumulated_break_ms, last_status_change,
                status, logs, ot_notified
         FROM timer_snapshot WHERE user = ?1",
    )?;

    let row = stmt
        .query_row([user], |row| {
            let status_str: String = row.get("status")?;
            let logs_json: String = row.get("logs")?;
            Ok((
                row.get::<_, i64>("is_active")? != 0,
                row.get::<_, Option<i64>>("start_time")?,
                row.get::<_, i64>("target_work_ms")?,
                row.get::<_, i64>("target_break_ms")?,
                row.get::<_, i64>("accumulated_work_ms")?,
                row.get::<_, i64>("accumulated_break_ms")?,
                row.get::<_, Option<i64>>("last_status_change")?,
                status_str,
                logs_json,
                row.get::<_, i64>("ot_notified")? != 0,
            ))
        })
        .optional()?;

    let Some((
        is_active,
        start_time_ms,
        target_work_ms,
        target_break_ms,
        accumulated_work_ms,
        accumulated_break_ms,
        last_status_change_ms,
        status_str,
        logs_json,
        has_fired_ot_notification,
    )) = row
    else {
        return Ok(None);
    };

    let status = TimerStatus::from_db_str(&status_str)
        .ok_or_else(|| AppError::Other(format!("invalid snapshot status: {}", status_str)))?;
    let logs: Vec<LogEntry> = serde_json::from_str(&logs_json)
        .map_err(|e| AppError::Other(format!("corrupt snapshot logs: {}", e)))?;

    Ok(Some(TimerSnapshot {
        is_active,
        start_time_ms,
        target_work_ms,
        target_break_ms,
        accumulated_work_ms,
        accumulated_break_ms,
        last_status_change_ms,
        status,
        logs,
        has_fired_ot_notification,
    }))
}

/// Idempotent upsert keyed by user.
pub fn save_snapshot(conn: &Connection, user: &str, snap: &TimerSnapshot) -> AppResult<()> {
    let logs_json = serde_json::to_string(&snap.logs)
        .map_err(|e| AppError::Other(format!("serialize snapshot logs: {}", e)))?;

    conn.execute(
        "INSERT INTO timer_snapshot
            (user, is_active, start_time, target_work_ms, target_break_ms,
             accumulated_work_ms, accumulated_break_ms, last_status_change,
             status, logs, ot_notified, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(user) DO UPDATE SET
            is_active = excluded.is_active,
            start_time = excluded.start_time,
            target_work_ms = excluded.target_work_ms,
            target_break_ms = excluded.target_break_ms,
            accumulated_work_ms = excluded.accumulated_work_ms,
            accumulated_break_ms = excluded.accumulated_break_ms,
            last_status_change = excluded.last_status_change,
            status = excluded.status,
            logs = excluded.logs,
            ot_notified = excluded.ot_notified,
            updated_at = excluded.updated_at",
        params![
            user,
            snap.is_active as i64,
            snap.start_time_ms,
            snap.target_work_ms,
            snap.target_break_ms,
            snap.accumulated_work_ms,
            snap.accumulated_break_ms,
            snap.last_status_change_ms,
            snap.status.to_db_str(),
            logs_json,
            snap.has_fired_ot_notification as i64,
            now_ms(),
        ],
    )?;
    Ok(())
}

pub fn delete_snapshot(conn: &Connection, user: &str) -> AppResult<()> {
    conn.execute("DELETE FROM timer_snapshot WHERE user = ?1", [user])?;
    Ok(())
}
