//! Work-log row persistence: append, close, split, merge, delete, list.
//!
//! The invariant kept here: at most one row per user is `active` at a
//! time. The two-row mutations (split, merge) run inside a transaction so
//! the log can never end up with two open rows or an orphaned half.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

use crate::errors::{AppError, AppResult};
use crate::models::worklog::{RowStatus, WorkLogRow, hours_from_ms};
use crate::utils::time::{local_date_of_ms, now_ms, parse_date};

fn map_row(row: &Row) -> Result<WorkLogRow> {
    let date_str: String = row.get("date")?;
    let date = parse_date(&date_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let status_str: String = row.get("status")?;
    let status = RowStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid row status: {}", status_str))),
        )
    })?;

    Ok(WorkLogRow {
        id: row.get("id")?,
        user: row.get("user")?,
        date,
        punch_in_ms: row.get("punch_in")?,
        punch_out_ms: row.get("punch_out")?,
        total_hours: row.get("total_hours")?,
        status,
        updated_at_ms: row.get("updated_at")?,
    })
}

/// Open a new active row at `at_ms` (a punch-in). The row's calendar day
/// is the local day of the punch instant.
pub fn open_row(conn: &Connection, user: &str, at_ms: i64) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_log (user, date, punch_in, punch_out, total_hours, status, updated_at)
         VALUES (?1, ?2, ?3, NULL, NULL, 'active', ?4)",
        params![
            user,
            local_date_of_ms(at_ms).format("%Y-%m-%d").to_string(),
            at_ms,
            now_ms(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn find_open_row(conn: &Connection, user: &str) -> AppResult<Option<WorkLogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM work_log
         WHERE user = ?1 AND status = 'active' AND punch_out IS NULL
         ORDER BY punch_in DESC LIMIT 1",
    )?;
    Ok(stmt.query_row([user], map_row).optional()?)
}

/// Close the most recent open row at `at_ms` (a punch-out), freezing its
/// duration to 2-decimal hours.
pub fn close_open_row(conn: &Connection, user: &str, at_ms: i64) -> AppResult<WorkLogRow> {
    let open = find_open_row(conn, user)?.ok_or(AppError::NoActiveRow)?;

    let hours = hours_from_ms(at_ms - open.punch_in_ms, 2);
    conn.execute(
        "UPDATE work_log
         SET punch_out = ?1, total_hours = ?2, status = 'completed', updated_at = ?3
         WHERE id = ?4",
        params![at_ms, hours, now_ms(), open.id],
    )?;

    Ok(WorkLogRow {
        punch_out_ms: Some(at_ms),
        total_hours: Some(hours),
        status: RowStatus::Completed,
        ..open
    })
}

/// Split the open row at a historical break: close it at `break_start_ms`
/// and open a fresh active row at `break_end_ms`, atomically.
///
/// Rejected when no row is open (the caller falls back to the calendar
/// editing flow) or when the break starts before the open row's punch-in.
pub fn split_open_row(
    conn: &mut Connection,
    user: &str,
    break_start_ms: i64,
    break_end_ms: i64,
) -> AppResult<()> {
    let open = find_open_row(conn, user)?.ok_or(AppError::NoActiveRow)?;

    if break_start_ms <= open.punch_in_ms {
        return Err(AppError::BreakBeforePunchIn);
    }

    let hours = hours_from_ms(break_start_ms - open.punch_in_ms, 4);
    let stamp = now_ms();

    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE work_log
         SET punch_out = ?1, total_hours = ?2, status = 'completed', updated_at = ?3
         WHERE id = ?4",
        params![break_start_ms, hours, stamp, open.id],
    )?;
    tx.execute(
        "INSERT INTO work_log (user, date, punch_in, punch_out, total_hours, status, updated_at)
         VALUES (?1, ?2, ?3, NULL, NULL, 'active', ?4)",
        params![
            user,
            open.date.format("%Y-%m-%d").to_string(),
            break_end_ms,
            stamp,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

fn get_row(conn: &Connection, user: &str, id: i64) -> AppResult<WorkLogRow> {
    let mut stmt = conn.prepare_cached("SELECT * FROM work_log WHERE id = ?1 AND user = ?2")?;
    stmt.query_row(params![id, user], map_row)
        .optional()?
        .ok_or(AppError::RowNotFound(id))
}

/// Merge the later row into the earlier one, atomically: the earlier row
/// absorbs the later row's punch-out (or open state), its duration is
/// recomputed, and the later row is deleted. Deleting an implicit break
/// and explicitly consolidating adjacent sessions both land here.
pub fn merge_rows(conn: &mut Connection, user: &str, earlier_id: i64, later_id: i64) -> AppResult<()> {
    let earlier = get_row(conn, user, earlier_id)?;
    let later = get_row(conn, user, later_id)?;

    let new_status = if later.status == RowStatus::Active {
        RowStatus::Active
    } else {
        RowStatus::Completed
    };
    let new_hours = later
        .punch_out_ms
        .map(|out| hours_from_ms(out - earlier.punch_in_ms, 4));

    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE work_log
         SET punch_out = ?1, total_hours = ?2, status = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            later.punch_out_ms,
            new_hours,
            new_status.to_db_str(),
            now_ms(),
            earlier.id,
        ],
    )?;
    tx.execute("DELETE FROM work_log WHERE id = ?1", [later.id])?;
    tx.commit()?;
    Ok(())
}

/// Delete one row outright. The surrounding rows are untouched; any new
/// gap simply derives as a break next time the calendar is built.
pub fn delete_row(conn: &Connection, user: &str, id: i64) -> AppResult<()> {
    let n = conn.execute(
        "DELETE FROM work_log WHERE id = ?1 AND user = ?2",
        params![id, user],
    )?;
    if n == 0 {
        return Err(AppError::RowNotFound(id));
    }
    Ok(())
}

/// All rows for a user, optionally restricted to a date range (inclusive),
/// ordered by punch-in ascending for the deriver.
pub fn list_rows(
    conn: &Connection,
    user: &str,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<WorkLogRow>> {
    let mut sql = "SELECT * FROM work_log WHERE user = ?1".to_string();
    let mut owned: Vec<String> = vec![user.to_string()];

    if let Some((start, end)) = range {
        sql.push_str(" AND date >= ?2 AND date <= ?3");
        owned.push(start.format("%Y-%m-%d").to_string());
        owned.push(end.format("%Y-%m-%d").to_string());
    }
    sql.push_str(" ORDER BY punch_in ASC");

    let params_refs: Vec<&dyn ToSql> = owned.iter().map(|s| s as &dyn ToSql).collect();
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete all rows for a user on a given local day. Returns the count.
pub fn delete_rows_for_date(conn: &Connection, user: &str, date: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM work_log WHERE user = ?1 AND date = ?2",
        params![user, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}
