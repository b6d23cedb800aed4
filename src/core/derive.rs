//! Session/Break interval derivation: turn persisted work-log rows into a
//! chronological sequence of work and break calendar events.
//!
//! Runs over the append-only rows, never over the live timer state, so
//! the calendar stays correct even if the snapshot has drifted.

use std::collections::HashMap;

use crate::models::calendar::CalendarEvent;
use crate::models::snapshot::MS_PER_MINUTE;
use crate::models::worklog::{RowStatus, WorkLogRow};
use crate::utils::time::same_local_day;

/// Collapse rows sharing an identical punch-in instant (client retries):
/// prefer completed over active, then the later `updated_at`.
pub fn dedup_rows(rows: Vec<WorkLogRow>) -> Vec<WorkLogRow> {
    let mut by_punch_in: HashMap<i64, WorkLogRow> = HashMap::new();

    for row in rows {
        match by_punch_in.get(&row.punch_in_ms) {
            None => {
                by_punch_in.insert(row.punch_in_ms, row);
            }
            Some(existing) => {
                let replace = (existing.status == RowStatus::Active
                    && row.status == RowStatus::Completed)
                    || (existing.status == row.status
                        && row.updated_at_ms > existing.updated_at_ms);
                if replace {
                    by_punch_in.insert(row.punch_in_ms, row);
                }
            }
        }
    }

    let mut out: Vec<WorkLogRow> = by_punch_in.into_values().collect();
    out.sort_by_key(|r| r.punch_in_ms);
    out
}

/// Derive the calendar events for a set of rows at instant `now_ms`.
///
/// One work event per deduplicated row (open rows end at `now_ms`), plus
/// one break event for every same-day forward gap between consecutive
/// rows. Zero-minute gaps and cross-midnight gaps are suppressed.
pub fn derive_events(rows: Vec<WorkLogRow>, now_ms: i64) -> Vec<CalendarEvent> {
    let rows = dedup_rows(rows);
    let mut events = Vec::with_capacity(rows.len() * 2);

    for (i, row) in rows.iter().enumerate() {
        events.push(CalendarEvent::Work {
            row_id: row.id,
            start_ms: row.punch_in_ms,
            end_ms: row.punch_out_ms.unwrap_or(now_ms),
            duration_ms: row.duration_ms(now_ms),
            is_active: row.status == RowStatus::Active,
        });

        let Some(punch_out) = row.punch_out_ms else {
            continue;
        };
        let Some(next) = rows.get(i + 1) else {
            continue;
        };

        if same_local_day(punch_out, next.punch_in_ms) && next.punch_in_ms > punch_out {
            let minutes = (next.punch_in_ms - punch_out) / MS_PER_MINUTE;
            if minutes > 0 {
                events.push(CalendarEvent::Break {
                    prev_row_id: row.id,
                    next_row_id: next.id,
                    start_ms: punch_out,
                    end_ms: next.punch_in_ms,
                    minutes,
                });
            }
        }
    }

    events
}
