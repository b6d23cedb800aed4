//! The timer state machine for a single user's work day:
//! idle → working ⇄ break → (reset).
//!
//! All operations take the current instant explicitly and mutate the
//! snapshot only after every validation has passed (fail closed). Side
//! effects (work-log rows, snapshot sync) are the caller's job; the
//! functions here report what happened so the caller can mirror it.

use chrono::{DateTime, Local};

use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{MS_PER_MINUTE, TimerSnapshot, TimerStatus};
use crate::utils::time::resolve_entry_time;

pub const LOG_START: &str = "Start";
pub const LOG_PUNCH_OUT: &str = "Punch Out (Break)";
pub const LOG_PUNCH_IN: &str = "Punch In (Work)";

/// Which way a successful punch toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchKind {
    /// working → break
    Out,
    /// break → working
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Punch {
    pub kind: PunchKind,
    pub at_ms: i64,
    /// Duration of the segment that was just closed.
    pub segment_ms: i64,
}

/// Begin a work day. Only valid from idle: a running day must be reset
/// (or cleared) first, so a stray `start` cannot silently discard it.
///
/// Returns the resolved start instant in epoch ms.
pub fn start_day(
    snap: &mut TimerSnapshot,
    work_hours: u32,
    work_minutes: u32,
    break_minutes: u32,
    entry: chrono::NaiveTime,
    now: DateTime<Local>,
) -> AppResult<i64> {
    if snap.is_active {
        return Err(AppError::DayAlreadyActive);
    }

    let start_ms = resolve_entry_time(entry, now);

    *snap = TimerSnapshot {
        is_active: true,
        start_time_ms: Some(start_ms),
        target_work_ms: (work_hours as i64 * 60 + work_minutes as i64) * MS_PER_MINUTE,
        target_break_ms: break_minutes as i64 * MS_PER_MINUTE,
        accumulated_work_ms: 0,
        accumulated_break_ms: 0,
        last_status_change_ms: Some(start_ms),
        status: TimerStatus::Working,
        logs: Vec::new(),
        has_fired_ot_notification: false,
    };
    snap.push_log(LOG_START, start_ms);

    Ok(start_ms)
}

/// Toggle working ⇄ break at `manual_ms` if given, else at `now_ms`.
///
/// Preconditions (no mutation on failure): the effective time must not be
/// in the future and must fall strictly after the last status change.
/// Toggling with no day in progress is an explicit rejection, not a
/// silent no-op.
pub fn punch_toggle(
    snap: &mut TimerSnapshot,
    manual_ms: Option<i64>,
    now_ms: i64,
) -> AppResult<Punch> {
    let effective = manual_ms.unwrap_or(now_ms);

    if effective > now_ms {
        return Err(AppError::PunchInFuture);
    }

    let last = match (snap.status, snap.last_status_change_ms) {
        (TimerStatus::Working, Some(last)) | (TimerStatus::Break, Some(last)) => last,
        _ => return Err(AppError::NoActiveDay),
    };

    if effective <= last {
        return Err(AppError::PunchBeforeLastAction);
    }

    let segment_ms = effective - last;
    let punch = match snap.status {
        TimerStatus::Working => {
            snap.accumulated_work_ms += segment_ms;
            snap.status = TimerStatus::Break;
            snap.push_log(LOG_PUNCH_OUT, effective);
            Punch {
                kind: PunchKind::Out,
                at_ms: effective,
                segment_ms,
            }
        }
        TimerStatus::Break => {
            snap.accumulated_break_ms += segment_ms;
            snap.status = TimerStatus::Working;
            snap.push_log(LOG_PUNCH_IN, effective);
            Punch {
                kind: PunchKind::In,
                at_ms: effective,
                segment_ms,
            }
        }
        _ => unreachable!("guarded above"),
    };
    snap.last_status_change_ms = Some(effective);

    Ok(punch)
}

/// Unconditionally restore the default idle snapshot. Always succeeds.
pub fn reset_day(snap: &mut TimerSnapshot) {
    *snap = TimerSnapshot::default();
}

/// Overtime check, run on every tick. Returns true exactly once per day:
/// when working, a target is set, total work has met it, and the alert
/// has not fired yet. Advisory only; never blocks the timer itself.
pub fn overtime_due(snap: &mut TimerSnapshot, now_ms: i64) -> bool {
    if snap.status == TimerStatus::Working
        && snap.target_work_ms > 0
        && snap.total_work_ms(now_ms) >= snap.target_work_ms
        && !snap.has_fired_ot_notification
    {
        snap.has_fired_ot_notification = true;
        return true;
    }
    false
}
