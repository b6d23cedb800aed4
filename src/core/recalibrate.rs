//! Historical break recalibration: retroactively declare "I was on break
//! from T1 to T2" without losing timer accuracy.
//!
//! The declared break may overlap the already-committed work bucket, the
//! still-open live segment, or both. The committed portion is subtracted
//! from `accumulated_work_ms` (floored at 0); the live portion is removed
//! by advancing `last_status_change_ms` forward, since the live duration
//! is always recomputed as `now - last_status_change`. The break bucket
//! grows by the full declared duration, so work + break time is conserved.

use crate::core::timer::{LOG_PUNCH_IN, LOG_PUNCH_OUT};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{LogEntry, TimerSnapshot, TimerStatus};

/// How a declared break was charged against the two work buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSplit {
    /// Subtracted from the committed accumulated-work bucket.
    pub committed_ms: i64,
    /// Removed from the live open segment by advancing its start.
    pub live_ms: i64,
}

/// Insert a break spanning `punch_out_ms..punch_in_ms` into the day.
///
/// Validation (no mutation on failure): the interval must be ordered and
/// entirely in the past, and a day must be in progress. The matching
/// work-log row split is the caller's side effect; its failure does not
/// undo the local recalibration (accepted eventual-consistency drift).
pub fn add_historical_break(
    snap: &mut TimerSnapshot,
    punch_out_ms: i64,
    punch_in_ms: i64,
    now_ms: i64,
) -> AppResult<BreakSplit> {
    if punch_out_ms >= punch_in_ms {
        return Err(AppError::BreakOrderInvalid);
    }
    if punch_out_ms >= now_ms {
        return Err(AppError::BreakStartInFuture);
    }
    if punch_in_ms > now_ms {
        return Err(AppError::BreakEndInFuture);
    }
    if !snap.is_active {
        return Err(AppError::NoActiveDay);
    }

    let break_ms = punch_in_ms - punch_out_ms;
    let last_change = snap
        .last_status_change_ms
        .or(snap.start_time_ms)
        .unwrap_or(0);

    let split = if snap.status == TimerStatus::Working && punch_in_ms > last_change {
        // The break reaches into the live open segment.
        let live_ms = punch_in_ms - punch_out_ms.max(last_change);
        BreakSplit {
            committed_ms: break_ms - live_ms,
            live_ms,
        }
    } else {
        // Entirely inside the committed past (or we are on break already).
        BreakSplit {
            committed_ms: break_ms,
            live_ms: 0,
        }
    };

    snap.accumulated_work_ms = (snap.accumulated_work_ms - split.committed_ms).max(0);
    snap.accumulated_break_ms += break_ms;
    if split.live_ms > 0 {
        snap.last_status_change_ms = Some(last_change + split.live_ms);
    }

    snap.merge_logs(vec![
        LogEntry {
            kind: LOG_PUNCH_OUT.to_string(),
            time_ms: punch_out_ms,
        },
        LogEntry {
            kind: LOG_PUNCH_IN.to_string(),
            time_ms: punch_in_ms,
        },
    ]);

    Ok(split)
}
