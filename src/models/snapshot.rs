//! The per-user timer snapshot: the durable form of the in-memory timer.
//! All durations and instants are integer epoch milliseconds, so the
//! persisted round-trip is exact.

use serde::{Deserialize, Serialize};

/// Snapshot log entries are a bounded ring: newest first, oldest silently
/// dropped past this cap.
pub const LOG_CAP: usize = 50;

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Working,
    Break,
    Completed,
}

impl TimerStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Working => "working",
            TimerStatus::Break => "break",
            TimerStatus::Completed => "completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(TimerStatus::Idle),
            "working" => Some(TimerStatus::Working),
            "break" => Some(TimerStatus::Break),
            "completed" => Some(TimerStatus::Completed),
            _ => None,
        }
    }
}

/// One entry of the snapshot's action log ("Start", "Punch In (Work)", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: String,
    pub time_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub is_active: bool,
    pub start_time_ms: Option<i64>,
    pub target_work_ms: i64,
    pub target_break_ms: i64,
    pub accumulated_work_ms: i64,
    pub accumulated_break_ms: i64,
    /// Start instant of the currently open segment. Always Some while
    /// status is Working or Break.
    pub last_status_change_ms: Option<i64>,
    pub status: TimerStatus,
    /// Newest first, capped at LOG_CAP.
    pub logs: Vec<LogEntry>,
    /// One-shot guard so the overtime alert fires at most once per day.
    pub has_fired_ot_notification: bool,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self {
            is_active: false,
            start_time_ms: None,
            target_work_ms: 0,
            target_break_ms: 0,
            accumulated_work_ms: 0,
            accumulated_break_ms: 0,
            last_status_change_ms: None,
            status: TimerStatus::Idle,
            logs: Vec::new(),
            has_fired_ot_notification: false,
        }
    }
}

/// Derived, render-ready view of the snapshot at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub total_work_ms: i64,
    pub total_break_ms: i64,
    pub remaining_work_ms: i64,
    pub remaining_break_ms: i64,
    pub is_overtime: bool,
}

impl TimerSnapshot {
    /// Prepend a log entry, keeping the list newest-first and capped.
    pub fn push_log(&mut self, kind: &str, time_ms: i64) {
        self.logs.insert(
            0,
            LogEntry {
                kind: kind.to_string(),
                time_ms,
            },
        );
        self.logs.truncate(LOG_CAP);
    }

    /// Insert entries that may fall anywhere in the past, then restore the
    /// newest-first order. Used by the historical break recalibrator.
    pub fn merge_logs(&mut self, entries: Vec<LogEntry>) {
        self.logs.extend(entries);
        self.logs.sort_by(|a, b| b.time_ms.cmp(&a.time_ms));
        self.logs.truncate(LOG_CAP);
    }

    /// Duration of the currently open work segment, 0 when not working.
    pub fn live_work_ms(&self, now_ms: i64) -> i64 {
        match (self.status, self.last_status_change_ms) {
            (TimerStatus::Working, Some(last)) => now_ms - last,
            _ => 0,
        }
    }

    /// Duration of the currently open break segment, 0 when not on break.
    pub fn live_break_ms(&self, now_ms: i64) -> i64 {
        match (self.status, self.last_status_change_ms) {
            (TimerStatus::Break, Some(last)) => now_ms - last,
            _ => 0,
        }
    }

    /// Total elapsed work at `now_ms`: committed segments plus the live one.
    pub fn total_work_ms(&self, now_ms: i64) -> i64 {
        self.accumulated_work_ms + self.live_work_ms(now_ms)
    }

    pub fn total_break_ms(&self, now_ms: i64) -> i64 {
        self.accumulated_break_ms + self.live_break_ms(now_ms)
    }

    pub fn projection(&self, now_ms: i64) -> Projection {
        let total_work_ms = self.total_work_ms(now_ms);
        let total_break_ms = self.total_break_ms(now_ms);
        let remaining_work_ms = self.target_work_ms - total_work_ms;
        Projection {
            total_work_ms,
            total_break_ms,
            remaining_work_ms,
            remaining_break_ms: self.target_break_ms - total_break_ms,
            is_overtime: remaining_work_ms <= 0,
        }
    }
}
