//! Persisted work-log rows: one row per contiguous work interval.
//! Breaks are never stored; they are the implicit gaps between rows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::snapshot::MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Active,
    Completed,
}

impl RowStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            RowStatus::Active => "active",
            RowStatus::Completed => "completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(RowStatus::Active),
            "completed" => Some(RowStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkLogRow {
    pub id: i64,
    pub user: String,
    /// Calendar day the row belongs to (local wall clock).
    pub date: NaiveDate,
    pub punch_in_ms: i64,
    /// None while the row is still open.
    pub punch_out_ms: Option<i64>,
    /// Frozen duration in hours once the row is closed.
    pub total_hours: Option<f64>,
    pub status: RowStatus,
    pub updated_at_ms: i64,
}

impl WorkLogRow {
    pub fn is_open(&self) -> bool {
        self.status == RowStatus::Active && self.punch_out_ms.is_none()
    }

    /// Duration to display: the frozen hours if set, otherwise live `now - punchIn`.
    pub fn duration_ms(&self, now_ms: i64) -> i64 {
        match self.total_hours {
            Some(h) => (h * MS_PER_HOUR as f64) as i64,
            None => now_ms - self.punch_in_ms,
        }
    }
}

/// Round a millisecond span to hours with the given number of decimals.
/// Closing a row freezes 2 decimals, splitting freezes 4.
pub fn hours_from_ms(ms: i64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let hours = ms as f64 / MS_PER_HOUR as f64;
    (hours * factor).round() / factor
}
