//! Calendar events derived from work-log rows. Work events map 1:1 to
//! rows; break events reference the two rows that bound the gap so the
//! CLI can map a delete/merge back to row mutations.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarEvent {
    Work {
        row_id: i64,
        start_ms: i64,
        end_ms: i64,
        duration_ms: i64,
        is_active: bool,
    },
    Break {
        prev_row_id: i64,
        next_row_id: i64,
        start_ms: i64,
        end_ms: i64,
        minutes: i64,
    },
}

impl CalendarEvent {
    pub fn start_ms(&self) -> i64 {
        match self {
            CalendarEvent::Work { start_ms, .. } => *start_ms,
            CalendarEvent::Break { start_ms, .. } => *start_ms,
        }
    }

    pub fn end_ms(&self) -> i64 {
        match self {
            CalendarEvent::Work { end_ms, .. } => *end_ms,
            CalendarEvent::Break { end_ms, .. } => *end_ms,
        }
    }
}
