//! Wall-clock helpers. The canonical timestamp type throughout the crate
//! is local epoch milliseconds (i64); chrono is used at the edges for
//! parsing and display.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Timelike};

use crate::errors::{AppError, AppResult};

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_hhmm(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| AppError::InvalidTime(s.to_string()))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn ms_to_local(ms: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Local.timestamp_millis_opt(0).unwrap())
}

pub fn local_date_of_ms(ms: i64) -> NaiveDate {
    ms_to_local(ms).date_naive()
}

pub fn same_local_day(a_ms: i64, b_ms: i64) -> bool {
    local_date_of_ms(a_ms) == local_date_of_ms(b_ms)
}

/// Resolve an "HH:MM" time against today's date. If the given minute is
/// the current wall-clock minute, use the precise current instant instead,
/// so picking "now" does not lose sub-minute precision.
pub fn resolve_entry_time(t: NaiveTime, now: DateTime<Local>) -> i64 {
    if t.hour() == now.hour() && t.minute() == now.minute() {
        return now.timestamp_millis();
    }
    at_today(t, now)
}

/// Today (relative to `now`) at the given wall-clock time, as epoch ms.
pub fn at_today(t: NaiveTime, now: DateTime<Local>) -> i64 {
    let dt = now.date_naive().and_time(t);
    match dt.and_local_timezone(Local) {
        chrono::LocalResult::Single(d) => d.timestamp_millis(),
        chrono::LocalResult::Ambiguous(d, _) => d.timestamp_millis(),
        // DST gap: fall back to the raw offset of `now`
        chrono::LocalResult::None => now.timestamp_millis(),
    }
}

pub fn fmt_clock(ms: i64) -> String {
    ms_to_local(ms).format("%H:%M").to_string()
}

pub fn fmt_datetime(ms: i64) -> String {
    ms_to_local(ms).format("%Y-%m-%d %H:%M").to_string()
}
