//! Millisecond durations to human-readable strings.

/// "HH:MM:SS", always zero-padded. Negative durations format as their
/// absolute value (the caller renders the sign, e.g. overtime).
pub fn format_hms(ms: i64) -> String {
    let total_seconds = ms.abs() / 1000;
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Compact "Xh Ym" form used in tables and log rows.
pub fn format_short(ms: i64) -> String {
    let total_minutes = ms.abs() / 60_000;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
