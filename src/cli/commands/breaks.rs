use chrono::Local;

use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::format::format_short;
use crate::core::recalibrate::add_historical_break;
use crate::db::{tplog, worklog_store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::time::{at_today, fmt_clock, parse_hhmm};

/// `timepunch break --from HH:MM --to HH:MM`
///
/// Recalibrates the local timer first; the work-log row split is a
/// trailing side effect whose failure leaves the timer update in place
/// (accepted local/persisted divergence, repaired via the calendar flow).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Break { from, to } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let now = Local::now();
    let punch_out_ms = at_today(parse_hhmm(from)?, now);
    let punch_in_ms = at_today(parse_hhmm(to)?, now);

    let ctx = Ctx::open(cfg)?;
    let mut snap = ctx.gateway.load(&ctx.pool.conn);

    let split = add_historical_break(&mut snap, punch_out_ms, punch_in_ms, now.timestamp_millis())?;
    ctx.gateway.push(&ctx.pool.conn, &snap);

    let mut conn = ctx.pool.conn;
    match worklog_store::split_open_row(&mut conn, &ctx.user, punch_out_ms, punch_in_ms) {
        Ok(()) => {}
        Err(AppError::NoActiveRow) => {
            warning(
                "No open work-log row to split. The timer was adjusted, \
                 but edit the break from the calendar to fix the log.",
            );
            let _ = tplog(&conn, "split_skipped", &ctx.user, "no active row");
        }
        Err(e) => {
            warning(format!("Failed to split the work-log row: {}", e));
            let _ = tplog(&conn, "split_failed", &ctx.user, &e.to_string());
        }
    }

    let _ = tplog(
        &conn,
        "break",
        &ctx.user,
        &format!("{} -> {}", fmt_clock(punch_out_ms), fmt_clock(punch_in_ms)),
    );
    success(format!(
        "Break {} -> {} recorded ({} moved to break: {} committed, {} live).",
        fmt_clock(punch_out_ms),
        fmt_clock(punch_in_ms),
        format_short(punch_in_ms - punch_out_ms),
        format_short(split.committed_ms),
        format_short(split.live_ms),
    ));
    Ok(())
}
