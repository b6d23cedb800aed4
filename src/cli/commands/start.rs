use chrono::{Local, Timelike};

use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::format::format_short;
use crate::core::timer;
use crate::db::{tplog, worklog_store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::time::{fmt_clock, parse_hhmm};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Start {
        hours,
        minutes,
        break_minutes,
        at,
    } = cmd
    else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let now = Local::now();
    let entry = match at {
        Some(s) => parse_hhmm(s)?,
        None => now.time().with_nanosecond(0).unwrap_or_else(|| now.time()),
    };

    let ctx = Ctx::open(cfg)?;
    let mut snap = ctx.gateway.load(&ctx.pool.conn);

    let start_ms = timer::start_day(
        &mut snap,
        hours.unwrap_or(cfg.work_hours),
        minutes.unwrap_or(cfg.work_minutes),
        break_minutes.unwrap_or(cfg.break_minutes),
        entry,
        now,
    )?;

    // Side effects: punch-in row and an immediate snapshot sync, both
    // best-effort for the row, fire-and-forget semantics per the design.
    if let Err(e) = worklog_store::open_row(&ctx.pool.conn, &ctx.user, start_ms) {
        warning(format!("Failed to append punch-in row: {}", e));
        let _ = tplog(&ctx.pool.conn, "row_append_failed", &ctx.user, &e.to_string());
    }
    ctx.gateway.push(&ctx.pool.conn, &snap);
    let _ = tplog(
        &ctx.pool.conn,
        "start",
        &ctx.user,
        &format!("day started at {}", fmt_clock(start_ms)),
    );

    success(format!(
        "Day started at {} (target work {}, target break {}).",
        fmt_clock(start_ms),
        format_short(snap.target_work_ms),
        format_short(snap.target_break_ms),
    ));
    Ok(())
}
