use chrono::Local;

use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::{self, PunchKind};
use crate::db::{tplog, worklog_store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::time::{at_today, fmt_clock, parse_hhmm};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Punch { at } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let now = Local::now();
    let manual_ms = match at {
        Some(s) => Some(at_today(parse_hhmm(s)?, now)),
        None => None,
    };

    let ctx = Ctx::open(cfg)?;
    let mut snap = ctx.gateway.load(&ctx.pool.conn);

    let punch = timer::punch_toggle(&mut snap, manual_ms, now.timestamp_millis())?;

    // Mirror the transition into the work log, then sync. Row failures
    // are tolerated drift, not punch failures.
    let row_result = match punch.kind {
        PunchKind::Out => {
            worklog_store::close_open_row(&ctx.pool.conn, &ctx.user, punch.at_ms).map(|_| ())
        }
        PunchKind::In => {
            worklog_store::open_row(&ctx.pool.conn, &ctx.user, punch.at_ms).map(|_| ())
        }
    };
    if let Err(e) = row_result {
        warning(format!("Failed to update the work log: {}", e));
        let _ = tplog(&ctx.pool.conn, "row_append_failed", &ctx.user, &e.to_string());
    }
    ctx.gateway.push(&ctx.pool.conn, &snap);

    match punch.kind {
        PunchKind::Out => {
            let _ = tplog(&ctx.pool.conn, "punch_out", &ctx.user, &fmt_clock(punch.at_ms));
            success(format!("Punched out at {}, on break.", fmt_clock(punch.at_ms)));
        }
        PunchKind::In => {
            let _ = tplog(&ctx.pool.conn, "punch_in", &ctx.user, &fmt_clock(punch.at_ms));
            success(format!("Punched in at {}, working.", fmt_clock(punch.at_ms)));
        }
    }
    Ok(())
}
