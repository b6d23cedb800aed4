use std::io::{Write, stdout};
use std::thread;
use std::time::Duration;

use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::format::format_hms;
use crate::core::timer::overtime_due;
use crate::db::tplog;
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::TimerStatus;
use crate::ui::messages::{info, warning};
use crate::utils::time::now_ms;

/// The cooperative one-second tick loop: re-render the projection, fire
/// the one-shot overtime alert, and push a best-effort snapshot sync on
/// the configured cadence. The loop owns no state of its own: every tick
/// reloads the snapshot, so punches from another terminal are picked up,
/// and the loop tears itself down when the day is no longer active.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Watch { ticks } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let ctx = Ctx::open(cfg)?;
    let sync_every = cfg.sync_interval_secs.max(1);
    let mut tick: u64 = 0;

    loop {
        let mut snap = ctx.gateway.load(&ctx.pool.conn);
        if !snap.is_active {
            println!();
            info("Day ended, stopping watch.");
            return Ok(());
        }

        let now = now_ms();
        let proj = snap.projection(now);

        if overtime_due(&mut snap, now) {
            println!();
            warning("Target work reached, you are in overtime.");
            let _ = tplog(&ctx.pool.conn, "overtime", &ctx.user, "alert fired");
            // Event-triggered sync so the one-shot guard survives restarts.
            ctx.gateway.push(&ctx.pool.conn, &snap);
        }

        let state = match snap.status {
            TimerStatus::Working => "working",
            TimerStatus::Break => "break  ",
            _ => "?      ",
        };
        let remaining = if proj.is_overtime {
            format!("overtime +{}", format_hms(-proj.remaining_work_ms))
        } else {
            format!("remaining {}", format_hms(proj.remaining_work_ms))
        };
        print!(
            "\r[{}] work {}  break {}  {}   ",
            state,
            format_hms(proj.total_work_ms),
            format_hms(proj.total_break_ms),
            remaining,
        );
        let _ = stdout().flush();

        tick += 1;
        if tick % sync_every == 0 {
            ctx.gateway.push(&ctx.pool.conn, &snap);
        }
        if *ticks > 0 && tick >= *ticks {
            println!();
            return Ok(());
        }

        thread::sleep(Duration::from_secs(1));
    }
}
