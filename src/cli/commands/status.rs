use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::format::{format_hms, format_short};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::TimerStatus;
use crate::ui::messages::{info, warning};
use crate::utils::time::{fmt_clock, fmt_datetime, now_ms};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Status { logs } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let ctx = Ctx::open(cfg)?;
    let snap = ctx.gateway.load(&ctx.pool.conn);

    if !snap.is_active {
        info("No active day. Use `timepunch start` to begin.");
        return Ok(());
    }

    let now = now_ms();
    let proj = snap.projection(now);

    let status_str = match snap.status {
        TimerStatus::Working => "working",
        TimerStatus::Break => "on break",
        TimerStatus::Idle => "idle",
        TimerStatus::Completed => "completed",
    };

    println!("Status:          {}", status_str);
    if let Some(start) = snap.start_time_ms {
        println!("Day started:     {}", fmt_clock(start));
    }
    println!(
        "Work:            {}  (target {})",
        format_hms(proj.total_work_ms),
        format_short(snap.target_work_ms)
    );
    println!(
        "Break:           {}  (target {})",
        format_hms(proj.total_break_ms),
        format_short(snap.target_break_ms)
    );
    if proj.is_overtime {
        warning(format!(
            "Overtime:        +{}",
            format_hms(-proj.remaining_work_ms)
        ));
    } else {
        println!("Remaining work:  {}", format_hms(proj.remaining_work_ms));
    }
    println!("Remaining break: {}", format_hms(proj.remaining_break_ms));

    if *logs && !snap.logs.is_empty() {
        println!("\nRecent actions:");
        for entry in &snap.logs {
            println!("  {}  {}", fmt_datetime(entry.time_ms), entry.kind);
        }
    }
    Ok(())
}
