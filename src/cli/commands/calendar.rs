use std::fs::File;
use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::cli::commands::Ctx;
use crate::cli::parser::{CalendarFormat, Commands};
use crate::config::Config;
use crate::core::derive::derive_events;
use crate::core::format::format_short;
use crate::db::worklog_store;
use crate::errors::{AppError, AppResult};
use crate::models::calendar::CalendarEvent;
use crate::ui::messages::info;
use crate::utils::time::{fmt_clock, local_date_of_ms, now_ms, parse_date};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Calendar {
        period,
        format,
        file,
    } = cmd
    else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let range = match period.as_deref() {
        None => None,
        Some(p) => match p.split_once(':') {
            Some((start, end)) => Some((parse_date(start.trim())?, parse_date(end.trim())?)),
            None => {
                let d = parse_date(p)?;
                Some((d, d))
            }
        },
    };

    let ctx = Ctx::open(cfg)?;
    let rows = worklog_store::list_rows(&ctx.pool.conn, &ctx.user, range)?;
    let events = derive_events(rows, now_ms());

    if events.is_empty() {
        info("No calendar events for the selected period.");
        return Ok(());
    }

    let rendered = match format {
        CalendarFormat::Table => render_table(&events),
        CalendarFormat::Json => serde_json::to_string_pretty(&events)
            .map_err(|e| AppError::Export(e.to_string()))?,
        CalendarFormat::Csv => render_csv(&events)?,
    };

    match file {
        Some(path) => {
            let mut f = File::create(path)?;
            f.write_all(rendered.as_bytes())?;
            f.write_all(b"\n")?;
            info(format!("Calendar written to {}", path));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

fn render_table(events: &[CalendarEvent]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(format!(
        "{} {} {} {} {}",
        pad("DATE", 10),
        pad("KIND", 6),
        pad("FROM", 5),
        pad("TO", 5),
        "DURATION / ROWS"
    ));

    for ev in events {
        let date = local_date_of_ms(ev.start_ms()).format("%Y-%m-%d").to_string();
        match ev {
            CalendarEvent::Work {
                row_id,
                start_ms,
                end_ms,
                duration_ms,
                is_active,
            } => {
                let marker = if *is_active { " (ongoing)" } else { "" };
                lines.push(format!(
                    "{} {} {} {} {}  [#{}]{}",
                    pad(&date, 10),
                    pad("work", 6),
                    pad(&fmt_clock(*start_ms), 5),
                    pad(&fmt_clock(*end_ms), 5),
                    format_short(*duration_ms),
                    row_id,
                    marker,
                ));
            }
            CalendarEvent::Break {
                prev_row_id,
                next_row_id,
                start_ms,
                end_ms,
                minutes,
            } => {
                lines.push(format!(
                    "{} {} {} {} {}h {}m  [#{} -> #{}]",
                    pad(&date, 10),
                    pad("break", 6),
                    pad(&fmt_clock(*start_ms), 5),
                    pad(&fmt_clock(*end_ms), 5),
                    minutes / 60,
                    minutes % 60,
                    prev_row_id,
                    next_row_id,
                ));
            }
        }
    }
    lines.join("\n")
}

fn render_csv(events: &[CalendarEvent]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["type", "start", "end", "duration_minutes", "row_ids", "active"])
        .map_err(|e| AppError::Export(e.to_string()))?;

    for ev in events {
        let record = match ev {
            CalendarEvent::Work {
                row_id,
                start_ms,
                end_ms,
                duration_ms,
                is_active,
            } => [
                "work".to_string(),
                start_ms.to_string(),
                end_ms.to_string(),
                (duration_ms / 60_000).to_string(),
                row_id.to_string(),
                is_active.to_string(),
            ],
            CalendarEvent::Break {
                prev_row_id,
                next_row_id,
                start_ms,
                end_ms,
                minutes,
            } => [
                "break".to_string(),
                start_ms.to_string(),
                end_ms.to_string(),
                minutes.to_string(),
                format!("{}:{}", prev_row_id, next_row_id),
                "false".to_string(),
            ],
        };
        wtr.write_record(&record)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}
