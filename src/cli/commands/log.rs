use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::load_log;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    if !print {
        info("Nothing to do: use --print to show the internal log.");
        return Ok(());
    }

    let ctx = Ctx::open(cfg)?;
    let entries = load_log(&ctx.pool.conn)?;

    if entries.is_empty() {
        info("Internal log is empty.");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|(id, ..)| id.to_string().len())
        .max()
        .unwrap_or(1);
    let op_w = entries
        .iter()
        .map(|(_, _, op, target, _)| {
            if target.is_empty() {
                op.len()
            } else {
                op.len() + target.len() + 3
            }
        })
        .max()
        .unwrap_or(10)
        .min(40);

    println!("📜 Internal log:\n");
    for (id, date, operation, target, message) in entries {
        let op_target = if target.is_empty() {
            operation
        } else {
            format!("{} ({})", operation, target)
        };
        println!(
            "{:>id_w$}: {} | {:<op_w$} => {}",
            id,
            date,
            op_target,
            message,
            id_w = id_w,
            op_w = op_w
        );
    }
    Ok(())
}
