use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{tplog, worklog_store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Merge { earlier, later } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let ctx = Ctx::open(cfg)?;
    let mut conn = ctx.pool.conn;
    worklog_store::merge_rows(&mut conn, &ctx.user, *earlier, *later)?;
    let _ = tplog(
        &conn,
        "merge",
        &ctx.user,
        &format!("rows {} + {}", earlier, later),
    );
    success(format!("Merged row #{} into #{}.", later, earlier));
    Ok(())
}
