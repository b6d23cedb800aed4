use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{tplog, worklog_store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// `del --work <id>` removes one row; `del --break <prev> <next>` merges
/// the two rows bounding the implicit break, which makes the gap vanish.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Del { work, break_ids } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    let ctx = Ctx::open(cfg)?;

    match (work, break_ids) {
        (Some(id), None) => {
            worklog_store::delete_row(&ctx.pool.conn, &ctx.user, *id)?;
            let _ = tplog(&ctx.pool.conn, "del", &ctx.user, &format!("work row {}", id));
            success(format!("Deleted work row #{}.", id));
            Ok(())
        }
        (None, Some(ids)) if ids.len() == 2 => {
            let (prev, next) = (ids[0], ids[1]);
            let mut conn = ctx.pool.conn;
            worklog_store::merge_rows(&mut conn, &ctx.user, prev, next)?;
            let _ = tplog(
                &conn,
                "del",
                &ctx.user,
                &format!("break between rows {} and {}", prev, next),
            );
            success(format!("Deleted break: merged row #{} into #{}.", next, prev));
            Ok(())
        }
        _ => Err(AppError::Other(
            "Specify exactly one of --work <id> or --break <prev> <next>.".into(),
        )),
    }
}
