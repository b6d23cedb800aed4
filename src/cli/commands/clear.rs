use crate::cli::commands::Ctx;
use crate::config::Config;
use crate::db::{snapshot_store, tplog, worklog_store};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::today;

/// Delete all of today's work-log rows and the durable snapshot. Unlike
/// the other persistence calls this one propagates failure to the caller.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let ctx = Ctx::open(cfg)?;

    let deleted = worklog_store::delete_rows_for_date(&ctx.pool.conn, &ctx.user, today())?;
    snapshot_store::delete_snapshot(&ctx.pool.conn, &ctx.user)?;
    ctx.gateway.clear(&ctx.pool.conn);
    let _ = tplog(
        &ctx.pool.conn,
        "clear",
        &ctx.user,
        &format!("{} rows deleted", deleted),
    );

    success(format!(
        "Cleared today: {} work-log row(s) and the timer snapshot deleted.",
        deleted
    ));
    Ok(())
}
