use crate::cli::commands::Ctx;
use crate::config::Config;
use crate::core::timer::reset_day;
use crate::db::tplog;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Unconditional reset to idle. The work log is untouched; the durable
/// snapshot delete is best-effort.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let ctx = Ctx::open(cfg)?;
    let mut snap = ctx.gateway.load(&ctx.pool.conn);

    reset_day(&mut snap);
    ctx.gateway.clear(&ctx.pool.conn);
    let _ = tplog(&ctx.pool.conn, "reset", &ctx.user, "timer reset to idle");

    success("Timer reset. The work log was kept.");
    Ok(())
}
