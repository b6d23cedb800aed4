pub mod breaks;
pub mod calendar;
pub mod clear;
pub mod config;
pub mod del;
pub mod init;
pub mod log;
pub mod merge;
pub mod punch;
pub mod reset;
pub mod start;
pub mod status;
pub mod watch;

use std::path::PathBuf;

use crate::config::Config;
use crate::core::sync::SyncGateway;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Shared per-invocation context: an open database, the resolved user and
/// the snapshot sync gateway.
pub struct Ctx {
    pub pool: DbPool,
    pub user: String,
    pub gateway: SyncGateway,
}

impl Ctx {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        // The cache lives next to its database so two databases never
        // share stale timer state.
        let cache_path = PathBuf::from(format!("{}.cache.json", cfg.database));
        let gateway = SyncGateway::new(&cfg.user, cache_path);

        Ok(Self {
            pool,
            user: cfg.user.clone(),
            gateway,
        })
    }
}
