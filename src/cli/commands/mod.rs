pub mod achievements;
pub mod add;
pub mod backup;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod del;
pub mod export;
pub mod goal;
pub mod init;
pub mod list;
pub mod log;
pub mod motivate;
pub mod profile;
pub mod reminder;
pub mod show;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::distance_unit::DistanceUnit;

/// Open the configured database with every migration applied.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// `--unit` value, or the configured default.
pub(crate) fn resolve_unit(raw: Option<&str>, cfg: &Config) -> AppResult<DistanceUnit> {
    match raw {
        Some(code) => {
            DistanceUnit::from_code(code).ok_or_else(|| AppError::InvalidUnit(code.into()))
        }
        None => Ok(cfg.default_unit),
    }
}
