use crate::core::history::HistoryLogic;
use crate::core::profile::ProfileLogic;
use crate::db::log::ttlog_quiet;
use crate::db::queries::delete_run_log;
use crate::errors::{AppError, AppResult};
use crate::models::run_log::RunLog;
use rusqlite::Connection;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one run of `identity`. Unlocked achievements stay unlocked.
    pub fn apply(conn: &Connection, identity: &str, id: &str) -> AppResult<RunLog> {
        let identity = ProfileLogic::require_signed_in(identity, "delete runs")?;
        let log = HistoryLogic::find(conn, identity, id)?;

        if delete_run_log(conn, identity, id)? == 0 {
            return Err(AppError::RunNotFound(id.to_string()));
        }

        ttlog_quiet(
            conn,
            "del",
            id,
            &format!("Deleted run of {} {}", log.date_str(), log.time_str()),
        );
        ProfileLogic::claim_admin_if_first(conn, identity)?;
        Ok(log)
    }
}
