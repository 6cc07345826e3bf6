// src/export/logic.rs

use crate::core::history::HistoryLogic;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RunExport;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the runs of `identity`, oldest first.
    ///
    /// `range`: `None`, `"all"` or any period accepted by `list --period`
    /// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `from:to`).
    ///
    /// Returns the number of exported runs.
    pub fn export(
        conn: &Connection,
        identity: &str,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let period = range.filter(|r| !r.eq_ignore_ascii_case("all"));
        let mut logs = HistoryLogic::runs(conn, identity, period, None)?;
        logs.reverse();

        if logs.is_empty() {
            warning("No runs found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<RunExport> = logs.iter().map(RunExport::from).collect();
        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
