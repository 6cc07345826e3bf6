use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::run_log::{RunLog, datetime_to_nanos};
use crate::utils::date::{local_datetime, period_bounds};
use crate::utils::formatting::{format_duration, format_optional_distance, format_pace, truncate};
use crate::utils::table::{Column, Table};
use chrono::{Days, NaiveTime};
use rusqlite::Connection;

pub struct HistoryLogic;

impl HistoryLogic {
    /// Newest first. `period` (see `utils::date::period_bounds`) takes
    /// precedence over `limit`.
    pub fn runs(
        conn: &Connection,
        identity: &str,
        period: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<Vec<RunLog>> {
        match period {
            Some(p) => {
                let (from, to) = period_bounds(p).map_err(AppError::InvalidDate)?;
                let (from_ns, to_ns) = local_day_range_nanos(from, to)?;
                let mut logs = queries::load_run_logs_between(conn, identity, from_ns, to_ns)?;
                logs.reverse();
                Ok(logs)
            }
            None => queries::load_run_logs(conn, identity, limit),
        }
    }

    pub fn find(conn: &Connection, identity: &str, id: &str) -> AppResult<RunLog> {
        queries::load_run_log_by_id(conn, identity, id)?
            .ok_or_else(|| AppError::RunNotFound(id.to_string()))
    }

    pub fn render_table(logs: &[RunLog], separator: char) -> String {
        let mut table = Table::new(
            vec![
                Column::new("ID"),
                Column::new("Date"),
                Column::new("Time"),
                Column::new("Duration"),
                Column::new("Distance"),
                Column::new("Notes"),
            ],
            separator,
        );

        for log in logs {
            table.add_row(vec![
                log.id.clone(),
                log.date_str(),
                log.time_str(),
                format_duration(log.time_minutes),
                format_optional_distance(log.distance, log.unit),
                log.notes
                    .as_deref()
                    .map(|n| truncate(n, 40))
                    .unwrap_or_default(),
            ]);
        }

        table.render()
    }

    pub fn render_detail(log: &RunLog) -> String {
        let mut out = String::new();
        out.push_str(&format!("ID:        {}\n", log.id));
        out.push_str(&format!("Date:      {} {}\n", log.date_str(), log.time_str()));
        out.push_str(&format!("Duration:  {}\n", format_duration(log.time_minutes)));
        out.push_str(&format!(
            "Distance:  {}\n",
            format_optional_distance(log.distance, log.unit)
        ));
        if let Some(p) = log.pace() {
            out.push_str(&format!("Pace:      {}\n", format_pace(p, log.unit)));
        }
        if let Some(n) = &log.notes {
            out.push_str(&format!("Notes:     {}\n", n));
        }
        out
    }
}

/// `[start of from, start of the day after to)` as local nanoseconds.
pub fn local_day_range_nanos(
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
) -> AppResult<(i64, i64)> {
    let after = to
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidDate(to.to_string()))?;

    let start = local_datetime(from, NaiveTime::MIN)
        .ok_or_else(|| AppError::InvalidDate(from.to_string()))?;
    let end = local_datetime(after, NaiveTime::MIN)
        .ok_or_else(|| AppError::InvalidDate(after.to_string()))?;

    let start_ns = datetime_to_nanos(&start)
        .ok_or_else(|| AppError::InvalidDate(from.to_string()))?;
    let end_ns = datetime_to_nanos(&end)
        .ok_or_else(|| AppError::InvalidDate(after.to_string()))?;
    Ok((start_ns, end_ns))
}
