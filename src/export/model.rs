// src/export/model.rs

use crate::models::run_log::RunLog;
use serde::Serialize;

/// Flat view of a run, one CSV row or one JSON object.
#[derive(Serialize, Clone, Debug)]
pub struct RunExport {
    pub id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: f64,
    pub distance: Option<f64>,
    pub unit: String,
    pub pace: Option<f64>,
    pub notes: String,
}

impl From<&RunLog> for RunExport {
    fn from(log: &RunLog) -> Self {
        Self {
            id: log.id.clone(),
            date: log.date_str(),
            time: log.time_str(),
            duration_minutes: log.time_minutes,
            distance: log.distance,
            unit: log.unit.label().to_string(),
            pace: log.pace().map(|p| (p * 100.0).round() / 100.0),
            notes: log.notes.clone().unwrap_or_default(),
        }
    }
}
