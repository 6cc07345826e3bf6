use super::distance_unit::DistanceUnit;
use serde::Serialize;

/// A daily target. Goals are append-only; the last one saved is current.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user: String,
    pub target_time_minutes: f64,
    pub target_distance: Option<f64>,
    pub unit: DistanceUnit,
    pub created_at: i64,
}

impl Goal {
    pub fn describe(&self) -> String {
        match self.target_distance {
            Some(d) => format!(
                "{} min · {}",
                self.target_time_minutes,
                crate::utils::formatting::format_distance(d, self.unit)
            ),
            None => format!("{} min · Time-based goal", self.target_time_minutes),
        }
    }
}
