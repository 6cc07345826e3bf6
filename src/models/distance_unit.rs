use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers, // km
    Miles,  // mi
    Meters, // m
}

impl DistanceUnit {
    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Miles => "miles",
            DistanceUnit::Meters => "meters",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "kilometers" => Some(DistanceUnit::Kilometers),
            "miles" => Some(DistanceUnit::Miles),
            "meters" => Some(DistanceUnit::Meters),
            _ => None,
        }
    }

    /// Helper: accept full names or short labels from the CLI, any case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "k" => Some(DistanceUnit::Kilometers),
            "mi" | "mile" | "miles" => Some(DistanceUnit::Miles),
            "m" | "meter" | "meters" => Some(DistanceUnit::Meters),
            _ => None,
        }
    }

    pub fn to_kilometers(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => distance,
            DistanceUnit::Miles => distance * 1.609_344,
            DistanceUnit::Meters => distance / 1000.0,
        }
    }

    pub fn km_to_unit(self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km / 1.609_344,
            DistanceUnit::Meters => km * 1000.0,
        }
    }
}
