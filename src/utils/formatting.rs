//! Formatting utilities used for CLI and export outputs.

use crate::models::distance_unit::DistanceUnit;

/// `5.0, Kilometers` → `"5.00 km"`
pub fn format_distance(distance: f64, unit: DistanceUnit) -> String {
    format!("{:.2} {}", distance, unit.label())
}

/// Optional distance, `--` when missing.
pub fn format_optional_distance(distance: Option<f64>, unit: DistanceUnit) -> String {
    distance
        .map(|d| format_distance(d, unit))
        .unwrap_or_else(|| "--".to_string())
}

/// Minutes (possibly fractional) → `1h 05m 30s` / `42m 10s`.
pub fn format_duration(minutes: f64) -> String {
    let total_secs = (minutes * 60.0).round().max(0.0) as i64;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;

    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else {
        format!("{}m {:02}s", m, s)
    }
}

/// Minutes per unit → `5:30 /km`
pub fn format_pace(min_per_unit: f64, unit: DistanceUnit) -> String {
    let total_secs = (min_per_unit * 60.0).round().max(0.0) as i64;
    format!("{}:{:02} /{}", total_secs / 60, total_secs % 60, unit.label())
}

/// Cut `s` to `max` chars, ending with `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_two_decimals_and_label() {
        assert_eq!(format_distance(5.0, DistanceUnit::Kilometers), "5.00 km");
        assert_eq!(format_distance(3.1, DistanceUnit::Miles), "3.10 mi");
        assert_eq!(format_distance(400.0, DistanceUnit::Meters), "400.00 m");
    }

    #[test]
    fn optional_distance() {
        assert_eq!(format_optional_distance(None, DistanceUnit::Miles), "--");
        assert_eq!(
            format_optional_distance(Some(1.0), DistanceUnit::Miles),
            "1.00 mi"
        );
    }

    #[test]
    fn durations_and_paces() {
        assert_eq!(format_duration(42.5), "42m 30s");
        assert_eq!(format_duration(65.0), "1h 05m 00s");
        assert_eq!(format_pace(5.5, DistanceUnit::Kilometers), "5:30 /km");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long sentence here", 10), "a long ...");
    }
}
