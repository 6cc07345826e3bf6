//! Client-side form validation for run logs and goals.
//!
//! Validation failures are data: every function returns a map from field
//! name to a human readable message, empty when the input is acceptable.
//! A field missing from the map is valid.

use std::collections::BTreeMap;

/// Minutes in a day; upper bound for a single run.
pub const MAX_RUN_MINUTES: f64 = 1440.0;

/// Sanity bound for distances. Not unit-aware.
pub const MAX_DISTANCE: f64 = 1000.0;

pub const MAX_NOTES_CHARS: usize = 500;

pub const FIELD_TIME: &str = "timeMinutes";
pub const FIELD_DISTANCE: &str = "distance";
pub const FIELD_NOTES: &str = "notes";

pub type FieldErrors = BTreeMap<&'static str, String>;

/// Candidate values of the "log a run" form.
#[derive(Debug, Clone, Copy)]
pub struct RunLogInput {
    pub time_minutes: f64,
    pub distance: Option<f64>,
}

pub fn validate_run_log(input: &RunLogInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if input.time_minutes.is_nan() || input.time_minutes <= 0.0 {
        errors.insert(FIELD_TIME, "Duration must be a positive number".into());
    } else if input.time_minutes > MAX_RUN_MINUTES {
        errors.insert(
            FIELD_TIME,
            "Duration cannot exceed 24 hours (1440 minutes)".into(),
        );
    }

    if let Some(distance) = input.distance {
        if distance.is_nan() || distance < 0.0 {
            errors.insert(FIELD_DISTANCE, "Distance cannot be negative".into());
        } else if distance > MAX_DISTANCE {
            errors.insert(
                FIELD_DISTANCE,
                "Distance seems unreasonably high (max 1000)".into(),
            );
        }
    }

    errors
}

pub fn validate_notes(notes: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(n) = notes
        && n.chars().count() > MAX_NOTES_CHARS
    {
        errors.insert(FIELD_NOTES, "Notes cannot exceed 500 characters".into());
    }
    errors
}

/// Rules of the daily goal form. Looser than runs: no upper bounds.
pub fn validate_goal(target_time_minutes: f64, target_distance: Option<f64>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if target_time_minutes.is_nan() || target_time_minutes <= 0.0 {
        errors.insert(FIELD_TIME, "Please enter a valid duration".into());
    }

    if let Some(d) = target_distance
        && (d.is_nan() || d < 0.0)
    {
        errors.insert(FIELD_DISTANCE, "Please enter a valid distance".into());
    }

    errors
}

/// Lenient numeric parsing for form fields: garbage becomes NaN so that it
/// is reported by the validators instead of failing at parse time.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Empty or missing input means "not provided".
pub fn parse_optional_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(time: f64, distance: Option<f64>) -> FieldErrors {
        validate_run_log(&RunLogInput {
            time_minutes: time,
            distance,
        })
    }

    #[test]
    fn valid_input_has_no_errors() {
        assert!(run(30.0, Some(5.0)).is_empty());
        assert!(run(1440.0, None).is_empty());
        assert!(run(0.5, Some(0.0)).is_empty());
        assert!(run(60.0, Some(1000.0)).is_empty());
    }

    #[test]
    fn non_positive_or_nan_duration_is_rejected() {
        for t in [0.0, -1.0, f64::NAN] {
            let errs = run(t, None);
            assert_eq!(errs[FIELD_TIME], "Duration must be a positive number");
        }
    }

    #[test]
    fn duration_over_a_day_is_rejected() {
        let errs = run(1440.5, None);
        assert_eq!(
            errs[FIELD_TIME],
            "Duration cannot exceed 24 hours (1440 minutes)"
        );
    }

    #[test]
    fn distance_rules() {
        assert_eq!(run(10.0, Some(-0.1))[FIELD_DISTANCE], "Distance cannot be negative");
        assert_eq!(run(10.0, Some(f64::NAN))[FIELD_DISTANCE], "Distance cannot be negative");
        assert_eq!(
            run(10.0, Some(1000.01))[FIELD_DISTANCE],
            "Distance seems unreasonably high (max 1000)"
        );
    }

    #[test]
    fn both_fields_can_fail_together() {
        let errs = run(-5.0, Some(5000.0));
        assert_eq!(errs.len(), 2);
        assert!(errs.contains_key(FIELD_TIME));
        assert!(errs.contains_key(FIELD_DISTANCE));
    }

    #[test]
    fn notes_limit_counts_chars() {
        assert!(validate_notes(None).is_empty());
        assert!(validate_notes(Some(&"é".repeat(500))).is_empty());
        assert!(validate_notes(Some(&"a".repeat(501))).contains_key(FIELD_NOTES));
    }

    #[test]
    fn goal_rules() {
        assert!(validate_goal(30.0, Some(5.0)).is_empty());
        assert!(validate_goal(5000.0, None).is_empty());
        assert!(validate_goal(0.0, None).contains_key(FIELD_TIME));
        assert!(validate_goal(30.0, Some(-1.0)).contains_key(FIELD_DISTANCE));
    }

    #[test]
    fn lenient_parsing() {
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert!(parse_number("abc").is_nan());
        assert_eq!(parse_optional_number(None), None);
        assert_eq!(parse_optional_number(Some("  ")), None);
        assert!(parse_optional_number(Some("x")).unwrap().is_nan());
    }
}
