//! Time utilities: parsing HH:MM and nanosecond clock helpers.

use chrono::{NaiveTime, Utc};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Current instant in nanoseconds since the epoch (millisecond precision).
pub fn now_nanos() -> i64 {
    crate::models::run_log::datetime_to_nanos(&Utc::now()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hh_mm_only() {
        assert_eq!(parse_time("18:00"), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_time(" 07:05 "), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("6pm"), None);
    }
}
