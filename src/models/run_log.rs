use super::distance_unit::DistanceUnit;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

pub const NANOS_PER_MILLI: i64 = 1_000_000;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunLog {
    pub id: String,             // ⇔ run_logs.id (TEXT, opaque)
    pub user: String,           // ⇔ run_logs.user (identity or "guest")
    pub timestamp: i64,         // ⇔ run_logs.timestamp (ns since epoch)
    pub time_minutes: f64,      // ⇔ run_logs.time_minutes (REAL > 0)
    pub distance: Option<f64>,  // ⇔ run_logs.distance (REAL, NULL allowed)
    pub unit: DistanceUnit,     // ⇔ run_logs.unit ('kilometers' | 'miles' | 'meters')
    pub notes: Option<String>,  // ⇔ run_logs.notes (≤ 500 chars)
    pub created_at: i64,        // ⇔ run_logs.created_at (ns since epoch)
}

impl RunLog {
    /// Build a new run for `user` at `when`.
    /// - generates the id
    /// - sets `created_at` to now
    ///
    /// Fails when `when` cannot be stored as nanoseconds (see
    /// [`is_storable_date`]).
    pub fn new<Tz: TimeZone>(
        user: &str,
        when: &DateTime<Tz>,
        time_minutes: f64,
        distance: Option<f64>,
        unit: DistanceUnit,
        notes: Option<String>,
    ) -> AppResult<Self> {
        let timestamp = datetime_to_nanos(when).ok_or_else(|| {
            AppError::InvalidDate(format!("{} is out of range", when.naive_utc()))
        })?;
        let now = Utc::now();

        Ok(Self {
            id: generate_id(now.timestamp_millis()),
            user: user.to_string(),
            timestamp,
            time_minutes,
            distance,
            unit,
            notes,
            created_at: datetime_to_nanos(&now).unwrap_or(timestamp),
        })
    }

    /// Instant of the run, in the given timezone.
    pub fn datetime_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        nanos_to_datetime(self.timestamp, tz)
    }

    pub fn local_datetime(&self) -> DateTime<Local> {
        self.datetime_in(&Local)
    }

    pub fn date_str(&self) -> String {
        self.local_datetime().format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.local_datetime().format("%H:%M").to_string()
    }

    /// Minutes per unit, when a positive distance was recorded.
    pub fn pace(&self) -> Option<f64> {
        match self.distance {
            Some(d) if d > 0.0 => Some(self.time_minutes / d),
            _ => None,
        }
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance.map(|d| self.unit.to_kilometers(d))
    }
}

/// `<unix-millis>-<9 random base36-ish chars>`
pub fn generate_id(millis: i64) -> String {
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(9)
        .collect();
    format!("{millis}-{suffix}")
}

/// `None` when the result does not fit an `i64`.
pub fn millis_to_nanos(ms: i64) -> Option<i64> {
    ms.checked_mul(NANOS_PER_MILLI)
}

pub fn datetime_to_nanos<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<i64> {
    millis_to_nanos(dt.timestamp_millis())
}

/// Whether the whole UTC day `date` fits the nanosecond timestamps of the
/// store (roughly 1677-09-22 to 2262-04-10).
pub fn is_storable_date(date: NaiveDate) -> bool {
    let bounds = [NaiveTime::MIN, NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)];
    bounds
        .iter()
        .all(|t| datetime_to_nanos(&date.and_time(*t).and_utc()).is_some())
}

/// Nanosecond timestamp → instant. Sub-millisecond precision is dropped.
pub fn nanos_to_datetime<Tz: TimeZone>(ns: i64, tz: &Tz) -> DateTime<Tz> {
    let ms = ns.div_euclid(NANOS_PER_MILLI);
    let utc = DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default();
    utc.with_timezone(tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn id_has_millis_prefix() {
        let id = generate_id(1_700_000_000_000);
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, "1700000000000");
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn timestamp_roundtrips_through_nanos() {
        let when = Utc.with_ymd_and_hms(2025, 3, 14, 7, 30, 0).unwrap();
        let log = RunLog::new("alice", &when, 30.0, Some(5.0), DistanceUnit::Kilometers, None)
            .unwrap();
        assert_eq!(log.timestamp, when.timestamp_millis() * 1_000_000);
        assert_eq!(log.datetime_in(&Utc), when);
    }

    #[test]
    fn pace_needs_positive_distance() {
        let when = Utc.with_ymd_and_hms(2025, 3, 14, 7, 30, 0).unwrap();
        let mut log = RunLog::new("a", &when, 50.0, Some(10.0), DistanceUnit::Kilometers, None)
            .unwrap();
        assert_eq!(log.pace(), Some(5.0));
        log.distance = Some(0.0);
        assert_eq!(log.pace(), None);
        log.distance = None;
        assert_eq!(log.pace(), None);
    }

    #[test]
    fn out_of_range_instants_are_refused() {
        assert_eq!(millis_to_nanos(i64::MAX / 1000), None);
        assert_eq!(millis_to_nanos(-1), Some(-1_000_000));

        let early = Utc.with_ymd_and_hms(1500, 1, 1, 7, 0, 0).unwrap();
        let err = RunLog::new("a", &early, 30.0, None, DistanceUnit::Kilometers, None);
        assert!(matches!(err, Err(AppError::InvalidDate(_))));

        assert!(is_storable_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(is_storable_date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()));
        assert!(!is_storable_date(NaiveDate::from_ymd_opt(1677, 9, 21).unwrap()));
        assert!(!is_storable_date(NaiveDate::from_ymd_opt(1500, 1, 1).unwrap()));
        assert!(!is_storable_date(NaiveDate::from_ymd_opt(2262, 4, 12).unwrap()));
    }
}
