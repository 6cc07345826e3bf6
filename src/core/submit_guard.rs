//! Rejects an identical submission repeated within a short window.
//!
//! The guard is a plain value owned by the caller. The CLI keeps one per
//! form (see `db::queries::load_guard`) so that two different forms never
//! suppress each other.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DUPLICATE_WINDOW_MS: i64 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitGuard {
    pub last_hash: Option<String>,
    pub last_time: Option<DateTime<Utc>>,
}

/// Canonical serialization of a payload. Struct fields keep declaration
/// order; `serde_json::Value` maps are sorted.
pub fn payload_hash<T: Serialize + ?Sized>(payload: &T) -> serde_json::Result<String> {
    serde_json::to_string(payload)
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and record in one step.
    ///
    /// Returns `false` (and leaves the state untouched) when `payload` equals
    /// the previous one and less than two seconds have elapsed. Otherwise the
    /// payload becomes the remembered one and `true` is returned.
    pub fn allow_submit_at<T: Serialize + ?Sized>(
        &mut self,
        payload: &T,
        now: DateTime<Utc>,
    ) -> serde_json::Result<bool> {
        let hash = payload_hash(payload)?;

        if let (Some(last_hash), Some(last_time)) = (&self.last_hash, self.last_time)
            && *last_hash == hash
            && (now - last_time).num_milliseconds() < DUPLICATE_WINDOW_MS
        {
            return Ok(false);
        }

        self.last_hash = Some(hash);
        self.last_time = Some(now);
        Ok(true)
    }

    pub fn allow_submit<T: Serialize + ?Sized>(&mut self, payload: &T) -> serde_json::Result<bool> {
        self.allow_submit_at(payload, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn identical_payload_inside_window_is_rejected() {
        let mut guard = SubmitGuard::new();
        let p = json!({ "duration": 30.0, "unit": "kilometers" });

        assert!(guard.allow_submit_at(&p, t0()).unwrap());
        assert!(!guard.allow_submit_at(&p, t0() + Duration::milliseconds(1999)).unwrap());
    }

    #[test]
    fn identical_payload_after_window_is_accepted() {
        let mut guard = SubmitGuard::new();
        let p = json!({ "duration": 30.0 });

        assert!(guard.allow_submit_at(&p, t0()).unwrap());
        assert!(guard.allow_submit_at(&p, t0() + Duration::milliseconds(2000)).unwrap());
    }

    #[test]
    fn rejection_does_not_extend_the_window() {
        let mut guard = SubmitGuard::new();
        let p = json!({ "duration": 30.0 });

        assert!(guard.allow_submit_at(&p, t0()).unwrap());
        assert!(!guard.allow_submit_at(&p, t0() + Duration::milliseconds(1500)).unwrap());
        assert_eq!(guard.last_time, Some(t0()));
        assert!(guard.allow_submit_at(&p, t0() + Duration::milliseconds(2100)).unwrap());
    }

    #[test]
    fn different_payload_is_always_accepted_and_replaces_the_slot() {
        let mut guard = SubmitGuard::new();
        let a = json!({ "duration": 30.0 });
        let b = json!({ "duration": 31.0 });

        assert!(guard.allow_submit_at(&a, t0()).unwrap());
        assert!(guard.allow_submit_at(&b, t0() + Duration::milliseconds(10)).unwrap());
        // `a` is no longer remembered
        assert!(guard.allow_submit_at(&a, t0() + Duration::milliseconds(20)).unwrap());
    }

    #[test]
    fn key_order_does_not_matter_for_json_values() {
        let a: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(payload_hash(&a).unwrap(), payload_hash(&b).unwrap());
    }

    #[test]
    fn independent_guards_do_not_interfere() {
        let mut run_form = SubmitGuard::new();
        let mut goal_form = SubmitGuard::new();
        let p = json!({ "duration": 30.0 });

        assert!(run_form.allow_submit_at(&p, t0()).unwrap());
        assert!(goal_form.allow_submit_at(&p, t0()).unwrap());
    }
}
