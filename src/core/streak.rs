//! "Did I run today?" and "how many days in a row?".
//!
//! Both answers are *as of* an evaluation instant: the `_at` variants take
//! it explicitly (and its timezone decides where calendar days start), the
//! plain variants use the local wall clock.

use crate::models::run_log::RunLog;
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use std::collections::HashSet;

/// Longest streak we ever report.
pub const MAX_STREAK_DAYS: u32 = 365;

/// True when at least one run falls on today's calendar day.
///
/// Runs dated after today also count (the comparison is `>=`).
pub fn compute_today_completed_at<Tz: TimeZone>(logs: &[RunLog], now: &DateTime<Tz>) -> bool {
    let tz = now.timezone();
    let today = now.date_naive();

    logs.iter()
        .any(|log| log.datetime_in(&tz).date_naive() >= today)
}

pub fn compute_today_completed(logs: &[RunLog]) -> bool {
    compute_today_completed_at(logs, &Local::now())
}

/// Distinct calendar days with at least one run, in `tz`.
pub fn run_days<Tz: TimeZone>(logs: &[RunLog], tz: &Tz) -> HashSet<NaiveDate> {
    logs.iter()
        .map(|log| log.datetime_in(tz).date_naive())
        .collect()
}

/// Consecutive days with a run, ending today.
///
/// The walk starts at today: if today has no run the streak is 0, even when
/// yesterday and the days before are covered.
pub fn compute_streak_at<Tz: TimeZone>(logs: &[RunLog], now: &DateTime<Tz>) -> u32 {
    if logs.is_empty() {
        return 0;
    }

    let days = run_days(logs, &now.timezone());
    let today = now.date_naive();

    let mut streak = 0;
    for offset in 0..MAX_STREAK_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            break;
        };

        if days.contains(&day) {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

pub fn compute_streak(logs: &[RunLog]) -> u32 {
    compute_streak_at(logs, &Local::now())
}
