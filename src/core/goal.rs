use crate::core::profile::ProfileLogic;
use crate::core::validation::{parse_number, parse_optional_number, validate_goal};
use crate::db::log::ttlog_quiet;
use crate::db::queries::{self, load_guard, save_guard};
use crate::errors::{AppError, AppResult};
use crate::models::distance_unit::DistanceUnit;
use crate::models::goal::Goal;
use crate::models::run_log::{RunLog, datetime_to_nanos};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use serde::Serialize;

pub const GOAL_FORM_SCOPE: &str = "goal";

#[derive(Debug, Clone, Serialize)]
pub struct GoalForm {
    pub target_time_minutes: f64,
    pub target_distance: Option<f64>,
    pub unit: DistanceUnit,
}

impl GoalForm {
    pub fn from_raw(time: &str, distance: Option<&str>, unit: DistanceUnit) -> Self {
        Self {
            target_time_minutes: parse_number(time),
            target_distance: parse_optional_number(distance),
            unit,
        }
    }
}

/// Today's totals measured against a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub minutes_done: f64,
    /// In the goal's unit.
    pub distance_done: f64,
    pub time_met: bool,
    pub distance_met: bool,
}

impl GoalProgress {
    pub fn is_met(&self) -> bool {
        self.time_met && self.distance_met
    }
}

/// `todays_logs` must already be restricted to today.
pub fn goal_progress(goal: &Goal, todays_logs: &[RunLog]) -> GoalProgress {
    let minutes_done: f64 = todays_logs.iter().map(|l| l.time_minutes).sum();
    let km_done: f64 = todays_logs.iter().filter_map(RunLog::distance_km).sum();
    let distance_done = goal.unit.km_to_unit(km_done);

    GoalProgress {
        minutes_done,
        distance_done,
        time_met: minutes_done >= goal.target_time_minutes,
        distance_met: goal
            .target_distance
            .map(|target| distance_done >= target)
            .unwrap_or(true),
    }
}

pub struct GoalLogic;

impl GoalLogic {
    /// Append a new goal; it becomes the current one.
    pub fn save<Tz: TimeZone>(
        conn: &Connection,
        identity: &str,
        form: &GoalForm,
        now: &DateTime<Tz>,
    ) -> AppResult<Goal> {
        let identity = ProfileLogic::require_signed_in(identity, "save settings")?;

        let errors = validate_goal(form.target_time_minutes, form.target_distance);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let created_at = datetime_to_nanos(now)
            .ok_or_else(|| AppError::InvalidDate(now.naive_utc().to_string()))?;
        let mut goal = Goal {
            id: 0,
            user: identity.to_string(),
            target_time_minutes: form.target_time_minutes,
            target_distance: form.target_distance,
            unit: form.unit,
            created_at,
        };

        let mut guard = load_guard(conn, GOAL_FORM_SCOPE)?;
        if !guard.allow_submit_at(form, now.with_timezone(&Utc))? {
            return Err(AppError::DuplicateSubmit);
        }

        goal.id = queries::insert_goal(conn, &goal)?;
        save_guard(conn, GOAL_FORM_SCOPE, &guard)?;

        ttlog_quiet(conn, "goal", identity, &format!("New daily goal: {}", goal.describe()));
        ProfileLogic::claim_admin_if_first(conn, identity)?;
        Ok(goal)
    }

    pub fn current(conn: &Connection, identity: &str) -> AppResult<Option<Goal>> {
        queries::load_current_goal(conn, identity)
    }

    pub fn list(conn: &Connection, identity: &str) -> AppResult<Vec<Goal>> {
        queries::load_goals(conn, identity)
    }

    /// `idx` is 1-based, as printed by `goal --list`.
    pub fn delete(conn: &Connection, identity: &str, idx: usize) -> AppResult<Goal> {
        let identity = ProfileLogic::require_signed_in(identity, "delete goals")?;
        let zero_based = idx.checked_sub(1).ok_or(AppError::InvalidGoal(idx))?;

        let goal = queries::delete_goal(conn, identity, zero_based)
            .map_err(|e| match e {
                AppError::InvalidGoal(_) => AppError::InvalidGoal(idx),
                other => other,
            })?;

        ttlog_quiet(
            conn,
            "goal_delete",
            identity,
            &format!("Deleted goal #{}: {}", idx, goal.describe()),
        );
        ProfileLogic::claim_admin_if_first(conn, identity)?;
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use chrono::Duration;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn latest_goal_is_current() {
        let c = conn();
        let form = GoalForm::from_raw("20", None, DistanceUnit::Kilometers);
        GoalLogic::save(&c, "alice", &form, &now()).unwrap();
        GoalLogic::save(
            &c,
            "alice",
            &GoalForm::from_raw("30", Some("5"), DistanceUnit::Miles),
            &(now() + Duration::seconds(1)),
        )
        .unwrap();

        let current = GoalLogic::current(&c, "alice").unwrap().unwrap();
        assert_eq!(current.target_time_minutes, 30.0);
        assert_eq!(current.unit, DistanceUnit::Miles);
        assert_eq!(GoalLogic::list(&c, "alice").unwrap().len(), 2);
        assert!(GoalLogic::current(&c, "bob").unwrap().is_none());
    }

    #[test]
    fn invalid_goal_is_rejected() {
        let c = conn();
        let form = GoalForm::from_raw("zero", Some("-1"), DistanceUnit::Kilometers);
        let err = GoalLogic::save(&c, "alice", &form, &now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(e) if e.len() == 2));
        assert_eq!(queries::count_admins(&c).unwrap(), 0);
    }

    #[test]
    fn failed_insert_does_not_arm_the_guard() {
        let c = conn();
        c.execute_batch(
            "CREATE TEMP TRIGGER no_goals BEFORE INSERT ON goals
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();
        let form = GoalForm::from_raw("20", None, DistanceUnit::Kilometers);

        assert!(matches!(
            GoalLogic::save(&c, "alice", &form, &now()),
            Err(AppError::Db(_))
        ));
        assert_eq!(load_guard(&c, GOAL_FORM_SCOPE).unwrap(), Default::default());

        c.execute_batch("DROP TRIGGER no_goals").unwrap();
        GoalLogic::save(&c, "alice", &form, &(now() + Duration::milliseconds(500))).unwrap();
        assert_eq!(GoalLogic::list(&c, "alice").unwrap().len(), 1);
        assert!(ProfileLogic::is_admin(&c, "alice").unwrap());
    }

    #[test]
    fn delete_uses_one_based_index() {
        let c = conn();
        let form = GoalForm::from_raw("20", None, DistanceUnit::Kilometers);
        GoalLogic::save(&c, "alice", &form, &now()).unwrap();

        assert!(matches!(GoalLogic::delete(&c, "alice", 0), Err(AppError::InvalidGoal(0))));
        assert!(matches!(GoalLogic::delete(&c, "alice", 2), Err(AppError::InvalidGoal(2))));
        GoalLogic::delete(&c, "alice", 1).unwrap();
        assert!(GoalLogic::list(&c, "alice").unwrap().is_empty());
    }

    #[test]
    fn progress_converts_units() {
        let goal = Goal {
            id: 1,
            user: "a".into(),
            target_time_minutes: 30.0,
            target_distance: Some(5000.0),
            unit: DistanceUnit::Meters,
            created_at: 0,
        };
        let logs = vec![
            RunLog::new("a", &now(), 20.0, Some(3.0), DistanceUnit::Kilometers, None).unwrap(),
            RunLog::new("a", &now(), 15.0, Some(2.5), DistanceUnit::Kilometers, None).unwrap(),
        ];

        let p = goal_progress(&goal, &logs);
        assert_eq!(p.minutes_done, 35.0);
        assert_eq!(p.distance_done, 5500.0);
        assert!(p.is_met());

        let p = goal_progress(&goal, &logs[..1]);
        assert!(!p.time_met);
        assert!(!p.distance_met);
    }
}
