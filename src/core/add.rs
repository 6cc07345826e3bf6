use crate::core::achievements::AchievementLogic;
use crate::core::profile::ProfileLogic;
use crate::core::validation::{
    FieldErrors, RunLogInput, parse_number, parse_optional_number, validate_notes,
    validate_run_log,
};
use crate::db::log::ttlog_quiet;
use crate::db::queries::{insert_run_log, load_guard, save_guard};
use crate::errors::{AppError, AppResult};
use crate::models::achievement::Achievement;
use crate::models::distance_unit::DistanceUnit;
use crate::models::run_log::{RunLog, is_storable_date};
use crate::utils::date::{local_datetime, parse_date};
use crate::utils::formatting::{format_duration, format_optional_distance};
use crate::utils::time::parse_time;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Serialize;

/// Guard slot used by the "log a run" form.
pub const RUN_FORM_SCOPE: &str = "run";

pub const FIELD_DATE: &str = "date";

/// What the user typed, after parsing. Also the payload the duplicate
/// guard hashes.
#[derive(Debug, Clone, Serialize)]
pub struct RunForm {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: f64,
    pub distance: Option<f64>,
    pub unit: DistanceUnit,
    pub notes: Option<String>,
}

impl RunForm {
    /// Date and time default to `now`. Numbers are parsed leniently so bad
    /// values surface as validation messages.
    pub fn from_raw(
        date: Option<&str>,
        time: Option<&str>,
        duration: &str,
        distance: Option<&str>,
        unit: DistanceUnit,
        notes: Option<&str>,
        now: &DateTime<Local>,
    ) -> AppResult<Self> {
        let date = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
            None => now.date_naive(),
        };

        let time = match time {
            Some(s) => parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?,
            None => NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
                .ok_or_else(|| AppError::InvalidTime(now.format("%H:%M").to_string()))?,
        };

        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            date,
            time,
            duration: parse_number(duration),
            distance: parse_optional_number(distance),
            unit,
            notes,
        })
    }

    /// Every problem with the form, all fields at once.
    pub fn validate(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = validate_run_log(&RunLogInput {
            time_minutes: self.duration,
            distance: self.distance,
        });
        errors.extend(validate_notes(self.notes.as_deref()));

        if self.date > today {
            errors.insert(FIELD_DATE, "Date cannot be in the future".into());
        } else if !is_storable_date(self.date) {
            errors.insert(FIELD_DATE, "Date is out of range".into());
        }

        errors
    }
}

#[derive(Debug)]
pub struct AddOutcome {
    pub log: RunLog,
    pub unlocked: Vec<Achievement>,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// sign-in → validation → duplicate guard → insert → achievements
    ///
    /// The guard is only armed once the run is stored.
    pub fn apply(
        conn: &rusqlite::Connection,
        identity: &str,
        form: &RunForm,
        now: &DateTime<Local>,
    ) -> AppResult<AddOutcome> {
        let identity = ProfileLogic::require_signed_in(identity, "log a run")?;

        let errors = form.validate(now.date_naive());
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let when = local_datetime(form.date, form.time).ok_or_else(|| {
            AppError::InvalidTime(format!("{} {} does not exist locally", form.date, form.time))
        })?;

        let log = RunLog::new(
            identity,
            &when,
            form.duration,
            form.distance,
            form.unit,
            form.notes.clone(),
        )?;

        let mut guard = load_guard(conn, RUN_FORM_SCOPE)?;
        if !guard.allow_submit_at(form, now.with_timezone(&Utc))? {
            return Err(AppError::DuplicateSubmit);
        }

        insert_run_log(conn, &log)?;
        save_guard(conn, RUN_FORM_SCOPE, &guard)?;
        ttlog_quiet(
            conn,
            "add",
            &log.id,
            &format!(
                "{} {} | {} | {}",
                form.date,
                form.time.format("%H:%M"),
                format_duration(form.duration),
                format_optional_distance(form.distance, form.unit)
            ),
        );

        ProfileLogic::claim_admin_if_first(conn, identity)?;
        let unlocked = AchievementLogic::evaluate_and_unlock(conn, identity, now)?;

        Ok(AddOutcome { log, unlocked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{FIELD_DISTANCE, FIELD_TIME};
    use crate::db::initialize::init_db;
    use crate::db::queries::{count_admins, load_run_logs};
    use chrono::{Duration, TimeZone};
    use rusqlite::Connection;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn form(duration: &str, distance: Option<&str>) -> RunForm {
        RunForm::from_raw(
            None,
            Some("07:30"),
            duration,
            distance,
            DistanceUnit::Kilometers,
            Some("  easy  "),
            &now(),
        )
        .unwrap()
    }

    #[test]
    fn raw_form_defaults_and_trims() {
        let f = form("30", Some("5"));
        assert_eq!(f.date, now().date_naive());
        assert_eq!(f.duration, 30.0);
        assert_eq!(f.distance, Some(5.0));
        assert_eq!(f.notes.as_deref(), Some("easy"));

        let bad = RunForm::from_raw(
            Some("15/06/2025"),
            None,
            "30",
            None,
            DistanceUnit::Kilometers,
            None,
            &now(),
        );
        assert!(matches!(bad, Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn guests_are_turned_away() {
        let c = conn();
        let err = AddLogic::apply(&c, "guest", &form("30", None), &now()).unwrap_err();
        assert_eq!(err.to_string(), "Please sign in to log a run");
    }

    #[test]
    fn invalid_fields_are_reported_together() {
        let c = conn();
        let err = AddLogic::apply(&c, "alice", &form("abc", Some("-3")), &now()).unwrap_err();
        match err {
            AppError::Validation(errs) => {
                assert!(errs.contains_key(FIELD_TIME));
                assert!(errs.contains_key(FIELD_DISTANCE));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn future_date_is_rejected() {
        let c = conn();
        let mut f = form("30", None);
        f.date = now().date_naive() + Duration::days(1);
        let err = AddLogic::apply(&c, "alice", &f, &now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(e) if e.contains_key(FIELD_DATE)));
    }

    #[test]
    fn date_before_the_storable_range_is_rejected() {
        let c = conn();
        let f = RunForm::from_raw(
            Some("1500-01-01"),
            Some("07:00"),
            "30",
            Some("5"),
            DistanceUnit::Kilometers,
            None,
            &now(),
        )
        .unwrap();

        let err = AddLogic::apply(&c, "alice", &f, &now()).unwrap_err();
        match err {
            AppError::Validation(errs) => {
                assert_eq!(errs.get(FIELD_DATE).map(String::as_str), Some("Date is out of range"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(load_run_logs(&c, "alice", None).unwrap().is_empty());
    }

    #[test]
    fn rejected_run_leaves_no_admin_behind() {
        let c = conn();
        AddLogic::apply(&c, "alice", &form("abc", None), &now()).unwrap_err();
        assert_eq!(count_admins(&c).unwrap(), 0);

        AddLogic::apply(&c, "alice", &form("30", None), &now()).unwrap();
        assert_eq!(count_admins(&c).unwrap(), 1);
    }

    #[test]
    fn failed_insert_does_not_arm_the_guard() {
        let c = conn();
        c.execute_batch(
            "CREATE TEMP TRIGGER no_runs BEFORE INSERT ON run_logs
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();
        let f = form("30", Some("5"));

        let err = AddLogic::apply(&c, "alice", &f, &now()).unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        assert_eq!(load_guard(&c, RUN_FORM_SCOPE).unwrap().last_hash, None);

        c.execute_batch("DROP TRIGGER no_runs").unwrap();
        let retry = now() + Duration::milliseconds(500);
        AddLogic::apply(&c, "alice", &f, &retry).unwrap();
        assert_eq!(load_run_logs(&c, "alice", None).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_within_window_then_accepted_later() {
        let c = conn();
        let f = form("30", Some("5"));

        let first = AddLogic::apply(&c, "alice", &f, &now()).unwrap();
        assert_eq!(first.log.user, "alice");

        let again = AddLogic::apply(&c, "alice", &f, &(now() + Duration::milliseconds(500)));
        assert!(matches!(again, Err(AppError::DuplicateSubmit)));

        AddLogic::apply(&c, "alice", &f, &(now() + Duration::seconds(3))).unwrap();
        assert_eq!(load_run_logs(&c, "alice", None).unwrap().len(), 2);
    }

    #[test]
    fn first_run_unlocks_once() {
        let c = conn();
        let out = AddLogic::apply(&c, "alice", &form("30", Some("5")), &now()).unwrap();
        assert_eq!(out.unlocked.len(), 1);
        assert_eq!(out.unlocked[0].name, "First Run");

        let out = AddLogic::apply(&c, "alice", &form("31", Some("5")), &now()).unwrap();
        assert!(out.unlocked.is_empty());
    }
}
