use crate::core::goal::{GoalProgress, goal_progress};
use crate::core::motivation::message_for;
use crate::core::reminder::is_reminder_due;
use crate::core::streak::{compute_streak_at, compute_today_completed_at};
use crate::models::achievement::Achievement;
use crate::models::goal::Goal;
use crate::models::reminder::ReminderPreferences;
use crate::models::run_log::RunLog;
use chrono::{DateTime, Datelike, TimeZone};

/// Everything the dashboard shows, derived from the stored data.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub display_name: Option<String>,
    pub today_completed: bool,
    pub current_streak: u32,
    pub total_runs: usize,
    pub current_goal: Option<Goal>,
    pub goal_progress: Option<GoalProgress>,
    pub motivation: &'static str,
    pub achievements: Vec<Achievement>,
    pub reminder_due: bool,
}

pub struct DashboardInput<'a> {
    pub display_name: Option<String>,
    pub logs: &'a [RunLog],
    pub goals: &'a [Goal],
    pub achievements: Vec<Achievement>,
    pub reminder: &'a ReminderPreferences,
}

pub fn build_summary<Tz: TimeZone>(
    input: DashboardInput<'_>,
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let today_completed = compute_today_completed_at(input.logs, now);
    let current_streak = compute_streak_at(input.logs, now);

    let current_goal = input.goals.last().cloned();

    let tz = now.timezone();
    let today = now.date_naive();
    let todays: Vec<RunLog> = input
        .logs
        .iter()
        .filter(|l| l.datetime_in(&tz).date_naive() == today)
        .cloned()
        .collect();
    let goal_progress = current_goal.as_ref().map(|g| goal_progress(g, &todays));

    let motivation = message_for(
        current_streak,
        today_completed,
        input.logs.len(),
        today.ordinal(),
    );

    DashboardSummary {
        display_name: input.display_name,
        today_completed,
        current_streak,
        total_runs: input.logs.len(),
        current_goal,
        goal_progress,
        motivation,
        achievements: input.achievements,
        reminder_due: is_reminder_due(input.reminder, today_completed, now.time()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::distance_unit::DistanceUnit;
    use chrono::{Duration, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 19, 0, 0).unwrap()
    }

    fn goal() -> Goal {
        Goal {
            id: 1,
            user: "a".into(),
            target_time_minutes: 30.0,
            target_distance: None,
            unit: DistanceUnit::Kilometers,
            created_at: 0,
        }
    }

    #[test]
    fn empty_dashboard() {
        let prefs = ReminderPreferences {
            enabled: true,
            time: "18:00".into(),
        };
        let s = build_summary(
            DashboardInput {
                display_name: None,
                logs: &[],
                goals: &[],
                achievements: vec![],
                reminder: &prefs,
            },
            &now(),
        );
        assert!(!s.today_completed);
        assert_eq!(s.current_streak, 0);
        assert!(s.current_goal.is_none());
        assert!(s.goal_progress.is_none());
        assert!(s.reminder_due);
    }

    #[test]
    fn only_todays_runs_count_towards_the_goal() {
        let km = DistanceUnit::Kilometers;
        let logs = vec![
            RunLog::new("a", &(now() - Duration::hours(2)), 20.0, None, km, None).unwrap(),
            RunLog::new("a", &(now() - Duration::days(1)), 60.0, None, km, None).unwrap(),
        ];
        let goals = [goal()];
        let prefs = ReminderPreferences::default();

        let s = build_summary(
            DashboardInput {
                display_name: Some("Alice".into()),
                logs: &logs,
                goals: &goals,
                achievements: vec![],
                reminder: &prefs,
            },
            &now(),
        );

        assert!(s.today_completed);
        assert_eq!(s.current_streak, 2);
        let p = s.goal_progress.unwrap();
        assert_eq!(p.minutes_done, 20.0);
        assert!(!p.is_met());
        assert!(!s.reminder_due);
    }
}
