use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{DashboardInput, DashboardSummary, build_summary};
use crate::core::profile::ProfileLogic;
use crate::core::reminder::ReminderLogic;
use crate::db::queries::{load_achievements, load_goals, load_run_logs};
use crate::errors::AppResult;
use crate::ui::messages::{header, reminder};
use crate::utils::colors::{RESET, color_for_streak, colorize_optional};
use crate::utils::formatting::{format_distance, format_duration};
use crate::utils::time::now_nanos;
use chrono::Local;

use super::open_pool;

fn print_summary(s: &DashboardSummary, identity: &str) {
    let name = s.display_name.as_deref().unwrap_or(identity);
    header(format!("PacePower · {name}"));

    println!(
        "Today:        {}",
        if s.today_completed { "✔ run logged" } else { "no run yet" }
    );
    println!(
        "Streak:       {}{} day(s){}",
        color_for_streak(s.current_streak),
        s.current_streak,
        RESET
    );
    println!("Total runs:   {}", s.total_runs);

    match (&s.current_goal, &s.goal_progress) {
        (Some(goal), Some(p)) => {
            println!("Goal:         {}", goal.describe());
            let mut progress = format!(
                "{} / {}",
                format_duration(p.minutes_done),
                format_duration(goal.target_time_minutes)
            );
            if let Some(target) = goal.target_distance {
                progress.push_str(&format!(
                    ", {} / {}",
                    format_distance(p.distance_done, goal.unit),
                    format_distance(target, goal.unit)
                ));
            }
            if p.is_met() {
                progress.push_str(" ✔");
            }
            println!("Progress:     {progress}");
        }
        _ => println!("Goal:         {}", colorize_optional("--")),
    }

    println!("Achievements: {}", s.achievements.len());
    println!("\n💬 {}", s.motivation);

    if s.reminder_due {
        println!();
        reminder("Time for your run!", "You haven't logged a run today yet.");
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard = cmd {
        let pool = open_pool(cfg)?;
        let conn = &pool.conn;
        let identity = cfg.user.as_str();

        let logs = load_run_logs(conn, identity, None)?;
        let goals = load_goals(conn, identity)?;
        let prefs = ReminderLogic::load(conn, &cfg.reminder_prefix, identity)?;

        let summary = build_summary(
            DashboardInput {
                display_name: ProfileLogic::profile_of(conn, identity)?.display_name,
                logs: &logs,
                goals: &goals,
                achievements: load_achievements(conn, identity, None, now_nanos())?,
                reminder: &prefs,
            },
            &Local::now(),
        );

        print_summary(&summary, identity);
    }

    Ok(())
}
