use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::goal::{GoalForm, GoalLogic, goal_progress};
use crate::db::queries::load_run_logs_between;
use crate::core::history::local_day_range_nanos;
use crate::errors::AppResult;
use crate::models::goal::Goal;
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::{format_distance, format_duration};
use chrono::Local;
use rusqlite::Connection;

use super::{open_pool, resolve_unit};

fn print_progress(conn: &Connection, identity: &str, goal: &Goal) -> AppResult<()> {
    let today = Local::now().date_naive();
    let (from, to) = local_day_range_nanos(today, today)?;
    let todays = load_run_logs_between(conn, identity, from, to)?;
    let p = goal_progress(goal, &todays);

    let mark = |met: bool| if met { "✔" } else { "…" };
    println!(
        "  time:     {} / {} {}",
        format_duration(p.minutes_done),
        format_duration(goal.target_time_minutes),
        mark(p.time_met)
    );
    if let Some(target) = goal.target_distance {
        println!(
            "  distance: {} / {} {}",
            format_distance(p.distance_done, goal.unit),
            format_distance(target, goal.unit),
            mark(p.distance_met)
        );
    }
    if p.is_met() {
        success("Today's goal reached!");
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Goal {
        set,
        time,
        distance,
        unit,
        show,
        list,
        delete,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let conn = &pool.conn;

        if *set && let Some(t) = time {
            let unit = resolve_unit(unit.as_deref(), cfg)?;
            let form = GoalForm::from_raw(t, distance.as_deref(), unit);
            let goal = GoalLogic::save(conn, &cfg.user, &form, &Local::now())?;
            success(format!("Daily goal saved: {}", goal.describe()));
        }

        if *show {
            match GoalLogic::current(conn, &cfg.user)? {
                Some(goal) => {
                    header("Daily goal");
                    println!("{}", goal.describe());
                    print_progress(conn, &cfg.user, &goal)?;
                }
                None => info("No goal set. Use `goal --set --time <minutes>`."),
            }
        }

        if *list {
            let goals = GoalLogic::list(conn, &cfg.user)?;
            if goals.is_empty() {
                info("No goals saved.");
            } else {
                header("Goals (last one is current)");
                for (i, g) in goals.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, g.describe());
                }
            }
        }

        if let Some(idx) = delete {
            let goal = GoalLogic::delete(conn, &cfg.user, *idx)?;
            success(format!("Goal #{} deleted: {}", idx, goal.describe()));
        }
    }

    Ok(())
}
