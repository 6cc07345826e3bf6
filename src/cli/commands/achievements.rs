use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::achievements::catalog_view;
use crate::db::queries::load_achievements;
use crate::errors::AppResult;
use crate::models::run_log::nanos_to_datetime;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::time::now_nanos;
use chrono::Local;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Achievements { days } = cmd {
        let pool = open_pool(cfg)?;
        let unlocked = load_achievements(&pool.conn, &cfg.user, *days, now_nanos())?;

        match days {
            Some(d) => header(format!("Achievements (last {d} days)")),
            None => header("Achievements"),
        }

        let view = catalog_view(&unlocked);
        let earned = view.iter().filter(|(_, a)| a.is_some()).count();

        for (entry, achieved) in &view {
            match achieved {
                Some(a) => println!(
                    "{GREEN}🏆 {:<14}{RESET} {} (unlocked {})",
                    entry.name,
                    entry.description,
                    nanos_to_datetime(a.unlocked_date, &Local).format("%Y-%m-%d")
                ),
                None if days.is_none() => {
                    println!("{GREY}🔒 {:<14} {}{RESET}", entry.name, entry.description)
                }
                None => {}
            }
        }

        println!("\n{} of {} earned", earned, view.len());
    }

    Ok(())
}
