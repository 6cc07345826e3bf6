use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, RunForm};
use crate::errors::AppResult;
use crate::ui::messages::{celebrate, success};
use crate::utils::formatting::{format_duration, format_optional_distance};
use chrono::Local;

use super::{open_pool, resolve_unit};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        duration,
        distance,
        unit,
        date,
        time,
        notes,
    } = cmd
    {
        let now = Local::now();
        let unit = resolve_unit(unit.as_deref(), cfg)?;

        let form = RunForm::from_raw(
            date.as_deref(),
            time.as_deref(),
            duration,
            distance.as_deref(),
            unit,
            notes.as_deref(),
            &now,
        )?;

        let pool = open_pool(cfg)?;
        let outcome = AddLogic::apply(&pool.conn, &cfg.user, &form, &now)?;

        success(format!(
            "Run logged: {} {} | {} | {} (id {})",
            outcome.log.date_str(),
            outcome.log.time_str(),
            format_duration(outcome.log.time_minutes),
            format_optional_distance(outcome.log.distance, outcome.log.unit),
            outcome.log.id
        ));

        for a in &outcome.unlocked {
            celebrate(a.name.as_str(), a.description.as_str());
        }
    }

    Ok(())
}
