use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let pool = open_pool(cfg)?;
        let log = HistoryLogic::find(&pool.conn, &cfg.user, id)?;
        print!("{}", HistoryLogic::render_detail(&log));
    }

    Ok(())
}
