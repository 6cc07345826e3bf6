//! PacePower library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (streak, validation, duplicate guard, store).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Add { .. } => c::add::handle(&cli.command, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg),
        Commands::Show { .. } => c::show::handle(&cli.command, cfg),
        Commands::Del { .. } => c::del::handle(&cli.command, cfg),
        Commands::Goal { .. } => c::goal::handle(&cli.command, cfg),
        Commands::Achievements { .. } => c::achievements::handle(&cli.command, cfg),
        Commands::Dashboard => c::dashboard::handle(&cli.command, cfg),
        Commands::Motivate => c::motivate::handle(&cli.command, cfg),
        Commands::Reminder { .. } => c::reminder::handle(&cli.command, cfg),
        Commands::Profile { .. } => c::profile::handle(&cli.command, cfg),
        Commands::Backup { .. } => c::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = &cli.user {
        cfg.user = user.trim().to_string();
    }

    dispatch(&cli, &cfg)
}
