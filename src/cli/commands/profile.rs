use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::profile::ProfileLogic;
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserRole;
use crate::ui::messages::{header, success};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Profile { name, show, role } = cmd {
        let pool = open_pool(cfg)?;
        let conn = &pool.conn;

        if let Some(n) = name {
            ProfileLogic::save_display_name(conn, &cfg.user, n)?;
            success("Profile saved.");
        }

        if let Some([target, role_name]) = role.as_deref() {
            let role = UserRole::from_db_str(role_name)
                .filter(|r| *r != UserRole::Guest)
                .ok_or_else(|| AppError::InvalidRole(role_name.clone()))?;
            ProfileLogic::assign_role(conn, &cfg.user, target, role)?;
            success(format!("{} is now {}", target, role.to_db_str()));
        }

        if *show {
            let profile = ProfileLogic::profile_of(conn, &cfg.user)?;
            let role = ProfileLogic::role_of(conn, &cfg.user)?;
            header("Profile");
            println!("Identity:     {}", cfg.user);
            println!(
                "Display name: {}",
                profile.display_name.as_deref().unwrap_or("--")
            );
            println!("Role:         {}", role.to_db_str());
        }
    }

    Ok(())
}
