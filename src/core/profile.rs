use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{UserProfile, UserRole, is_guest};
use rusqlite::Connection;

pub struct ProfileLogic;

impl ProfileLogic {
    /// Role of `identity`: guests are always Guest, unknown users are User.
    pub fn role_of(conn: &Connection, identity: &str) -> AppResult<UserRole> {
        if is_guest(identity) {
            return Ok(UserRole::Guest);
        }
        Ok(queries::load_role(conn, identity)?.unwrap_or(UserRole::User))
    }

    pub fn is_admin(conn: &Connection, identity: &str) -> AppResult<bool> {
        Ok(Self::role_of(conn, identity)? == UserRole::Admin)
    }

    /// Fail for guests.
    pub fn require_signed_in<'a>(identity: &'a str, action: &str) -> AppResult<&'a str> {
        if is_guest(identity) {
            return Err(AppError::NotSignedIn(action.to_string()));
        }
        Ok(identity)
    }

    /// Make `identity` the admin when the database has none yet. Called once
    /// a signed-in action has gone through; returns whether it promoted.
    pub fn claim_admin_if_first(conn: &Connection, identity: &str) -> AppResult<bool> {
        if is_guest(identity) || queries::count_admins(conn)? > 0 {
            return Ok(false);
        }

        queries::save_role(conn, identity, UserRole::Admin)?;
        ttlog_quiet(conn, "role", identity, "First user promoted to admin");
        Ok(true)
    }

    pub fn profile_of(conn: &Connection, identity: &str) -> AppResult<UserProfile> {
        Ok(queries::load_profile(conn, identity)?.unwrap_or_default())
    }

    pub fn save_display_name(conn: &Connection, identity: &str, name: &str) -> AppResult<()> {
        let identity = Self::require_signed_in(identity, "save your profile")?;

        let trimmed = name.trim();
        let profile = UserProfile {
            display_name: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        };

        queries::save_profile(conn, identity, &profile)?;
        ttlog_quiet(conn, "profile", identity, &format!("Display name set to '{}'", trimmed));
        Self::claim_admin_if_first(conn, identity)?;
        Ok(())
    }

    /// Admin-only.
    pub fn assign_role(
        conn: &Connection,
        caller: &str,
        target: &str,
        role: UserRole,
    ) -> AppResult<()> {
        let caller = Self::require_signed_in(caller, "manage roles")?;
        if is_guest(target) {
            return Err(AppError::InvalidRole(
                "the guest identity cannot be given a role".into(),
            ));
        }

        Self::claim_admin_if_first(conn, caller)?;
        if !Self::is_admin(conn, caller)? {
            return Err(AppError::PermissionDenied(
                "only an admin can assign roles".into(),
            ));
        }

        queries::save_role(conn, target, role)?;
        ttlog_quiet(
            conn,
            "role",
            target,
            &format!("Role set to {} by {}", role.to_db_str(), caller),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    #[test]
    fn guest_cannot_act() {
        let c = conn();
        assert!(matches!(
            ProfileLogic::require_signed_in("guest", "log a run"),
            Err(AppError::NotSignedIn(_))
        ));
        assert_eq!(ProfileLogic::role_of(&c, "guest").unwrap(), UserRole::Guest);
        assert!(!ProfileLogic::claim_admin_if_first(&c, "guest").unwrap());
        assert_eq!(queries::count_admins(&c).unwrap(), 0);
    }

    #[test]
    fn checking_sign_in_grants_no_role() {
        let c = conn();
        ProfileLogic::require_signed_in("alice", "log a run").unwrap();
        assert_eq!(queries::count_admins(&c).unwrap(), 0);
        assert_eq!(ProfileLogic::role_of(&c, "alice").unwrap(), UserRole::User);
    }

    #[test]
    fn saving_a_profile_claims_admin_for_first_user() {
        let c = conn();
        ProfileLogic::save_display_name(&c, "alice", "Alice").unwrap();
        ProfileLogic::save_display_name(&c, "bob", "Bob").unwrap();
        assert!(ProfileLogic::is_admin(&c, "alice").unwrap());
        assert!(!ProfileLogic::is_admin(&c, "bob").unwrap());
    }

    #[test]
    fn first_user_becomes_admin_and_can_assign_roles() {
        let c = conn();
        assert!(ProfileLogic::claim_admin_if_first(&c, "alice").unwrap());
        assert!(!ProfileLogic::claim_admin_if_first(&c, "bob").unwrap());

        assert_eq!(ProfileLogic::role_of(&c, "alice").unwrap(), UserRole::Admin);
        assert_eq!(ProfileLogic::role_of(&c, "bob").unwrap(), UserRole::User);

        assert!(matches!(
            ProfileLogic::assign_role(&c, "bob", "carol", UserRole::Admin),
            Err(AppError::PermissionDenied(_))
        ));
        ProfileLogic::assign_role(&c, "alice", "bob", UserRole::Admin).unwrap();
        assert!(ProfileLogic::is_admin(&c, "bob").unwrap());
    }

    #[test]
    fn display_name_is_trimmed_and_clearable() {
        let c = conn();
        ProfileLogic::save_display_name(&c, "alice", "  Alice  ").unwrap();
        assert_eq!(
            ProfileLogic::profile_of(&c, "alice").unwrap().display_name.as_deref(),
            Some("Alice")
        );

        ProfileLogic::save_display_name(&c, "alice", "").unwrap();
        assert_eq!(ProfileLogic::profile_of(&c, "alice").unwrap().display_name, None);
    }
}
