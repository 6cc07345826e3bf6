use serde::{Deserialize, Serialize};

/// Daily reminder settings, stored as JSON per identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReminderPreferences {
    pub enabled: bool,
    pub time: String,
}

impl Default for ReminderPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            time: "18:00".to_string(),
        }
    }
}

/// `<prefix>_<identity>`, falling back to `guest` for an empty identity.
pub fn storage_key(prefix: &str, identity: &str) -> String {
    let who = if identity.trim().is_empty() {
        super::profile::GUEST
    } else {
        identity
    };
    format!("{prefix}_{who}")
}
