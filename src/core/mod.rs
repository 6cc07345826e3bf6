pub mod achievements;
pub mod add;
pub mod backup;
pub mod config;
pub mod dashboard;
pub mod del;
pub mod goal;
pub mod history;
pub mod log;
pub mod motivation;
pub mod profile;
pub mod reminder;
pub mod streak;
pub mod submit_guard;
pub mod validation;
