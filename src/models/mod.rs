pub mod achievement;
pub mod distance_unit;
pub mod goal;
pub mod profile;
pub mod reminder;
pub mod run_log;
