/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Streak color:
/// 0 → grey
/// 1..7 → yellow
/// 7+ → green
pub fn color_for_streak(streak: u32) -> &'static str {
    match streak {
        0 => GREY,
        1..=6 => YELLOW,
        _ => GREEN,
    }
}

/// Greys out placeholders such as `--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
