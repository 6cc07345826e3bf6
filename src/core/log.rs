use crate::db::queries::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    match RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "goal" | "goal_delete" => Colour::Cyan,
        "achievement" => Colour::Yellow,
        "profile" | "role" | "reminder" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated to the column width, with only the
/// operation word colored.
fn format_op_target(operation: &str, target: &str) -> String {
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(operation);
    match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render(entries: &[LogRow]) -> Vec<String> {
        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        let cells: Vec<String> = entries
            .iter()
            .map(|(_, _, op, target, _)| format_op_target(op, target))
            .collect();
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).chars().count())
            .max()
            .unwrap_or(10);

        entries
            .iter()
            .zip(cells)
            .map(|((id, date, _, _, message), cell)| {
                let date = chrono::DateTime::parse_from_rfc3339(date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| date.clone());
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&cell).chars().count()));
                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    id,
                    date,
                    cell,
                    padding,
                    message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}
