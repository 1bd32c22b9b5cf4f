use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour for each logged operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" => Colour::Green,
        "clock_out" => Colour::Red,
        "amend" => Colour::Yellow,
        "update" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|r| op_target(r).len())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for row in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| row.date.clone());

            let mut visible = op_target(row);
            if visible.chars().count() > MAX_OP_WIDTH {
                visible = visible.chars().take(MAX_OP_WIDTH - 3).collect::<String>() + "...";
            }

            // only the operation word is coloured
            let color = color_for_operation(&row.operation);
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<25} | {}{} => {}",
                row.id, date, colored, padding, row.message,
            );
        }

        Ok(())
    }
}
