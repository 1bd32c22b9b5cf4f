use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts and date span of the database.
#[derive(Debug, Clone, Default)]
pub struct DbStats {
    pub file_size: u64,
    pub days: i64,
    pub stamps: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn collect_stats(pool: &DbPool) -> rusqlite::Result<DbStats> {
    let file_size = fs::metadata(&pool.path).map(|m| m.len()).unwrap_or(0);

    let days: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM days", [], |row| row.get(0))?;
    let stamps: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM stamps", [], |row| row.get(0))?;

    let (first_date, last_date): (Option<String>, Option<String>) = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM days", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?
        .unwrap_or((None, None));

    Ok(DbStats {
        file_size,
        days,
        stamps,
        first_date,
        last_date,
    })
}

pub fn print_db_info(pool: &DbPool) -> rusqlite::Result<()> {
    let stats = collect_stats(pool)?;
    println!();

    let file_mb = (stats.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!("{}• Days:{} {}{}{}", CYAN, RESET, GREEN, stats.days, RESET);
    println!("{}• Stamps:{} {}{}{}", CYAN, RESET, GREEN, stats.stamps, RESET);

    let fmt_first = stats
        .first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = stats
        .last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    if stats.days > 0 {
        let avg = stats.stamps as f64 / stats.days as f64;
        println!("{}• Average blocks/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
