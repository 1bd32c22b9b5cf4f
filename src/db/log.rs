//! Audit trail of mutating commands (`log` table).

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, Row, params};

/// Append an audit row. `target` is the day, scope or file the operation
/// touched (may be empty).
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;

    tracing::debug!(operation, target, "audit row written");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    /// RFC 3339 timestamp of the command.
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn map_log_row(row: &Row<'_>) -> rusqlite::Result<LogRow> {
    Ok(LogRow {
        id: row.get(0)?,
        date: row.get(1)?,
        operation: row.get(2)?,
        target: row.get(3)?,
        message: row.get(4)?,
    })
}

/// Every audit row, oldest first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;
    let rows = stmt
        .query_map([], map_log_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
