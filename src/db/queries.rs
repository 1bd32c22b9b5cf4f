use crate::errors::{AppError, AppResult};
use crate::models::day_record::{DayEntry, DayRecord};
use crate::models::ledger::Ledger;
use crate::models::stamp::{StampBlock, StampSequence};
use crate::models::status::{DayStatus, WorkMode};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, Row, params};
use std::collections::BTreeMap;

const DAY_COLUMNS: &str =
    "date, status, mode, expected_minutes, total_minutes, balance_minutes";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(s.to_string())))
}

fn parse_db_time(idx: usize, s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| conversion_error(idx, AppError::InvalidTime(s.to_string())))
}

/// Day row without its stamps.
struct DayRow {
    date: NaiveDate,
    status: DayStatus,
    mode: Option<WorkMode>,
    expected_minutes: i64,
    total_minutes: i64,
    balance_minutes: i64,
}

fn map_day_row(row: &Row) -> rusqlite::Result<DayRow> {
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;
    let mode_str: Option<String> = row.get("mode")?;

    let status = DayStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(1, AppError::Validation(format!("Invalid status: {status_str}")))
    })?;
    let mode = match mode_str {
        Some(m) => Some(WorkMode::from_db_str(&m).ok_or_else(|| {
            conversion_error(2, AppError::Validation(format!("Invalid mode: {m}")))
        })?),
        None => None,
    };

    Ok(DayRow {
        date: parse_db_date(&date_str)?,
        status,
        mode,
        expected_minutes: row.get("expected_minutes")?,
        total_minutes: row.get("total_minutes")?,
        balance_minutes: row.get("balance_minutes")?,
    })
}

fn map_stamp_row(row: &Row) -> rusqlite::Result<(NaiveDate, StampBlock)> {
    let date_str: String = row.get("date")?;
    let arrival: String = row.get("arrival")?;
    let departure: Option<String> = row.get("departure")?;

    let block = StampBlock {
        arrival: parse_db_time(2, &arrival)?,
        departure: departure.map(|d| parse_db_time(3, &d)).transpose()?,
    };
    Ok((parse_db_date(&date_str)?, block))
}

fn assemble(row: DayRow, blocks: Vec<StampBlock>) -> AppResult<DayRecord> {
    let stamps = StampSequence::from_blocks(blocks).map_err(|e| {
        AppError::Validation(format!("{}: {}", row.date.format("%Y-%m-%d"), e))
    })?;
    let entry = match row.status {
        DayStatus::Sick => DayEntry::Sick { stamps },
        _ => DayEntry::Normal { stamps },
    };
    Ok(DayRecord {
        date: row.date,
        mode: row.mode,
        entry,
        expected_minutes: row.expected_minutes,
        total_minutes: row.total_minutes,
        balance_minutes: row.balance_minutes,
    })
}

/// Load every day in `[from, to]` (both optional) into a ledger.
pub fn load_ledger(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Ledger> {
    let from_str = from
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "0000-01-01".to_string());
    let to_str = to
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "9999-12-31".to_string());

    let mut stmt = conn.prepare(&format!(
        "SELECT {DAY_COLUMNS} FROM days
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC"
    ))?;
    let days = stmt
        .query_map(params![from_str, to_str], map_day_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT date, position, arrival, departure FROM stamps
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, position ASC",
    )?;
    let mut blocks: BTreeMap<NaiveDate, Vec<StampBlock>> = BTreeMap::new();
    for r in stmt.query_map(params![from_str, to_str], map_stamp_row)? {
        let (date, block) = r?;
        blocks.entry(date).or_default().push(block);
    }

    let mut records = Vec::with_capacity(days.len());
    for row in days {
        let day_blocks = blocks.remove(&row.date).unwrap_or_default();
        records.push(assemble(row, day_blocks)?);
    }

    tracing::debug!(days = records.len(), "ledger loaded");
    Ok(Ledger::from_records(records))
}

/// Rewrite the given days (row and stamps) in a single transaction.
/// Nothing is written when any statement fails.
pub fn save_days<'a, I>(conn: &mut Connection, records: I) -> AppResult<usize>
where
    I: IntoIterator<Item = &'a DayRecord>,
{
    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;
    let mut saved = 0;

    {
        let mut upsert_day = tx.prepare_cached(
            "INSERT INTO days (date, status, mode, expected_minutes, total_minutes, balance_minutes, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(date) DO UPDATE SET
                status = excluded.status,
                mode = excluded.mode,
                expected_minutes = excluded.expected_minutes,
                total_minutes = excluded.total_minutes,
                balance_minutes = excluded.balance_minutes,
                updated_at = excluded.updated_at",
        )?;
        let mut clear_stamps = tx.prepare_cached("DELETE FROM stamps WHERE date = ?1")?;
        let mut insert_stamp = tx.prepare_cached(
            "INSERT INTO stamps (date, position, arrival, departure) VALUES (?1, ?2, ?3, ?4)",
        )?;

        for record in records {
            let date_str = record.date_str();
            upsert_day.execute(params![
                date_str,
                record.status().to_db_str(),
                record.mode.map(|m| m.to_db_str()),
                record.expected_minutes,
                record.total_minutes,
                record.balance_minutes,
                now,
            ])?;

            clear_stamps.execute([&date_str])?;
            for (pos, block) in record.stamps().blocks().iter().enumerate() {
                insert_stamp.execute(params![
                    date_str,
                    pos as i64 + 1,
                    block.arrival.format("%H:%M").to_string(),
                    block.departure.map(|d| d.format("%H:%M").to_string()),
                ])?;
            }
            saved += 1;
        }
    }

    tx.commit()?;
    tracing::debug!(days = saved, "days saved");
    Ok(saved)
}
