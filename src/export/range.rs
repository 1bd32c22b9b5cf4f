// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval).
///
/// Accepts:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (r, r),
    };

    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let (from, _) = period_bounds(start)?;
    let (_, to) = period_bounds(end)?;
    if to < from {
        return Err(AppError::InvalidDate(format!("{r}: end is before start")));
    }
    Ok((from, to))
}

/// First and last day of a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| bad())?;
            Ok((
                NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(bad)?,
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(bad)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| bad())?;
            let last = first
                .checked_add_months(chrono::Months::new(1))
                .and_then(|d| d.pred_opt())
                .ok_or_else(bad)?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad())?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!(
            "unsupported --range format: {p}"
        ))),
    }
}
