// src/export/logic.rs

use crate::core::aggregate::AggregationEngine;
use crate::core::clock::Clock;
use crate::core::rules::LedgerRules;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_ledger;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DayExport, MonthExport};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::ledger::Ledger;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use chrono::{Datelike, Months, NaiveDate};

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the ledger.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or one of `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
    ///   and their `a:b` intervals
    ///
    /// Returns the number of exported day rows.
    pub fn export(
        pool: &DbPool,
        rules: &LedgerRules,
        clock: &dyn Clock,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let ledger = load_ledger(&pool.conn, None, None)?;

        let bounds = match range {
            Some(r) if !r.eq_ignore_ascii_case("all") => Some(parse_range(r)?),
            _ => default_bounds(&ledger, clock.today()),
        };

        let Some((from, to)) = bounds else {
            warning("No recorded days to export.");
            return Ok(0);
        };

        let months = build_months(&ledger, rules, clock, from, to)?;
        let row_count: usize = months.iter().map(|m| m.rows.len()).sum();

        if row_count == 0 {
            warning("No days found for selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv | ExportFormat::Json => {
                let rows: Vec<DayExport> = months.into_iter().flat_map(|m| m.rows).collect();
                if format == ExportFormat::Csv {
                    export_csv(&rows, &path)?
                } else {
                    export_json(&rows, &path)?
                }
            }
            ExportFormat::Xlsx => export_xlsx(&months, &path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} day(s) as {}", row_count, format.as_str()),
        )?;

        Ok(row_count)
    }
}

/// From the first recorded day to the later of today and the last record.
fn default_bounds(ledger: &Ledger, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = ledger.earliest_date()?;
    let last = ledger
        .iter()
        .filter(|r| r.has_content())
        .map(|r| r.date)
        .max()
        .unwrap_or(first);
    Some((first, last.max(today)))
}

/// Month records covering `[from, to]`, each limited to the days inside it.
pub fn build_months(
    ledger: &Ledger,
    rules: &LedgerRules,
    clock: &dyn Clock,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<MonthExport>> {
    let engine = AggregationEngine::new(rules, clock);
    let mut out = Vec::new();

    let mut cursor = NaiveDate::from_ymd_opt(from.year(), from.month(), 1)
        .ok_or_else(|| AppError::InvalidDate(from.to_string()))?;

    while cursor <= to {
        let record = engine.month_in_year(ledger, cursor.year(), cursor.month())?;
        let rows: Vec<DayExport> = record
            .days
            .iter()
            .filter(|v| v.date >= from && v.date <= to)
            .filter_map(DayExport::from_view)
            .collect();

        if !rows.is_empty() {
            out.push(MonthExport::new(&record, rows));
        }

        cursor = cursor
            .checked_add_months(Months::new(1))
            .ok_or_else(|| AppError::InvalidDate(cursor.to_string()))?;
    }

    Ok(out)
}
