//! Stamp operations on day records.
//!
//! Every operation works on a copy of the target record and only writes it
//! back into the [`Ledger`] once all checks passed, so a failed operation
//! leaves the ledger untouched.

use crate::core::calculator::compute_day;
use crate::core::rules::LedgerRules;
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::ledger::Ledger;
use crate::models::stamp::{StampBlock, StampSequence};
use crate::models::status::WorkMode;
use chrono::{Datelike, Days, NaiveDate, NaiveTime};

/// How far back the forgotten-stamp check looks for the previous workday.
const FORGOTTEN_LOOKBACK_DAYS: u64 = 7;

/// Open block left behind on the previous workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForgottenStamp {
    pub date: NaiveDate,
    pub arrival: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct ClockInOutcome {
    pub record: DayRecord,
    /// Advisory only; the clock-in itself succeeded.
    pub forgotten: Option<ForgottenStamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeScope {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl RecomputeScope {
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match *self {
            RecomputeScope::Day(d) => *date == d,
            RecomputeScope::Month { year, month } => date.year() == year && date.month() == month,
            RecomputeScope::Year(year) => date.year() == year,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            RecomputeScope::Day(d) => d.format("%Y-%m-%d").to_string(),
            RecomputeScope::Month { year, month } => format!("{year}-{month:02}"),
            RecomputeScope::Year(year) => year.to_string(),
        }
    }
}

pub struct LedgerEngine<'a> {
    rules: &'a LedgerRules,
}

impl<'a> LedgerEngine<'a> {
    pub fn new(rules: &'a LedgerRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LedgerRules {
        self.rules
    }

    /// Clock in on `date` at `time`.
    ///
    /// `home` is only consulted when the day has no status yet.
    pub fn clock_in(
        &self,
        ledger: &mut Ledger,
        date: NaiveDate,
        time: NaiveTime,
        home: bool,
    ) -> AppResult<ClockInOutcome> {
        let mut record = self.record_for(ledger, date);

        record.stamps_mut().append_arrival(time)?;
        if record.mode.is_none() {
            record.mode = Some(WorkMode::from_home_flag(home));
        }

        let record = self.recompute_day(record);
        let forgotten = self.find_forgotten_stamp(ledger, date);

        if let Some(f) = &forgotten {
            tracing::warn!(
                date = %f.date,
                arrival = %f.arrival.format("%H:%M"),
                "previous workday still has an open entry"
            );
        }
        tracing::debug!(date = %date, time = %time.format("%H:%M"), mode = ?record.mode, "clock-in");

        ledger.upsert(record.clone());
        Ok(ClockInOutcome { record, forgotten })
    }

    /// Clock out on `date` at `time`; `sick` switches the day to the sick
    /// overlay after closing the block.
    pub fn clock_out(
        &self,
        ledger: &mut Ledger,
        date: NaiveDate,
        time: NaiveTime,
        sick: bool,
    ) -> AppResult<DayRecord> {
        let mut record = ledger.get(&date).cloned().ok_or_else(|| {
            AppError::InvalidState(format!(
                "No open entry found on {}: clock in first.",
                date.format("%Y-%m-%d")
            ))
        })?;

        record.stamps_mut().close_last_block(time)?;
        if sick {
            record.mark_sick();
        }

        let record = self.recompute_day(record);
        tracing::debug!(
            date = %date,
            time = %time.format("%H:%M"),
            sick,
            total = record.total_minutes,
            "clock-out"
        );

        ledger.upsert(record.clone());
        Ok(record)
    }

    /// Manual entry of one complete block for a day without stamps.
    pub fn manual_entry(
        &self,
        ledger: &mut Ledger,
        date: NaiveDate,
        arrival: NaiveTime,
        departure: NaiveTime,
        home: bool,
    ) -> AppResult<DayRecord> {
        if departure <= arrival {
            return Err(AppError::Validation(format!(
                "Departure ({}) must be after arrival ({}).",
                departure.format("%H:%M"),
                arrival.format("%H:%M")
            )));
        }

        let mut record = self.record_for(ledger, date);
        if !record.stamps().is_empty() {
            return Err(AppError::Validation(format!(
                "{} already has stamps: use clock-in/clock-out instead.",
                date.format("%Y-%m-%d")
            )));
        }

        *record.stamps_mut() = StampSequence::from_blocks(vec![StampBlock::closed(arrival, departure)])?;
        record.mode = Some(WorkMode::from_home_flag(home));

        let record = self.recompute_day(record);
        tracing::debug!(date = %date, total = record.total_minutes, "manual entry");

        ledger.upsert(record.clone());
        Ok(record)
    }

    /// Refresh the cached total and balance of `record`. Idempotent.
    pub fn recompute_day(&self, mut record: DayRecord) -> DayRecord {
        let figures = compute_day(&record, self.rules, None);
        record.total_minutes = figures.total_minutes;
        record.balance_minutes = figures.balance_minutes;
        record
    }

    /// Recompute every stored day inside `scope`. Missing days are not
    /// materialised. Returns the dates that were recomputed.
    pub fn recompute(&self, ledger: &mut Ledger, scope: RecomputeScope) -> Vec<NaiveDate> {
        let targets: Vec<DayRecord> = ledger
            .iter()
            .filter(|r| scope.contains(&r.date) && r.has_content())
            .cloned()
            .collect();

        let mut dates = Vec::with_capacity(targets.len());
        for record in targets {
            let before = (record.total_minutes, record.balance_minutes);
            let updated = self.recompute_day(record);
            if before != (updated.total_minutes, updated.balance_minutes) {
                tracing::debug!(
                    date = %updated.date,
                    old_total = before.0,
                    new_total = updated.total_minutes,
                    "recomputed day changed"
                );
            }
            dates.push(updated.date);
            ledger.upsert(updated);
        }

        tracing::info!(scope = %scope.label(), days = dates.len(), "recompute finished");
        dates
    }

    /// Nearest earlier date with expected hours, within a week. A stored
    /// day keeps the expected hours it was created with.
    pub fn previous_workday(&self, ledger: &Ledger, date: NaiveDate) -> Option<NaiveDate> {
        (1..=FORGOTTEN_LOOKBACK_DAYS)
            .filter_map(|n| date.checked_sub_days(Days::new(n)))
            .find(|d| {
                let expected = ledger
                    .get(d)
                    .map(|r| r.expected_minutes)
                    .unwrap_or_else(|| self.rules.expected_for(*d));
                expected > 0
            })
    }

    fn find_forgotten_stamp(&self, ledger: &Ledger, date: NaiveDate) -> Option<ForgottenStamp> {
        let prev = self.previous_workday(ledger, date)?;
        let block = ledger.get(&prev)?.stamps().open_block()?;
        Some(ForgottenStamp {
            date: prev,
            arrival: block.arrival,
        })
    }

    fn record_for(&self, ledger: &Ledger, date: NaiveDate) -> DayRecord {
        ledger
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayRecord::new(date, self.rules.expected_for(date)))
    }
}
