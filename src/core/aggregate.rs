//! Folds day records into day, week, month and year views.
//!
//! Nothing here is persisted: every view is derived on demand from the
//! [`Ledger`] and the [`LedgerRules`], with the [`Clock`] deciding which days
//! are already past and which open block may be estimated live.

use crate::core::calculator::compute_day;
use crate::core::clock::Clock;
use crate::core::rules::LedgerRules;
use crate::errors::{AppError, AppResult};
use crate::models::ledger::Ledger;
use crate::models::status::DayStatus;
use crate::models::summary::{BalanceReport, DaySource, DayView, MonthRecord, WeekView, YearRecord};
use chrono::{Datelike, Days, NaiveDate};

pub struct AggregationEngine<'a> {
    rules: &'a LedgerRules,
    clock: &'a dyn Clock,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(rules: &'a LedgerRules, clock: &'a dyn Clock) -> Self {
        Self { rules, clock }
    }

    /// Resolved view of `date`.
    ///
    /// With `live`, an open block on today's date is closed provisionally at
    /// the current time and the figures are flagged as an estimate.
    pub fn day_view(&self, ledger: &Ledger, date: NaiveDate, live: bool) -> DayView {
        let now = self.clock.now();
        let today = now.date();

        if let Some(record) = ledger.recorded(&date) {
            let live_now = (live && date == today).then_some(now.time());
            let figures = compute_day(record, self.rules, live_now);
            return DayView {
                date,
                status: record.status(),
                blocks: record.stamps().blocks().to_vec(),
                source: DaySource::Recorded,
                expected_minutes: figures.expected_minutes,
                total_minutes: Some(figures.total_minutes),
                balance_minutes: Some(figures.balance_minutes),
                open: record.is_open(),
                estimate: figures.estimate,
            };
        }

        // an empty stored record keeps the expected hours it was created with
        let expected = ledger
            .get(&date)
            .map(|r| r.expected_minutes)
            .unwrap_or_else(|| self.rules.expected_for(date));

        let (source, total, balance) = if date >= today {
            (DaySource::Pending, None, None)
        } else if expected > 0 {
            (DaySource::Synthesized, Some(expected), Some(0))
        } else {
            (DaySource::Off, None, None)
        };

        DayView {
            date,
            status: DayStatus::None,
            blocks: Vec::new(),
            source,
            expected_minutes: expected,
            total_minutes: total,
            balance_minutes: balance,
            open: false,
            estimate: false,
        }
    }

    /// Monday to Sunday of the week containing `anchor`.
    pub fn week_view(&self, ledger: &Ledger, anchor: NaiveDate) -> AppResult<WeekView> {
        let offset = anchor.weekday().num_days_from_monday() as u64;
        let monday = anchor
            .checked_sub_days(Days::new(offset))
            .ok_or_else(|| AppError::InvalidDate(anchor.to_string()))?;

        let days: Vec<DayView> = (0..7)
            .filter_map(|n| monday.checked_add_days(Days::new(n)))
            .map(|d| self.day_view(ledger, d, true))
            .collect();

        let view = WeekView {
            monday,
            today: self.clock.today(),
            total_minutes: days.iter().map(DayView::counted_total).sum(),
            expected_minutes: days.iter().map(DayView::counted_expected).sum(),
            balance_minutes: days.iter().map(DayView::counted_balance).sum(),
            planned_minutes: days.iter().map(|d| d.expected_minutes).sum(),
            estimate: days.iter().any(|d| d.estimate),
            days,
        };

        tracing::debug!(
            monday = %view.monday,
            total = view.total_minutes,
            balance = view.balance_minutes,
            estimate = view.estimate,
            "week aggregated"
        );
        Ok(view)
    }

    /// One month starting from `carry_in`.
    ///
    /// Only days with expected hours or recorded content are listed.
    pub fn month_record(
        &self,
        ledger: &Ledger,
        year: i32,
        month: u32,
        carry_in: i64,
        live: bool,
    ) -> AppResult<MonthRecord> {
        let days: Vec<DayView> = month_dates(year, month)?
            .into_iter()
            .map(|d| self.day_view(ledger, d, live))
            .filter(|v| v.expected_minutes > 0 || v.source == DaySource::Recorded)
            .collect();

        let balance: i64 = days.iter().map(DayView::counted_balance).sum();

        Ok(MonthRecord {
            year,
            month,
            total_minutes: days.iter().map(DayView::counted_total).sum(),
            expected_minutes: days.iter().map(DayView::counted_expected).sum(),
            balance_minutes: balance,
            carry_in_minutes: carry_in,
            cumulative_minutes: carry_in + balance,
            estimate: days.iter().any(|d| d.estimate),
            days,
        })
    }

    /// Month record whose carry-in is the running balance of its year up to
    /// the first of the month.
    pub fn month_in_year(&self, ledger: &Ledger, year: i32, month: u32) -> AppResult<MonthRecord> {
        let mut carry = self.year_carry_in(ledger, year)?;
        for m in 1..month {
            carry = self
                .month_record(ledger, year, m, carry, false)?
                .cumulative_minutes;
        }
        self.month_record(ledger, year, month, carry, true)
    }

    /// Balance carried into January 1st of `year`.
    ///
    /// A configured carry-over wins; otherwise the closing balance of the
    /// previous year. The chain starts at the first recorded or configured
    /// year, whichever is earlier.
    pub fn year_carry_in(&self, ledger: &Ledger, year: i32) -> AppResult<i64> {
        if let Some(configured) = self.rules.carry_over(year) {
            return Ok(configured);
        }
        let start = [
            ledger.earliest_date().map(|d| d.year()),
            self.rules.first_carry_over_year(),
        ]
        .into_iter()
        .flatten()
        .min();
        let Some(start) = start.filter(|s| *s < year) else {
            return Ok(0);
        };

        let mut carry = 0;
        for y in start..year {
            if let Some(configured) = self.rules.carry_over(y) {
                carry = configured;
            }
            carry += self.balance_between(ledger, year_start(y)?, year_start(y + 1)?);
        }
        Ok(carry)
    }

    pub fn year_record(&self, ledger: &Ledger, year: i32) -> AppResult<YearRecord> {
        let carry_in = self.year_carry_in(ledger, year)?;
        let mut months = Vec::with_capacity(12);
        let mut running = carry_in;
        for month in 1..=12 {
            let record = self.month_record(ledger, year, month, running, true)?;
            running = record.cumulative_minutes;
            months.push(record);
        }
        Ok(YearRecord {
            year,
            carry_in_minutes: carry_in,
            months,
        })
    }

    /// Cumulative balance through the day before `as_of`.
    pub fn balance(&self, ledger: &Ledger, as_of: NaiveDate) -> AppResult<BalanceReport> {
        let through = as_of
            .pred_opt()
            .ok_or_else(|| AppError::InvalidDate(as_of.to_string()))?;

        let carry_in = self.year_carry_in(ledger, as_of.year())?;
        let balance = carry_in + self.balance_between(ledger, year_start(as_of.year())?, as_of);

        tracing::debug!(as_of = %as_of, carry_in, balance, "balance computed");
        Ok(BalanceReport {
            as_of,
            through,
            balance_minutes: balance,
        })
    }

    /// Sum of counted balances on `[from, to)`. Missing days contribute 0,
    /// so only stored records need to be visited.
    fn balance_between(&self, ledger: &Ledger, from: NaiveDate, to: NaiveDate) -> i64 {
        let Some(last) = to.pred_opt() else {
            return 0;
        };
        if last < from {
            return 0;
        }
        let dates: Vec<NaiveDate> = ledger.range(from, last).map(|r| r.date).collect();
        dates
            .into_iter()
            .map(|d| self.day_view(ledger, d, false).counted_balance())
            .sum()
    }
}

fn year_start(year: i32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| AppError::InvalidDate(year.to_string()))
}

/// All dates of a calendar month.
pub fn month_dates(year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}
