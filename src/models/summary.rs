use super::stamp::StampBlock;
use super::status::DayStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// How a day's figures were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaySource {
    /// Computed from a stored record.
    Recorded,
    /// Past workday without a record: credited as expected, balance 0.
    Synthesized,
    /// Today or later without a record: nothing happened yet.
    Pending,
    /// Past day with nothing expected and nothing recorded.
    Off,
}

impl DaySource {
    /// Recorded and synthesized days contribute to sums; the others do not.
    pub fn counts(&self) -> bool {
        matches!(self, DaySource::Recorded | DaySource::Synthesized)
    }
}

/// Resolved view of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub blocks: Vec<StampBlock>,
    pub source: DaySource,
    pub expected_minutes: i64,
    pub total_minutes: Option<i64>,
    pub balance_minutes: Option<i64>,
    /// Day has an open block (clocked in, not yet out).
    pub open: bool,
    /// Total uses the current time as a provisional clock-out.
    pub estimate: bool,
}

impl DayView {
    pub fn counted_total(&self) -> i64 {
        if self.source.counts() {
            self.total_minutes.unwrap_or(0)
        } else {
            0
        }
    }

    pub fn counted_expected(&self) -> i64 {
        if self.source.counts() {
            self.expected_minutes
        } else {
            0
        }
    }

    pub fn counted_balance(&self) -> i64 {
        if self.source.counts() {
            self.balance_minutes.unwrap_or(0)
        } else {
            0
        }
    }
}

/// Monday-to-Sunday view around an anchor date.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub monday: NaiveDate,
    pub today: NaiveDate,
    pub days: Vec<DayView>,
    pub total_minutes: i64,
    pub expected_minutes: i64,
    pub balance_minutes: i64,
    /// Expected hours of the whole week, including days not yet worked.
    pub planned_minutes: i64,
    pub estimate: bool,
}

/// One month of the ledger with its running balance.
#[derive(Debug, Clone, Serialize)]
pub struct MonthRecord {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayView>,
    pub total_minutes: i64,
    pub expected_minutes: i64,
    pub balance_minutes: i64,
    pub carry_in_minutes: i64,
    pub cumulative_minutes: i64,
    pub estimate: bool,
}

/// Twelve months plus the balance carried into the year.
#[derive(Debug, Clone, Serialize)]
pub struct YearRecord {
    pub year: i32,
    pub carry_in_minutes: i64,
    pub months: Vec<MonthRecord>,
}

impl YearRecord {
    pub fn closing_minutes(&self) -> i64 {
        self.months
            .last()
            .map(|m| m.cumulative_minutes)
            .unwrap_or(self.carry_in_minutes)
    }

    pub fn total_minutes(&self) -> i64 {
        self.months.iter().map(|m| m.total_minutes).sum()
    }

    pub fn expected_minutes(&self) -> i64 {
        self.months.iter().map(|m| m.expected_minutes).sum()
    }
}

/// Cumulative balance through the day before `as_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub as_of: NaiveDate,
    pub through: NaiveDate,
    pub balance_minutes: i64,
}
