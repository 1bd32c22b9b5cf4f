use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Calculation settings threaded explicitly into every engine call.
///
/// Built from the configuration file by `Config::rules()`; all values are
/// minutes so recomputation stays exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRules {
    pub travel_offset_minutes: i64,
    pub break_threshold_minutes: i64,
    pub break_deduction_minutes: i64,
    /// Indexed Monday = 0 … Sunday = 6.
    expected_minutes: [i64; 7],
    carry_over_minutes: BTreeMap<i32, i64>,
}

impl Default for LedgerRules {
    fn default() -> Self {
        Self {
            travel_offset_minutes: 2,
            break_threshold_minutes: 6 * 60,
            break_deduction_minutes: 30,
            expected_minutes: [480, 480, 480, 480, 480, 0, 0],
            carry_over_minutes: BTreeMap::new(),
        }
    }
}

impl LedgerRules {
    pub fn with_travel_offset(mut self, minutes: i64) -> Self {
        self.travel_offset_minutes = minutes;
        self
    }

    pub fn with_break(mut self, threshold_minutes: i64, deduction_minutes: i64) -> Self {
        self.break_threshold_minutes = threshold_minutes;
        self.break_deduction_minutes = deduction_minutes;
        self
    }

    pub fn with_expected(mut self, weekday: Weekday, minutes: i64) -> Self {
        self.expected_minutes[weekday.num_days_from_monday() as usize] = minutes;
        self
    }

    pub fn with_carry_over(mut self, year: i32, minutes: i64) -> Self {
        self.carry_over_minutes.insert(year, minutes);
        self
    }

    pub fn expected_on(&self, weekday: Weekday) -> i64 {
        self.expected_minutes[weekday.num_days_from_monday() as usize]
    }

    /// Expected minutes for a date without a stored record.
    pub fn expected_for(&self, date: NaiveDate) -> i64 {
        self.expected_on(date.weekday())
    }

    /// Configured opening balance of `year`, if any.
    pub fn carry_over(&self, year: i32) -> Option<i64> {
        self.carry_over_minutes.get(&year).copied()
    }

    /// Earliest year with a configured opening balance.
    pub fn first_carry_over_year(&self) -> Option<i32> {
        self.carry_over_minutes.keys().next().copied()
    }
}
