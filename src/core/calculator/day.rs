use crate::core::calculator::breaks::break_deduction;
use crate::core::calculator::timeline::{Timeline, build_timeline};
use crate::core::rules::LedgerRules;
use crate::models::day_record::{DayEntry, DayRecord};
use chrono::NaiveTime;
use serde::Serialize;

/// Derived figures of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayFigures {
    pub raw_minutes: i64,
    pub deduction_minutes: i64,
    pub total_minutes: i64,
    pub expected_minutes: i64,
    pub balance_minutes: i64,
    pub estimate: bool,
}

/// Travel offset applicable to `record`: none for home office.
pub fn travel_offset(record: &DayRecord, rules: &LedgerRules) -> i64 {
    match record.mode {
        Some(mode) if !mode.applies_travel_offset() => 0,
        _ => rules.travel_offset_minutes,
    }
}

pub fn day_timeline(record: &DayRecord, rules: &LedgerRules, now: Option<NaiveTime>) -> Timeline {
    build_timeline(record.stamps(), travel_offset(record, rules), now)
}

/// Pure recomputation of a day from its stamps, status and expected hours.
///
/// `now` turns an open block into a provisional one (live estimate); the
/// result is then flagged as an estimate. Sick days are credited with the
/// expected hours whatever the stamps say.
pub fn compute_day(record: &DayRecord, rules: &LedgerRules, now: Option<NaiveTime>) -> DayFigures {
    let timeline = day_timeline(record, rules, now);
    let raw = timeline.raw_minutes;
    let deduction = break_deduction(
        raw,
        rules.break_threshold_minutes,
        rules.break_deduction_minutes,
    );
    let expected = record.expected_minutes;

    let (total, estimate) = match record.entry {
        DayEntry::Sick { .. } => (expected, false),
        DayEntry::Normal { .. } => ((raw - deduction).max(0), timeline.provisional),
    };

    DayFigures {
        raw_minutes: raw,
        deduction_minutes: deduction,
        total_minutes: total,
        expected_minutes: expected,
        balance_minutes: total - expected,
        estimate,
    }
}
