mod common;
use common::{date, time};

use stempel::core::aggregate::AggregationEngine;
use stempel::core::clock::FixedClock;
use stempel::core::ledger::{LedgerEngine, RecomputeScope};
use stempel::core::rules::LedgerRules;
use stempel::errors::AppError;
use stempel::models::day_record::DayRecord;
use stempel::models::ledger::Ledger;
use stempel::models::stamp::{StampBlock, StampSequence};
use stempel::models::status::{DayStatus, WorkMode};
use stempel::models::summary::DaySource;

fn office_day(day: &str, blocks: &[(&str, &str)], rules: &LedgerRules) -> DayRecord {
    let mut record = DayRecord::new(date(day), rules.expected_for(date(day)));
    record.mode = Some(WorkMode::Office);
    *record.stamps_mut() = StampSequence::from_blocks(
        blocks
            .iter()
            .map(|(a, d)| StampBlock::closed(time(a), time(d)))
            .collect(),
    )
    .expect("ordered blocks");
    LedgerEngine::new(rules).recompute_day(record)
}

fn clock(day: &str, hh: u32, mm: u32) -> FixedClock {
    FixedClock::at(date(day), hh, mm).expect("valid clock")
}

// 2025-03-03 is a Monday.

#[test]
fn test_recompute_is_idempotent() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let once = office_day("2025-03-03", &[("08:10", "12:00"), ("12:40", "17:25")], &rules);
    let twice = engine.recompute_day(once.clone());

    assert_eq!(once.total_minutes, twice.total_minutes);
    assert_eq!(once.balance_minutes, twice.balance_minutes);
    assert_eq!(once, twice);
}

#[test]
fn test_travel_offset_on_first_arrival_and_last_departure() {
    let rules = LedgerRules::default();
    let record = office_day("2025-03-03", &[("09:00", "12:00"), ("12:45", "17:00")], &rules);

    let figures = stempel::core::calculator::compute_day(&record, &rules, None);
    // 7h15m raw plus 2 + 2 minutes of travel
    assert_eq!(figures.raw_minutes, 7 * 60 + 19);
    assert_eq!(figures.deduction_minutes, 30);
    assert_eq!(record.total_minutes, 6 * 60 + 49);
    assert_eq!(record.balance_minutes, 409 - 480);
}

#[test]
fn test_home_office_has_no_offset() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    let record = engine
        .manual_entry(&mut ledger, date("2025-03-03"), time("09:00"), time("12:00"), true)
        .expect("manual entry");
    assert_eq!(record.total_minutes, 180);
    assert_eq!(record.status(), DayStatus::Home);
}

#[test]
fn test_break_deduction_thresholds() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);

    for (departure, expected_total) in [("15:00", 360), ("15:15", 360), ("15:40", 370)] {
        let mut ledger = Ledger::new();
        let record = engine
            .manual_entry(&mut ledger, date("2025-03-03"), time("09:00"), time(departure), true)
            .expect("manual entry");
        assert_eq!(record.total_minutes, expected_total, "departure {departure}");
    }
}

#[test]
fn test_reopening_moves_the_departure_offset() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("08:00"), false).unwrap();
    let closed = engine.clock_out(&mut ledger, d, time("12:00"), false).unwrap();
    assert_eq!(closed.total_minutes, 244);

    // the open block contributes nothing and 12:00 is no longer the last departure
    let reopened = engine.clock_in(&mut ledger, d, time("13:00"), false).unwrap();
    assert_eq!(reopened.record.total_minutes, 242);
    assert!(reopened.record.is_open());

    let record = engine.clock_out(&mut ledger, d, time("16:00"), false).unwrap();
    // 07:58-12:00 + 13:00-16:02 = 424, minus the 30 minute break
    assert_eq!(record.total_minutes, 394);
    assert_eq!(record.stamps().len(), 2);
}

#[test]
fn test_sick_clock_out_credits_expected_hours() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("09:00"), false).unwrap();
    let record = engine.clock_out(&mut ledger, d, time("10:15"), true).unwrap();

    assert!(record.is_sick());
    assert_eq!(record.total_minutes, 480);
    assert_eq!(record.balance_minutes, 0);
    assert_eq!(
        record.stamps().blocks(),
        &[StampBlock::closed(time("09:00"), time("10:15"))]
    );

    // sick is terminal: further stamps are kept but the total stays credited
    engine.clock_in(&mut ledger, d, time("14:00"), false).unwrap();
    let record = engine.clock_out(&mut ledger, d, time("15:00"), false).unwrap();
    assert!(record.is_sick());
    assert_eq!(record.total_minutes, 480);
    assert_eq!(record.stamps().len(), 2);
}

#[test]
fn test_missing_workday_is_synthesized() {
    let rules = LedgerRules::default();
    let now = clock("2025-03-05", 12, 0);
    let engine = AggregationEngine::new(&rules, &now);

    let view = engine.day_view(&Ledger::new(), date("2025-03-03"), true);
    assert_eq!(view.source, DaySource::Synthesized);
    assert_eq!(view.total_minutes, Some(480));
    assert_eq!(view.balance_minutes, Some(0));

    let today = engine.day_view(&Ledger::new(), date("2025-03-05"), true);
    assert_eq!(today.source, DaySource::Pending);
    assert_eq!(today.total_minutes, None);

    let weekend = engine.day_view(&Ledger::new(), date("2025-03-01"), true);
    assert_eq!(weekend.source, DaySource::Off);
    assert_eq!(weekend.counted_balance(), 0);
}

#[test]
fn test_zero_expected_day_counts_as_overtime() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // Saturday
    let record = engine
        .manual_entry(&mut ledger, date("2025-03-08"), time("10:00"), time("14:00"), true)
        .unwrap();
    assert_eq!(record.expected_minutes, 0);
    assert_eq!(record.total_minutes, 240);
    assert_eq!(record.balance_minutes, 240);
}

#[test]
fn test_month_cumulative_balance() {
    let rules = LedgerRules::default().with_carry_over(2025, 120);
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // +0.5h, -1.0h, 0.0h
    for (day, departure) in [("2025-03-03", "18:00"), ("2025-03-04", "16:30"), ("2025-03-05", "17:30")] {
        engine
            .manual_entry(&mut ledger, date(day), time("09:00"), time(departure), true)
            .unwrap();
    }

    let now = clock("2025-03-06", 8, 0);
    let agg = AggregationEngine::new(&rules, &now);

    let month = agg.month_record(&ledger, 2025, 3, 120, false).unwrap();
    assert_eq!(month.balance_minutes, -30);
    assert_eq!(month.cumulative_minutes, 90);

    // January and February are fully synthesized, so the carry reaches March unchanged
    let in_year = agg.month_in_year(&ledger, 2025, 3).unwrap();
    assert_eq!(in_year.carry_in_minutes, 120);
    assert_eq!(in_year.cumulative_minutes, 90);
}

#[test]
fn test_month_carry_follows_previous_month() {
    let rules = LedgerRules::default().with_carry_over(2025, 120);
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // +0.5h, +1.5h in February; -1.0h in March
    for (day, departure) in [("2025-02-03", "18:00"), ("2025-02-04", "19:00"), ("2025-03-03", "16:30")] {
        engine
            .manual_entry(&mut ledger, date(day), time("09:00"), time(departure), true)
            .unwrap();
    }

    let now = clock("2025-03-05", 8, 0);
    let agg = AggregationEngine::new(&rules, &now);

    let february = agg.month_in_year(&ledger, 2025, 2).unwrap();
    assert_eq!(february.carry_in_minutes, 120);
    assert_eq!(february.cumulative_minutes, 240);

    let march = agg.month_in_year(&ledger, 2025, 3).unwrap();
    assert_eq!(march.carry_in_minutes, february.cumulative_minutes);
    assert_eq!(march.cumulative_minutes, 180);

    // balance across the month boundary agrees with the month records
    let end_of_february = agg.balance(&ledger, date("2025-03-01")).unwrap();
    assert_eq!(end_of_february.balance_minutes, february.cumulative_minutes);
    let today = agg.balance(&ledger, date("2025-03-05")).unwrap();
    assert_eq!(today.balance_minutes, march.cumulative_minutes);
}

#[test]
fn test_live_estimate_for_open_block() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");
    engine.clock_in(&mut ledger, d, time("09:00"), false).unwrap();

    let now = clock("2025-03-03", 11, 30);
    let agg = AggregationEngine::new(&rules, &now);

    let live = agg.day_view(&ledger, d, true);
    assert!(live.estimate);
    assert!(live.open);
    assert_eq!(live.total_minutes, Some(152));

    let settled = agg.day_view(&ledger, d, false);
    assert!(!settled.estimate);
    assert_eq!(settled.total_minutes, Some(0));

    // only today's open block is estimated
    let later = clock("2025-03-04", 11, 30);
    let agg = AggregationEngine::new(&rules, &later);
    assert!(!agg.day_view(&ledger, d, true).estimate);
}

#[test]
fn test_live_estimate_before_arrival_is_zero() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");
    engine.clock_in(&mut ledger, d, time("10:00"), false).unwrap();

    let now = clock("2025-03-03", 9, 0);
    let agg = AggregationEngine::new(&rules, &now);

    let live = agg.day_view(&ledger, d, true);
    assert!(live.estimate);
    assert_eq!(live.total_minutes, Some(0));
    assert_eq!(live.balance_minutes, Some(-480));
}

#[test]
fn test_clock_out_without_open_block_leaves_ledger_unchanged() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    let err = engine.clock_out(&mut ledger, d, time("17:00"), false).unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(ledger.is_empty());

    engine
        .manual_entry(&mut ledger, d, time("09:00"), time("12:00"), false)
        .unwrap();
    let before = ledger.get(&d).cloned();
    let err = engine.clock_out(&mut ledger, d, time("17:00"), false).unwrap_err();
    assert_eq!(err.kind(), "InvalidStateError");
    assert_eq!(ledger.get(&d).cloned(), before);
}

#[test]
fn test_double_clock_in_is_rejected() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("09:00"), false).unwrap();
    let before = ledger.get(&d).cloned();

    let err = engine.clock_in(&mut ledger, d, time("10:00"), false).unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(ledger.get(&d).cloned(), before);
}

#[test]
fn test_clock_out_before_arrival_is_rejected() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("09:00"), false).unwrap();
    let err = engine.clock_out(&mut ledger, d, time("08:30"), false).unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(ledger.get(&d).is_some_and(|r| r.is_open()));
}

#[test]
fn test_manual_entry_validation() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    let err = engine
        .manual_entry(&mut ledger, d, time("12:00"), time("12:00"), false)
        .unwrap_err();
    assert_eq!(err.kind(), "ValidationError");
    assert!(ledger.is_empty());

    engine.clock_in(&mut ledger, d, time("09:00"), false).unwrap();
    let err = engine
        .manual_entry(&mut ledger, d, time("13:00"), time("17:00"), false)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(ledger.get(&d).map(|r| r.stamps().len()), Some(1));
}

#[test]
fn test_home_flag_only_used_by_first_clock_in() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("08:00"), true).unwrap();
    engine.clock_out(&mut ledger, d, time("12:00"), false).unwrap();
    let outcome = engine.clock_in(&mut ledger, d, time("13:00"), false).unwrap();
    assert_eq!(outcome.record.mode, Some(WorkMode::Home));
}

#[test]
fn test_forgotten_stamp_on_previous_workday() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // Friday left open, next clock-in on Monday
    engine
        .clock_in(&mut ledger, date("2025-02-28"), time("08:30"), false)
        .unwrap();
    let outcome = engine
        .clock_in(&mut ledger, date("2025-03-03"), time("09:00"), false)
        .unwrap();

    let forgotten = outcome.forgotten.expect("forgotten stamp reported");
    assert_eq!(forgotten.date, date("2025-02-28"));
    assert_eq!(forgotten.arrival, time("08:30"));
    assert!(outcome.record.is_open());

    let tuesday = engine
        .clock_in(&mut ledger, date("2025-03-04"), time("09:00"), false)
        .unwrap();
    assert_eq!(tuesday.forgotten.map(|f| f.date), Some(date("2025-03-03")));
}

#[test]
fn test_forgotten_stamp_uses_stored_expected_hours() {
    let rules = LedgerRules::default();
    let mut ledger = Ledger::new();
    LedgerEngine::new(&rules)
        .clock_in(&mut ledger, date("2025-02-28"), time("08:30"), false)
        .unwrap();

    // Fridays were dropped from the schedule after the day was stamped
    let changed = LedgerRules::default().with_expected(chrono::Weekday::Fri, 0);
    let engine = LedgerEngine::new(&changed);
    assert_eq!(
        engine.previous_workday(&ledger, date("2025-03-03")),
        Some(date("2025-02-28"))
    );

    let outcome = engine
        .clock_in(&mut ledger, date("2025-03-03"), time("09:00"), false)
        .unwrap();
    assert_eq!(outcome.forgotten.map(|f| f.date), Some(date("2025-02-28")));

    // without a stored record the current schedule decides
    let empty = Ledger::new();
    assert_eq!(
        engine.previous_workday(&empty, date("2025-03-03")),
        Some(date("2025-02-27"))
    );
}

#[test]
fn test_recompute_scope_applies_new_rules() {
    let rules = LedgerRules::default();
    let mut ledger = Ledger::from_records([
        office_day("2025-03-03", &[("09:00", "12:00")], &rules),
        office_day("2025-04-01", &[("09:00", "12:00")], &rules),
    ]);
    assert_eq!(ledger.get(&date("2025-03-03")).unwrap().total_minutes, 184);

    let no_travel = LedgerRules::default().with_travel_offset(0);
    let changed = LedgerEngine::new(&no_travel).recompute(
        &mut ledger,
        RecomputeScope::Month {
            year: 2025,
            month: 3,
        },
    );

    assert_eq!(changed, vec![date("2025-03-03")]);
    assert_eq!(ledger.get(&date("2025-03-03")).unwrap().total_minutes, 180);
    assert_eq!(ledger.get(&date("2025-04-01")).unwrap().total_minutes, 184);
}

#[test]
fn test_week_view_sums_and_estimate() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // Monday +30, Tuesday missing, Wednesday open since 09:00
    engine
        .manual_entry(&mut ledger, date("2025-03-03"), time("09:00"), time("18:00"), true)
        .unwrap();
    engine
        .clock_in(&mut ledger, date("2025-03-05"), time("09:00"), false)
        .unwrap();

    let now = clock("2025-03-05", 11, 30);
    let agg = AggregationEngine::new(&rules, &now);
    let week = agg.week_view(&ledger, date("2025-03-07")).unwrap();

    assert_eq!(week.monday, date("2025-03-03"));
    assert_eq!(week.days.len(), 7);
    assert_eq!(week.days[1].source, DaySource::Synthesized);
    assert_eq!(week.days[3].source, DaySource::Pending);
    assert_eq!(week.total_minutes, 510 + 480 + 152);
    assert_eq!(week.expected_minutes, 3 * 480);
    assert_eq!(week.planned_minutes, 5 * 480);
    assert_eq!(week.balance_minutes, 30 + 0 + (152 - 480));
    assert!(week.estimate);
}

#[test]
fn test_balance_excludes_the_as_of_day() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    engine
        .manual_entry(&mut ledger, date("2025-03-03"), time("09:00"), time("18:00"), true)
        .unwrap();
    engine
        .manual_entry(&mut ledger, date("2025-03-04"), time("09:00"), time("11:00"), true)
        .unwrap();

    let now = clock("2025-03-04", 12, 0);
    let agg = AggregationEngine::new(&rules, &now);

    let report = agg.balance(&ledger, date("2025-03-04")).unwrap();
    assert_eq!(report.through, date("2025-03-03"));
    assert_eq!(report.balance_minutes, 30);

    let report = agg.balance(&ledger, date("2025-03-05")).unwrap();
    assert_eq!(report.balance_minutes, 30 + (120 - 480));
}

#[test]
fn test_year_carry_in_chains_previous_years() {
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    engine
        .manual_entry(&mut ledger, date("2023-12-29"), time("09:00"), time("19:00"), true)
        .unwrap();

    let now = clock("2025-06-01", 12, 0);
    let agg = AggregationEngine::new(&rules, &now);

    // 10h raw - 30m break - 8h expected
    assert_eq!(agg.year_carry_in(&ledger, 2023).unwrap(), 0);
    assert_eq!(agg.year_carry_in(&ledger, 2024).unwrap(), 90);
    assert_eq!(agg.year_carry_in(&ledger, 2025).unwrap(), 90);

    let configured = rules.clone().with_carry_over(2024, -60);
    let agg = AggregationEngine::new(&configured, &now);
    assert_eq!(agg.year_carry_in(&ledger, 2024).unwrap(), -60);
    assert_eq!(agg.year_carry_in(&ledger, 2025).unwrap(), -60);

    let year = agg.year_record(&ledger, 2024).unwrap();
    assert_eq!(year.months.len(), 12);
    assert_eq!(year.closing_minutes(), -60);
}

#[test]
fn test_carry_over_before_first_record_is_kept() {
    let rules = LedgerRules::default().with_carry_over(2024, 60);
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    // exactly 8h after the break
    engine
        .manual_entry(&mut ledger, date("2025-03-03"), time("09:00"), time("17:30"), true)
        .unwrap();

    let now = clock("2025-03-05", 12, 0);
    let agg = AggregationEngine::new(&rules, &now);

    let closing_2024 = agg.year_record(&ledger, 2024).unwrap().closing_minutes();
    assert_eq!(closing_2024, 60);
    assert_eq!(agg.year_carry_in(&ledger, 2025).unwrap(), closing_2024);
    assert_eq!(agg.balance(&ledger, date("2025-03-05")).unwrap().balance_minutes, 60);

    // an older configured year chains through the years in between
    let older = LedgerRules::default().with_carry_over(2022, 30);
    let agg = AggregationEngine::new(&older, &now);
    assert_eq!(agg.year_carry_in(&ledger, 2022).unwrap(), 30);
    assert_eq!(agg.year_carry_in(&ledger, 2025).unwrap(), 30);
    assert_eq!(agg.year_carry_in(&Ledger::new(), 2024).unwrap(), 30);
    assert_eq!(agg.year_carry_in(&ledger, 2021).unwrap(), 0);
}

#[test]
fn test_day_state_transitions() {
    use stempel::models::day_record::DayState;

    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    assert_eq!(DayRecord::new(d, 480).state(), DayState::Empty);

    let open = engine.clock_in(&mut ledger, d, time("08:00"), true).unwrap();
    assert_eq!(open.record.state(), DayState::OpenHome);

    let closed = engine.clock_out(&mut ledger, d, time("12:00"), false).unwrap();
    assert_eq!(closed.state(), DayState::ClosedHome);

    let reopened = engine.clock_in(&mut ledger, d, time("13:00"), false).unwrap();
    assert_eq!(reopened.record.state(), DayState::OpenHome);

    let office = engine
        .clock_in(&mut ledger, date("2025-03-04"), time("08:00"), false)
        .unwrap();
    assert_eq!(office.record.state(), DayState::OpenOffice);
}
