mod common;
use common::{date, time};

use stempel::core::ledger::LedgerEngine;
use stempel::core::rules::LedgerRules;
use stempel::db::log::load_log;
use stempel::db::migrate::{pending_migrations, run_pending_migrations};
use stempel::db::pool::DbPool;
use stempel::db::queries::{load_ledger, save_days};
use chrono::NaiveDate;
use stempel::errors::AppResult;
use stempel::models::day_record::DayRecord;
use stempel::models::ledger::Ledger;
use stempel::models::status::{DayStatus, WorkMode};
use tempfile::TempDir;

fn open_temp() -> (TempDir, DbPool) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let pool = DbPool::open(&path.to_string_lossy()).expect("open db");
    (dir, pool)
}

fn stored_day(pool: &DbPool, d: NaiveDate) -> AppResult<Option<DayRecord>> {
    let ledger = load_ledger(&pool.conn, Some(d), Some(d))?;
    Ok(ledger.get(&d).cloned())
}

#[test]
fn test_migrations_run_once() {
    let (_dir, pool) = open_temp();

    assert!(pending_migrations(&pool.conn).unwrap().is_empty());
    assert_eq!(run_pending_migrations(&pool.conn).unwrap(), 0);

    let applied = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .filter(|r| r.operation == "migration_applied")
        .count();
    assert_eq!(applied, 2);
}

#[test]
fn test_day_round_trip() {
    let (_dir, mut pool) = open_temp();
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    let monday = date("2025-03-03");
    engine.clock_in(&mut ledger, monday, time("08:00"), false).unwrap();
    engine.clock_out(&mut ledger, monday, time("12:00"), false).unwrap();
    engine.clock_in(&mut ledger, monday, time("12:30"), false).unwrap();

    let tuesday = date("2025-03-04");
    engine
        .manual_entry(&mut ledger, tuesday, time("09:00"), time("15:00"), true)
        .unwrap();

    let wednesday = date("2025-03-05");
    engine.clock_in(&mut ledger, wednesday, time("09:00"), false).unwrap();
    engine.clock_out(&mut ledger, wednesday, time("10:00"), true).unwrap();

    let saved = pool
        .with_conn(|conn| save_days(conn, ledger.iter()))
        .unwrap();
    assert_eq!(saved, 3);

    for d in [monday, tuesday, wednesday] {
        let loaded = stored_day(&pool, d).unwrap().expect("stored day");
        assert_eq!(Some(&loaded), ledger.get(&d));
    }

    let open = stored_day(&pool, monday).unwrap().unwrap();
    assert!(open.is_open());
    assert_eq!(open.mode, Some(WorkMode::Office));

    let sick = stored_day(&pool, wednesday).unwrap().unwrap();
    assert_eq!(sick.status(), DayStatus::Sick);
    assert_eq!(sick.total_minutes, 480);

    assert!(stored_day(&pool, date("2025-03-06")).unwrap().is_none());

    let window = load_ledger(&pool.conn, Some(tuesday), None).unwrap();
    let dates: Vec<_> = window.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![tuesday, wednesday]);
    assert_eq!(window.earliest_date(), Some(tuesday));
}

#[test]
fn test_resave_replaces_stamps() {
    let (_dir, mut pool) = open_temp();
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();
    let d = date("2025-03-03");

    engine.clock_in(&mut ledger, d, time("08:00"), false).unwrap();
    pool.with_conn(|conn| save_days(conn, ledger.iter())).unwrap();

    engine.clock_out(&mut ledger, d, time("16:00"), false).unwrap();
    pool.with_conn(|conn| save_days(conn, ledger.iter())).unwrap();

    let loaded = stored_day(&pool, d).unwrap().unwrap();
    assert_eq!(loaded.stamps().len(), 1);
    assert!(!loaded.is_open());
    assert_eq!(loaded.total_minutes, 454);
}

#[test]
fn test_failed_save_writes_nothing() {
    let (_dir, mut pool) = open_temp();
    let rules = LedgerRules::default();
    let engine = LedgerEngine::new(&rules);
    let mut ledger = Ledger::new();

    for d in ["2025-03-03", "2025-03-04"] {
        engine
            .manual_entry(&mut ledger, date(d), time("09:00"), time("17:00"), false)
            .unwrap();
    }

    pool.conn
        .execute_batch(
            "CREATE TRIGGER reject_tuesday BEFORE INSERT ON stamps
             WHEN NEW.date = '2025-03-04'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

    let result = pool.with_conn(|conn| save_days(conn, ledger.iter()));
    assert!(result.is_err());

    let stored = load_ledger(&pool.conn, None, None).unwrap();
    assert!(stored.is_empty());
}

#[test]
fn test_corrupted_stamps_are_rejected_on_load() {
    let (_dir, pool) = open_temp();

    pool.conn
        .execute_batch(
            "INSERT INTO days (date, status, mode, expected_minutes, total_minutes, balance_minutes, updated_at)
             VALUES ('2025-03-03', 'office', 'O', 480, 0, -480, '2025-03-03T00:00:00+00:00');
             INSERT INTO stamps (date, position, arrival, departure) VALUES ('2025-03-03', 1, '12:00', '10:00');",
        )
        .unwrap();

    assert!(stored_day(&pool, date("2025-03-03")).is_err());
}
