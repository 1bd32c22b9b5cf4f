use crate::core::calculator::compute_day;
use crate::core::ledger::{ClockInOutcome, LedgerEngine};
use crate::core::rules::LedgerRules;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_ledger, save_days};
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::ledger::Ledger;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::mins2readable;
use chrono::{Days, NaiveDate, NaiveTime};

/// Load → engine operation → save cycle for the stamping commands.
pub struct StampLogic;

/// Days loaded around `date`: enough to see the previous workday.
fn load_window(pool: &DbPool, date: NaiveDate) -> AppResult<Ledger> {
    let from = date.checked_sub_days(Days::new(7)).unwrap_or(date);
    load_ledger(&pool.conn, Some(from), Some(date))
}

fn persist(pool: &mut DbPool, record: &DayRecord, operation: &str, message: &str) -> AppResult<()> {
    pool.with_conn(|conn| save_days(conn, [record]).map(|_| ()))?;
    ttlog(&pool.conn, operation, &record.date_str(), message)
}

fn print_figures(record: &DayRecord, rules: &LedgerRules) {
    if record.is_sick() {
        info(format!(
            "{}: sick, credited with the expected {}",
            record.date_str(),
            mins2readable(record.expected_minutes, false, false)
        ));
        return;
    }

    let figures = compute_day(record, rules, None);
    println!(
        "   Total: {}   Expected: {}   Balance: {}",
        mins2readable(figures.total_minutes, false, false),
        mins2readable(figures.expected_minutes, false, false),
        mins2readable(figures.balance_minutes, true, false),
    );
    if figures.deduction_minutes > 0 {
        println!(
            "   Break deducted: {}",
            mins2readable(figures.deduction_minutes, false, false)
        );
    }
}

impl StampLogic {
    pub fn clock_in(
        pool: &mut DbPool,
        rules: &LedgerRules,
        date: NaiveDate,
        time: NaiveTime,
        home: bool,
    ) -> AppResult<ClockInOutcome> {
        let mut ledger = load_window(pool, date)?;
        let engine = LedgerEngine::new(rules);
        let outcome = engine.clock_in(&mut ledger, date, time, home)?;

        let mode = outcome.record.status().as_str();
        persist(
            pool,
            &outcome.record,
            "clock_in",
            &format!("{} {}", time.format("%H:%M"), mode),
        )?;

        success(format!(
            "Clocked in on {} at {} ({})",
            outcome.record.date_str(),
            time.format("%H:%M"),
            mode
        ));

        if let Some(f) = &outcome.forgotten {
            warning(format!(
                "{} still has an open entry since {}: did you forget to clock out?",
                f.date.format("%Y-%m-%d"),
                f.arrival.format("%H:%M")
            ));
        }

        Ok(outcome)
    }

    pub fn clock_out(
        pool: &mut DbPool,
        rules: &LedgerRules,
        date: NaiveDate,
        time: NaiveTime,
        sick: bool,
    ) -> AppResult<DayRecord> {
        let mut ledger = load_window(pool, date)?;
        let engine = LedgerEngine::new(rules);
        let record = engine.clock_out(&mut ledger, date, time, sick)?;

        let message = if sick {
            format!("{} (sick)", time.format("%H:%M"))
        } else {
            time.format("%H:%M").to_string()
        };
        persist(pool, &record, "clock_out", &message)?;

        success(format!(
            "Clocked out on {} at {}",
            record.date_str(),
            time.format("%H:%M")
        ));
        print_figures(&record, rules);

        Ok(record)
    }

    pub fn amend(
        pool: &mut DbPool,
        rules: &LedgerRules,
        date: NaiveDate,
        arrival: NaiveTime,
        departure: NaiveTime,
        home: bool,
    ) -> AppResult<DayRecord> {
        let mut ledger = load_window(pool, date)?;
        let engine = LedgerEngine::new(rules);
        let record = engine.manual_entry(&mut ledger, date, arrival, departure, home)?;

        persist(
            pool,
            &record,
            "amend",
            &format!(
                "{}-{} {}",
                arrival.format("%H:%M"),
                departure.format("%H:%M"),
                record.status().as_str()
            ),
        )?;

        success(format!(
            "Recorded {} {}-{} ({})",
            record.date_str(),
            arrival.format("%H:%M"),
            departure.format("%H:%M"),
            record.status().as_str()
        ));
        print_figures(&record, rules);

        Ok(record)
    }
}
