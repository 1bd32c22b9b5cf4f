//! Time source used by the engines.
//!
//! Everything that needs "now" (default stamp time, live estimates, the
//! cut-off between past and pending days) goes through [`Clock`], so tests and
//! the hidden `--now` flag can pin it.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

pub trait Clock {
    /// Current local date and time, truncated to the minute.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock of the machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_minute(Local::now().naive_local())
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        date.and_hms_opt(hour, minute, 0).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_minute(self.0)
    }
}

fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Parse the `--now` override (`YYYY-MM-DD HH:MM`).
pub fn parse_now(s: &str) -> Option<FixedClock> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .map(FixedClock)
}
