use super::stamp::StampSequence;
use super::status::{DayStatus, WorkMode};
use chrono::NaiveDate;
use serde::Serialize;

/// Stamp history of a day. A sick day keeps its raw stamps for reference but
/// its total is always credited as the expected hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DayEntry {
    Normal { stamps: StampSequence },
    Sick { stamps: StampSequence },
}

impl Default for DayEntry {
    fn default() -> Self {
        DayEntry::Normal {
            stamps: StampSequence::new(),
        }
    }
}

/// Stamp state of a day, ignoring the sick overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Empty,
    OpenOffice,
    OpenHome,
    ClosedOffice,
    ClosedHome,
}

/// One calendar day of the ledger.
///
/// `total_minutes` and `balance_minutes` are cached results of the last
/// recomputation; they can always be derived again from `entry`, `mode`
/// and `expected_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub mode: Option<WorkMode>,
    pub entry: DayEntry,
    pub expected_minutes: i64,
    pub total_minutes: i64,
    pub balance_minutes: i64,
}

impl DayRecord {
    /// Empty record for `date`, as created by the first action targeting it.
    pub fn new(date: NaiveDate, expected_minutes: i64) -> Self {
        Self {
            date,
            mode: None,
            entry: DayEntry::default(),
            expected_minutes,
            total_minutes: 0,
            balance_minutes: -expected_minutes,
        }
    }

    pub fn stamps(&self) -> &StampSequence {
        match &self.entry {
            DayEntry::Normal { stamps } | DayEntry::Sick { stamps } => stamps,
        }
    }

    pub fn stamps_mut(&mut self) -> &mut StampSequence {
        match &mut self.entry {
            DayEntry::Normal { stamps } | DayEntry::Sick { stamps } => stamps,
        }
    }

    pub fn is_sick(&self) -> bool {
        matches!(self.entry, DayEntry::Sick { .. })
    }

    /// Switch to the sick overlay. Terminal: there is no way back to `Normal`.
    pub fn mark_sick(&mut self) {
        if let DayEntry::Normal { stamps } = &mut self.entry {
            let stamps = std::mem::take(stamps);
            self.entry = DayEntry::Sick { stamps };
        }
    }

    pub fn is_open(&self) -> bool {
        self.stamps().is_open()
    }

    pub fn status(&self) -> DayStatus {
        if self.is_sick() {
            return DayStatus::Sick;
        }
        match self.mode {
            Some(WorkMode::Office) => DayStatus::Office,
            Some(WorkMode::Home) => DayStatus::Home,
            None => DayStatus::None,
        }
    }

    pub fn state(&self) -> DayState {
        let stamps = self.stamps();
        if stamps.is_empty() {
            return DayState::Empty;
        }
        let home = self.mode == Some(WorkMode::Home);
        match (stamps.is_open(), home) {
            (true, false) => DayState::OpenOffice,
            (true, true) => DayState::OpenHome,
            (false, false) => DayState::ClosedOffice,
            (false, true) => DayState::ClosedHome,
        }
    }

    /// A record without stamps and without any status is treated as missing.
    pub fn has_content(&self) -> bool {
        !self.stamps().is_empty() || self.mode.is_some() || self.is_sick()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
