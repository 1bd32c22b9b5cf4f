use super::day_record::DayRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// In-memory set of day records, ordered by date.
///
/// Loaded from and written back to the database by the caller; the engines
/// only ever see this structure.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I: IntoIterator<Item = DayRecord>>(records: I) -> Self {
        let mut ledger = Self::new();
        for r in records {
            ledger.upsert(r);
        }
        ledger
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DayRecord> {
        self.days.get(date)
    }

    /// Record for `date` only if it carries stamps or a status.
    pub fn recorded(&self, date: &NaiveDate) -> Option<&DayRecord> {
        self.days.get(date).filter(|r| r.has_content())
    }

    pub fn upsert(&mut self, record: DayRecord) {
        self.days.insert(record.date, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.values()
    }

    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &DayRecord> {
        self.days.range(from..=to).map(|(_, r)| r)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First date with actual content (stamps or status).
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.days.values().find(|r| r.has_content()).map(|r| r.date)
    }
}
