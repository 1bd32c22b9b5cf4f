// src/export/model.rs

use crate::models::summary::{DaySource, DayView, MonthRecord};
use crate::utils::date::weekday_short;
use crate::utils::formatting::minutes_to_hours;
use serde::Serialize;

/// Flat per-day row shared by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayExport {
    pub date: String,
    pub weekday: String,
    pub status: String,
    pub stamps: String,
    pub first_arrival: String,
    pub last_departure: String,
    pub total_hours: f64,
    pub expected_hours: f64,
    pub balance_hours: f64,
    /// `recorded` or `synthesized` (past workday without a record).
    pub source: String,
    pub estimate: bool,
}

impl DayExport {
    /// Only days that count towards the balance are exported.
    pub fn from_view(view: &DayView) -> Option<Self> {
        let source = match view.source {
            DaySource::Recorded => "recorded",
            DaySource::Synthesized => "synthesized",
            DaySource::Pending | DaySource::Off => return None,
        };

        let stamps = view
            .blocks
            .iter()
            .map(|b| format!("{}-{}", b.arrival_str(), b.departure_str()))
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            date: view.date.format("%Y-%m-%d").to_string(),
            weekday: weekday_short(&view.date).to_string(),
            status: view.status.as_str().to_string(),
            stamps,
            first_arrival: view
                .blocks
                .first()
                .map(|b| b.arrival_str())
                .unwrap_or_default(),
            last_departure: view
                .blocks
                .last()
                .and_then(|b| b.departure)
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            total_hours: minutes_to_hours(view.counted_total()),
            expected_hours: minutes_to_hours(view.counted_expected()),
            balance_hours: minutes_to_hours(view.counted_balance()),
            source: source.to_string(),
            estimate: view.estimate,
        })
    }
}

/// One month of exported rows plus its summary figures.
#[derive(Serialize, Clone, Debug)]
pub struct MonthExport {
    pub label: String,
    pub rows: Vec<DayExport>,
    pub total_hours: f64,
    pub expected_hours: f64,
    pub balance_hours: f64,
    pub carry_in_hours: f64,
    pub cumulative_hours: f64,
}

impl MonthExport {
    pub fn new(record: &MonthRecord, rows: Vec<DayExport>) -> Self {
        Self {
            label: format!("{}-{:02}", record.year, record.month),
            rows,
            total_hours: minutes_to_hours(record.total_minutes),
            expected_hours: minutes_to_hours(record.expected_minutes),
            balance_hours: minutes_to_hours(record.balance_minutes),
            carry_in_hours: minutes_to_hours(record.carry_in_minutes),
            cumulative_hours: minutes_to_hours(record.cumulative_minutes),
        }
    }
}

/// Header for CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "weekday",
        "status",
        "stamps",
        "first_arrival",
        "last_departure",
        "total_hours",
        "expected_hours",
        "balance_hours",
        "source",
        "estimate",
    ]
}

/// Row as strings, in header order.
pub(crate) fn day_to_row(d: &DayExport) -> Vec<String> {
    vec![
        d.date.clone(),
        d.weekday.clone(),
        d.status.clone(),
        d.stamps.clone(),
        d.first_arrival.clone(),
        d.last_departure.clone(),
        format!("{:.2}", d.total_hours),
        format!("{:.2}", d.expected_hours),
        format!("{:.2}", d.balance_hours),
        d.source.clone(),
        if d.estimate { "yes".into() } else { String::new() },
    ]
}
