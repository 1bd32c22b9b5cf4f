use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// `input` when given, otherwise `fallback` (usually today).
pub fn parse_optional_date(input: Option<&String>, fallback: NaiveDate) -> AppResult<NaiveDate> {
    match input {
        Some(s) => parse_date_arg(s),
        None => Ok(fallback),
    }
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    Ok((d.year(), d.month()))
}

pub fn weekday_short(d: &NaiveDate) -> &'static str {
    match d.weekday() {
        chrono::Weekday::Mon => "Mo",
        chrono::Weekday::Tue => "Tu",
        chrono::Weekday::Wed => "We",
        chrono::Weekday::Thu => "Th",
        chrono::Weekday::Fri => "Fr",
        chrono::Weekday::Sat => "Sa",
        chrono::Weekday::Sun => "Su",
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
