//! Time utilities: parsing HH:MM and resolving optional time arguments.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_arg(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// `input` when given, otherwise `fallback` (usually the clock's time).
pub fn parse_optional_time(input: Option<&String>, fallback: NaiveTime) -> AppResult<NaiveTime> {
    match input {
        Some(s) => parse_time_arg(s),
        None => Ok(fallback),
    }
}
