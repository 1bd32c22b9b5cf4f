pub mod breaks;
pub mod day;
pub mod timeline;

pub use day::{DayFigures, compute_day};
