//! Ledger engine and the command logic built on top of it.
//!
//! `calculator`, `clock`, `rules`, `ledger` and `aggregate` are pure and never
//! touch the database or the terminal; the `*Logic` modules run the
//! load → compute → save cycle of each command.

pub mod aggregate;
pub mod backup;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod log;
pub mod report;
pub mod rules;
pub mod stamp;
pub mod update;
