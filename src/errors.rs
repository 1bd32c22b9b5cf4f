//! Unified application error type.
//! All modules (engine, db, cli, export) return AppError so that every failure
//! reaches the caller with a stable kind and a human message.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Ledger rule violations
    // ---------------------------
    /// Malformed manual entry or a persisted record breaking stamp ordering.
    #[error("{0}")]
    Validation(String),

    /// Operation not allowed in the day's current stamp state.
    #[error("{0}")]
    InvalidState(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("{0}")]
    Configuration(String),

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable label shown in front of the message on the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::InvalidState(_) => "InvalidStateError",
            AppError::Configuration(_) | AppError::Yaml(_) => "ConfigurationError",
            AppError::Io(_) => "IoError",
            AppError::Db(_) | AppError::Migration(_) => "DatabaseError",
            AppError::InvalidDate(_) | AppError::InvalidTime(_) => "InputError",
            AppError::Export(_) => "ExportError",
            AppError::Other(_) => "InternalError",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
