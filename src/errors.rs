//! Unified application error type.
//! Storage, pagination, rendering and CLI layers all return AppError so
//! the binary has a single place to report failures.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
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
    // Parsing errors (CLI input only)
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid month format: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid day/night percentage: {0} (use 30%, 70% or 100%)")]
    InvalidDayNight(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Profile not found: {0}")]
    ProfileNotFound(i64),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("No entries recorded for {0}")]
    EmptyMonth(String),

    #[error("Month not found: {0}")]
    MonthNotFound(String),

    // ---------------------------
    // Rendering preconditions
    // ---------------------------
    #[error("Precondition failed: {0}")]
    Precondition(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
