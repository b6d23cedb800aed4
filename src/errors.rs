//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Timer validation errors (rejected before any state change)
    // ---------------------------
    #[error("Cannot punch in the future.")]
    PunchInFuture,

    #[error("New punch time must be after the last action.")]
    PunchBeforeLastAction,

    #[error("No active day.")]
    NoActiveDay,

    #[error("A day is already in progress.")]
    DayAlreadyActive,

    #[error("Punch-In time must be after Punch-Out time.")]
    BreakOrderInvalid,

    #[error("Punch-Out time cannot be in the future.")]
    BreakStartInFuture,

    #[error("Punch-In time cannot be in the future.")]
    BreakEndInFuture,

    // ---------------------------
    // Work-log row errors
    // ---------------------------
    #[error("No active work-log row.")]
    NoActiveRow,

    #[error("Work-log row not found: {0}")]
    RowNotFound(i64),

    #[error("Break start must be after the current session punch-in.")]
    BreakBeforePunchIn,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

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

pub type AppResult<T> = Result<T, AppError>;
