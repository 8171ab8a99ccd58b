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

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    /// Malformed input: blank rejection reason, non-positive quantity,
    /// negative unit cost. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A transition was attempted from a state that does not permit it.
    /// The caller should refresh the entry rather than retry blindly.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Concurrent mutation detected: duplicate open clock session, or the
    /// entry's status changed between read and write. Re-fetch and retry once.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The actor lacks the capability for the requested transition,
    /// including self-approval.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid subject type: {0}")]
    InvalidSubjectType(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
