//! Unified error type for the workshop ledger.
//!
//! Every fallible operation in the crate returns [`Result`]. Database errors from
//! `SeaORM` and JSON errors from snapshot handling convert automatically so callers
//! can propagate them with `?`.

use thiserror::Error;

/// All errors produced by the workshop ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The database rejected or failed an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An input value failed validation before reaching storage
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Field that failed validation
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// A record with the given id does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// The id that was looked up
        id: i64,
    },

    /// A project lifecycle transition that the state machine does not allow
    #[error("Cannot {action} a project in stage {stage}")]
    InvalidTransition {
        /// The attempted action (e.g. "sell", "deliver")
        action: &'static str,
        /// The stage the project was in
        stage: String,
    },

    /// JSON (de)serialization of a snapshot failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The out-of-band snapshot store failed
    #[error("Snapshot store error: {message}")]
    Snapshot {
        /// What went wrong
        message: String,
    },

    /// Restoring an archived record failed; nothing was applied
    #[error("Could not restore deleted record {id}: {reason}")]
    RestoreFailed {
        /// Id of the deleted record
        id: i64,
        /// Underlying cause
        reason: String,
    },

    /// I/O error outside the snapshot store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
