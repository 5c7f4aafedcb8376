//! Roster error types

use thiserror::Error;

/// Errors raised while reading or updating roster records
#[derive(Debug, Error)]
pub enum RosterError {
    /// Underlying file access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be (de)serialized
    #[error("Malformed roster data: {0}")]
    Json(#[from] serde_json::Error),

    /// Identifier does not follow the expected format
    #[error("Invalid {kind} ID '{value}'")]
    InvalidId {
        /// Entity kind ("pilot", "drone", "project")
        kind: &'static str,
        /// Offending value
        value: String,
    },

    /// Status text is not one of the allowed values
    #[error("Invalid {kind} status '{value}'")]
    InvalidStatus {
        /// Status family ("pilot", "drone", "priority")
        kind: &'static str,
        /// Offending value
        value: String,
    },

    /// Date text is not `YYYY-MM-DD`
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        /// Offending value
        value: String,
        /// Parser failure
        source: chrono::ParseError,
    },

    /// Date range ends before it starts
    #[error("Invalid date range {start} to {end}")]
    InvertedRange {
        /// Range start as text
        start: String,
        /// Range end as text
        end: String,
    },

    /// The data source cannot serve requests
    #[error("Roster source unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
