//! Assignment error types

use skycrew_roster::RosterError;
use thiserror::Error;

/// Errors returned by ranking and commit operations
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Referenced project is not in the mission list
    #[error("Project {0} not found")]
    ProjectNotFound(String),

    /// The roster source failed to serve a read or write
    #[error("Roster source error: {0}")]
    Source(#[from] RosterError),
}

/// Result alias for assignment operations
pub type Result<T> = std::result::Result<T, AssignmentError>;
