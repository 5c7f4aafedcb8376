//! SkyCrew assignment engine
//!
//! Decides whether a pilot, drone, and project can be put together and
//! which pilots best fit a project.
//!
//! - [`ConflictDetector`] runs the rule battery and reports critical
//!   conflicts and warnings
//! - [`CandidateRanker`] scores pilots for normal and urgent staffing
//! - [`AssignmentCoordinator`] commits an assignment once the report allows it
//!
//! All three read the roster through [`skycrew_roster::RosterSource`].

pub mod conflict;
pub mod coordinator;
pub mod error;
pub mod ranking;

pub use conflict::{assignment_conflicts, Conflict, ConflictDetector, ConflictReport, Severity, Verdict};
pub use coordinator::{AssignmentCoordinator, AssignmentOutcome, AssignmentRequest, ReleaseOutcome};
pub use error::{AssignmentError, Result};
pub use ranking::{rank_pilots, rank_urgent, CandidateRanker, PilotMatch, UrgentCandidate, UrgentCandidates};
