//! SkyCrew roster
//!
//! Pilot, drone, and mission records together with the data access
//! interface the assignment engine reads them through.
//!
//! This crate provides:
//! - Strongly typed roster rows with sentinel-aware optional columns
//! - The [`RosterSource`] trait and its in-memory, JSON directory, cached,
//!   and fallback implementations
//! - Composable substring filters and typed record queries
//! - Status summaries and identifier validation

pub mod error;
pub mod filter;
pub mod model;
pub mod query;
pub mod source;
pub mod store;
pub mod summary;
pub mod validation;

pub use error::{Result, RosterError};
pub use filter::{FieldFilter, Filterable};
pub use model::{
    DateRange, Drone, DroneStatus, Mission, Pilot, PilotStatus, Priority, TagSet, NONE_SENTINEL,
};
pub use query::{DroneQuery, MissionQuery, PilotQuery};
pub use source::{DroneStatusUpdate, PilotStatusUpdate, RosterSnapshot, RosterSource};
pub use store::{CachedRoster, FallbackRoster, InMemoryRoster, JsonDirectoryRoster};
pub use summary::StatusSummary;
