//! Roster domain models
//!
//! Strongly typed rows for the three roster collections: pilots, drones,
//! and missions.

pub mod drone;
pub mod mission;
pub mod pilot;
pub mod schedule;
pub mod tags;

pub use drone::{Drone, DroneStatus};
pub use mission::{Mission, Priority};
pub use pilot::{Pilot, PilotStatus};
pub use schedule::{parse_date, DateRange, DATE_FORMAT};
pub use tags::{is_sentinel, TagSet, NONE_SENTINEL};
