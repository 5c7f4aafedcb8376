//! Roster source implementations

pub mod cache;
pub mod fallback;
pub mod json;
pub mod memory;

pub use cache::CachedRoster;
pub use fallback::FallbackRoster;
pub use json::{JsonDirectoryRoster, DRONES_FILE, MISSIONS_FILE, PILOTS_FILE};
pub use memory::InMemoryRoster;
