//! Drone fleet records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;
use crate::model::tags::{optional_text, TagSet};

/// Operational status of a drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    /// Ready to deploy
    Available,
    /// Grounded for service
    Maintenance,
    /// Deployed on `current_assignment`
    Assigned,
}

impl DroneStatus {
    /// All statuses in display order
    pub const ALL: [DroneStatus; 3] = [Self::Available, Self::Maintenance, Self::Assigned];

    pub fn as_str(&self) -> &'static str {
        match self {
            DroneStatus::Available => "Available",
            DroneStatus::Maintenance => "Maintenance",
            DroneStatus::Assigned => "Assigned",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DroneStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidStatus {
                kind: "drone",
                value: s.to_string(),
            })
    }
}

/// A drone as stored in the fleet sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    /// Unique drone identifier (`D` + 3 digits)
    pub drone_id: String,

    /// Airframe model
    pub model: String,

    /// Payload capabilities (Thermal, LiDAR, RGB, ...)
    #[serde(default)]
    pub capabilities: TagSet,

    /// Where the drone is stored
    pub location: String,

    /// Operational status
    pub status: DroneStatus,

    /// Project the drone is deployed on
    #[serde(default, with = "optional_text")]
    pub current_assignment: Option<String>,
}

impl Drone {
    /// Create an available drone with no capabilities
    pub fn new(drone_id: impl Into<String>, model: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            drone_id: drone_id.into(),
            model: model.into(),
            capabilities: TagSet::default(),
            location: location.into(),
            status: DroneStatus::Available,
            current_assignment: None,
        }
    }

    pub fn with_capabilities(mut self, capabilities: &str) -> Self {
        self.capabilities = TagSet::parse(capabilities);
        self
    }

    pub fn assigned_to(mut self, project_id: impl Into<String>) -> Self {
        self.status = DroneStatus::Assigned;
        self.current_assignment = Some(project_id.into());
        self
    }

    pub fn in_maintenance(mut self) -> Self {
        self.status = DroneStatus::Maintenance;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == DroneStatus::Available
    }
}
