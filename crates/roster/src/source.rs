//! Roster data access interface
//!
//! The assignment engine reads pilots, drones, and missions through
//! [`RosterSource`] and issues status updates through the same trait. Every
//! read returns a fresh snapshot as far as the caller is concerned; caching
//! is a property of the implementation (see [`crate::store::CachedRoster`]).

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::model::{Drone, DroneStatus, Mission, Pilot, PilotStatus};
use crate::query::{DroneQuery, MissionQuery, PilotQuery};
use crate::summary::StatusSummary;

/// Requested change to a pilot row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotStatusUpdate {
    pub pilot_id: String,
    pub status: PilotStatus,
    /// Written only when supplied
    pub available_from: Option<String>,
    /// Written when supplied; cleared when the new status is Available
    pub current_assignment: Option<String>,
}

impl PilotStatusUpdate {
    pub fn new(pilot_id: impl Into<String>, status: PilotStatus) -> Self {
        Self {
            pilot_id: pilot_id.into(),
            status,
            available_from: None,
            current_assignment: None,
        }
    }

    pub fn available_from(mut self, date: impl Into<String>) -> Self {
        self.available_from = Some(date.into());
        self
    }

    pub fn current_assignment(mut self, project_id: impl Into<String>) -> Self {
        self.current_assignment = Some(project_id.into());
        self
    }

    /// Apply the update to a pilot row in place
    pub fn apply(&self, pilot: &mut Pilot) {
        pilot.status = self.status;
        if let Some(project_id) = &self.current_assignment {
            pilot.current_assignment = Some(project_id.clone());
        } else if self.status == PilotStatus::Available {
            pilot.current_assignment = None;
        }
        if let Some(date) = &self.available_from {
            pilot.available_from = Some(date.clone());
        }
    }
}

/// Requested change to a drone row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneStatusUpdate {
    pub drone_id: String,
    pub status: DroneStatus,
    /// Written when supplied; cleared when the new status is Available
    pub current_assignment: Option<String>,
}

impl DroneStatusUpdate {
    pub fn new(drone_id: impl Into<String>, status: DroneStatus) -> Self {
        Self {
            drone_id: drone_id.into(),
            status,
            current_assignment: None,
        }
    }

    pub fn current_assignment(mut self, project_id: impl Into<String>) -> Self {
        self.current_assignment = Some(project_id.into());
        self
    }

    /// Apply the update to a drone row in place
    pub fn apply(&self, drone: &mut Drone) {
        drone.status = self.status;
        if let Some(project_id) = &self.current_assignment {
            drone.current_assignment = Some(project_id.clone());
        } else if self.status == DroneStatus::Available {
            drone.current_assignment = None;
        }
    }
}

/// One consistent copy of all three collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub pilots: Vec<Pilot>,
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
}

/// Read/write access to the roster store
///
/// Implementations must preserve the natural record order of each
/// collection; ranking ties and drone pairing depend on it. Updates return
/// `Ok(false)` when the target record does not exist.
pub trait RosterSource: Send + Sync {
    /// All pilots in record order
    fn pilots(&self) -> Result<Vec<Pilot>>;

    /// All drones in record order
    fn drones(&self) -> Result<Vec<Drone>>;

    /// All missions in record order
    fn missions(&self) -> Result<Vec<Mission>>;

    /// Update a pilot's status fields
    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool>;

    /// Update a drone's status fields
    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool>;

    /// Pilots matching every criterion of `query`
    fn query_pilots(&self, query: &PilotQuery) -> Result<Vec<Pilot>> {
        Ok(query.to_filter().apply(self.pilots()?))
    }

    /// Drones matching every criterion of `query`
    fn query_drones(&self, query: &DroneQuery) -> Result<Vec<Drone>> {
        Ok(query.to_filter().apply(self.drones()?))
    }

    /// Missions matching every criterion of `query`
    fn query_missions(&self, query: &MissionQuery) -> Result<Vec<Mission>> {
        Ok(query.to_filter().apply(self.missions()?))
    }

    /// Read all three collections
    fn snapshot(&self) -> Result<RosterSnapshot> {
        Ok(RosterSnapshot {
            pilots: self.pilots()?,
            drones: self.drones()?,
            missions: self.missions()?,
        })
    }

    /// Status counts across the roster
    fn summary(&self) -> Result<StatusSummary> {
        let snapshot = self.snapshot()?;
        Ok(StatusSummary::from_records(
            &snapshot.pilots,
            &snapshot.drones,
            &snapshot.missions,
        ))
    }
}

impl<S: RosterSource + ?Sized> RosterSource for Arc<S> {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        (**self).pilots()
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        (**self).drones()
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        (**self).missions()
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        (**self).update_pilot_status(update)
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        (**self).update_drone_status(update)
    }
}

impl<S: RosterSource + ?Sized> RosterSource for Box<S> {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        (**self).pilots()
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        (**self).drones()
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        (**self).missions()
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        (**self).update_pilot_status(update)
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        (**self).update_drone_status(update)
    }
}
