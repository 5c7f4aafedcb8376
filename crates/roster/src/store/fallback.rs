//! Primary/secondary read fallback
//!
//! Reads come from the primary source; when a primary read fails the same
//! collection is read from the secondary instead. Writes only ever go to
//! the primary.

use tracing::warn;

use crate::error::Result;
use crate::model::{Drone, Mission, Pilot};
use crate::source::{DroneStatusUpdate, PilotStatusUpdate, RosterSource};

#[derive(Debug)]
pub struct FallbackRoster<P, S> {
    primary: P,
    secondary: S,
}

impl<P: RosterSource, S: RosterSource> FallbackRoster<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    fn read<T>(
        &self,
        collection: &str,
        primary: impl FnOnce(&P) -> Result<Vec<T>>,
        secondary: impl FnOnce(&S) -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        match primary(&self.primary) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(collection, error = %e, "Primary roster read failed, using fallback");
                secondary(&self.secondary)
            }
        }
    }
}

impl<P: RosterSource, S: RosterSource> RosterSource for FallbackRoster<P, S> {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        self.read("pilots", |p| p.pilots(), |s| s.pilots())
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        self.read("drones", |p| p.drones(), |s| s.drones())
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        self.read("missions", |p| p.missions(), |s| s.missions())
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        self.primary.update_pilot_status(update)
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        self.primary.update_drone_status(update)
    }
}
