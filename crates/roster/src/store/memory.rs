//! In-memory roster store
//!
//! Holds the three collections behind read/write locks so a single store
//! can be shared between the conflict detector, the ranker, and writers.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, RosterError};
use crate::model::{Drone, Mission, Pilot};
use crate::source::{DroneStatusUpdate, PilotStatusUpdate, RosterSnapshot, RosterSource};

/// Roster kept entirely in memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    pilots: RwLock<Vec<Pilot>>,
    drones: RwLock<Vec<Drone>>,
    missions: RwLock<Vec<Mission>>,
}

fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| RosterError::Unavailable(format!("{} lock poisoned", what)))
}

fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| RosterError::Unavailable(format!("{} lock poisoned", what)))
}

impl InMemoryRoster {
    /// Create a store from the three collections
    pub fn new(pilots: Vec<Pilot>, drones: Vec<Drone>, missions: Vec<Mission>) -> Self {
        Self {
            pilots: RwLock::new(pilots),
            drones: RwLock::new(drones),
            missions: RwLock::new(missions),
        }
    }

    /// Create a store from a snapshot
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        Self::new(snapshot.pilots, snapshot.drones, snapshot.missions)
    }

    /// Append a pilot
    pub fn add_pilot(&self, pilot: Pilot) -> Result<()> {
        write(&self.pilots, "pilot roster")?.push(pilot);
        Ok(())
    }

    /// Append a drone
    pub fn add_drone(&self, drone: Drone) -> Result<()> {
        write(&self.drones, "drone fleet")?.push(drone);
        Ok(())
    }

    /// Append a mission
    pub fn add_mission(&self, mission: Mission) -> Result<()> {
        write(&self.missions, "mission list")?.push(mission);
        Ok(())
    }
}

impl RosterSource for InMemoryRoster {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        Ok(read(&self.pilots, "pilot roster")?.clone())
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        Ok(read(&self.drones, "drone fleet")?.clone())
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        Ok(read(&self.missions, "mission list")?.clone())
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        let mut pilots = write(&self.pilots, "pilot roster")?;
        match pilots.iter_mut().find(|p| p.pilot_id == update.pilot_id) {
            Some(pilot) => {
                update.apply(pilot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        let mut drones = write(&self.drones, "drone fleet")?;
        match drones.iter_mut().find(|d| d.drone_id == update.drone_id) {
            Some(drone) => {
                update.apply(drone);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DroneStatus, PilotStatus};

    fn roster() -> InMemoryRoster {
        InMemoryRoster::new(
            vec![
                Pilot::new("P001", "Arjun", "Bangalore"),
                Pilot::new("P002", "Neha", "Mumbai"),
            ],
            vec![Drone::new("D001", "M300", "Bangalore")],
            vec![Mission::new("PRJ001", "Acme", "Bangalore", "2024-01-01", "2024-01-05")],
        )
    }

    #[test]
    fn test_reads_preserve_order() {
        let store = roster();
        let ids: Vec<_> = store.pilots().unwrap().into_iter().map(|p| p.pilot_id).collect();
        assert_eq!(ids, vec!["P001", "P002"]);
    }

    #[test]
    fn test_reads_are_snapshots() {
        let store = roster();
        let before = store.pilots().unwrap();

        store
            .update_pilot_status(&PilotStatusUpdate::new("P001", PilotStatus::OnLeave))
            .unwrap();

        assert_eq!(before[0].status, PilotStatus::Available);
        assert_eq!(store.pilots().unwrap()[0].status, PilotStatus::OnLeave);
    }

    #[test]
    fn test_update_unknown_pilot() {
        let store = roster();
        let updated = store
            .update_pilot_status(&PilotStatusUpdate::new("P999", PilotStatus::Assigned))
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_update_drone() {
        let store = roster();
        let updated = store
            .update_drone_status(
                &DroneStatusUpdate::new("D001", DroneStatus::Assigned).current_assignment("PRJ001"),
            )
            .unwrap();

        assert!(updated);
        let drone = &store.drones().unwrap()[0];
        assert_eq!(drone.status, DroneStatus::Assigned);
        assert_eq!(drone.current_assignment.as_deref(), Some("PRJ001"));
    }

    #[test]
    fn test_add_records() {
        let store = InMemoryRoster::default();
        store.add_pilot(Pilot::new("P001", "Arjun", "Pune")).unwrap();
        store.add_drone(Drone::new("D001", "M300", "Pune")).unwrap();
        store
            .add_mission(Mission::new("PRJ001", "Acme", "Pune", "2024-01-01", "2024-01-02"))
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.pilots.len(), 1);
        assert_eq!(snapshot.drones.len(), 1);
        assert_eq!(snapshot.missions.len(), 1);
    }
}
