//! Roster status counts

use serde::{Deserialize, Serialize};

use crate::model::{Drone, DroneStatus, Mission, Pilot, PilotStatus, Priority};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotCounts {
    pub available: usize,
    pub assigned: usize,
    pub on_leave: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneCounts {
    pub available: usize,
    pub assigned: usize,
    pub maintenance: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionCounts {
    pub urgent: usize,
    pub high: usize,
    pub standard: usize,
    pub total: usize,
}

/// Headline counts for an operations dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub pilots: PilotCounts,
    pub drones: DroneCounts,
    pub missions: MissionCounts,
}

impl StatusSummary {
    pub fn from_records(pilots: &[Pilot], drones: &[Drone], missions: &[Mission]) -> Self {
        let mut summary = Self::default();

        for pilot in pilots {
            match pilot.status {
                PilotStatus::Available => summary.pilots.available += 1,
                PilotStatus::Assigned => summary.pilots.assigned += 1,
                PilotStatus::OnLeave => summary.pilots.on_leave += 1,
            }
        }
        summary.pilots.total = pilots.len();

        for drone in drones {
            match drone.status {
                DroneStatus::Available => summary.drones.available += 1,
                DroneStatus::Assigned => summary.drones.assigned += 1,
                DroneStatus::Maintenance => summary.drones.maintenance += 1,
            }
        }
        summary.drones.total = drones.len();

        for mission in missions {
            match mission.priority {
                Priority::Urgent => summary.missions.urgent += 1,
                Priority::High => summary.missions.high += 1,
                Priority::Standard => summary.missions.standard += 1,
            }
        }
        summary.missions.total = missions.len();

        summary
    }
}
