//! Committing assignments to the roster
//!
//! The coordinator runs the conflict check and, when the verdict allows it,
//! writes the pilot and drone status updates. Failed writes are reported
//! and never retried.

use serde::{Deserialize, Serialize};
use skycrew_roster::{DroneStatus, DroneStatusUpdate, PilotStatus, PilotStatusUpdate, RosterSource};
use tracing::{info, warn};

use crate::conflict::{ConflictDetector, ConflictReport, Verdict};
use crate::error::Result;

/// A proposed assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub pilot_id: String,
    pub drone_id: String,
    pub project_id: String,
    /// Operator has acknowledged any warnings
    #[serde(default)]
    pub confirmed: bool,
}

impl AssignmentRequest {
    pub fn new(pilot_id: impl Into<String>, drone_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            pilot_id: pilot_id.into(),
            drone_id: drone_id.into(),
            project_id: project_id.into(),
            confirmed: false,
        }
    }

    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

/// What happened to an assignment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// Critical conflicts; nothing written
    Blocked { report: ConflictReport },
    /// Warnings not yet confirmed; nothing written
    NeedsConfirmation { report: ConflictReport },
    /// Status updates issued
    Committed {
        report: ConflictReport,
        pilot_updated: bool,
        drone_updated: bool,
    },
}

impl AssignmentOutcome {
    pub fn report(&self) -> &ConflictReport {
        match self {
            AssignmentOutcome::Blocked { report }
            | AssignmentOutcome::NeedsConfirmation { report }
            | AssignmentOutcome::Committed { report, .. } => report,
        }
    }

    /// True when both records were written
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            AssignmentOutcome::Committed {
                pilot_updated: true,
                drone_updated: true,
                ..
            }
        )
    }
}

/// Result of releasing a pilot and drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOutcome {
    pub pilot_updated: bool,
    pub drone_updated: bool,
}

/// Checks and commits assignments against one roster
#[derive(Debug)]
pub struct AssignmentCoordinator<S> {
    detector: ConflictDetector<S>,
}

impl<S: RosterSource> AssignmentCoordinator<S> {
    pub fn new(source: S) -> Self {
        Self {
            detector: ConflictDetector::new(source),
        }
    }

    pub fn detector(&self) -> &ConflictDetector<S> {
        &self.detector
    }

    /// Check the request and commit it when allowed.
    ///
    /// Any critical conflict blocks. Warnings block until the request is
    /// confirmed. The pilot row is written before the drone row. A failed
    /// pilot write is returned as an error with nothing changed. Once the
    /// pilot row is written, a drone write that fails or finds no row comes
    /// back as `Committed` with `drone_updated == false`.
    pub fn assign(&self, request: &AssignmentRequest) -> Result<AssignmentOutcome> {
        let report = self
            .detector
            .check_conflicts(&request.pilot_id, &request.drone_id, &request.project_id);

        match report.verdict() {
            Verdict::Blocked => {
                info!(
                    pilot_id = %request.pilot_id,
                    drone_id = %request.drone_id,
                    project_id = %request.project_id,
                    critical = report.critical.len(),
                    "Assignment blocked"
                );
                return Ok(AssignmentOutcome::Blocked { report });
            }
            Verdict::NeedsConfirmation if !request.confirmed => {
                return Ok(AssignmentOutcome::NeedsConfirmation { report });
            }
            _ => {}
        }

        let source = self.detector.source();
        let pilot_updated = source.update_pilot_status(
            &PilotStatusUpdate::new(&request.pilot_id, PilotStatus::Assigned)
                .current_assignment(&request.project_id),
        )?;
        if !pilot_updated {
            warn!(pilot_id = %request.pilot_id, "Pilot row vanished before commit, drone left untouched");
            return Ok(AssignmentOutcome::Committed {
                report,
                pilot_updated,
                drone_updated: false,
            });
        }

        let drone_updated = match source.update_drone_status(
            &DroneStatusUpdate::new(&request.drone_id, DroneStatus::Assigned)
                .current_assignment(&request.project_id),
        ) {
            Ok(updated) => updated,
            Err(e) => {
                warn!(
                    pilot_id = %request.pilot_id,
                    drone_id = %request.drone_id,
                    error = %e,
                    "Drone write failed after pilot was assigned"
                );
                false
            }
        };

        if pilot_updated && drone_updated {
            info!(
                pilot_id = %request.pilot_id,
                drone_id = %request.drone_id,
                project_id = %request.project_id,
                "Assignment committed"
            );
        } else {
            warn!(
                pilot_id = %request.pilot_id,
                drone_id = %request.drone_id,
                pilot_updated,
                drone_updated,
                "Assignment partially written"
            );
        }

        Ok(AssignmentOutcome::Committed {
            report,
            pilot_updated,
            drone_updated,
        })
    }

    /// Return a pilot and drone to Available, clearing their assignments
    pub fn release(&self, pilot_id: &str, drone_id: &str) -> Result<ReleaseOutcome> {
        let source = self.detector.source();
        let pilot_updated = source.update_pilot_status(&PilotStatusUpdate::new(pilot_id, PilotStatus::Available))?;
        let drone_updated = source.update_drone_status(&DroneStatusUpdate::new(drone_id, DroneStatus::Available))?;

        info!(pilot_id, drone_id, pilot_updated, drone_updated, "Released assignment");
        Ok(ReleaseOutcome {
            pilot_updated,
            drone_updated,
        })
    }
}
