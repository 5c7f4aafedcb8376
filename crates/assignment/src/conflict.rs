//! Conflict detection for proposed assignments
//!
//! A proposed assignment is a (pilot, drone, project) triple. Every rule in
//! the battery is evaluated against the current roster; failing rules are
//! classified as critical (the assignment must not be committed) or as
//! warnings (the assignment may proceed once an operator confirms).

use serde::{Deserialize, Serialize};
use skycrew_roster::{DateRange, Drone, Mission, Pilot, PilotStatus, RosterError, RosterSource};
use skycrew_roster::{DroneStatus, NONE_SENTINEL};
use std::fmt;
use tracing::{debug, warn};

/// Keyword whose presence in a mission's skills demands a matching payload
pub const THERMAL_KEYWORD: &str = "thermal";

/// Whether a conflict blocks the assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks the assignment
    Critical,
    /// Needs operator confirmation
    Warning,
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Pilot is already flying another project
    PilotAssigned {
        pilot_id: String,
        project_id: String,
    },
    /// Pilot is on leave
    PilotOnLeave {
        pilot_id: String,
        available_from: Option<String>,
    },
    /// Pilot lacks skills the mission requires
    MissingSkills {
        pilot_id: String,
        skills: Vec<String>,
    },
    /// Pilot lacks certifications the mission requires
    MissingCertifications {
        pilot_id: String,
        certifications: Vec<String>,
    },
    /// Drone is grounded for service
    DroneInMaintenance { drone_id: String },
    /// Drone is deployed on another project
    DroneAssigned {
        drone_id: String,
        project_id: String,
    },
    /// Pilot's current project shares days with the proposed one
    ScheduleOverlap {
        pilot_id: String,
        current_project: String,
        current: DateRange,
        proposed_project: String,
        proposed: DateRange,
    },
    /// Mission mentions thermal work the drone cannot carry
    ThermalCapability { drone_id: String },
    /// Pilot is based away from the mission site
    PilotTravel {
        pilot_location: String,
        project_location: String,
    },
    /// Drone is stored away from the pilot
    DroneTransport {
        pilot_location: String,
        drone_location: String,
    },
}

impl Conflict {
    pub fn severity(&self) -> Severity {
        match self {
            Conflict::PilotTravel { .. } | Conflict::DroneTransport { .. } => Severity::Warning,
            _ => Severity::Critical,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::PilotAssigned { pilot_id, project_id } => {
                write!(f, "Pilot {} is already assigned to {}", pilot_id, project_id)
            }
            Conflict::PilotOnLeave { pilot_id, available_from } => write!(
                f,
                "Pilot {} is currently on leave until {}",
                pilot_id,
                available_from.as_deref().unwrap_or(NONE_SENTINEL)
            ),
            Conflict::MissingSkills { pilot_id, skills } => write!(
                f,
                "Pilot {} lacks required skills: {}",
                pilot_id,
                skills.join(", ")
            ),
            Conflict::MissingCertifications { pilot_id, certifications } => write!(
                f,
                "Pilot {} lacks required certifications: {}",
                pilot_id,
                certifications.join(", ")
            ),
            Conflict::DroneInMaintenance { drone_id } => {
                write!(f, "Drone {} is currently in maintenance", drone_id)
            }
            Conflict::DroneAssigned { drone_id, project_id } => {
                write!(f, "Drone {} is already assigned to {}", drone_id, project_id)
            }
            Conflict::ScheduleOverlap {
                pilot_id,
                current_project,
                current,
                proposed_project,
                proposed,
            } => write!(
                f,
                "Date conflict: Pilot {} has overlapping assignment {} ({}) with {} ({})",
                pilot_id, current_project, current, proposed_project, proposed
            ),
            Conflict::ThermalCapability { drone_id } => write!(
                f,
                "Drone {} does not have thermal capability required for this project",
                drone_id
            ),
            Conflict::PilotTravel { pilot_location, project_location } => write!(
                f,
                "Location mismatch: Pilot is in {}, Project is in {}. Pilot will need to travel.",
                pilot_location, project_location
            ),
            Conflict::DroneTransport { pilot_location, drone_location } => write!(
                f,
                "Drone location mismatch: Pilot is in {}, Drone is in {}. Drone will need to be transported.",
                pilot_location, drone_location
            ),
        }
    }
}

/// How a caller should treat a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No conflicts
    Clear,
    /// Warnings only; commit after confirmation
    NeedsConfirmation,
    /// At least one critical conflict
    Blocked,
}

/// Outcome of a conflict check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Blocking conflicts
    pub critical: Vec<String>,
    /// Conflicts that need confirmation
    pub warnings: Vec<String>,
}

impl ConflictReport {
    /// Report for a lookup that failed before any rule ran
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self {
            critical: vec![format!("{} {} not found", entity, id)],
            warnings: Vec::new(),
        }
    }

    /// Report for an evaluation that could not complete
    pub fn failure(error: &RosterError) -> Self {
        Self {
            critical: vec![format!("Error checking conflicts: {}", error)],
            warnings: Vec::new(),
        }
    }

    /// Build a report from evaluated conflicts, keeping rule order
    pub fn from_conflicts(conflicts: &[Conflict]) -> Self {
        let mut report = Self::default();
        for conflict in conflicts {
            match conflict.severity() {
                Severity::Critical => report.critical.push(conflict.to_string()),
                Severity::Warning => report.warnings.push(conflict.to_string()),
            }
        }
        report
    }

    pub fn is_clear(&self) -> bool {
        self.critical.is_empty() && self.warnings.is_empty()
    }

    pub fn is_blocked(&self) -> bool {
        !self.critical.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_blocked() {
            Verdict::Blocked
        } else if self.warnings.is_empty() {
            Verdict::Clear
        } else {
            Verdict::NeedsConfirmation
        }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clear() {
            return writeln!(f, "No conflicts detected. Assignment is safe to proceed.");
        }

        if !self.critical.is_empty() {
            writeln!(f, "CRITICAL CONFLICTS (assignment cannot proceed):")?;
            for (i, conflict) in self.critical.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, conflict)?;
            }
        }

        if !self.warnings.is_empty() {
            if !self.critical.is_empty() {
                writeln!(f)?;
            }
            writeln!(f, "WARNINGS (confirmation required):")?;
            for (i, warning) in self.warnings.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, warning)?;
            }
        }

        Ok(())
    }
}

/// Run the rule battery against resolved records.
///
/// `missions` is the full mission list, used to look up the pilot's current
/// project for the date-overlap rule. Rules run in a fixed order and every
/// rule runs; the result lists failures in that order.
pub fn assignment_conflicts(
    pilot: &Pilot,
    drone: &Drone,
    mission: &Mission,
    missions: &[Mission],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    if pilot.status == PilotStatus::Assigned {
        if let Some(project_id) = pilot.active_assignment() {
            conflicts.push(Conflict::PilotAssigned {
                pilot_id: pilot.pilot_id.clone(),
                project_id: project_id.to_string(),
            });
        }
    }

    if pilot.status == PilotStatus::OnLeave {
        conflicts.push(Conflict::PilotOnLeave {
            pilot_id: pilot.pilot_id.clone(),
            available_from: pilot.available_from.clone(),
        });
    }

    let missing_skills = mission.required_skills.missing_from(&pilot.skills);
    if !missing_skills.is_empty() {
        conflicts.push(Conflict::MissingSkills {
            pilot_id: pilot.pilot_id.clone(),
            skills: missing_skills,
        });
    }

    if let Some(required_certs) = &mission.required_certs {
        let missing_certs = required_certs.missing_from(&pilot.certifications);
        if !missing_certs.is_empty() {
            conflicts.push(Conflict::MissingCertifications {
                pilot_id: pilot.pilot_id.clone(),
                certifications: missing_certs,
            });
        }
    }

    if drone.status == DroneStatus::Maintenance {
        conflicts.push(Conflict::DroneInMaintenance {
            drone_id: drone.drone_id.clone(),
        });
    }

    if drone.status == DroneStatus::Assigned {
        if let Some(project_id) = &drone.current_assignment {
            conflicts.push(Conflict::DroneAssigned {
                drone_id: drone.drone_id.clone(),
                project_id: project_id.clone(),
            });
        }
    }

    if let Some(overlap) = schedule_overlap(pilot, mission, missions) {
        conflicts.push(overlap);
    }

    if mission.required_skills.mentions(THERMAL_KEYWORD)
        && !drone.capabilities.mentions(THERMAL_KEYWORD)
    {
        conflicts.push(Conflict::ThermalCapability {
            drone_id: drone.drone_id.clone(),
        });
    }

    if pilot.location != mission.location {
        conflicts.push(Conflict::PilotTravel {
            pilot_location: pilot.location.clone(),
            project_location: mission.location.clone(),
        });
    }

    if pilot.location != drone.location {
        conflicts.push(Conflict::DroneTransport {
            pilot_location: pilot.location.clone(),
            drone_location: drone.location.clone(),
        });
    }

    conflicts
}

fn schedule_overlap(pilot: &Pilot, mission: &Mission, missions: &[Mission]) -> Option<Conflict> {
    let current_id = pilot.active_assignment()?;
    let current = missions.iter().find(|m| m.project_id == current_id)?;

    let (current_range, proposed_range) = match (current.schedule(), mission.schedule()) {
        (Ok(current_range), Ok(proposed_range)) => (current_range, proposed_range),
        (Err(e), _) | (_, Err(e)) => {
            debug!(
                pilot_id = %pilot.pilot_id,
                current_project = %current.project_id,
                proposed_project = %mission.project_id,
                error = %e,
                "Skipping date overlap check"
            );
            return None;
        }
    };

    proposed_range
        .overlaps(&current_range)
        .then(|| Conflict::ScheduleOverlap {
            pilot_id: pilot.pilot_id.clone(),
            current_project: current.project_id.clone(),
            current: current_range,
            proposed_project: mission.project_id.clone(),
            proposed: proposed_range,
        })
}

/// Checks proposed assignments against the live roster
#[derive(Debug)]
pub struct ConflictDetector<S> {
    source: S,
}

impl<S: RosterSource> ConflictDetector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The roster this detector reads from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Evaluate a proposed assignment.
    ///
    /// Never fails: missing records produce a single `"<Entity> <id> not
    /// found"` critical entry and source failures a single
    /// `"Error checking conflicts: ..."` entry.
    pub fn check_conflicts(&self, pilot_id: &str, drone_id: &str, project_id: &str) -> ConflictReport {
        match self.evaluate(pilot_id, drone_id, project_id) {
            Ok(report) => {
                debug!(
                    pilot_id,
                    drone_id,
                    project_id,
                    critical = report.critical.len(),
                    warnings = report.warnings.len(),
                    "Conflict check complete"
                );
                report
            }
            Err(e) => {
                warn!(pilot_id, drone_id, project_id, error = %e, "Conflict check failed");
                ConflictReport::failure(&e)
            }
        }
    }

    fn evaluate(
        &self,
        pilot_id: &str,
        drone_id: &str,
        project_id: &str,
    ) -> Result<ConflictReport, RosterError> {
        let pilots = self.source.pilots()?;
        let drones = self.source.drones()?;
        let missions = self.source.missions()?;

        let Some(pilot) = pilots.iter().find(|p| p.pilot_id == pilot_id) else {
            return Ok(ConflictReport::not_found("Pilot", pilot_id));
        };
        let Some(drone) = drones.iter().find(|d| d.drone_id == drone_id) else {
            return Ok(ConflictReport::not_found("Drone", drone_id));
        };
        let Some(mission) = missions.iter().find(|m| m.project_id == project_id) else {
            return Ok(ConflictReport::not_found("Project", project_id));
        };

        let conflicts = assignment_conflicts(pilot, drone, mission, &missions);
        Ok(ConflictReport::from_conflicts(&conflicts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycrew_roster::InMemoryRoster;

    fn mission() -> Mission {
        Mission::new("PRJ009", "Acme", "Bangalore", "2024-01-10", "2024-01-20")
            .with_required_skills("Mapping,Inspection")
    }

    fn pilot() -> Pilot {
        Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping,Inspection")
    }

    fn drone() -> Drone {
        Drone::new("D001", "DJI M300", "Bangalore").with_capabilities("RGB,LiDAR")
    }

    #[test]
    fn test_clean_assignment() {
        let conflicts = assignment_conflicts(&pilot(), &drone(), &mission(), &[mission()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_assigned_pilot() {
        let pilot = pilot().assigned_to("PRJ005");
        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);
        assert_eq!(
            conflicts,
            vec![Conflict::PilotAssigned {
                pilot_id: "P001".to_string(),
                project_id: "PRJ005".to_string(),
            }]
        );
    }

    #[test]
    fn test_assigned_status_with_blank_assignment_column() {
        for column in ["", "   ", "–"] {
            let row = serde_json::json!({
                "pilot_id": "P001",
                "name": "Arjun",
                "skills": "Mapping,Inspection",
                "certifications": "DGCA",
                "location": "Bangalore",
                "status": "Assigned",
                "current_assignment": column,
            });
            let pilot: Pilot = serde_json::from_value(row).unwrap();
            assert!(pilot.current_assignment.is_none());

            let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);
            assert!(conflicts.is_empty(), "column {:?} gave {:?}", column, conflicts);
        }
    }

    #[test]
    fn test_assigned_status_with_sentinel_is_not_a_conflict() {
        let mut pilot = pilot();
        pilot.status = PilotStatus::Assigned;
        pilot.current_assignment = None;

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_on_leave_mentions_return_date() {
        let pilot = pilot().on_leave_until("2024-02-01");
        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);

        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].to_string().contains("2024-02-01"));
        assert_eq!(conflicts[0].severity(), Severity::Critical);
    }

    #[test]
    fn test_missing_skills_are_exact_difference() {
        let pilot = pilot().with_skills("mapping,Survey");
        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);

        assert_eq!(
            conflicts,
            vec![Conflict::MissingSkills {
                pilot_id: "P001".to_string(),
                skills: vec!["Mapping".to_string(), "Inspection".to_string()],
            }]
        );
    }

    #[test]
    fn test_certs_checked_only_when_declared() {
        let pilot = pilot().with_certifications("DGCA");

        let no_certs = assignment_conflicts(&pilot, &drone(), &mission(), &[]);
        assert!(no_certs.is_empty());

        let mission = mission().with_required_certs("DGCA,Night Ops");
        let conflicts = assignment_conflicts(&pilot, &drone(), &mission, &[]);
        assert_eq!(
            conflicts,
            vec![Conflict::MissingCertifications {
                pilot_id: "P001".to_string(),
                certifications: vec!["Night Ops".to_string()],
            }]
        );
    }

    #[test]
    fn test_drone_status_conflicts() {
        let maintenance = assignment_conflicts(&pilot(), &drone().in_maintenance(), &mission(), &[]);
        assert_eq!(
            maintenance,
            vec![Conflict::DroneInMaintenance {
                drone_id: "D001".to_string()
            }]
        );

        let assigned = assignment_conflicts(&pilot(), &drone().assigned_to("PRJ003"), &mission(), &[]);
        assert_eq!(assigned[0].to_string(), "Drone D001 is already assigned to PRJ003");
    }

    #[test]
    fn test_overlap_on_shared_boundary_day() {
        let current = Mission::new("PRJ005", "Other", "Bangalore", "2024-01-01", "2024-01-10");
        let pilot = pilot().assigned_to("PRJ005");
        let missions = vec![current, mission()];

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &missions);

        assert_eq!(conflicts.len(), 2);
        let message = conflicts[1].to_string();
        assert!(message.contains("PRJ005"));
        assert!(message.contains("PRJ009"));
        assert!(message.contains("2024-01-01 to 2024-01-10"));
        assert!(message.contains("2024-01-10 to 2024-01-20"));
    }

    #[test]
    fn test_no_overlap_for_disjoint_dates() {
        let current = Mission::new("PRJ005", "Other", "Bangalore", "2023-12-01", "2023-12-05");
        let mut pilot = pilot();
        pilot.current_assignment = Some("PRJ005".to_string());

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[current]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_malformed_dates_skip_overlap_silently() {
        let current = Mission::new("PRJ005", "Other", "Bangalore", "TBD", "2024-01-15");
        let mut pilot = pilot();
        pilot.current_assignment = Some("PRJ005".to_string());

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[current]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_unknown_current_project_skips_overlap() {
        let mut pilot = pilot();
        pilot.current_assignment = Some("PRJ404".to_string());

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission(), &[mission()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_thermal_keyword() {
        let mission = mission().with_required_skills("Thermal Inspection");
        let pilot = pilot().with_skills("Thermal Inspection");

        let conflicts = assignment_conflicts(&pilot, &drone(), &mission, &[]);
        assert_eq!(
            conflicts,
            vec![Conflict::ThermalCapability {
                drone_id: "D001".to_string()
            }]
        );

        let thermal_drone = drone().with_capabilities("RGB, thermal");
        assert!(assignment_conflicts(&pilot, &thermal_drone, &mission, &[]).is_empty());
    }

    #[test]
    fn test_locations_are_warnings() {
        let pilot = pilot();
        let mut drone = drone();
        drone.location = "Chennai".to_string();
        let mut mission = mission();
        mission.location = "Mumbai".to_string();

        let report = ConflictReport::from_conflicts(&assignment_conflicts(&pilot, &drone, &mission, &[]));

        assert!(report.critical.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("Project is in Mumbai"));
        assert!(report.warnings[1].contains("Drone is in Chennai"));
        assert_eq!(report.verdict(), Verdict::NeedsConfirmation);
    }

    #[test]
    fn test_all_rules_accumulate() {
        let pilot = Pilot::new("P002", "Neha", "Mumbai")
            .with_skills("Survey")
            .assigned_to("PRJ005");
        let drone = Drone::new("D002", "Mavic", "Pune").in_maintenance();
        let mission = mission().with_required_skills("Thermal,Mapping");

        let report = ConflictReport::from_conflicts(&assignment_conflicts(&pilot, &drone, &mission, &[]));

        assert_eq!(report.critical.len(), 4);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.verdict(), Verdict::Blocked);
    }

    #[test]
    fn test_detector_not_found_order() {
        let detector = ConflictDetector::new(InMemoryRoster::new(vec![pilot()], vec![drone()], vec![mission()]));

        let report = detector.check_conflicts("P999", "D999", "PRJ999");
        assert_eq!(report.critical, vec!["Pilot P999 not found"]);
        assert!(report.warnings.is_empty());

        let report = detector.check_conflicts("P001", "D999", "PRJ009");
        assert_eq!(report.critical, vec!["Drone D999 not found"]);

        let report = detector.check_conflicts("P001", "D001", "PRJ999");
        assert_eq!(report.critical, vec!["Project PRJ999 not found"]);
    }

    #[test]
    fn test_report_display() {
        assert_eq!(
            ConflictReport::default().to_string(),
            "No conflicts detected. Assignment is safe to proceed.\n"
        );

        let report = ConflictReport {
            critical: vec!["Drone D001 is currently in maintenance".to_string()],
            warnings: vec!["Location mismatch".to_string()],
        };
        let text = report.to_string();
        assert!(text.starts_with("CRITICAL CONFLICTS"));
        assert!(text.contains("1. Drone D001 is currently in maintenance"));
        assert!(text.contains("WARNINGS"));
    }
}
