//! Pilot roster records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;
use crate::model::tags::{optional_text, TagSet};

/// Duty status of a pilot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PilotStatus {
    /// Free to take a mission
    Available,
    /// Away until `available_from`
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Flying `current_assignment`
    Assigned,
}

impl PilotStatus {
    /// All statuses in display order
    pub const ALL: [PilotStatus; 3] = [Self::Available, Self::OnLeave, Self::Assigned];

    /// Roster text for the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PilotStatus::Available => "Available",
            PilotStatus::OnLeave => "On Leave",
            PilotStatus::Assigned => "Assigned",
        }
    }
}

impl fmt::Display for PilotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PilotStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidStatus {
                kind: "pilot",
                value: s.to_string(),
            })
    }
}

/// A pilot as stored in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique pilot identifier (`P` + 3 digits)
    pub pilot_id: String,

    /// Display name
    pub name: String,

    /// Capability tags the pilot can fly
    #[serde(default)]
    pub skills: TagSet,

    /// Certifications held
    #[serde(default)]
    pub certifications: TagSet,

    /// Home base
    pub location: String,

    /// Duty status
    pub status: PilotStatus,

    /// Project currently flown, `None` when the column holds the sentinel
    #[serde(default, with = "optional_text")]
    pub current_assignment: Option<String>,

    /// Return date while on leave
    #[serde(default, with = "optional_text")]
    pub available_from: Option<String>,
}

impl Pilot {
    /// Create an available pilot with no skills or certifications
    pub fn new(pilot_id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            pilot_id: pilot_id.into(),
            name: name.into(),
            skills: TagSet::default(),
            certifications: TagSet::default(),
            location: location.into(),
            status: PilotStatus::Available,
            current_assignment: None,
            available_from: None,
        }
    }

    pub fn with_skills(mut self, skills: &str) -> Self {
        self.skills = TagSet::parse(skills);
        self
    }

    pub fn with_certifications(mut self, certifications: &str) -> Self {
        self.certifications = TagSet::parse(certifications);
        self
    }

    /// Mark the pilot as flying `project_id`
    pub fn assigned_to(mut self, project_id: impl Into<String>) -> Self {
        self.status = PilotStatus::Assigned;
        self.current_assignment = Some(project_id.into());
        self
    }

    /// Mark the pilot as on leave until `date`
    pub fn on_leave_until(mut self, date: impl Into<String>) -> Self {
        self.status = PilotStatus::OnLeave;
        self.available_from = Some(date.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == PilotStatus::Available
    }

    /// Project the pilot is bound to, regardless of status
    pub fn active_assignment(&self) -> Option<&str> {
        self.current_assignment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pilot_creation() {
        let pilot = Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping, Survey");

        assert_eq!(pilot.pilot_id, "P001");
        assert!(pilot.is_available());
        assert!(pilot.skills.contains("Survey"));
        assert!(pilot.active_assignment().is_none());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("On Leave".parse::<PilotStatus>().unwrap(), PilotStatus::OnLeave);
        assert_eq!("assigned".parse::<PilotStatus>().unwrap(), PilotStatus::Assigned);
        assert!(matches!(
            "Maintenance".parse::<PilotStatus>(),
            Err(RosterError::InvalidStatus { kind: "pilot", .. })
        ));
    }

    #[test]
    fn test_row_deserialization() {
        let json = r#"{
            "pilot_id": "P002",
            "name": "Neha",
            "skills": "Inspection,Thermal",
            "certifications": "DGCA, Night Ops",
            "location": "Mumbai",
            "status": "Assigned",
            "current_assignment": "PRJ005",
            "available_from": "–"
        }"#;

        let pilot: Pilot = serde_json::from_str(json).unwrap();
        assert_eq!(pilot.status, PilotStatus::Assigned);
        assert_eq!(pilot.active_assignment(), Some("PRJ005"));
        assert!(pilot.available_from.is_none());
        assert!(pilot.certifications.contains("Night Ops"));
    }

    #[test]
    fn test_sentinel_assignment_deserializes_to_none() {
        let json = r#"{
            "pilot_id": "P003",
            "name": "Ravi",
            "skills": "Mapping",
            "certifications": "DGCA",
            "location": "Pune",
            "status": "Available",
            "current_assignment": "–"
        }"#;

        let pilot: Pilot = serde_json::from_str(json).unwrap();
        assert!(pilot.current_assignment.is_none());
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let json = r#"{"pilot_id":"P004","name":"X","location":"Pune","status":"Sleeping"}"#;
        assert!(serde_json::from_str::<Pilot>(json).is_err());
    }

    #[test]
    fn test_none_serializes_as_sentinel() {
        let pilot = Pilot::new("P005", "Meera", "Delhi");
        let value = serde_json::to_value(&pilot).unwrap();
        assert_eq!(value["current_assignment"], "–");
        assert_eq!(value["status"], "Available");
    }
}
