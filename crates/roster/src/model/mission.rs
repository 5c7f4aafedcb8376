//! Mission (project) records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RosterError};
use crate::model::schedule::DateRange;
use crate::model::tags::{optional_tags, TagSet};

/// Client-assigned urgency of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    High,
    Standard,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Urgent, Self::High, Self::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Standard => "Standard",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidStatus {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// A client project that needs a pilot and a drone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Unique project identifier (`PRJ` + 3 digits)
    pub project_id: String,

    /// Client name
    pub client: String,

    /// Urgency
    pub priority: Priority,

    /// Site of the mission
    pub location: String,

    /// Skills the pilot must hold
    #[serde(default)]
    pub required_skills: TagSet,

    /// Certifications the pilot must hold, `None` when not declared
    #[serde(default, with = "optional_tags")]
    pub required_certs: Option<TagSet>,

    /// First day, `YYYY-MM-DD` as written in the source
    pub start_date: String,

    /// Last day, `YYYY-MM-DD` as written in the source
    pub end_date: String,
}

impl Mission {
    /// Create a standard-priority mission with no requirements
    pub fn new(
        project_id: impl Into<String>,
        client: impl Into<String>,
        location: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            client: client.into(),
            priority: Priority::Standard,
            location: location.into(),
            required_skills: TagSet::default(),
            required_certs: None,
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_required_skills(mut self, skills: &str) -> Self {
        self.required_skills = TagSet::parse(skills);
        self
    }

    pub fn with_required_certs(mut self, certs: &str) -> Self {
        let certs = TagSet::parse(certs);
        self.required_certs = (!certs.is_empty()).then_some(certs);
        self
    }

    /// Parse the booked days; fails on malformed or inverted dates
    pub fn schedule(&self) -> Result<DateRange> {
        DateRange::parse(&self.start_date, &self.end_date)
    }
}
