//! Typed record queries
//!
//! Each query names the columns an operator can search on and lowers to a
//! [`FieldFilter`].

use serde::{Deserialize, Serialize};

use crate::filter::FieldFilter;

/// Search criteria for the pilot roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotQuery {
    pub skill: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub certification: Option<String>,
}

impl PilotQuery {
    pub fn to_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with_opt("skills", self.skill.as_deref())
            .with_opt("location", self.location.as_deref())
            .with_opt("status", self.status.as_deref())
            .with_opt("certifications", self.certification.as_deref())
    }
}

/// Search criteria for the drone fleet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneQuery {
    pub capability: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub model: Option<String>,
}

impl DroneQuery {
    pub fn to_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with_opt("capabilities", self.capability.as_deref())
            .with_opt("location", self.location.as_deref())
            .with_opt("status", self.status.as_deref())
            .with_opt("model", self.model.as_deref())
    }
}

/// Search criteria for missions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionQuery {
    pub priority: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
}

impl MissionQuery {
    pub fn to_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with_opt("priority", self.priority.as_deref())
            .with_opt("location", self.location.as_deref())
            .with_opt("client", self.client.as_deref())
    }
}
