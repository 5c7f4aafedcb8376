//! Composable substring filters over roster records
//!
//! A [`FieldFilter`] is a list of `field -> needle` criteria. A record
//! matches when, for every criterion, the string form of the named field
//! contains the needle case-insensitively. A filter with no criteria matches
//! every record; a field the record does not expose never matches.

use crate::model::{Drone, Mission, Pilot, NONE_SENTINEL};

/// Records whose columns can be addressed by name
pub trait Filterable {
    /// String form of a column, `None` if the record has no such column
    fn field(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    criteria: Vec<(String, String)>,
}

impl FieldFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to contain `needle`
    pub fn with(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.criteria.push((field.into(), needle.into().to_lowercase()));
        self
    }

    /// Like [`FieldFilter::with`], skipping absent or blank needles
    pub fn with_opt(self, field: impl Into<String>, needle: Option<&str>) -> Self {
        match needle.map(str::trim).filter(|n| !n.is_empty()) {
            Some(needle) => self.with(field, needle),
            None => self,
        }
    }

    /// Combine the criteria of two filters
    pub fn and(mut self, other: FieldFilter) -> Self {
        self.criteria.extend(other.criteria);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.criteria.iter().all(|(field, needle)| {
            record
                .field(field)
                .map(|value| value.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false)
        })
    }

    /// Keep matching records, preserving order
    pub fn apply<T: Filterable>(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NONE_SENTINEL.to_string())
}

impl Filterable for Pilot {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "pilot_id" => Some(self.pilot_id.clone()),
            "name" => Some(self.name.clone()),
            "skills" => Some(self.skills.to_string()),
            "certifications" => Some(self.certifications.to_string()),
            "location" => Some(self.location.clone()),
            "status" => Some(self.status.to_string()),
            "current_assignment" => Some(optional(&self.current_assignment)),
            "available_from" => Some(optional(&self.available_from)),
            _ => None,
        }
    }
}

impl Filterable for Drone {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "drone_id" => Some(self.drone_id.clone()),
            "model" => Some(self.model.clone()),
            "capabilities" => Some(self.capabilities.to_string()),
            "location" => Some(self.location.clone()),
            "status" => Some(self.status.to_string()),
            "current_assignment" => Some(optional(&self.current_assignment)),
            _ => None,
        }
    }
}

impl Filterable for Mission {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "project_id" => Some(self.project_id.clone()),
            "client" => Some(self.client.clone()),
            "priority" => Some(self.priority.to_string()),
            "location" => Some(self.location.clone()),
            "required_skills" => Some(self.required_skills.to_string()),
            "required_certs" => Some(
                self.required_certs
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| NONE_SENTINEL.to_string()),
            ),
            "start_date" => Some(self.start_date.clone()),
            "end_date" => Some(self.end_date.clone()),
            _ => None,
        }
    }
}
