//! Identifier and value validation
//!
//! The assignment engine assumes well-formed identifiers; front ends call
//! these helpers before handing input to it.

use chrono::NaiveDate;

use crate::error::{Result, RosterError};
use crate::model::parse_date;

fn has_numeric_suffix(value: &str, prefix: &str, digits: usize) -> bool {
    value
        .strip_prefix(prefix)
        .map(|rest| rest.len() == digits && rest.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// Pilot IDs look like `P001`
pub fn validate_pilot_id(value: &str) -> Result<()> {
    if has_numeric_suffix(value, "P", 3) {
        Ok(())
    } else {
        Err(RosterError::InvalidId {
            kind: "pilot",
            value: value.to_string(),
        })
    }
}

/// Drone IDs look like `D001`
pub fn validate_drone_id(value: &str) -> Result<()> {
    if has_numeric_suffix(value, "D", 3) {
        Ok(())
    } else {
        Err(RosterError::InvalidId {
            kind: "drone",
            value: value.to_string(),
        })
    }
}

/// Project IDs look like `PRJ001`
pub fn validate_project_id(value: &str) -> Result<()> {
    if has_numeric_suffix(value, "PRJ", 3) {
        Ok(())
    } else {
        Err(RosterError::InvalidId {
            kind: "project",
            value: value.to_string(),
        })
    }
}

/// Dates are `YYYY-MM-DD`
pub fn validate_date(value: &str) -> Result<NaiveDate> {
    parse_date(value)
}
