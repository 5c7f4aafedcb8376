//! Comma-separated tag sets and the "no value" sentinel
//!
//! Roster columns such as `skills` or `capabilities` hold comma-separated
//! tokens. Tokens are trimmed and compared exactly (case-sensitive); empty
//! tokens are dropped. Order and duplicates are preserved so that match
//! counts reflect the record as written.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Marker stored in a column to mean "no value" (no current assignment,
/// no required certifications).
pub const NONE_SENTINEL: &str = "–";

/// Returns true when the text stands for "no value".
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NONE_SENTINEL
}

/// Ordered set of trimmed capability tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Parse comma-separated text into tags
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Check for an exact tag
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag.trim())
    }

    /// Iterate over tags in record order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tags of `self` that `other` does not hold, in `self` order
    pub fn missing_from(&self, other: &TagSet) -> Vec<String> {
        self.0
            .iter()
            .filter(|tag| !other.contains(tag))
            .cloned()
            .collect()
    }

    /// Number of tags of `self` held by `other`
    pub fn count_held_by(&self, other: &TagSet) -> usize {
        self.0.iter().filter(|tag| other.contains(tag)).count()
    }

    /// True when `other` holds at least one tag of `self`
    pub fn any_held_by(&self, other: &TagSet) -> bool {
        self.0.iter().any(|tag| other.contains(tag))
    }

    /// Case-insensitive substring search over the whole text of the set
    pub fn mentions(&self, keyword: &str) -> bool {
        self.to_string()
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl FromStr for TagSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for TagSet {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let joined: Vec<String> = iter.into_iter().map(Into::into).collect();
        Self::parse(&joined.join(","))
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

/// Serde adapter for optional text columns that use [`NONE_SENTINEL`]
pub mod optional_text {
    use super::{is_sentinel, NONE_SENTINEL};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NONE_SENTINEL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .filter(|v| !is_sentinel(v))
            .map(|v| v.trim().to_string()))
    }
}

/// Serde adapter for optional tag columns that use [`NONE_SENTINEL`]
pub mod optional_tags {
    use super::{is_sentinel, TagSet, NONE_SENTINEL};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<TagSet>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(tags) => serializer.serialize_str(&tags.to_string()),
            None => serializer.serialize_str(NONE_SENTINEL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TagSet>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .filter(|v| !is_sentinel(v))
            .map(|v| TagSet::parse(&v))
            .filter(|tags| !tags.is_empty()))
    }
}
