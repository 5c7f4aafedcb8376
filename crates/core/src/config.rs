//! Configuration management for SkyCrew.
//!
//! Every table is optional in the TOML file; absent tables and keys fall back
//! to the values returned by [`Config::default_config`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ranking: RankingPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where roster snapshots are read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Directory holding `pilots.json`, `drones.json` and `missions.json`
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    /// Secondary directory read when the primary cannot be loaded
    #[serde(default)]
    pub fallback_dir: Option<PathBuf>,
    /// Keep snapshots in an explicit cache between reads
    #[serde(default = "default_cache")]
    pub cache: bool,
}

/// Weights used when scoring candidates for a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingPolicy {
    /// Awarded once when any required skill is held
    #[serde(default = "default_skill_match_points")]
    pub skill_match_points: u32,
    /// Awarded when the pilot is already at the project location
    #[serde(default = "default_location_match_points")]
    pub location_match_points: u32,
    /// Multiplier per matched skill for urgent reassignment
    #[serde(default = "default_urgent_skill_weight")]
    pub urgent_skill_weight: u32,
    /// Location bonus for urgent reassignment
    #[serde(default = "default_urgent_location_bonus")]
    pub urgent_location_bonus: u32,
    /// Maximum urgent candidates returned
    #[serde(default = "default_urgent_candidate_limit")]
    pub urgent_candidate_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_cache() -> bool {
    true
}

fn default_skill_match_points() -> u32 {
    10
}

fn default_location_match_points() -> u32 {
    5
}

fn default_urgent_skill_weight() -> u32 {
    2
}

fn default_urgent_location_bonus() -> u32 {
    5
}

fn default_urgent_candidate_limit() -> usize {
    5
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            fallback_dir: None,
            cache: default_cache(),
        }
    }
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            skill_match_points: default_skill_match_points(),
            location_match_points: default_location_match_points(),
            urgent_skill_weight: default_urgent_skill_weight(),
            urgent_location_bonus: default_urgent_location_bonus(),
            urgent_candidate_limit: default_urgent_candidate_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            data: DataConfig::default(),
            ranking: RankingPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Reject settings that would make ranking meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.data.dir.as_os_str().is_empty() {
            return Err(Error::Config("data.dir cannot be empty".to_string()));
        }
        if self.ranking.urgent_candidate_limit == 0 {
            return Err(Error::Config(
                "ranking.urgent_candidate_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
