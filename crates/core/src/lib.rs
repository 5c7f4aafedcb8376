//! Core functionality shared by the SkyCrew crates.
//!
//! This crate provides configuration loading, the core error type, and
//! logging initialisation used by the roster, assignment, and CLI crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, DataConfig, LoggingConfig, RankingPolicy};
pub use error::{Error, Result};
