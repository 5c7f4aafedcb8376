//! Core error types

use thiserror::Error;

/// Core error type for SkyCrew
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is present but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, Error>;
