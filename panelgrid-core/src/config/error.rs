//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file is not valid TOML or has the wrong shape
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A setting has a value the layout cannot use
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// Offending setting
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// No per-user configuration directory could be determined
    #[error("Configuration directory not found: {0}")]
    NotFound(PathBuf),

    /// The settings file could not be read
    #[error("Failed to read configuration: {0}")]
    Read(String),

    /// The settings file could not be written
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// The settings could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
