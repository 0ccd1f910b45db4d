//! Configuration management for panelgrid
//!
//! This module provides the `ConfigManager` for loading and saving
//! `LayoutSettings` as a TOML file.

mod error;
mod manager;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use manager::{ConfigManager, SETTINGS_FILE};
pub use settings::{LayoutDefaults, LayoutSettings, LoggingSettings};
