//! Layout settings
//!
//! Provides [`LayoutSettings`], the TOML-backed user settings: drop-zone
//! geometry, layout defaults and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::drag_drop::DropZoneMetrics;
use crate::layout::{LayoutZone, Orientation};
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// All user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Drop-zone band constants.
    pub drop_zones: DropZoneMetrics,
    /// Defaults for new layouts.
    pub layout: LayoutDefaults,
    /// Logging.
    pub logging: LoggingSettings,
}

/// Defaults applied when a layout is created or reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDefaults {
    /// Orientation of the root split.
    pub root_orientation: Orientation,
    /// Zone used by `add` when none is given.
    pub default_zone: LayoutZone,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base log level, raised by `-v` flags.
    pub level: TracingLevel,
    /// Log to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Print event targets.
    pub show_targets: bool,
}

impl LoggingSettings {
    /// Builds a tracing configuration, raising the level by `verbosity`.
    #[must_use]
    pub fn tracing_config(&self, verbosity: u8) -> TracingConfig {
        let output = self
            .file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File);
        TracingConfig::new()
            .with_level(self.level.raised_by(verbosity))
            .with_output(output)
            .with_target(self.show_targets)
    }
}

impl LayoutSettings {
    /// Checks values that would make the layout misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.drop_zones;
        if m.edge_divisor <= 0 {
            return Err(invalid("drop_zones.edge_divisor", "must be positive"));
        }
        if m.center_divisor <= 0 {
            return Err(invalid("drop_zones.center_divisor", "must be positive"));
        }
        if m.edge_min > m.edge_max {
            return Err(invalid("drop_zones.edge_min", "must not exceed edge_max"));
        }
        if m.center_min > m.center_max {
            return Err(invalid("drop_zones.center_min", "must not exceed center_max"));
        }
        if m.edge_min < 0 || m.center_min < 0 {
            return Err(invalid("drop_zones", "band widths must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
