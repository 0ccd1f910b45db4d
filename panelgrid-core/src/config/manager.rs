//! Settings file management
//!
//! `ConfigManager` locates the configuration directory and reads and writes
//! `settings.toml` inside it.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::settings::LayoutSettings;

/// Name of the settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves settings from a configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the per-user directory
    /// (`$XDG_CONFIG_HOME/panelgrid` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the platform has no configuration
    /// directory.
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?;
        Ok(Self::with_config_dir(base.join("panelgrid")))
    }

    /// Creates a manager for an explicit directory.
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path of the settings file.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads the settings, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse or holds
    /// invalid values.
    pub fn load_settings(&self) -> ConfigResult<LayoutSettings> {
        let path = self.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file missing, using defaults");
            return Ok(LayoutSettings::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        let settings: LayoutSettings = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Writes `settings`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or cannot be written.
    pub fn save_settings(&self, settings: &LayoutSettings) -> ConfigResult<PathBuf> {
        settings.validate()?;
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| ConfigError::Write(format!("{}: {e}", self.config_dir.display())))?;
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        let path = self.settings_path();
        fs::write(&path, content)
            .map_err(|e| ConfigError::Write(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(path)
    }
}
