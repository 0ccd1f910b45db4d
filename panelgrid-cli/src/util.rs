//! Shared utility functions used across command modules.

use std::path::Path;

use panelgrid_core::config::{ConfigManager, LayoutSettings};
use panelgrid_core::tracing::{TracingLevel, init_tracing};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads the settings file, returning defaults when there is none.
pub fn load_settings(config_path: Option<&Path>) -> Result<LayoutSettings, CliError> {
    let manager = create_config_manager(config_path)?;
    Ok(manager.load_settings()?)
}

/// Sets up logging from the settings file and the `-v`/`--quiet` flags.
///
/// Settings that fail to load fall back to defaults here; the command that
/// needs them reports the error itself.
pub fn init_logging(config_path: Option<&Path>, verbose: u8, quiet: bool) {
    let settings = load_settings(config_path).unwrap_or_default();
    let mut config = settings.logging.tracing_config(verbose);
    if quiet {
        config = config.with_level(TracingLevel::Error);
    }
    if let Err(e) = init_tracing(&config) {
        if !quiet {
            eprintln!("Warning: logging disabled: {e}");
        }
    }
}

/// Reads a whole script from a file, or from stdin when `path` is `-`.
pub fn read_script(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).map_err(CliError::from);
    }
    std::fs::read_to_string(path).map_err(|e| {
        CliError::InvalidArgument(format!("cannot read script {}: {e}", path.display()))
    })
}
