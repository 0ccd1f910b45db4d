//! Settings file commands.

use std::path::Path;

use panelgrid_core::config::LayoutSettings;

use crate::error::CliError;
use crate::util::create_config_manager;

/// Show command handler: prints the effective settings as TOML
pub fn cmd_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let settings = config_manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;

    let toml = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::Serialize(format!("Failed to serialize settings: {e}")))?;
    print!("{toml}");
    Ok(())
}

/// Init command handler: writes the default settings file
pub fn cmd_init(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let path = config_manager.settings_path();

    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "Settings file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    let written = config_manager
        .save_settings(&LayoutSettings::default())
        .map_err(|e| CliError::Config(format!("Failed to save settings: {e}")))?;
    tracing::info!(path = %written.display(), "wrote default settings");
    println!("Wrote default settings to {}", written.display());
    Ok(())
}

/// Path command handler
pub fn cmd_path(config_path: Option<&Path>) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    println!("{}", config_manager.settings_path().display());
    Ok(())
}
