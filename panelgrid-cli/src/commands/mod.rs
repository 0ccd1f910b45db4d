//! Command handler modules for the CLI.

mod classify;
mod config;
mod run;

use std::path::Path;

use crate::cli::{Commands, ConfigCommands};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            script,
            format,
            events,
            keep_going,
        } => run::cmd_run(
            config_path,
            &script,
            run::RunOptions {
                format,
                events,
                keep_going,
            },
        ),
        Commands::Classify {
            width,
            height,
            x,
            y,
            format,
        } => classify::cmd_classify(config_path, width, height, x, y, format),
        Commands::Config(action) => match action {
            ConfigCommands::Show => config::cmd_show(config_path),
            ConfigCommands::Init { force } => config::cmd_init(config_path, force),
            ConfigCommands::Path => config::cmd_path(config_path),
        },
    }
}
