//! panelgrid CLI - scriptable host for the panelgrid layout engine
//!
//! Runs layout scripts against a `PanelTree`, classifies drop points and
//! manages the settings file.

mod cli;
mod commands;
mod error;
mod format;
mod script;
mod util;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    util::init_logging(config_path, cli.verbose, cli.quiet);

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
