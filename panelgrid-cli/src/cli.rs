//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// panelgrid command-line interface for driving tab/panel layouts
#[derive(Parser)]
#[command(name = "panelgrid-cli")]
#[command(author, version, about = "panelgrid command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "PANELGRID_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a layout script and print the resulting layout
    #[command(about = "Execute a layout script against a fresh layout")]
    Run {
        /// Script file, or `-` to read from stdin
        script: PathBuf,

        /// Output format for the final layout
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,

        /// Also print the layout events fired while running
        #[arg(short, long)]
        events: bool,

        /// Report failing lines and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// Classify a drop point inside a group
    #[command(about = "Show which drop zone a point falls in")]
    Classify {
        /// Group width in pixels
        #[arg(long)]
        width: i32,

        /// Group height in pixels
        #[arg(long)]
        height: i32,

        /// Horizontal offset from the group's left edge
        #[arg(short, long, allow_hyphen_values = true)]
        x: i32,

        /// Vertical offset from the group's top edge
        #[arg(short, long, allow_hyphen_values = true)]
        y: i32,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Manage the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Settings file subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Print the settings file path
    Path,
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (an indented tree for layouts)
    #[value(alias = "tree")]
    Text,
    /// Output as JSON
    Json,
}
