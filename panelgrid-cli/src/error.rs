//! CLI error types and exit codes.

use panelgrid_core::config::ConfigError;
use panelgrid_core::layout::LayoutError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, script syntax, IO or other errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Layout reference failure - a script named content, a group or a
    /// window the layout does not hold
    pub const LAYOUT_REFERENCE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Script parse or execution error on a given line
    #[error("Script error at line {line}: {message}")]
    Script {
        /// 1-based script line
        line: usize,
        /// Description of the failure
        message: String,
    },

    /// Layout operation failed
    #[error("Layout error at line {line}: {source}")]
    Layout {
        /// 1-based script line
        line: usize,
        /// Underlying layout error
        source: LayoutError,
    },

    /// Name used in a script is not known to the layout
    #[error("Unknown panel at line {line}: {name}")]
    UnknownPanel {
        /// 1-based script line
        line: usize,
        /// Panel name
        name: String,
    },

    /// Output serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Several script lines failed with `--keep-going`
    #[error("{count} script line(s) failed")]
    Failures {
        /// Number of failed lines
        count: usize,
        /// Exit code of the first failure
        code: i32,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, script syntax, serialization, IO)
    /// - 2: Layout reference failure (not found, detached content)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Layout { source, .. } => {
                if source.is_not_found() || matches!(source, LayoutError::ContentDetached(_)) {
                    exit_codes::LAYOUT_REFERENCE
                } else {
                    exit_codes::GENERAL_ERROR
                }
            }
            Self::UnknownPanel { .. } => exit_codes::LAYOUT_REFERENCE,
            Self::Failures { code, .. } => *code,
            Self::Config(_)
            | Self::Script { .. }
            | Self::Serialize(_)
            | Self::InvalidArgument(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
