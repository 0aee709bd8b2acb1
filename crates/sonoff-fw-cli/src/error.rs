//! Error types for the sonoff-fw CLI.
//!
//! CliError wraps CoreError from the shared library and maps it to exit codes.

use sonoff_fw_core::error::CoreError;
use thiserror::Error;

pub use sonoff_fw_core::error::{ConfigError, SessionError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    /// Distinct from clap's usage-error code (2)
    pub const CONNECTION_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Session(_) => exit_codes::CONNECTION_ERROR,
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
            },
            CliError::Other(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Session failures are logged where they happen.
    pub fn is_logged(&self) -> bool {
        matches!(self, CliError::Core(CoreError::Session(_)))
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Core(CoreError::Session(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
