//! Log output setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::CliError;

/// Install a stderr subscriber. `RUST_LOG` overrides the level picked by `--verbose`.
pub fn init(verbose: bool) -> Result<(), CliError> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
        .map_err(|e| CliError::Other(format!("Failed to set up logging: {}", e)))
}
