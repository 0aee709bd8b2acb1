//! Discover command implementation.

use sonoff_fw_core::{discover, SessionConfig};
use tracing::info;

use crate::cli::Cli;
use crate::error::Result;
use crate::output::get_formatter;

/// Run one discovery pass and print what answered
pub async fn run_discover(cli: Cli) -> Result<()> {
    let formatter = get_formatter(cli.json);
    let config = session_config(cli)?;

    info!(
        "Discovering devices on {} for {:.1} seconds...",
        config.broker(),
        config.discovery_wait().as_secs_f64()
    );

    let devices = discover(&config).await?;

    println!("{}", formatter.format_devices(&devices));

    Ok(())
}

fn session_config(cli: Cli) -> Result<SessionConfig> {
    let mut config = SessionConfig::new(cli.hostname, cli.port)?
        .with_credentials(cli.username, cli.password)
        .with_discovery_wait(cli.wait);

    if let Some(client_id) = cli.client_id {
        config = config.with_client_id(client_id)?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::error::{exit_codes, CliError};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sonoff-fw").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_session_config_from_args() {
        let cli = parse(&[
            "--hostname",
            "broker.local",
            "--port",
            "1884",
            "--username",
            "admin",
            "--password",
            "secret",
            "--wait",
            "3",
            "--client-id",
            "probe",
        ]);
        let config = session_config(cli).unwrap();
        assert_eq!(config.broker(), "broker.local:1884");
        assert_eq!(config.username(), Some("admin"));
        assert_eq!(config.password(), Some("secret"));
        assert_eq!(config.client_id(), "probe");
        assert_eq!(config.discovery_wait(), Duration::from_secs(3));
    }

    #[test]
    fn test_blank_hostname_is_invalid_args() {
        let cli = parse(&["--hostname", " "]);
        let err = session_config(cli).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[tokio::test]
    async fn test_unreachable_broker_exits_with_connection_error() {
        // Port 1 on loopback is not an MQTT broker.
        let cli = parse(&["--hostname", "127.0.0.1", "--port", "1", "--wait", "0"]);
        let err = run_discover(cli).await.unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::CONNECTION_ERROR);
    }

    #[tokio::test]
    async fn test_connection_failure_code_differs_from_usage_error() {
        let usage = Cli::try_parse_from(["sonoff-fw"]).unwrap_err();
        let cli = parse(&["--hostname", "127.0.0.1", "--port", "1", "--wait", "0"]);
        let err = run_discover(cli).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_ne!(err.exit_code(), usage.exit_code());
    }
}
