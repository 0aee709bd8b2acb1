//! CLI argument definitions using clap.

use std::time::Duration;

use clap::Parser;

/// Ask every Sonoff-Tasmota device on an MQTT broker for its firmware version
#[derive(Parser, Debug)]
#[command(name = "sonoff-fw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MQTT broker hostname
    #[arg(long, env = "SONOFF_MQTT_HOST")]
    pub hostname: String,

    /// MQTT broker port
    #[arg(long, default_value = "1883", env = "SONOFF_MQTT_PORT")]
    pub port: u16,

    /// MQTT broker username
    #[arg(long, env = "SONOFF_MQTT_USERNAME")]
    pub username: Option<String>,

    /// MQTT broker password
    #[arg(long, env = "SONOFF_MQTT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// How long to collect status replies, in seconds
    #[arg(short, long, default_value = "1", value_parser = parse_wait, env = "SONOFF_DISCOVERY_WAIT")]
    pub wait: Duration,

    /// MQTT client identifier (default: sonoff-fw-<pid>)
    #[arg(long)]
    pub client_id: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_wait(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{}' must be a non-negative number of seconds", value));
    }
    Ok(Duration::from_secs_f64(seconds))
}
