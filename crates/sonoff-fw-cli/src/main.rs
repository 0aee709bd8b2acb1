//! sonoff-fw - report the firmware version of every Sonoff-Tasmota device on an MQTT broker.
//!
//! Broadcasts `Status 2` on the Tasmota group topic, listens for the replies for a
//! short window and prints one line per device.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::Cli;
use error::exit_codes;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match commands::run_discover(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if !e.is_logged() {
                eprintln!("Error: {}", e);
            }
            std::process::exit(e.exit_code());
        }
    }
}
