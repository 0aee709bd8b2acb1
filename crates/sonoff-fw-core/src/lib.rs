//! Shared core library for discovering Sonoff-Tasmota firmware versions over MQTT.

pub mod config;
pub mod discovery;
pub mod error;
pub mod protocol;

pub use config::SessionConfig;
pub use discovery::{discover, DiscoveredDevice, DiscoveredDevices, DiscoverySession};
pub use error::{ConfigError, ConnectRefusal, CoreError, SessionError, StatusError};
