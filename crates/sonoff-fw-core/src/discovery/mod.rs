//! MQTT device discovery module.
//!
//! Provides the discovered-device registry and the broker session that fills it.

pub mod devices;
pub mod session;

pub use devices::{DiscoveredDevice, DiscoveredDevices};
pub use session::{discover, DiscoverySession};
