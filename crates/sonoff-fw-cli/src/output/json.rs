//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;
use sonoff_fw_core::{DiscoveredDevice, DiscoveredDevices};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &DiscoveredDevices) -> String {
        let list: Vec<&DiscoveredDevice> = devices.iter().collect();
        Self::to_json(&json!({
            "devices": list,
            "count": list.len()
        }))
    }
}
