//! Plain-text output for CLI.

use sonoff_fw_core::DiscoveredDevices;

use super::OutputFormatter;

const HEADER: &str = "Discovered the following devices:";

pub struct TextOutput;

impl TextOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextOutput {
    fn format_devices(&self, devices: &DiscoveredDevices) -> String {
        let mut lines = vec![HEADER.to_string()];

        for device in devices.iter() {
            lines.push(format!("{}: FW Version: {}", device.id, device.version()));
        }

        lines.join("\n")
    }
}
