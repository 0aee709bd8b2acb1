//! Output formatting for CLI results.

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;

use sonoff_fw_core::DiscoveredDevices;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the devices found during one discovery pass
    fn format_devices(&self, devices: &DiscoveredDevices) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TextOutput::new())
    }
}
