//! Tasmota MQTT protocol: topics and status payloads.

pub mod status;
pub mod topics;

pub use status::{parse_firmware_status, FirmwareStatus};
pub use topics::{parse_status_topic, STATUS_COMMAND_TOPIC, STATUS_QUERY_PAYLOAD, STATUS_SUBSCRIPTION};
