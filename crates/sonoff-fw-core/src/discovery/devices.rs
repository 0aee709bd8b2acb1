//! Registry of devices that answered the status query.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::StatusError;
use crate::protocol::{parse_firmware_status, parse_status_topic, FirmwareStatus};

/// A device that reported its firmware.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredDevice {
    pub id: String,
    pub firmware: FirmwareStatus,
    pub last_seen: DateTime<Utc>,
}

impl DiscoveredDevice {
    pub fn version(&self) -> &str {
        &self.firmware.version
    }
}

/// Devices keyed by id, in order of first arrival.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredDevices {
    devices: IndexMap<String, DiscoveredDevice>,
}

impl DiscoveredDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one inbound message.
    ///
    /// Returns `Ok(None)` when the topic is not a `STATUS2` reply. A later reply
    /// from the same device replaces the earlier one but keeps its position.
    pub fn handle_status_message(
        &mut self,
        topic: &str,
        payload: &[u8],
    ) -> Result<Option<&DiscoveredDevice>, StatusError> {
        let Some(id) = parse_status_topic(topic) else {
            return Ok(None);
        };

        let firmware = parse_firmware_status(payload, id)?;
        let device = DiscoveredDevice {
            id: id.to_string(),
            firmware,
            last_seen: Utc::now(),
        };

        let (index, _) = self.devices.insert_full(device.id.clone(), device);
        Ok(self.devices.get_index(index).map(|(_, device)| device))
    }

    pub fn get(&self, id: &str) -> Option<&DiscoveredDevice> {
        self.devices.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredDevice> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
