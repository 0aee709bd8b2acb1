//! `STATUS2` firmware report parsing.
//!
//! Tasmota answers `Status 2` with a payload like:
//!
//! ```json
//! {"StatusFWR":{"Version":"9.5.0(tasmota)","BuildDateTime":"2021-06-17T08:29:14",
//!  "Boot":31,"Core":"2_7_4_9","SDK":"2.2.2-dev(38a443e)","Hardware":"ESP8266EX"}}
//! ```
//!
//! Only `Version` is required; everything else is carried along when present.

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

#[derive(Debug, Deserialize)]
struct Status2Reply {
    #[serde(rename = "StatusFWR")]
    firmware: FirmwareStatus,
}

/// Contents of the `StatusFWR` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirmwareStatus {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
    #[serde(default, rename = "SDK", skip_serializing_if = "Option::is_none")]
    pub sdk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
}

/// Decode a `STATUS2` payload published by `device`.
pub fn parse_firmware_status(payload: &[u8], device: &str) -> Result<FirmwareStatus, StatusError> {
    let reply: Status2Reply =
        serde_json::from_slice(payload).map_err(|e| StatusError::InvalidPayload {
            device: device.to_string(),
            message: e.to_string(),
        })?;
    Ok(reply.firmware)
}
