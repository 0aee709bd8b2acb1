//! Topic names used by the Tasmota status exchange.

use std::sync::LazyLock;

use regex::Regex;

/// Group topic every Sonoff listens on for commands
pub const STATUS_COMMAND_TOPIC: &str = "cmnd/sonoffs/status";

/// `Status 2` asks for the firmware report
pub const STATUS_QUERY_PAYLOAD: &str = "2";

/// Wildcard covering all status replies
pub const STATUS_SUBSCRIPTION: &str = "stat/#";

static STATUS2_TOPIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^stat/([^/]+)/STATUS2$").expect("valid STATUS2 topic regex"));

/// Extract the device id from a `stat/<device>/STATUS2` topic.
///
/// Returns `None` for any other topic.
pub fn parse_status_topic(topic: &str) -> Option<&str> {
    STATUS2_TOPIC
        .captures(topic)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
