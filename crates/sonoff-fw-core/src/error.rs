//! Error types for sonoff-fw core.

use rumqttc::ConnectReturnCode;
use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a broker gives for rejecting a CONNECT.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConnectRefusal {
    #[error("Incorrect protocol version")]
    BadProtocolVersion,

    #[error("Invalid client identifier")]
    InvalidClientId,

    #[error("Server unavailable")]
    ServerUnavailable,

    #[error("Unauthenticated")]
    BadCredentials,

    #[error("Unauthorised")]
    NotAuthorized,
}

impl ConnectRefusal {
    /// Map a CONNACK return code. `None` means the connection was accepted.
    pub fn from_return_code(code: ConnectReturnCode) -> Option<Self> {
        match code {
            ConnectReturnCode::Success => None,
            ConnectReturnCode::RefusedProtocolVersion => Some(Self::BadProtocolVersion),
            ConnectReturnCode::BadClientId => Some(Self::InvalidClientId),
            ConnectReturnCode::ServiceUnavailable => Some(Self::ServerUnavailable),
            ConnectReturnCode::BadUserNamePassword => Some(Self::BadCredentials),
            ConnectReturnCode::NotAuthorized => Some(Self::NotAuthorized),
        }
    }
}

/// Broker session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection refused: {0}")]
    Refused(ConnectRefusal),

    #[error("Connection to {broker} failed: {source}")]
    Transport {
        broker: String,
        #[source]
        source: rumqttc::ConnectionError,
    },

    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),
}

/// Status reply errors
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Invalid status payload from {device}: {message}")]
    InvalidPayload { device: String, message: String },
}

/// Session configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Broker hostname must not be empty")]
    EmptyHostname,

    #[error("Invalid broker port: {0}")]
    InvalidPort(u16),

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}
