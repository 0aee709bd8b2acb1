//! Broker session configuration.

use std::time::Duration;

use rumqttc::MqttOptions;

use crate::error::ConfigError;

/// Default MQTT broker port
pub const DEFAULT_PORT: u16 = 1883;

/// Default discovery window
pub const DEFAULT_DISCOVERY_WAIT: Duration = Duration::from_secs(1);

/// Keep-alive interval sent in CONNECT
pub const KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Immutable settings for one discovery session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    hostname: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    client_id: String,
    discovery_wait: Duration,
}

impl SessionConfig {
    /// Create a config for `hostname:port` with no credentials and the default window.
    pub fn new(hostname: impl Into<String>, port: u16) -> Result<Self, ConfigError> {
        let hostname = hostname.into().trim().to_string();
        if hostname.is_empty() {
            return Err(ConfigError::EmptyHostname);
        }
        if port == 0 {
            return Err(ConfigError::InvalidPort(port));
        }

        Ok(Self {
            hostname,
            port,
            username: None,
            password: None,
            client_id: default_client_id(),
            discovery_wait: DEFAULT_DISCOVERY_WAIT,
        })
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        if username.is_none() && password.is_some() {
            tracing::warn!("Ignoring password: no username given");
        }
        self.password = username.as_ref().and(password);
        self.username = username;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        if client_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "client-id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        self.client_id = client_id;
        Ok(self)
    }

    pub fn with_discovery_wait(mut self, wait: Duration) -> Self {
        self.discovery_wait = wait;
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn discovery_wait(&self) -> Duration {
        self.discovery_wait
    }

    /// `hostname:port`, for log and error messages.
    pub fn broker(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Build the rumqttc connection options for this session.
    pub fn mqtt_options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.hostname, self.port);
        options.set_keep_alive(KEEP_ALIVE);
        options.set_clean_session(true);

        if let Some(username) = &self.username {
            options.set_credentials(username, self.password.as_deref().unwrap_or_default());
        }

        options
    }
}

fn default_client_id() -> String {
    format!("sonoff-fw-{}", std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new("broker.local", DEFAULT_PORT).unwrap();
        assert_eq!(config.hostname(), "broker.local");
        assert_eq!(config.port(), 1883);
        assert_eq!(config.username(), None);
        assert_eq!(config.discovery_wait(), Duration::from_secs(1));
        assert!(config.client_id().starts_with("sonoff-fw-"));
        assert_eq!(config.broker(), "broker.local:1883");
    }

    #[test]
    fn test_rejects_empty_hostname() {
        assert!(matches!(
            SessionConfig::new("  ", 1883),
            Err(ConfigError::EmptyHostname)
        ));
    }

    #[test]
    fn test_rejects_port_zero() {
        assert!(matches!(
            SessionConfig::new("localhost", 0),
            Err(ConfigError::InvalidPort(0))
        ));
    }

    #[test]
    fn test_password_without_username_is_dropped() {
        let config = SessionConfig::new("localhost", 1883)
            .unwrap()
            .with_credentials(None, Some("secret".to_string()));
        assert_eq!(config.username(), None);
        assert_eq!(config.password(), None);
    }

    #[test]
    fn test_credentials_kept() {
        let config = SessionConfig::new("localhost", 1883)
            .unwrap()
            .with_credentials(Some("admin".to_string()), Some("secret".to_string()));
        assert_eq!(config.username(), Some("admin"));
        assert_eq!(config.password(), Some("secret"));
    }

    #[test]
    fn test_mqtt_options() {
        let config = SessionConfig::new("localhost", 1884)
            .unwrap()
            .with_client_id("probe")
            .unwrap();
        let options = config.mqtt_options();
        assert_eq!(options.client_id(), "probe");
        assert_eq!(options.broker_address(), ("localhost".to_string(), 1884));
        assert_eq!(options.keep_alive(), KEEP_ALIVE);
    }

    #[test]
    fn test_rejects_empty_client_id() {
        let config = SessionConfig::new("localhost", 1883).unwrap();
        assert!(config.with_client_id("").is_err());
    }
}
