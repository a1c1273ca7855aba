//! Configuration types for the JSON-RPC client

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout configurations (applied by the HTTP transport)
    pub timeouts: TimeoutConfig,

    /// Connection configurations
    pub connection: ConnectionConfig,

    /// Request id assignment
    pub ids: IdConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Timeout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection timeout
    #[serde(with = "duration_serde")]
    pub connect: Duration,

    /// Whole-request timeout
    #[serde(with = "duration_serde")]
    pub request: Duration,
}

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// User agent string
    pub user_agent: Option<String>,

    /// Headers sent with every request, in addition to ones set at runtime
    pub headers: BTreeMap<String, String>,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Idle connection timeout
    #[serde(with = "duration_serde")]
    pub pool_idle_timeout: Duration,
}

/// Request id assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Id given to the first request
    pub initial_id: i64,

    /// Whether each request advances the id
    pub auto_increment: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether to log request bodies at debug level
    pub log_requests: bool,

    /// Whether to log response bodies at debug level
    pub log_responses: bool,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(format!("turul-json-rpc-client/{}", env!("CARGO_PKG_VERSION"))),
            headers: BTreeMap::new(),
            pool_max_idle_per_host: 5,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            initial_id: 0,
            auto_increment: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_requests: true,
            log_responses: true,
        }
    }
}

// Durations are written as whole milliseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.ids.initial_id, 0);
        assert!(config.ids.auto_increment);
        assert_eq!(config.timeouts.request, Duration::from_secs(30));
        assert!(config.connection.headers.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "timeouts": {"request": 1500},
            "ids": {"initial_id": 100},
            "connection": {"headers": {"x-tenant": "acme"}}
        }))
        .unwrap();

        assert_eq!(config.timeouts.request, Duration::from_millis(1500));
        assert_eq!(config.timeouts.connect, Duration::from_secs(10));
        assert_eq!(config.ids.initial_id, 100);
        assert!(config.ids.auto_increment);
        assert_eq!(
            config.connection.headers.get("x-tenant").map(String::as_str),
            Some("acme")
        );
        assert!(config.logging.log_responses);
    }
}
