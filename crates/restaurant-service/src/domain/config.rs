//! Service configuration with validation.
//!
//! Every value has a default matching the local development topology
//! (broker on :4000, this service on :8080) and can be overridden from the
//! environment or the command line.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Broker subscription configuration
    pub broker: BrokerConfig,
    /// Inbound request limits
    pub limits: LimitsConfig,
    /// Inbound timeout configuration
    pub timeouts: TimeoutConfig,
}

impl ServiceConfig {
    /// Build configuration from process environment variables.
    ///
    /// - `HOST`, `PORT`: listen address (default: 0.0.0.0:8080)
    /// - `BROKER_URL`: broker subscribe endpoint
    /// - `CALLBACK_URL`: URL advertised to the broker for event delivery
    /// - `SUBSCRIBE_TOPIC`: topic to register for (default: ORDER_CREATED)
    /// - `SUBSCRIBE_DELAY_MS`: warm-up delay before registering
    /// - `SUBSCRIBE_TIMEOUT_SECS`: deadline for the registration call
    /// - `REQUEST_TIMEOUT_SECS`: deadline for inbound requests
    /// - `MAX_EVENT_BYTES`: largest accepted event body
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] over an arbitrary lookup.
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        if let Some(host) = lookup("HOST").and_then(|v| v.trim().parse().ok()) {
            config.http.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse().ok()) {
            config.http.port = port;
        }
        if let Some(url) = lookup("BROKER_URL") {
            config.broker.subscribe_url = url;
        }
        if let Some(url) = lookup("CALLBACK_URL") {
            config.broker.callback_url = url;
        }
        if let Some(topic) = lookup("SUBSCRIBE_TOPIC") {
            config.broker.topic = topic;
        }
        if let Some(ms) = parsed("SUBSCRIBE_DELAY_MS") {
            config.broker.warmup_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parsed("SUBSCRIBE_TIMEOUT_SECS") {
            config.broker.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed("REQUEST_TIMEOUT_SECS") {
            config.timeouts.request = Duration::from_secs(secs);
        }
        if let Some(bytes) = parsed("MAX_EVENT_BYTES") {
            config.limits.max_event_size = bytes as usize;
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.broker.topic.trim().is_empty() {
            return Err(ConfigError::InvalidTopic);
        }

        validate_url("broker.subscribe_url", &self.broker.subscribe_url)?;
        validate_url("broker.callback_url", &self.broker.callback_url)?;
        validate_events_path(&self.events_path())?;

        if self.broker.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "broker request timeout cannot be 0".into(),
            ));
        }

        if self.broker.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "broker connect timeout cannot be 0".into(),
            ));
        }

        if self.timeouts.request.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if self.limits.max_event_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_event_size cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Path component of the callback URL; the event route is mounted there.
    pub fn events_path(&self) -> String {
        Url::parse(&self.broker.callback_url)
            .ok()
            .map(|url| url.path().to_string())
            .filter(|path| path != "/")
            .unwrap_or_else(|| DEFAULT_EVENTS_PATH.to_string())
    }
}

/// Route the broker pushes to when the callback URL carries no usable path.
pub const DEFAULT_EVENTS_PATH: &str = "/events";

/// Static menu route.
pub const MENU_PATH: &str = "/menu";

/// Liveness and subscription state route.
pub const HEALTH_PATH: &str = "/health";

/// The event route must not shadow a fixed route or read as a route pattern.
fn validate_events_path(path: &str) -> Result<(), ConfigError> {
    let field = "broker.callback_url";

    if path == MENU_PATH || path == HEALTH_PATH {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: format!("path '{}' is reserved", path),
        });
    }

    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: format!("path '{}' contains a route parameter", path),
        });
    }

    Ok(())
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            field,
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
        }
    }
}

/// Broker subscription configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Broker registration endpoint
    pub subscribe_url: String,
    /// Topic to register interest in
    pub topic: String,
    /// Externally reachable URL of this service's event endpoint
    pub callback_url: String,
    /// Delay before the one registration attempt
    #[serde(with = "humantime_serde")]
    pub warmup_delay: Duration,
    /// Total deadline for the registration call
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// TCP connect deadline for the registration call
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            subscribe_url: "http://localhost:4000/subscribe".to_string(),
            topic: "ORDER_CREATED".to_string(),
            callback_url: "http://localhost:8080/events".to_string(),
            warmup_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max event body size in bytes (default: 1MB)
    pub max_event_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_event_size: 1024 * 1024, // 1MB
        }
    }
}

/// Inbound timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for reading and handling one inbound request
    #[serde(with = "humantime_serde")]
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Topic is empty or whitespace
    #[error("topic cannot be empty")]
    InvalidTopic,
    /// URL does not parse or is not http(s)
    #[error("invalid url in {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
    /// Port 0 is reserved
    #[error("port cannot be 0")]
    InvalidPort,
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" must be checked before "s" and "m"
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| "invalid minutes")
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
