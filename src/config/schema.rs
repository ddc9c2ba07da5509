//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when the telemetry connection string is
/// not present in the config file.
pub const TELEMETRY_ENV_VAR: &str = "TELEMETRY_CONNECTION_STRING";

/// Root configuration for the function host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Accumulation buffer settings.
    pub accumulator: AccumulatorConfig,

    /// Downstream dispatch settings.
    pub downstream: DownstreamConfig,

    /// Telemetry settings.
    pub telemetry: TelemetryConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Outbound dispatch timeout in seconds.
    pub dispatch_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            dispatch_secs: 5,
        }
    }
}

/// Accumulation buffer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    /// Grow the buffer on each `/http1` request (memory-pressure demo).
    ///
    /// The source behavior varied between runs; this makes the choice
    /// explicit instead of baking in one variant.
    pub enable_growth: bool,

    /// Bytes appended per request when growth is enabled.
    pub growth_bytes: usize,

    /// Seconds between scheduled reclaim runs.
    pub reclaim_interval_secs: u64,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            enable_growth: false,
            growth_bytes: 1024 * 1024,
            reclaim_interval_secs: 60,
        }
    }
}

/// Downstream dispatch settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Target URL for the `/http2` dispatch chain.
    pub url: String,

    /// Append a freshly generated correlation token to the dispatch path.
    pub suffix_correlation_token: bool,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8081/api/http1".to_string(),
            suffix_correlation_token: true,
        }
    }
}

/// Telemetry settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Connection string for the telemetry backend.
    ///
    /// Falls back to the `TELEMETRY_CONNECTION_STRING` environment variable;
    /// absence of both is fatal at startup.
    pub connection_string: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            log_level: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Resolve the connection string from config or environment.
    pub fn resolve_connection_string(&self) -> Option<String> {
        self.connection_string
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                std::env::var(TELEMETRY_ENV_VAR)
                    .ok()
                    .filter(|s| !s.is_empty())
            })
    }
}
