//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every section has a `Default` so a minimal config stays valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the simulator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Rate window configuration.
    pub rate_limit: RateLimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Rate window configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Events allowed before the window blocks.
    pub max_requests: u32,

    /// Countdown length once blocked, in seconds.
    pub reset_window_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            reset_window_secs: 30,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Expose a Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_window() {
        let config = SimulatorConfig::default();
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.reset_window_secs, 30);
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let config: SimulatorConfig = toml::from_str("").expect("empty config is valid");
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: SimulatorConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 3
            "#,
        )
        .expect("partial config is valid");
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.reset_window_secs, 30);
    }
}
