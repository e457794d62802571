//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees. Returns all
//! validation errors, not just the first, so a broken config can be fixed
//! in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SimulatorConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("rate_limit.max_requests must be at least 1")]
    ZeroMaxRequests,

    #[error("rate_limit.reset_window_secs must be at least 1")]
    ZeroResetWindow,

    #[error("timeouts.request_secs must be at least 1")]
    ZeroRequestTimeout,
}

/// Validate a parsed config. Pure function; collects every failure.
pub fn validate_config(config: &SimulatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::ZeroMaxRequests);
    }

    if config.rate_limit.reset_window_secs == 0 {
        errors.push(ValidationError::ZeroResetWindow);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
