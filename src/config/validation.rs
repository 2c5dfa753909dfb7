//! Configuration validation.
//!
//! Serde covers syntax; this covers values. All problems are collected so a
//! bad file can be fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("limits.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
