//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sizes > 0)
//! - Check the downstream target is a usable URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::HostConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("downstream.url '{0}' must start with http:// or https://")]
    InvalidDownstreamUrl(String),

    #[error("timeouts.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("accumulator.growth_bytes must be greater than zero when growth is enabled")]
    ZeroGrowth,

    #[error("accumulator.reclaim_interval_secs must be greater than zero")]
    ZeroReclaimInterval,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let url = &config.downstream.url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(ValidationError::InvalidDownstreamUrl(url.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "request_secs",
        });
    }
    if config.timeouts.dispatch_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "dispatch_secs",
        });
    }

    if config.accumulator.enable_growth && config.accumulator.growth_bytes == 0 {
        errors.push(ValidationError::ZeroGrowth);
    }
    if config.accumulator.reclaim_interval_secs == 0 {
        errors.push(ValidationError::ZeroReclaimInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
