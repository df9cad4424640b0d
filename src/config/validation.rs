//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, timeouts > 0)
//! - Compile every group pattern so bad regexes surface before startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CollectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{CollectorConfig, OverflowPolicy};
use crate::routing::matcher::{PatternError, PatternMatcher};

/// A single semantic problem with a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("namespace must not be empty")]
    EmptyNamespace,

    #[error("queue capacity must be greater than zero")]
    ZeroQueueCapacity,

    #[error("queue wait_timeout_ms must be greater than zero when overflow = \"wait\"")]
    ZeroWaitTimeout,

    #[error("sink timeout_ms must be greater than zero")]
    ZeroSinkTimeout,

    #[error("sink endpoint '{endpoint}' is not a valid URL: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &CollectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.namespace.trim().is_empty() {
        errors.push(ValidationError::EmptyNamespace);
    }

    if config.queue.capacity == 0 {
        errors.push(ValidationError::ZeroQueueCapacity);
    }

    if config.queue.overflow == OverflowPolicy::Wait && config.queue.wait_timeout_ms == 0 {
        errors.push(ValidationError::ZeroWaitTimeout);
    }

    if config.sink.timeout_ms == 0 {
        errors.push(ValidationError::ZeroSinkTimeout);
    }

    if let Some(endpoint) = &config.sink.endpoint {
        if let Err(e) = url::Url::parse(endpoint) {
            errors.push(ValidationError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            });
        }
    }

    for group in config.groups.iter().flatten() {
        if let Err(e) = PatternMatcher::compile(group) {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
