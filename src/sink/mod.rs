//! Remote metrics sink subsystem.
//!
//! # Data Flow
//! ```text
//! publisher task
//!     → MetricSink::publish_batch(namespace, records)
//!     → http.rs (JSON batch POSTed to the metrics backend)
//!       or log.rs (batch written as a structured log event)
//! ```
//!
//! # Design Decisions
//! - Write-only: the sink is never queried
//! - One call per measurement; the publisher owns timeouts
//! - Errors are returned, never retried here

pub mod http;
pub mod log;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::{ConfigError, SinkConfig};
use crate::publisher::types::MetricRecord;

pub use self::http::HttpSink;
pub use self::log::LogSink;

/// Error returned by a sink write.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to encode batch: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Write-only time-series backend.
pub trait MetricSink: Send + Sync + 'static {
    /// Write one batch of records under `namespace`.
    fn publish_batch(
        &self,
        namespace: &str,
        records: &[MetricRecord],
    ) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Sink selected from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    Http(HttpSink),
    Log(LogSink),
}

impl ConfiguredSink {
    /// HTTP sink when an endpoint is configured, log sink otherwise.
    pub fn from_config(config: &SinkConfig) -> Result<Self, ConfigError> {
        match &config.endpoint {
            Some(_) => Ok(Self::Http(HttpSink::from_config(config)?)),
            None => Ok(Self::Log(LogSink)),
        }
    }
}

impl MetricSink for ConfiguredSink {
    async fn publish_batch(&self, namespace: &str, records: &[MetricRecord]) -> Result<(), SinkError> {
        match self {
            Self::Http(sink) => sink.publish_batch(namespace, records).await,
            Self::Log(sink) => sink.publish_batch(namespace, records).await,
        }
    }
}
