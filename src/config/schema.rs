//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the collector.
//! All types derive Serde traits so embedding applications can either build
//! them in code or deserialize them from a TOML document.

use serde::{Deserialize, Serialize};

/// Root configuration for the request-timing collector.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Namespace every emitted metric is published under.
    pub namespace: String,

    /// Which record set is produced per request.
    pub output: OutputShape,

    /// Ordered group definitions. `None` skips classification entirely.
    pub groups: Option<Vec<GroupConfig>>,

    /// Handoff queue between request handlers and the publisher.
    pub queue: QueueConfig,

    /// Remote sink settings.
    pub sink: SinkConfig,

    /// Per-request recorder settings.
    pub recorder: RecorderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Listener used by the bootstrap binary.
    pub listener: ListenerConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            namespace: "RouteMetrics".to_string(),
            output: OutputShape::default(),
            groups: None,
            queue: QueueConfig::default(),
            sink: SinkConfig::default(),
            recorder: RecorderConfig::default(),
            observability: ObservabilityConfig::default(),
            listener: ListenerConfig::default(),
        }
    }
}

/// Shape of the record set emitted for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// One "Latency" record dimensioned by `Path` and `Method`.
    Ungrouped,
    /// "Latency per Request", dimensionless "Latency", and an optional
    /// "Latency per Group" record.
    #[default]
    Grouped,
}

/// A named group of route templates.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GroupConfig {
    /// Value emitted in the `Group` dimension.
    pub name: String,

    /// Regular expressions that must ALL match the route template.
    pub patterns: Vec<String>,

    /// Regular expressions of which NONE may match the route template.
    pub not_patterns: Vec<String>,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.not_patterns.push(pattern.into());
        self
    }
}

/// What a request handler does when the handoff queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop the measurement immediately.
    #[default]
    Drop,
    /// Wait for capacity without a deadline.
    Block,
    /// Wait for capacity up to `wait_timeout_ms`, then drop.
    Wait,
}

/// Handoff queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of measurements buffered ahead of the publisher.
    pub capacity: usize,

    /// Full-queue behavior.
    pub overflow: OverflowPolicy,

    /// Deadline for `OverflowPolicy::Wait`, in milliseconds.
    pub wait_timeout_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            overflow: OverflowPolicy::Drop,
            wait_timeout_ms: 50,
        }
    }
}

/// Remote sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    /// HTTP endpoint receiving metric batches. `None` logs batches instead.
    pub endpoint: Option<String>,

    /// Backend region. Falls back to the `region_env` variable.
    pub region: Option<String>,

    /// Environment variable holding the region.
    pub region_env: String,

    /// Upper bound on a single publish call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: None,
            region_env: "AWS_REGION".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Recorder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Treat catch-all templates (`{*rest}`) as unresolvable.
    pub skip_catch_all: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            skip_catch_all: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Expose the collector's own counters on a Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Prometheus endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}
