//! Measurement and metric record types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timing of one completed, route-matched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Route template the router matched (e.g. `/users/{id}`).
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// Wall-clock time spent dispatching the request.
    pub latency: Duration,
    /// When dispatch began.
    pub observed_at: DateTime<Utc>,
}

/// Unit attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Milliseconds,
}

/// A (name, value) tag on a metric record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Backend-bound metric datum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricRecord {
    #[serde(rename = "MetricName")]
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    pub timestamp: DateTime<Utc>,
    pub unit: Unit,
    pub value: f64,
}
