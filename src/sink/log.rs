//! Sink that writes batches to the log. Used when no backend is configured.

use crate::publisher::types::MetricRecord;
use crate::sink::{MetricSink, SinkError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MetricSink for LogSink {
    async fn publish_batch(&self, namespace: &str, records: &[MetricRecord]) -> Result<(), SinkError> {
        let batch = serde_json::to_string(records)?;
        tracing::info!(namespace = %namespace, records = records.len(), batch = %batch, "Metric batch");
        Ok(())
    }
}
