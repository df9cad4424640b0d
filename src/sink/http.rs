//! JSON-over-HTTP metrics backend client.

use serde::Serialize;
use url::Url;

use crate::config::validation::ValidationError;
use crate::config::{ConfigError, SinkConfig};
use crate::publisher::types::MetricRecord;
use crate::sink::{MetricSink, SinkError};

/// Header carrying the backend region.
pub const REGION_HEADER: &str = "x-metrics-region";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PutMetricData<'a> {
    namespace: &'a str,
    metric_data: &'a [MetricRecord],
}

/// Publishes batches as `{"Namespace", "MetricData"}` JSON documents.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: Url,
    region: Option<String>,
}

impl HttpSink {
    pub fn new(endpoint: Url, region: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, region)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url, region: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            region,
        }
    }

    /// Build from configuration, resolving the region from the environment
    /// when it is not set explicitly.
    pub fn from_config(config: &SinkConfig) -> Result<Self, ConfigError> {
        let raw = config.endpoint.as_deref().unwrap_or_default();
        let endpoint = Url::parse(raw).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidEndpoint {
                endpoint: raw.to_string(),
                reason: e.to_string(),
            }])
        })?;

        let region = config
            .region
            .clone()
            .or_else(|| std::env::var(&config.region_env).ok())
            .filter(|r| !r.is_empty());

        tracing::info!(endpoint = %endpoint, region = ?region, "HTTP metric sink configured");
        Ok(Self::new(endpoint, region))
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl MetricSink for HttpSink {
    async fn publish_batch(&self, namespace: &str, records: &[MetricRecord]) -> Result<(), SinkError> {
        let body = serde_json::to_vec(&PutMetricData {
            namespace,
            metric_data: records,
        })?;

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(region) = &self.region {
            request = request.header(REGION_HEADER, region);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SinkError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
