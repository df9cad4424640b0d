//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tokio::net::TcpListener;

use route_metrics::publisher::{Measurement, MetricRecord};
use route_metrics::sink::{MetricSink, SinkError};

/// One batch as seen by a sink.
#[derive(Debug, Clone)]
pub struct Batch {
    pub namespace: String,
    pub records: Vec<MetricRecord>,
}

/// In-memory sink. Calls listed in `fail_on` (1-based) return an error.
#[derive(Clone, Default)]
pub struct RecordingSink {
    batches: Arc<Mutex<Vec<Batch>>>,
    calls: Arc<AtomicUsize>,
    fail_on: Arc<Vec<usize>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(calls: Vec<usize>) -> Self {
        Self {
            fail_on: Arc::new(calls),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetricSink for RecordingSink {
    async fn publish_batch(&self, namespace: &str, records: &[MetricRecord]) -> Result<(), SinkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on.contains(&call) {
            return Err(SinkError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        self.batches.lock().unwrap().push(Batch {
            namespace: namespace.to_string(),
            records: records.to_vec(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub fn measurement(method: &str, path: &str, latency: Duration) -> Measurement {
    Measurement {
        path: path.into(),
        method: method.into(),
        latency,
        observed_at: Utc::now(),
    }
}

/// A request received by [`start_collecting_backend`].
#[derive(Debug, Clone)]
pub struct Received {
    pub region: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    received: Arc<Mutex<Vec<Received>>>,
    status: StatusCode,
}

/// Start a local metrics backend answering every POST to `/metrics` with `status`.
#[allow(dead_code)]
pub async fn start_collecting_backend(status: StatusCode) -> (SocketAddr, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        received: received.clone(),
        status,
    };

    let app = Router::new()
        .route(
            "/metrics",
            post(
                |State(state): State<BackendState>, headers: HeaderMap, body: String| async move {
                    let region = headers
                        .get("x-metrics-region")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
                    state.received.lock().unwrap().push(Received { region, body });
                    state.status
                },
            ),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, received)
}
