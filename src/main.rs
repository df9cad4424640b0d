//! Sample service instrumented by the request-timing collector.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌────────────────┐    ┌──────────────┐
//!     ──────────────────▶│ LatencyRecorder│───▶│ axum Router  │
//!                        │  (middleware)  │◀───│  (handlers)  │
//!     ◀──────────────────│                │    └──────────────┘
//!     Client Response    └───────┬────────┘
//!                                │ Measurement (bounded queue)
//!                                ▼
//!                        ┌────────────────┐    ┌──────────────┐
//!                        │MetricPublisher │───▶│ MetricSink   │───▶ Metrics
//!                        │ (single task)  │    │ http / log   │     Backend
//!                        └────────────────┘    └──────────────┘
//! ```
//!
//! Configuration is read from the TOML file named by `ROUTE_METRICS_CONFIG`,
//! or defaults when unset.

use std::path::PathBuf;
use std::time::Duration;

use axum::{extract::Path, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use route_metrics::config::loader::load_config;
use route_metrics::lifecycle::shutdown_signal;
use route_metrics::observability::{logging, metrics};
use route_metrics::{CollectorConfig, ConfiguredSink, LatencyRecorder, MetricPublisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var_os("ROUTE_METRICS_CONFIG") {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => CollectorConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("route-metrics v0.1.0 starting");

    tracing::info!(
        namespace = %config.namespace,
        groups = config.groups.as_ref().map_or(0, Vec::len),
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let sink = ConfiguredSink::from_config(&config.sink)?;
    let publisher = MetricPublisher::from_config(&config, sink)?;
    let recorder = LatencyRecorder::new(publisher.sender(), &config.recorder);

    let app = build_app(&config, recorder);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    publisher.shutdown().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Build the sample application with the recorder innermost.
#[allow(deprecated)]
fn build_app(config: &CollectorConfig, recorder: LatencyRecorder) -> Router {
    recorder
        .instrument(sample_routes())
        .layer(TimeoutLayer::new(Duration::from_secs(config.listener.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
}

fn sample_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/users/{id}", get(user))
        .route("/api/health", get(|| async { "ok" }))
}

async fn user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "id": id }))
}
