//! The collector's own metrics.
//!
//! # Metrics
//! - `route_metrics_measurements_total` (counter): measurements accepted by the queue
//! - `route_metrics_measurements_dropped_total` (counter): by `reason`
//! - `route_metrics_unresolved_requests_total` (counter): requests with no route template
//! - `route_metrics_publish_total` (counter): publish calls by `outcome`
//! - `route_metrics_publish_duration_seconds` (histogram): sink write latency
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op until a recorder is installed
//! - Prometheus exposition is optional

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_measurement_accepted() {
    counter!("route_metrics_measurements_total").increment(1);
}

pub fn record_measurement_dropped(reason: &'static str) {
    counter!("route_metrics_measurements_dropped_total", "reason" => reason).increment(1);
}

pub fn record_unresolved_request() {
    counter!("route_metrics_unresolved_requests_total").increment(1);
}

pub fn record_publish(outcome: &'static str, start: Instant) {
    counter!("route_metrics_publish_total", "outcome" => outcome).increment(1);
    histogram!("route_metrics_publish_duration_seconds").record(start.elapsed().as_secs_f64());
}
