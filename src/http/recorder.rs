//! Per-request latency recording middleware.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use chrono::Utc;

use crate::config::RecorderConfig;
use crate::http::template::TemplateResolver;
use crate::observability::metrics;
use crate::publisher::{Measurement, MeasurementSender};

/// State shared by every instrumented route.
#[derive(Debug, Clone)]
pub struct LatencyRecorder {
    sender: MeasurementSender,
    resolver: TemplateResolver,
}

impl LatencyRecorder {
    pub fn new(sender: MeasurementSender, config: &RecorderConfig) -> Self {
        Self {
            sender,
            resolver: TemplateResolver::new(config.skip_catch_all),
        }
    }

    /// Time every route of `router` with this recorder.
    pub fn instrument<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self, record_latency))
    }

    async fn submit(&self, measurement: Measurement) {
        match self.sender.submit(measurement).await {
            Ok(()) => metrics::record_measurement_accepted(),
            Err(e) => {
                tracing::debug!(path = %e.measurement().path, reason = e.reason(), "Dropped measurement");
                metrics::record_measurement_dropped(e.reason());
            }
        }
    }
}

/// Wrap `router` so every routed request produces one measurement.
pub fn instrument<S>(router: Router<S>, recorder: LatencyRecorder) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    recorder.instrument(router)
}

/// Middleware function timing the inner dispatch.
///
/// The response is passed through untouched; measurement failures are
/// logged and counted only.
pub async fn record_latency(
    State(recorder): State<LatencyRecorder>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let observed_at = Utc::now();
    let method = request.method().to_string();
    // `next` consumes the request, so keep the router's match for afterwards.
    let matched = request.extensions().get::<MatchedPath>().cloned();

    let start = Instant::now();
    let response = next.run(request).await;
    let latency = start.elapsed();

    match recorder.resolver.resolve(matched.as_ref(), response.status()) {
        Some(path) => {
            recorder
                .submit(Measurement {
                    path,
                    method,
                    latency,
                    observed_at,
                })
                .await;
        }
        None => {
            tracing::debug!(
                method = %method,
                status = response.status().as_u16(),
                "No route template, request not measured"
            );
            metrics::record_unresolved_request();
        }
    }

    response
}
