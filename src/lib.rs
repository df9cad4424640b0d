//! HTTP request-timing collector.
//!
//! Wraps an axum router, times every routed request, classifies the matched
//! route template into an optional group, and publishes latency records to a
//! remote metrics backend from a single background task.
//!
//! ```ignore
//! let config = CollectorConfig::default();
//! let sink = ConfiguredSink::from_config(&config.sink)?;
//! let publisher = MetricPublisher::from_config(&config, sink)?;
//! let recorder = LatencyRecorder::new(publisher.sender(), &config.recorder);
//! let app = recorder.instrument(Router::new().route("/users/{id}", get(user)));
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod publisher;
pub mod routing;
pub mod sink;

pub use config::CollectorConfig;
pub use http::LatencyRecorder;
pub use publisher::MetricPublisher;
pub use routing::GroupClassifier;
pub use sink::{ConfiguredSink, MetricSink};
