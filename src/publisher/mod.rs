//! Metric publishing subsystem.
//!
//! # Data Flow
//! ```text
//! LatencyRecorder (one per request, concurrent)
//!     → queue.rs (bounded mpsc, overflow policy)
//!     → worker.rs (single consumer task)
//!         → routing::GroupClassifier (optional group)
//!         → records.rs (Measurement → MetricRecord[])
//!         → sink::MetricSink::publish_batch
//! ```
//!
//! # Design Decisions
//! - Publish latency is decoupled from request latency by the queue
//! - FIFO processing, one sink call at a time
//! - Failed publishes are logged and dropped: no retry, no persistence

pub mod queue;
pub mod records;
pub mod types;
pub mod worker;

pub use queue::{MeasurementSender, SubmitError};
pub use records::{build_records, latency_millis};
pub use types::{Dimension, Measurement, MetricRecord, Unit};
pub use worker::{MetricPublisher, PublisherState};
