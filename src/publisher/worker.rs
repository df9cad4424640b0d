//! Background publisher task.
//!
//! # Responsibilities
//! - Drain the measurement queue in FIFO order
//! - Classify, build records, and write one batch per measurement
//! - Log and discard failed writes, then move on
//!
//! # Design Decisions
//! - Exactly one task per publisher: at most one in-flight sink call
//! - Every sink call is bounded by a timeout
//! - Shutdown closes the queue, drains what is already buffered, then exits

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::timeout;

use crate::config::validation::validate_config;
use crate::config::{CollectorConfig, ConfigError, OutputShape};
use crate::observability::metrics;
use crate::publisher::queue::MeasurementSender;
use crate::publisher::records::build_records;
use crate::publisher::types::Measurement;
use crate::routing::GroupClassifier;
use crate::sink::{MetricSink, SinkError};

/// Lifecycle state of the publisher task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherState {
    /// Processing, or waiting for the next measurement.
    Running,
    /// Queue closed and task exited.
    Stopped,
}

/// Owner of the background publisher task.
pub struct MetricPublisher {
    sender: MeasurementSender,
    close: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MetricPublisher {
    /// Compile group patterns, validate the rest of the configuration and
    /// start the publisher task.
    ///
    /// Must be called inside a Tokio runtime. Nothing is spawned when the
    /// configuration is invalid.
    pub fn from_config<S: MetricSink>(config: &CollectorConfig, sink: S) -> Result<Self, ConfigError> {
        let classifier = match (&config.groups, config.output) {
            (Some(groups), OutputShape::Grouped) => Some(GroupClassifier::new(groups)?),
            (Some(groups), OutputShape::Ungrouped) => {
                if !groups.is_empty() {
                    tracing::warn!(
                        groups = groups.len(),
                        "Group definitions are ignored by the ungrouped output shape"
                    );
                }
                None
            }
            (None, _) => None,
        };
        validate_config(config).map_err(ConfigError::Validation)?;

        Ok(Self::start(config, classifier, sink))
    }

    /// Start the publisher task with an already compiled classifier and a
    /// validated configuration.
    pub(crate) fn start<S: MetricSink>(
        config: &CollectorConfig,
        classifier: Option<GroupClassifier>,
        sink: S,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.queue.capacity);
        let (close_tx, close_rx) = oneshot::channel();

        let worker = PublishWorker {
            sink,
            namespace: config.namespace.clone(),
            shape: config.output,
            classifier,
            timeout: Duration::from_millis(config.sink.timeout_ms),
        };

        tracing::info!(
            namespace = %config.namespace,
            shape = ?config.output,
            queue_capacity = config.queue.capacity,
            overflow = ?config.queue.overflow,
            "Metric publisher starting"
        );

        Self {
            sender: MeasurementSender::new(tx, &config.queue),
            close: Some(close_tx),
            task: tokio::spawn(worker.run(rx, close_rx)),
        }
    }

    /// Producer handle for recorders.
    pub fn sender(&self) -> MeasurementSender {
        self.sender.clone()
    }

    pub fn state(&self) -> PublisherState {
        if self.task.is_finished() {
            PublisherState::Stopped
        } else {
            PublisherState::Running
        }
    }

    /// Close the queue, publish whatever is still buffered, and wait for the task.
    pub async fn shutdown(mut self) -> Result<(), JoinError> {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
        self.task.await
    }
}

struct PublishWorker<S> {
    sink: S,
    namespace: String,
    shape: OutputShape,
    classifier: Option<GroupClassifier>,
    timeout: Duration,
}

impl<S: MetricSink> PublishWorker<S> {
    async fn run(self, mut rx: mpsc::Receiver<Measurement>, mut close: oneshot::Receiver<()>) {
        let mut closing = false;

        loop {
            tokio::select! {
                biased;
                // Dropping the owner without `shutdown` also resolves this.
                _ = &mut close, if !closing => {
                    tracing::info!("Metric publisher closing queue");
                    rx.close();
                    closing = true;
                }
                next = rx.recv() => match next {
                    Some(measurement) => self.publish(measurement).await,
                    None => break,
                },
            }
        }

        tracing::info!("Metric publisher stopped");
    }

    async fn publish(&self, measurement: Measurement) {
        let group = match (self.shape, &self.classifier) {
            (OutputShape::Grouped, Some(classifier)) => classifier.classify(&measurement.path),
            _ => None,
        };
        let records = build_records(&measurement, self.shape, group);

        let start = Instant::now();
        let result = match timeout(self.timeout, self.sink.publish_batch(&self.namespace, &records)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::Timeout(self.timeout)),
        };

        match result {
            Ok(()) => {
                metrics::record_publish("success", start);
                tracing::trace!(
                    path = %measurement.path,
                    method = %measurement.method,
                    group = ?group,
                    records = records.len(),
                    "Published metric batch"
                );
            }
            Err(e) => {
                metrics::record_publish("failure", start);
                tracing::warn!(
                    path = %measurement.path,
                    method = %measurement.method,
                    error = %e,
                    "Failed to publish metric batch"
                );
            }
        }
    }
}
