//! Handoff queue between request handlers and the publisher task.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};

use crate::config::{OverflowPolicy, QueueConfig};
use crate::publisher::types::Measurement;

/// Why a measurement was not accepted. Carries the rejected measurement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("measurement queue is full")]
    QueueFull(Measurement),

    #[error("timed out waiting for measurement queue capacity")]
    WaitTimeout(Measurement),

    #[error("publisher has stopped")]
    Closed(Measurement),
}

impl SubmitError {
    /// Label used for the dropped-measurement counter.
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::QueueFull(_) => "queue_full",
            SubmitError::WaitTimeout(_) => "wait_timeout",
            SubmitError::Closed(_) => "closed",
        }
    }

    pub fn measurement(&self) -> &Measurement {
        match self {
            SubmitError::QueueFull(m) | SubmitError::WaitTimeout(m) | SubmitError::Closed(m) => m,
        }
    }

    pub fn into_measurement(self) -> Measurement {
        match self {
            SubmitError::QueueFull(m) | SubmitError::WaitTimeout(m) | SubmitError::Closed(m) => m,
        }
    }
}

/// Producer side of the measurement queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MeasurementSender {
    tx: mpsc::Sender<Measurement>,
    overflow: OverflowPolicy,
    wait_timeout: Duration,
}

impl MeasurementSender {
    pub(crate) fn new(tx: mpsc::Sender<Measurement>, config: &QueueConfig) -> Self {
        Self {
            tx,
            overflow: config.overflow,
            wait_timeout: Duration::from_millis(config.wait_timeout_ms),
        }
    }

    /// Hand a measurement to the publisher, honoring the overflow policy.
    pub async fn submit(&self, measurement: Measurement) -> Result<(), SubmitError> {
        match self.overflow {
            OverflowPolicy::Drop => self.tx.try_send(measurement).map_err(|e| match e {
                TrySendError::Full(m) => SubmitError::QueueFull(m),
                TrySendError::Closed(m) => SubmitError::Closed(m),
            }),
            OverflowPolicy::Block => self
                .tx
                .send(measurement)
                .await
                .map_err(|e| SubmitError::Closed(e.0)),
            OverflowPolicy::Wait => self
                .tx
                .send_timeout(measurement, self.wait_timeout)
                .await
                .map_err(|e| match e {
                    SendTimeoutError::Timeout(m) => SubmitError::WaitTimeout(m),
                    SendTimeoutError::Closed(m) => SubmitError::Closed(m),
                }),
        }
    }

    /// True once the publisher closed the queue.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
