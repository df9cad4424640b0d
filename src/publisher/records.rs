//! Measurement → metric record transformation.

use std::time::Duration;

use crate::config::OutputShape;
use crate::publisher::types::{Dimension, Measurement, MetricRecord, Unit};

pub const LATENCY: &str = "Latency";
pub const LATENCY_PER_REQUEST: &str = "Latency per Request";
pub const LATENCY_PER_GROUP: &str = "Latency per Group";

/// Whole milliseconds in `latency`, truncated.
pub fn latency_millis(latency: Duration) -> u64 {
    (latency.as_nanos() / 1_000_000) as u64
}

/// Build the record set for one measurement.
///
/// `group` is only consulted for [`OutputShape::Grouped`].
pub fn build_records(
    measurement: &Measurement,
    shape: OutputShape,
    group: Option<&str>,
) -> Vec<MetricRecord> {
    let value = latency_millis(measurement.latency) as f64;
    let record = |name: &str, dimensions: Vec<Dimension>| MetricRecord {
        name: name.to_string(),
        dimensions,
        timestamp: measurement.observed_at,
        unit: Unit::Milliseconds,
        value,
    };

    match shape {
        OutputShape::Ungrouped => vec![record(
            LATENCY,
            vec![
                Dimension::new("Path", measurement.path.as_str()),
                Dimension::new("Method", measurement.method.as_str()),
            ],
        )],
        OutputShape::Grouped => {
            let mut records = vec![
                record(
                    LATENCY_PER_REQUEST,
                    vec![Dimension::new(
                        "Path",
                        format!("{} {}", measurement.method, measurement.path),
                    )],
                ),
                record(LATENCY, Vec::new()),
            ];
            if let Some(group) = group {
                records.push(record(LATENCY_PER_GROUP, vec![Dimension::new("Group", group)]));
            }
            records
        }
    }
}
