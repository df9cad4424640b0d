//! Publisher task tests: record shapes, failure isolation, timeouts and lifecycle.

use std::time::Duration;

use route_metrics::config::{CollectorConfig, ConfigError, GroupConfig, OutputShape, OverflowPolicy};
use route_metrics::publisher::{Dimension, MetricPublisher, PublisherState, SubmitError};

mod common;
use common::{measurement, RecordingSink};

fn grouped_config() -> CollectorConfig {
    let mut config = CollectorConfig::default();
    config.namespace = "shop".into();
    config.groups = Some(vec![
        GroupConfig::new("api").include("^/api/").exclude("/health$"),
        GroupConfig::new("users").include("users"),
    ]);
    config
}

#[tokio::test]
async fn test_grouped_batch_with_group() {
    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&grouped_config(), sink.clone()).unwrap();
    let sender = publisher.sender();

    sender
        .submit(measurement("GET", "/api/users/{id}", Duration::from_nanos(1_500_123_000)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].namespace, "shop");

    let records = &batches[0].records;
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.value == 1500.0));
    assert_eq!(records[0].dimensions, vec![Dimension::new("Path", "GET /api/users/{id}")]);
    // Both groups qualify; the later one is reported.
    assert_eq!(records[2].dimensions, vec![Dimension::new("Group", "users")]);
}

#[tokio::test]
async fn test_excluded_path_has_no_group_record() {
    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&grouped_config(), sink.clone()).unwrap();

    publisher
        .sender()
        .submit(measurement("GET", "/api/health", Duration::from_millis(2)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    let records = &sink.batches()[0].records;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.name != "Latency per Group"));
}

#[tokio::test]
async fn test_no_groups_configured_emits_base_records() {
    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&CollectorConfig::default(), sink.clone()).unwrap();

    publisher
        .sender()
        .submit(measurement("POST", "/orders", Duration::from_millis(9)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    let names: Vec<_> = sink.batches()[0].records.iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Latency per Request", "Latency"]);
}

#[tokio::test]
async fn test_ungrouped_shape_skips_classification() {
    let mut config = grouped_config();
    config.output = OutputShape::Ungrouped;

    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&config, sink.clone()).unwrap();
    publisher
        .sender()
        .submit(measurement("DELETE", "/api/users/{id}", Duration::from_millis(11)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    let records = &sink.batches()[0].records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Latency");
    assert_eq!(
        records[0].dimensions,
        vec![
            Dimension::new("Path", "/api/users/{id}"),
            Dimension::new("Method", "DELETE")
        ]
    );
}

#[tokio::test]
async fn test_failure_does_not_stop_next_measurement() {
    let sink = RecordingSink::failing_on(vec![1]);
    let publisher = MetricPublisher::from_config(&grouped_config(), sink.clone()).unwrap();
    let sender = publisher.sender();

    sender
        .submit(measurement("GET", "/first", Duration::from_millis(1)))
        .await
        .unwrap();
    sender
        .submit(measurement("GET", "/second", Duration::from_millis(1)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    assert_eq!(sink.calls(), 2);
    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].records[0].dimensions[0].value, "GET /second");
}

#[tokio::test]
async fn test_hung_sink_times_out() {
    let mut config = grouped_config();
    config.sink.timeout_ms = 20;

    let sink = RecordingSink::with_delay(Duration::from_secs(30));
    let publisher = MetricPublisher::from_config(&config, sink.clone()).unwrap();
    let sender = publisher.sender();

    sender
        .submit(measurement("GET", "/a", Duration::from_millis(1)))
        .await
        .unwrap();
    sender
        .submit(measurement("GET", "/b", Duration::from_millis(1)))
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), publisher.shutdown())
        .await
        .expect("publisher should not hang on a stuck sink")
        .unwrap();

    assert_eq!(sink.calls(), 2);
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_fifo_order() {
    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&CollectorConfig::default(), sink.clone()).unwrap();
    let sender = publisher.sender();

    for i in 0..20 {
        sender
            .submit(measurement("GET", &format!("/items/{i}"), Duration::from_millis(1)))
            .await
            .unwrap();
    }
    publisher.shutdown().await.unwrap();

    let paths: Vec<_> = sink
        .batches()
        .iter()
        .map(|b| b.records[0].dimensions[0].value.clone())
        .collect();
    let expected: Vec<_> = (0..20).map(|i| format!("GET /items/{i}")).collect();
    assert_eq!(paths, expected);
}

#[tokio::test]
async fn test_lifecycle_states() {
    let mut config = CollectorConfig::default();
    config.queue.overflow = OverflowPolicy::Block;

    let sink = RecordingSink::new();
    let publisher = MetricPublisher::from_config(&config, sink.clone()).unwrap();
    let sender = publisher.sender();
    assert_eq!(publisher.state(), PublisherState::Running);

    sender
        .submit(measurement("GET", "/queued", Duration::from_millis(1)))
        .await
        .unwrap();
    publisher.shutdown().await.unwrap();

    // Buffered measurements are drained before the task exits.
    assert_eq!(sink.batches().len(), 1);
    assert!(sender.is_closed());
    let err = sender
        .submit(measurement("GET", "/late", Duration::from_millis(1)))
        .await
        .unwrap_err();
    assert!(matches!(&err, SubmitError::Closed(m) if m.path == "/late"));
}

#[tokio::test]
async fn test_invalid_pattern_fails_construction() {
    let mut config = CollectorConfig::default();
    config.groups = Some(vec![GroupConfig::new("broken").include("(unclosed")]);

    let result = MetricPublisher::from_config(&config, RecordingSink::new());
    assert!(matches!(result, Err(ConfigError::Pattern(_))));
}

#[tokio::test]
async fn test_invalid_queue_config_fails_construction() {
    let mut config = CollectorConfig::default();
    config.queue.capacity = 0;

    let result = MetricPublisher::from_config(&config, RecordingSink::new());
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[tokio::test]
async fn test_zero_sink_timeout_fails_construction() {
    let mut config = CollectorConfig::default();
    config.sink.timeout_ms = 0;

    let sink = RecordingSink::new();
    let result = MetricPublisher::from_config(&config, sink.clone());
    assert!(matches!(result, Err(ConfigError::Validation(ref errors)) if errors.len() == 1));
    assert_eq!(sink.calls(), 0);
}
