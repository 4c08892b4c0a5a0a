//! Batching behavior of the sink against a recording mock endpoint.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use common::{record, sized_record, test_config, MockIntake};
use logship::{LogsClient, Sink, SinkConfig};

#[tokio::test]
async fn flushes_when_batch_size_is_reached() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(2), client);

    for i in 0..3 {
        sink.ingest(record(i));
    }
    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[1].len(), 1);
    assert_eq!(batches[0][0].message, "message 0");
    assert_eq!(batches[0][1].message, "message 1");
    assert_eq!(batches[1][0].message, "message 2");
}

#[tokio::test]
async fn exactly_full_batch_is_dispatched_once() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(5), client);

    for i in 0..5 {
        sink.ingest(record(i));
    }
    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 5);
    assert_eq!(intake.call_count(), 1);
}

#[tokio::test]
async fn order_is_preserved_across_batches() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(2), client);

    for i in 0..5 {
        sink.ingest(record(i));
    }
    sink.dispose().await;

    let messages: Vec<String> = intake
        .delivered()
        .into_iter()
        .flatten()
        .map(|event| event.message)
        .collect();

    assert_eq!(
        messages,
        vec![
            "message 0",
            "message 1",
            "message 2",
            "message 3",
            "message 4"
        ]
    );
}

#[tokio::test]
async fn large_events_never_share_a_batch() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(100), client);

    // Two events of ~600 KB each; together they cross the 1 MiB accounted
    // ceiling, so each must travel alone.
    sink.ingest(sized_record(0, 600_000));
    sink.ingest(sized_record(1, 600_000));
    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[1].len(), 1);
    assert_eq!(batches[0][0].message.len(), 600_000);
}

#[tokio::test]
async fn oversize_single_event_is_shipped_alone() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(100), client);

    sink.ingest(sized_record(0, 1_200_000));
    sink.ingest(record(1));
    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].message.len(), 1_200_000);
    assert_eq!(batches[1][0].message, "message 1");
}

#[tokio::test]
async fn dispose_flushes_buffered_remainder() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(100), client);

    for i in 0..3 {
        sink.ingest(record(i));
    }
    assert!(intake.delivered().is_empty());

    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
}

#[tokio::test]
async fn oversized_batch_size_behaves_like_the_api_ceiling() {
    let config = SinkConfig {
        batch_size: 50_000,
        ..test_config(0)
    };
    assert_eq!(config.clamped_batch_size(), 10_000);

    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(config, client);

    for i in 0..20 {
        sink.ingest(record(i));
    }
    sink.dispose().await;

    // Well under the clamped ceiling, so everything leaves in one batch.
    let batches = intake.delivered();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 20);
}

#[tokio::test]
async fn wire_events_carry_record_timestamps() {
    let intake = MockIntake::accepting();
    let client: Arc<dyn LogsClient> = intake.clone();
    let sink = Sink::new(test_config(10), client);

    sink.ingest(record(7));
    sink.dispose().await;

    let batches = intake.delivered();
    assert_eq!(batches[0][0].timestamp, 1_700_000_000_007);
}
