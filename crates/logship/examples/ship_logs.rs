//! Example: shipping application logs to a remote ingestion endpoint.
//!
//! Reads the destination from `LOGSHIP_ENDPOINT` and `LOGSHIP_API_KEY`,
//! ingests a handful of records, and disposes the sink so everything still
//! buffered is flushed before the process exits.

use std::sync::Arc;
use std::time::Duration;

use logship::{HttpLogsClient, Level, LogRecord, Sink, SinkConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let endpoint = std::env::var("LOGSHIP_ENDPOINT")
        .unwrap_or_else(|_| "http://127.0.0.1:8080/v1/ingest".to_string());
    let api_key = std::env::var("LOGSHIP_API_KEY").unwrap_or_default();

    let client = Arc::new(HttpLogsClient::new(
        endpoint,
        api_key,
        Duration::from_secs(5),
    ));
    let config = SinkConfig {
        batch_size: 100,
        flush_interval: Duration::from_millis(500),
        ..SinkConfig::new("example-group", "example-stream")
    };
    let sink = Sink::new(config, client);

    for i in 0..10 {
        sink.ingest(
            LogRecord::new(Level::Info, "example.worker", "processed job {}")
                .with_args(vec![serde_json::json!(i)]),
        );
    }
    sink.ingest(
        LogRecord::new(Level::Warn, "example.auth", "User {} failed to login")
            .with_args(vec![serde_json::json!({"id": 123, "name": "John"})]),
    );

    sink.dispose().await;
    println!("All records flushed, sink closed.");
}
