//! # logship
//!
//! Batching log sink for a CloudWatch-Logs-style ingestion API.
//!
//! Records enter through the synchronous, non-blocking [`Sink::ingest`]
//! call, are rendered by a pluggable [`Formatter`], buffered until a count
//! or size threshold is crossed, and shipped in bounded batches by a single
//! background task with bounded retries. Delivery is best effort: failures
//! surface on a diagnostic side channel, never to the producer.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use logship::{HttpLogsClient, Level, LogRecord, Sink, SinkConfig};
//!
//! let client = Arc::new(HttpLogsClient::new(
//!     "https://logs.example.com/v1/ingest",
//!     "api-key",
//!     Duration::from_secs(5),
//! ));
//! let sink = Sink::new(SinkConfig::new("app", "web-1"), client);
//!
//! sink.ingest(LogRecord::new(Level::Info, "app.auth", "user logged in"));
//! sink.dispose().await;
//! ```

#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(unreachable_pub)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod record;
pub mod sink;

pub use client::{HttpLogsClient, LogsClient, WireEvent};
pub use config::SinkConfig;
pub use diagnostics::{Diagnostic, DiagnosticObserver, TracingReporter};
pub use error::{ClientError, FormatError};
pub use format::{Formatter, JsonFormatter, TextFormatter};
pub use record::{Level, LogRecord};
pub use sink::Sink;
