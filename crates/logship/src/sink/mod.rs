//! Batching sink shipping rendered log records to a remote ingestion API.
//!
//! # Architecture
//!
//! ```text
//!    ingest (sync, never blocks, never fails)
//!        │
//!        v
//!    ┌───────────┐
//!    │  channel  │  (unbounded mpsc)
//!    └─────┬─────┘
//!          │
//!          v
//!    ┌───────────┐
//!    │  service  │  (single consumer, owns the buffer and timer)
//!    └─────┬─────┘
//!          │
//!          v
//!    ┌───────────┐
//!    │ dispatcher│  (bounded batches, retries, one call in flight)
//!    └─────┬─────┘
//!          │
//!          v
//!     remote ingestion API
//! ```
//!
//! Delivery is best effort. Batches that exhaust their retry budget are
//! discarded and reported through the diagnostic side channel, never back
//! to the producer.

pub(crate) mod accumulator;
pub(crate) mod constants;
pub(crate) mod dispatcher;
pub(crate) mod retry;
pub(crate) mod service;

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::client::LogsClient;
use crate::config::SinkConfig;
use crate::diagnostics::{Diagnostic, DiagnosticObserver, TracingReporter};
use crate::format::{Formatter, TextFormatter};
use crate::record::LogRecord;
use crate::sink::service::SinkService;

/// Handle to a running sink.
///
/// Construction spawns the service task on the current tokio runtime.
/// Dropping the handle without calling [`Sink::dispose`] closes the
/// channel, after which the service performs a best-effort final flush on
/// its own.
pub struct Sink {
    tx: mpsc::UnboundedSender<LogRecord>,
    cancel: CancellationToken,
    observer: Arc<dyn DiagnosticObserver>,
    service: Mutex<Option<JoinHandle<()>>>,
}

impl Sink {
    /// Builds a sink with the default text formatter and tracing-backed
    /// diagnostics.
    #[must_use]
    pub fn new(config: SinkConfig, client: Arc<dyn LogsClient>) -> Self {
        Self::with_formatter(config, client, Arc::new(TextFormatter))
    }

    /// Builds a sink with a custom formatter.
    #[must_use]
    pub fn with_formatter(
        config: SinkConfig,
        client: Arc<dyn LogsClient>,
        formatter: Arc<dyn Formatter>,
    ) -> Self {
        Self::with_observer(config, client, formatter, Arc::new(TracingReporter))
    }

    /// Builds a sink with a custom formatter and diagnostic observer.
    #[must_use]
    pub fn with_observer(
        config: SinkConfig,
        client: Arc<dyn LogsClient>,
        formatter: Arc<dyn Formatter>,
        observer: Arc<dyn DiagnosticObserver>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (service, tx) = SinkService::new(
            &config,
            client,
            formatter,
            Arc::clone(&observer),
            cancel.clone(),
        );
        let task = tokio::spawn(service.run());

        Sink {
            tx,
            cancel,
            observer,
            service: Mutex::new(Some(task)),
        }
    }

    /// Accepts one record.
    ///
    /// Synchronous and non-blocking; never fails. After disposal the record
    /// is ignored and a [`Diagnostic::IngestAfterClose`] is reported.
    pub fn ingest(&self, record: LogRecord) {
        if self.cancel.is_cancelled() {
            self.observer.report(Diagnostic::IngestAfterClose);
            return;
        }
        if self.tx.send(record).is_err() {
            self.observer.report(Diagnostic::IngestAfterClose);
        }
    }

    /// Drains the sink, waits for every pending batch, and closes it.
    ///
    /// Every record accepted before this call is either delivered or
    /// reported as dropped by the time it returns, including records whose
    /// batch is mid-retry. Safe to call more than once; later calls return
    /// immediately.
    pub async fn dispose(&self) {
        self.cancel.cancel();
        let task = {
            #[allow(clippy::expect_used)]
            let mut guard = self.service.lock().expect("sink task handle lock poisoned");
            guard.take()
        };
        if let Some(task) = task {
            if task.await.is_err() {
                error!("SINK | Service task panicked during disposal");
            }
        }
    }
}
