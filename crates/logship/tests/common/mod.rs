//! Shared mock collaborators for sink integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use logship::{
    ClientError, Diagnostic, DiagnosticObserver, Level, LogRecord, LogsClient, SinkConfig,
    WireEvent,
};

/// Mock ingestion endpoint recording every successful call.
///
/// Fails the first `fail_first` calls with the configured error, then
/// accepts everything.
pub struct MockIntake {
    batches: Mutex<Vec<Vec<WireEvent>>>,
    calls: AtomicUsize,
    fail_first: usize,
    failure: Option<ClientError>,
}

impl MockIntake {
    pub fn accepting() -> Arc<Self> {
        Arc::new(MockIntake {
            batches: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_first: 0,
            failure: None,
        })
    }

    pub fn failing_first(fail_first: usize, failure: ClientError) -> Arc<Self> {
        Arc::new(MockIntake {
            batches: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_first,
            failure: Some(failure),
        })
    }

    pub fn always_failing(failure: ClientError) -> Arc<Self> {
        Self::failing_first(usize::MAX, failure)
    }

    /// Total `put_log_events` calls, including failed attempts.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Successfully delivered batches in delivery order.
    pub fn delivered(&self) -> Vec<Vec<WireEvent>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogsClient for MockIntake {
    async fn put_log_events(
        &self,
        _group: &str,
        _stream: &str,
        events: &[WireEvent],
    ) -> Result<(), ClientError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
        }
        self.batches.lock().unwrap().push(events.to_vec());
        Ok(())
    }
}

/// Observer collecting every diagnostic for assertions.
#[derive(Default)]
pub struct CollectingObserver {
    pub diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingObserver {
    pub fn shared() -> Arc<Self> {
        Arc::new(CollectingObserver::default())
    }

    pub fn dropped_batches(&self) -> Vec<(usize, u32)> {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .filter_map(|diagnostic| match diagnostic {
                Diagnostic::BatchDropped {
                    events, attempts, ..
                } => Some((*events, *attempts)),
                _ => None,
            })
            .collect()
    }

    pub fn format_failure_count(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .filter(|diagnostic| matches!(diagnostic, Diagnostic::FormatFailed { .. }))
            .count()
    }

    pub fn ingest_after_close_count(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .filter(|diagnostic| matches!(diagnostic, Diagnostic::IngestAfterClose))
            .count()
    }
}

impl DiagnosticObserver for CollectingObserver {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }
}

/// Deterministic test configuration: timer disabled, no retries.
pub fn test_config(batch_size: usize) -> SinkConfig {
    SinkConfig {
        batch_size,
        flush_interval: Duration::ZERO,
        max_retries: 0,
        retry_delay: Duration::ZERO,
        ..SinkConfig::new("app-group", "app-stream")
    }
}

/// A record with a deterministic timestamp and message.
pub fn record(i: usize) -> LogRecord {
    LogRecord {
        timestamp: 1_700_000_000_000 + i as i64,
        level: Level::Info,
        category: "app".to_string(),
        message: format!("message {i}"),
        args: Vec::new(),
    }
}

/// A record whose rendered text is `len` bytes long.
pub fn sized_record(i: usize, len: usize) -> LogRecord {
    LogRecord {
        message: "x".repeat(len),
        ..record(i)
    }
}
