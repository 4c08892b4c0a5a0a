//! Single-consumer service task owning the sink's mutable state.
//!
//! Producers hand records to the service over an unbounded channel; the
//! service renders them, buffers them, and flushes them. One task owns the
//! accumulator and performs every flush, so at most one network call is
//! outstanding per sink and batches leave in acceptance order. A flush
//! trigger that arrives while a flush is running queues behind it instead
//! of starting a second one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::LogsClient;
use crate::config::SinkConfig;
use crate::diagnostics::{Diagnostic, DiagnosticObserver};
use crate::format::Formatter;
use crate::record::LogRecord;
use crate::sink::accumulator::{Accumulator, AppendOutcome, PendingEvent};
use crate::sink::constants;
use crate::sink::dispatcher::Dispatcher;
use crate::sink::retry::RetryPolicy;

pub(crate) struct SinkService {
    rx: mpsc::UnboundedReceiver<LogRecord>,
    accumulator: Accumulator,
    dispatcher: Dispatcher,
    formatter: Arc<dyn Formatter>,
    observer: Arc<dyn DiagnosticObserver>,
    flush_interval: Duration,
    cancel: CancellationToken,
}

impl SinkService {
    pub(crate) fn new(
        config: &SinkConfig,
        client: Arc<dyn LogsClient>,
        formatter: Arc<dyn Formatter>,
        observer: Arc<dyn DiagnosticObserver>,
        cancel: CancellationToken,
    ) -> (Self, mpsc::UnboundedSender<LogRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let accumulator =
            Accumulator::new(config.clamped_batch_size(), constants::MAX_BATCH_BYTES);
        let dispatcher = Dispatcher::new(
            client,
            config.group.clone(),
            config.stream.clone(),
            RetryPolicy {
                max_retries: config.max_retries,
                delay: config.retry_delay,
            },
        );

        let service = SinkService {
            rx,
            accumulator,
            dispatcher,
            formatter,
            observer,
            flush_interval: config.flush_interval,
            cancel,
        };
        (service, tx)
    }

    /// Processes records until disposal, then drains what is left and exits.
    pub(crate) async fn run(mut self) {
        debug!("SINK | Service started");
        let mut ticker = self.ticker();
        let cancel = self.cancel.clone();

        loop {
            tokio::select! {
                record = self.rx.recv() => match record {
                    Some(record) => self.accept(record).await,
                    // Sink dropped without dispose; best-effort final flush.
                    None => {
                        self.flush().await;
                        break;
                    }
                },
                () = next_tick(&mut ticker) => self.flush().await,
                () = cancel.cancelled() => {
                    debug!("SINK | Disposal requested, draining pending records");
                    while let Ok(record) = self.rx.try_recv() {
                        self.accept(record).await;
                    }
                    self.flush().await;
                    break;
                }
            }
        }
        debug!("SINK | Service stopped");
    }

    async fn accept(&mut self, record: LogRecord) {
        let rendered = match self.formatter.render(&record) {
            Ok(rendered) => rendered,
            Err(error) => {
                self.observer.report(Diagnostic::FormatFailed { error });
                return;
            }
        };

        let event = PendingEvent::new(record.timestamp, rendered);
        if self.accumulator.append(event) == AppendOutcome::Flush {
            self.flush().await;
        }
    }

    /// Drains and dispatches batches until the buffer is empty.
    ///
    /// A batch that fails terminally is discarded and reported; draining
    /// continues with the next batch.
    async fn flush(&mut self) {
        while !self.accumulator.is_empty() {
            let batch = self.accumulator.drain_batch();
            if batch.is_empty() {
                break;
            }
            let events = batch.len();
            if let Err(dropped) = self.dispatcher.dispatch(batch).await {
                self.observer.report(Diagnostic::BatchDropped {
                    events,
                    attempts: dropped.attempts,
                    error: dropped.error,
                });
            }
        }
    }

    fn ticker(&self) -> Option<Interval> {
        if self.flush_interval.is_zero() {
            return None;
        }
        let mut interval = time::interval_at(
            time::Instant::now() + self.flush_interval,
            self.flush_interval,
        );
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(interval)
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
