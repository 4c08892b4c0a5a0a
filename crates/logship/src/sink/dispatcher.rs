//! Shipping of drained batches to the remote ingestion API.

use std::sync::Arc;

use tracing::debug;

use crate::client::{LogsClient, WireEvent};
use crate::sink::accumulator::PendingEvent;
use crate::sink::retry::{DroppedBatch, RetryPolicy};

/// Sends one batch at a time to the configured destination.
pub(crate) struct Dispatcher {
    client: Arc<dyn LogsClient>,
    group: String,
    stream: String,
    retry: RetryPolicy,
}

impl Dispatcher {
    pub(crate) fn new(
        client: Arc<dyn LogsClient>,
        group: String,
        stream: String,
        retry: RetryPolicy,
    ) -> Self {
        Dispatcher {
            client,
            group,
            stream,
            retry,
        }
    }

    /// Dispatches a batch, retrying per the policy.
    ///
    /// Event order within the batch is preserved on the wire. A terminal
    /// failure hands the drop accounting back to the caller.
    pub(crate) async fn dispatch(&self, batch: Vec<PendingEvent>) -> Result<(), DroppedBatch> {
        let events: Vec<WireEvent> = batch
            .into_iter()
            .map(|event| WireEvent {
                timestamp: event.timestamp,
                message: event.rendered,
            })
            .collect();

        let attempts = self
            .retry
            .run(|| self.client.put_log_events(&self.group, &self.stream, &events))
            .await?;

        debug!(
            "SINK | Delivered batch of {} events in {attempts} attempt(s)",
            events.len()
        );
        Ok(())
    }
}
