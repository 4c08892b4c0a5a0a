//! In-memory buffering of rendered events and the flush-trigger policy.
//!
//! Events accumulate in acceptance order until a threshold is crossed:
//! either the buffered accounted size goes past the per-request ceiling, or
//! the buffer fills to the configured batch size. Anything below both
//! thresholds waits for the periodic timer or disposal.

use std::collections::VecDeque;

use crate::sink::constants;

/// A rendered event waiting to be shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingEvent {
    pub(crate) timestamp: i64,
    pub(crate) rendered: String,
    /// Rendered byte length plus the API's per-event overhead.
    pub(crate) accounted_size: usize,
}

impl PendingEvent {
    pub(crate) fn new(timestamp: i64, rendered: String) -> Self {
        let accounted_size = rendered.len() + constants::EVENT_OVERHEAD_BYTES;
        PendingEvent {
            timestamp,
            rendered,
            accounted_size,
        }
    }
}

/// What the caller should do after an `append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppendOutcome {
    /// Below every threshold; the event waits for the timer or disposal.
    Buffered,
    /// A threshold was crossed; flush now.
    Flush,
}

/// Ordered buffer of pending events with count and accounted-size tracking.
#[derive(Debug)]
pub(crate) struct Accumulator {
    events: VecDeque<PendingEvent>,
    buffered_bytes: usize,
    max_batch_events: usize,
    max_batch_bytes: usize,
}

impl Accumulator {
    pub(crate) fn new(max_batch_events: usize, max_batch_bytes: usize) -> Self {
        Accumulator {
            events: VecDeque::new(),
            buffered_bytes: 0,
            max_batch_events,
            max_batch_bytes,
        }
    }

    /// Appends an event and reports whether a flush should run immediately.
    ///
    /// The size check is eager: the moment the buffered accounted size goes
    /// past the per-request ceiling a flush is requested, so drained batches
    /// stay within bounds and the newest event starts a fresh batch. Filling
    /// to the configured event count also requests a flush. A single event
    /// larger than the ceiling is buffered and flushed immediately as its
    /// own batch rather than dropped.
    pub(crate) fn append(&mut self, event: PendingEvent) -> AppendOutcome {
        self.buffered_bytes += event.accounted_size;
        self.events.push_back(event);

        if self.buffered_bytes > self.max_batch_bytes
            || self.events.len() >= self.max_batch_events
        {
            AppendOutcome::Flush
        } else {
            AppendOutcome::Buffered
        }
    }

    /// Removes and returns a prefix of the buffer honoring both bounds.
    ///
    /// The remainder stays buffered; an empty buffer yields an empty batch.
    /// A first event alone over `max_bytes` is returned as a single-event
    /// batch.
    pub(crate) fn drain_up_to(
        &mut self,
        max_events: usize,
        max_bytes: usize,
    ) -> Vec<PendingEvent> {
        let mut batch = Vec::new();
        let mut batch_bytes = 0;

        while batch.len() < max_events {
            let fits = match self.events.front() {
                Some(event) => {
                    batch.is_empty() || batch_bytes + event.accounted_size <= max_bytes
                }
                None => false,
            };
            if !fits {
                break;
            }
            if let Some(event) = self.events.pop_front() {
                self.buffered_bytes -= event.accounted_size;
                batch_bytes += event.accounted_size;
                batch.push(event);
            }
        }

        batch
    }

    /// Drains one batch at this accumulator's own limits.
    pub(crate) fn drain_batch(&mut self) -> Vec<PendingEvent> {
        self.drain_up_to(self.max_batch_events, self.max_batch_bytes)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
