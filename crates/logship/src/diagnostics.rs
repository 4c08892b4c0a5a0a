//! Out-of-band reporting of failures the sink handled internally.
//!
//! The ingest path never returns errors to the producer. Everything that
//! goes wrong inside the sink, a formatter failure or a batch discarded
//! after its retry budget, is funnelled through a [`DiagnosticObserver`]
//! instead of being thrown.

use tracing::{error, warn};

use crate::error::{ClientError, FormatError};

/// A failure the sink absorbed instead of propagating.
#[derive(Debug)]
pub enum Diagnostic {
    /// The formatter failed; the record was dropped.
    FormatFailed { error: FormatError },

    /// A batch was discarded after exhausting its retry budget or hitting a
    /// terminal rejection.
    BatchDropped {
        events: usize,
        attempts: u32,
        error: ClientError,
    },

    /// `ingest` was called on a disposed sink; the record was ignored.
    IngestAfterClose,
}

/// Side channel receiving every internally handled failure.
pub trait DiagnosticObserver: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Default observer forwarding diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DiagnosticObserver for TracingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FormatFailed { error } => {
                warn!("SINK | Dropping record, formatter failed: {error}");
            }
            Diagnostic::BatchDropped {
                events,
                attempts,
                error,
            } => {
                error!("SINK | Dropping batch of {events} events after {attempts} attempt(s): {error}");
            }
            Diagnostic::IngestAfterClose => {
                warn!("SINK | Ignoring record ingested after disposal");
            }
        }
    }
}
