//! Hard limits of the remote ingestion API.
//!
//! Every `put_log_events` call must stay within both ceilings; the sink
//! splits its buffer into batches accordingly rather than letting the
//! endpoint reject a payload.

/// Maximum number of events per call.
///
/// Requested batch sizes above this value are clamped down to it.
pub(crate) const MAX_BATCH_EVENTS: usize = 10_000;

/// Maximum accounted payload size per call, in bytes.
///
/// Accounted size sums each event's rendered byte length plus
/// [`EVENT_OVERHEAD_BYTES`].
pub(crate) const MAX_BATCH_BYTES: usize = 1_048_576;

/// Fixed per-event overhead the API adds to the rendered text when
/// accounting payload size.
pub(crate) const EVENT_OVERHEAD_BYTES: usize = 26;
