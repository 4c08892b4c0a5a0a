//! Sink configuration.

use std::time::Duration;

use crate::sink::constants;

/// Configuration captured when a sink is constructed.
///
/// A `flush_interval` of zero disables the periodic timer; flushes then
/// happen only when a batch threshold is crossed or the sink is disposed.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Destination log group identifier.
    pub group: String,
    /// Destination log stream identifier.
    pub stream: String,
    /// Requested events per batch; clamped to `[1, 10_000]` when the sink
    /// is built.
    pub batch_size: usize,
    pub flush_interval: Duration,
    /// Additional attempts after the first; zero means a single attempt.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl SinkConfig {
    /// Configuration for the given destination with default thresholds.
    #[must_use]
    pub fn new(group: impl Into<String>, stream: impl Into<String>) -> Self {
        SinkConfig {
            group: group.into(),
            stream: stream.into(),
            ..SinkConfig::default()
        }
    }

    /// Batch size bounded to the remote API's hard ceiling.
    #[must_use]
    pub fn clamped_batch_size(&self) -> usize {
        self.batch_size.clamp(1, constants::MAX_BATCH_EVENTS)
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig {
            group: String::new(),
            stream: String::new(),
            batch_size: constants::MAX_BATCH_EVENTS,
            flush_interval: Duration::from_secs(1),
            max_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }
}
