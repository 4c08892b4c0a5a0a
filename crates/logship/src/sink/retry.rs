//! Bounded retry of dispatch attempts with a fixed delay.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ClientError;

/// Final outcome of a batch that could not be delivered.
#[derive(Debug)]
pub(crate) struct DroppedBatch {
    pub(crate) attempts: u32,
    pub(crate) error: ClientError,
}

/// Fixed-delay retry budget applied to every dispatched batch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    /// Attempts allowed after the first; zero means exactly one attempt.
    pub(crate) max_retries: u32,
    pub(crate) delay: Duration,
}

impl RetryPolicy {
    /// Runs `op` until it succeeds, fails terminally, or the budget is
    /// spent. Returns the number of attempts on success.
    pub(crate) async fn run<F, Fut>(&self, mut op: F) -> Result<u32, DroppedBatch>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), ClientError>>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match op().await {
                Ok(()) => return Ok(attempts),
                Err(error) if error.is_retryable() && attempts <= self.max_retries => {
                    warn!(
                        "SINK | Attempt {attempts} failed, retrying in {:?}: {error}",
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(error) => return Err(DroppedBatch { attempts, error }),
            }
        }
    }
}
