//! Error types shared across the sink.

use thiserror::Error;

/// Failure classification for the remote ingestion client.
///
/// The sink retries [`Throttling`](ClientError::Throttling) and
/// [`Transport`](ClientError::Transport) failures up to its configured
/// budget; [`Rejected`](ClientError::Rejected) ends an attempt sequence
/// immediately.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The endpoint asked the sender to slow down.
    #[error("ingestion endpoint throttled the request: {0}")]
    Throttling(String),

    /// The request never completed, or the endpoint failed transiently.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint rejected the request outright, e.g. a misconfigured
    /// destination or credentials.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Whether another attempt can reasonably succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Throttling(_) | ClientError::Transport(_))
    }
}

/// Failure while rendering a record into wire text.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}
