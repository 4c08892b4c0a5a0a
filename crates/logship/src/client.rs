//! Remote ingestion client seam and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;

/// One rendered event as carried by the wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub message: String,
}

/// Client for a CloudWatch-Logs-style ingestion API.
///
/// A call carries the destination identifiers and an ordered slice of
/// events. Limits on event count and payload size are enforced by the
/// caller; the client only classifies failures so the sink can decide
/// whether to retry.
#[async_trait]
pub trait LogsClient: Send + Sync {
    async fn put_log_events(
        &self,
        group: &str,
        stream: &str,
        events: &[WireEvent],
    ) -> Result<(), ClientError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PutLogEvents<'a> {
    log_group_name: &'a str,
    log_stream_name: &'a str,
    log_events: &'a [WireEvent],
}

/// HTTP client posting the payload as JSON with an API-key header.
///
/// Status mapping: 2xx is success, 429 and 503 are throttling, other 5xx
/// and network failures are transport errors, remaining 4xx are permanent
/// rejections.
#[derive(Debug, Clone)]
pub struct HttpLogsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpLogsClient {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        HttpLogsClient {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LogsClient for HttpLogsClient {
    async fn put_log_events(
        &self,
        group: &str,
        stream: &str,
        events: &[WireEvent],
    ) -> Result<(), ClientError> {
        let payload = PutLogEvents {
            log_group_name: group,
            log_stream_name: stream,
            log_events: events,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!("SINK | Shipped {} events to {group}/{stream}", events.len());
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            Err(ClientError::Throttling(format!("{status}: {body}")))
        } else if status.is_client_error() {
            Err(ClientError::Rejected(format!("{status}: {body}")))
        } else {
            Err(ClientError::Transport(format!("{status}: {body}")))
        }
    }
}
