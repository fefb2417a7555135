//! Remote sync client
//!
//! HTTP client for the remote store. The remote endpoint has no notion
//! of per-record identity: every push replaces the entire remote dataset
//! with one JSON array, and a pull fetches the same shape back. One
//! request per call; no retry, no queuing, no partial batches.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::Client;

/// Errors from the remote sync adapter
#[derive(Debug, Error)]
pub enum SyncError {
    /// Sync is turned off in the configuration
    #[error("sync is not enabled")]
    Disabled,

    /// Sync is enabled but no endpoint URL is configured
    #[error("sync URL is not configured")]
    NotConfigured,

    /// Another sync operation is still in flight
    #[error("a sync is already in progress")]
    InFlight,

    /// Network-level failure (unreachable endpoint, timeout, ...)
    #[error("request failed: {0}")]
    Transport(String),

    /// Endpoint responded with a non-success HTTP status
    #[error("endpoint returned HTTP {0}")]
    Http(u16),

    /// Endpoint responded, but not with the expected JSON shape
    #[error("unreadable response: {0}")]
    InvalidResponse(String),

    /// Endpoint understood the request and refused it
    #[error("{0}")]
    Rejected(String),
}

impl SyncError {
    /// Whether this is a transport-category failure (network, HTTP
    /// status, malformed body) as opposed to an application-level one.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SyncError::Transport(_) | SyncError::Http(_) | SyncError::InvalidResponse(_)
        )
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport(err.to_string())
    }
}

/// Wire shape of a push response
#[derive(Debug, Deserialize)]
struct PushResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Wire shape of a pull response
#[derive(Debug, Deserialize)]
struct PullResponse {
    #[serde(default)]
    clients: Vec<Client>,
}

/// Result of a successful push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReport {
    /// How many records the push carried
    pub pushed: usize,
}

/// HTTP client for the sync endpoint
#[derive(Debug, Clone)]
pub struct SyncClient {
    url: String,
    http: reqwest::Client,
}

impl SyncClient {
    /// Create a sync client for the given endpoint
    ///
    /// Every request carries the given timeout; a hung endpoint fails
    /// the operation instead of leaving it pending forever.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rolo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.to_string(),
            http,
        })
    }

    /// The configured endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Push the full record set to the endpoint
    ///
    /// The set is serialized as one JSON array and sent in a single
    /// `POST`. The endpoint's response carries a success flag and, on
    /// refusal, a human-readable message.
    pub async fn push(&self, clients: &[Client]) -> Result<PushReport, SyncError> {
        debug!("Pushing {} client(s) to {}", clients.len(), self.url);

        let response = self.http.post(&self.url).json(&clients).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Push failed with HTTP {}", status);
            return Err(SyncError::Http(status.as_u16()));
        }

        let body: PushResponse = response
            .json()
            .await
            .map_err(|err| SyncError::InvalidResponse(err.to_string()))?;

        if body.success {
            info!("Pushed {} client(s)", clients.len());
            Ok(PushReport {
                pushed: clients.len(),
            })
        } else {
            let message = body
                .message
                .unwrap_or_else(|| "no reason given".to_string());
            warn!("Push rejected by endpoint: {}", message);
            Err(SyncError::Rejected(message))
        }
    }

    /// Pull the full record set back from the endpoint
    ///
    /// Returns records structurally identical to what `push` sends.
    pub async fn pull(&self) -> Result<Vec<Client>, SyncError> {
        debug!("Pulling clients from {}", self.url);

        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Pull failed with HTTP {}", status);
            return Err(SyncError::Http(status.as_u16()));
        }

        let body: PullResponse = response
            .json()
            .await
            .map_err(|err| SyncError::InvalidResponse(err.to_string()))?;

        info!("Pulled {} client(s)", body.clients.len());
        Ok(body.clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use crate::sync::testserver;

    fn timeout() -> Duration {
        Duration::from_secs(2)
    }

    #[tokio::test]
    async fn test_push_success_sends_full_set_once() {
        let (listener, url) = testserver::bind().await;
        let server = tokio::spawn(testserver::respond_once(
            listener,
            "200 OK",
            r#"{"success":true}"#.to_string(),
        ));

        let clients = vec![Client::new("Acme Corp"), Client::new("Globex")];
        let client = SyncClient::new(&url, timeout()).unwrap();
        let report = client.push(&clients).await.unwrap();
        assert_eq!(report.pushed, 2);

        // Exactly one request, whose body is the full set as a JSON array
        let received = server.await.unwrap();
        assert!(received.head.starts_with("POST"));
        assert!(received
            .head
            .to_lowercase()
            .contains("content-type: application/json"));
        let sent: Vec<Client> = serde_json::from_slice(&received.body).unwrap();
        assert_eq!(sent, clients);
    }

    #[tokio::test]
    async fn test_push_rejected_carries_message() {
        let (listener, url) = testserver::bind().await;
        tokio::spawn(testserver::respond_once(
            listener,
            "200 OK",
            r#"{"success":false,"message":"quota exceeded"}"#.to_string(),
        ));

        let client = SyncClient::new(&url, timeout()).unwrap();
        let err = client.push(&[]).await.unwrap_err();
        assert!(!err.is_transport());
        match err {
            SyncError::Rejected(message) => assert!(message.contains("quota exceeded")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_http_error_is_transport() {
        let (listener, url) = testserver::bind().await;
        tokio::spawn(testserver::respond_once(
            listener,
            "500 Internal Server Error",
            "{}".to_string(),
        ));

        let client = SyncClient::new(&url, timeout()).unwrap();
        let err = client.push(&[]).await.unwrap_err();
        assert!(matches!(err, SyncError::Http(500)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_push_non_json_response_is_transport() {
        let (listener, url) = testserver::bind().await;
        tokio::spawn(testserver::respond_once(
            listener,
            "200 OK",
            "<html>definitely not json</html>".to_string(),
        ));

        let client = SyncClient::new(&url, timeout()).unwrap();
        let err = client.push(&[]).await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_push_unreachable_endpoint_is_transport() {
        // Bind to get a port nothing is listening on, then drop it
        let (listener, url) = testserver::bind().await;
        drop(listener);

        let client = SyncClient::new(&url, timeout()).unwrap();
        let err = client.push(&[Client::new("Acme Corp")]).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }

    #[tokio::test]
    async fn test_push_timeout_is_transport() {
        let (listener, url) = testserver::bind().await;
        tokio::spawn(testserver::hold_open(listener, Duration::from_secs(5)));

        let client = SyncClient::new(&url, Duration::from_millis(200)).unwrap();
        let err = client.push(&[]).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }

    #[tokio::test]
    async fn test_pull_round_trips_push_shape() {
        let clients = vec![Client::new("Acme Corp"), Client::new("Globex")];
        let body = serde_json::json!({ "clients": clients }).to_string();

        let (listener, url) = testserver::bind().await;
        let server = tokio::spawn(testserver::respond_once(listener, "200 OK", body));

        let client = SyncClient::new(&url, timeout()).unwrap();
        let pulled = client.pull().await.unwrap();
        assert_eq!(pulled, clients);

        let received = server.await.unwrap();
        assert!(received.head.starts_with("GET"));
    }

    #[tokio::test]
    async fn test_pull_malformed_body_is_transport() {
        let (listener, url) = testserver::bind().await;
        tokio::spawn(testserver::respond_once(
            listener,
            "200 OK",
            "[]".to_string(),
        ));

        let client = SyncClient::new(&url, timeout()).unwrap();
        let err = client.pull().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
    }
}
