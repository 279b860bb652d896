// src/integrations/catnote/client.rs
//
// CatNote HTTP API
//
// ARCHITECTURE:
// - One endpoint: POST https://api.<host>/sapi/{secret} with {"content": ...}
// - Fixed request timeout; timeouts are reported apart from other failures
// - The response body is passed through untouched, never parsed
//
// This is INFRASTRUCTURE: it knows nothing about statuses or settings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use crate::domain::ResolvedSecret;
use crate::error::{AppError, AppResult, TransportError};

/// Fixed request timeout for note submissions.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw outcome of an HTTP exchange that produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub success: bool,
    pub status_code: u16,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteTransport: Send + Sync {
    /// POST `body` as JSON to `url`.
    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError>;
}

/// Build the submission endpoint for a secret.
///
/// The secret is appended as a single percent-encoded path segment.
pub fn endpoint_url(api_host: &str, secret: &ResolvedSecret) -> AppResult<Url> {
    let mut url = Url::parse(&format!("https://api.{}/", api_host.trim()))?;
    url.path_segments_mut()
        .map_err(|_| AppError::Config(format!("API host cannot be a base: {}", api_host)))?
        .pop_if_empty()
        .push("sapi")
        .push(secret.as_str());
    Ok(url)
}

/// JSON body for a note.
pub fn note_payload(content: &str) -> serde_json::Value {
    serde_json::json!({ "content": content })
}

/// reqwest-backed transport
pub struct CatNoteClient {
    http_client: Client,
    timeout: Duration,
}

impl CatNoteClient {
    /// Client with the default 15 second timeout
    pub fn new() -> AppResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn map_request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::NetworkFailure(err.to_string())
    }
}

#[async_trait]
impl NoteTransport for CatNoteClient {
    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        log::debug!("CatNote API answered with status {}", status);

        Ok(TransportResponse {
            success: status.is_success(),
            status_code: status.as_u16(),
            body,
        })
    }
}
