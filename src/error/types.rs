// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

/// Failures raised by a `NoteTransport` implementation.
///
/// `Timeout` is kept apart from `NetworkFailure` because the controller
/// reports them with different statuses. `CatNoteClient` hands non-success
/// answers back as a `TransportResponse`; `HttpFailure` is for transports
/// that surface them as errors instead, and maps to `Failed(Http(code))`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Server answered with HTTP {0}")]
    HttpFailure(u16),
}

/// Errors that leave the library. Validation, secret and transport problems
/// never get here: the controller reports them through `SubmissionStatus`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Other(format!("HTTP client error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Other(format!("URL parse error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
