// src/domain/status.rs
//
// Submission status shown to the user. Exactly one is current at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{SecretError, ValidationError};

/// Display severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Neutral,
    Info,
    Success,
    Error,
}

/// Why a submission attempt ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "code")]
pub enum FailureReason {
    EmptyContent,
    TooLong { limit: usize },
    EmptySecret,
    InvalidSecretOrUrl,
    MissingSecretInPath,
    Http(u16),
}

impl From<ValidationError> for FailureReason {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyContent => FailureReason::EmptyContent,
            ValidationError::TooLong { limit, .. } => FailureReason::TooLong { limit },
        }
    }
}

impl From<SecretError> for FailureReason {
    fn from(err: SecretError) -> Self {
        match err {
            SecretError::EmptySecret => FailureReason::EmptySecret,
            SecretError::InvalidSecretOrUrl => FailureReason::InvalidSecretOrUrl,
            SecretError::MissingSecretInPath => FailureReason::MissingSecretInPath,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum SubmissionStatus {
    #[default]
    Ready,
    Validating,
    Sending,
    Success,
    Failed(FailureReason),
    Timeout,
    NetworkError,
}

impl SubmissionStatus {
    pub fn severity(&self) -> Severity {
        match self {
            SubmissionStatus::Ready => Severity::Neutral,
            SubmissionStatus::Validating | SubmissionStatus::Sending => Severity::Info,
            SubmissionStatus::Success => Severity::Success,
            SubmissionStatus::Failed(_)
            | SubmissionStatus::Timeout
            | SubmissionStatus::NetworkError => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubmissionStatus::Ready => "Ready.".to_string(),
            SubmissionStatus::Validating => "Checking input...".to_string(),
            SubmissionStatus::Sending => "Sending...".to_string(),
            SubmissionStatus::Success => "Note saved.".to_string(),
            SubmissionStatus::Failed(reason) => match reason {
                FailureReason::EmptyContent => "Please enter note content.".to_string(),
                FailureReason::TooLong { limit } => {
                    format!("Content exceeds {} characters.", limit)
                }
                FailureReason::EmptySecret => "Please enter your API secret.".to_string(),
                FailureReason::InvalidSecretOrUrl => {
                    "Please enter a valid API secret or full API address.".to_string()
                }
                FailureReason::MissingSecretInPath => {
                    "No secret found in the API address.".to_string()
                }
                FailureReason::Http(code) => format!("Submission failed (HTTP {}).", code),
            },
            SubmissionStatus::Timeout => {
                "Request timed out, check your network and try again.".to_string()
            }
            SubmissionStatus::NetworkError => "Network error, please try again later.".to_string(),
        }
    }

    /// `Validating` and `Sending` are in flight; the rest stay put until the next submit.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Sending | SubmissionStatus::Validating)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
