// src/domain/mod.rs
//
// Domain Root - pure rules, no I/O
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod note;
pub mod secret;
pub mod settings;
pub mod status;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Note content
pub use note::{content_length, validate_note_content, MAX_CONTENT_LENGTH};

// Secret resolution
pub use secret::{resolve_secret, ResolvedSecret, SecretResolver, API_PATH_MARKER, DEFAULT_API_HOST};

// Settings
pub use settings::Settings;

// Status
pub use status::{FailureReason, Severity, SubmissionStatus};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Note content rule violations. Detected before any I/O.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note content is empty")]
    EmptyContent,

    #[error("Note content exceeds {limit} characters (got {length})")]
    TooLong { length: usize, limit: usize },
}

/// Reasons raw secret input cannot be turned into a token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SecretError {
    #[error("API secret is empty")]
    EmptySecret,

    #[error("Input is neither a valid secret nor a valid API address")]
    InvalidSecretOrUrl,

    #[error("No secret found in the API address")]
    MissingSecretInPath,
}

/// Domain result type
pub type DomainResult<T, E = ValidationError> = Result<T, E>;
