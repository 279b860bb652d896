// src/lib.rs
// catnote - quick note submission client for CatNote
//
// Architecture:
// - Domain: pure rules (content limits, secret resolution, statuses)
// - Repositories: settings persistence behind a trait
// - Integrations: HTTP transport behind a trait
// - Services: the submission workflow, publishing state on the event bus
// - Explicit: no implicit behavior, no retries

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    content_length,
    resolve_secret,
    validate_note_content,
    FailureReason,
    ResolvedSecret,
    SecretError,
    SecretResolver,
    Settings,
    Severity,
    SubmissionStatus,
    ValidationError,
    DEFAULT_API_HOST,
    MAX_CONTENT_LENGTH,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult, TransportError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, BusyChanged, DomainEvent, EventBus, NoteSubmitted, SettingsPersisted,
    StatusChanged,
};

// ============================================================================
// PUBLIC API - Collaborators
// ============================================================================

pub use integrations::{CatNoteClient, NoteTransport, TransportResponse};
pub use repositories::{JsonSettingsRepository, SettingsRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::SubmissionController;
