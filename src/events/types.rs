// src/events/types.rs
//
// Events published by the submission workflow.
// Each event represents an immutable fact that has already occurred.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Severity, SubmissionStatus};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// STATUS EVENTS
// ============================================================================

/// Emitted whenever the current status changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub severity: Severity,
    pub message: String,
}

impl StatusChanged {
    pub fn new(status: SubmissionStatus) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            status,
            severity: status.severity(),
            message: status.message(),
        }
    }
}

impl DomainEvent for StatusChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "StatusChanged" }
}

/// Emitted when the single-flight busy flag flips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub busy: bool,
}

impl BusyChanged {
    pub fn new(busy: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            busy,
        }
    }
}

impl DomainEvent for BusyChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BusyChanged" }
}

// ============================================================================
// SUBMISSION EVENTS
// ============================================================================

/// Emitted when the server answered a submission (any HTTP status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_length: usize,
    pub status_code: u16,
    pub success: bool,
}

impl NoteSubmitted {
    pub fn new(content_length: usize, status_code: u16, success: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_length,
            status_code,
            success,
        }
    }
}

impl DomainEvent for NoteSubmitted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NoteSubmitted" }
}

// ============================================================================
// SETTINGS EVENTS
// ============================================================================

/// Emitted after settings were written to durable storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsPersisted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub remember_secret: bool,
    pub secret_stored: bool,
}

impl SettingsPersisted {
    pub fn new(remember_secret: bool, secret_stored: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            remember_secret,
            secret_stored,
        }
    }
}

impl DomainEvent for SettingsPersisted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SettingsPersisted" }
}
