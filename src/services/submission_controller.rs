// src/services/submission_controller.rs
//
// Submission workflow
//
// Sequence per submit():
//   validate content -> resolve secret -> busy + Sending -> POST
//   -> status from outcome -> persist settings -> busy cleared
//
// RULES:
// - Validation and secret errors return before any I/O and leave `busy` alone
// - Transport problems become a terminal status, never an Err
// - Only a settings save failure is returned as Err, after `busy` is cleared
// - Every status and busy change is published on the event bus

use std::sync::Arc;

use url::Url;

use crate::config::AppConfig;
use crate::domain::{
    content_length, validate_note_content, FailureReason, SecretResolver, Settings,
    SubmissionStatus,
};
use crate::error::{AppError, AppResult, TransportError};
use crate::events::{BusyChanged, EventBus, NoteSubmitted, SettingsPersisted, StatusChanged};
use crate::integrations::{endpoint_url, note_payload, NoteTransport};
use crate::repositories::SettingsRepository;

const SEND_LABEL: &str = "Send";
const SENDING_LABEL: &str = "Sending...";

pub struct SubmissionController {
    settings_repo: Arc<dyn SettingsRepository>,
    transport: Arc<dyn NoteTransport>,
    event_bus: Arc<EventBus>,
    resolver: SecretResolver,
    api_host: String,
    max_content_length: usize,

    content: String,
    secret_input: String,
    remember_secret: bool,
    busy: bool,
    status: SubmissionStatus,
}

impl SubmissionController {
    pub fn new(
        settings_repo: Arc<dyn SettingsRepository>,
        transport: Arc<dyn NoteTransport>,
        event_bus: Arc<EventBus>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        // Reject hosts that cannot form an endpoint before the UI goes live.
        Url::parse(&format!("https://api.{}/", config.api_host.trim())).map_err(|e| {
            AppError::Config(format!("Invalid API host {:?}: {}", config.api_host, e))
        })?;

        Ok(Self {
            settings_repo,
            transport,
            event_bus,
            resolver: SecretResolver::new(&config.api_host),
            api_host: config.api_host.clone(),
            max_content_length: config.max_content_length,
            content: String::new(),
            secret_input: String::new(),
            remember_secret: true,
            busy: false,
            status: SubmissionStatus::Ready,
        })
    }

    // ========================================================================
    // STATE
    // ========================================================================

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn secret_input(&self) -> &str {
        &self.secret_input
    }

    pub fn set_secret_input(&mut self, secret_input: impl Into<String>) {
        self.secret_input = secret_input.into();
    }

    pub fn remember_secret(&self) -> bool {
        self.remember_secret
    }

    pub fn set_remember_secret(&mut self, remember_secret: bool) {
        self.remember_secret = remember_secret;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    // ========================================================================
    // DERIVED
    // ========================================================================

    /// Content length in UTF-16 code units
    pub fn content_length(&self) -> usize {
        content_length(&self.content)
    }

    pub fn can_submit(&self) -> bool {
        !self.busy
            && !self.content.trim().is_empty()
            && !self.secret_input.trim().is_empty()
            && self.content_length() <= self.max_content_length
    }

    /// e.g. "42 / 5000"
    pub fn content_length_display(&self) -> String {
        format!("{} / {}", self.content_length(), self.max_content_length)
    }

    pub fn is_over_limit(&self) -> bool {
        self.content_length() > self.max_content_length
    }

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Load persisted settings. Never fails; the store falls back to defaults.
    pub async fn initialize(&mut self) {
        let settings = self.settings_repo.load().await;

        self.remember_secret = settings.remember_secret;
        if self.remember_secret {
            self.secret_input = settings.secret;
        }

        log::info!(
            "Controller initialized (remember_secret: {}, secret loaded: {})",
            self.remember_secret,
            !self.secret_input.is_empty()
        );
        self.set_status(SubmissionStatus::Ready);
    }

    /// Run one submission attempt and return the resulting status.
    ///
    /// A call while another submission is in flight is ignored.
    pub async fn submit(&mut self) -> AppResult<SubmissionStatus> {
        if self.busy {
            log::warn!("Submit ignored: a submission is already in flight");
            return Ok(self.status);
        }

        self.set_status(SubmissionStatus::Validating);

        if let Err(e) = validate_note_content(&self.content, self.max_content_length) {
            log::debug!("Note rejected: {}", e);
            self.set_status(SubmissionStatus::Failed(e.into()));
            return Ok(self.status);
        }

        let secret = match self.resolver.resolve(&self.secret_input) {
            Ok(secret) => secret,
            Err(e) => {
                log::debug!("Secret rejected: {}", e);
                self.set_status(SubmissionStatus::Failed(e.into()));
                return Ok(self.status);
            }
        };

        let url = match endpoint_url(&self.api_host, &secret) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Could not build endpoint for {}: {}", secret.masked(), e);
                self.set_status(SubmissionStatus::Failed(FailureReason::InvalidSecretOrUrl));
                return Ok(self.status);
            }
        };

        self.set_busy(true);
        self.set_status(SubmissionStatus::Sending);

        let length = self.content_length();
        log::info!("Submitting note ({} chars) for secret {}", length, secret.masked());

        let outcome = self
            .transport
            .post(url.as_str(), &note_payload(&self.content))
            .await;

        let status = match outcome {
            Ok(response) => {
                self.event_bus.emit(NoteSubmitted::new(
                    length,
                    response.status_code,
                    response.success,
                ));
                if response.success {
                    SubmissionStatus::Success
                } else {
                    log::warn!("Submission rejected with HTTP {}", response.status_code);
                    SubmissionStatus::Failed(FailureReason::Http(response.status_code))
                }
            }
            Err(TransportError::Timeout) => {
                log::warn!("Submission timed out");
                SubmissionStatus::Timeout
            }
            Err(TransportError::HttpFailure(code)) => {
                log::warn!("Submission rejected with HTTP {}", code);
                SubmissionStatus::Failed(FailureReason::Http(code))
            }
            Err(TransportError::NetworkFailure(reason)) => {
                log::warn!("Submission failed: {}", reason);
                SubmissionStatus::NetworkError
            }
        };
        self.set_status(status);

        let persisted = self.persist_settings().await;
        self.set_busy(false);

        persisted?;
        Ok(status)
    }

    /// Write the current secret preference to the settings store.
    pub async fn persist_settings(&self) -> AppResult<()> {
        let settings = Settings::from_input(&self.secret_input, self.remember_secret);

        if let Err(e) = self.settings_repo.save(&settings).await {
            log::error!("Failed to save settings: {}", e);
            return Err(e);
        }

        self.event_bus.emit(SettingsPersisted::new(
            settings.remember_secret,
            !settings.secret.is_empty(),
        ));
        Ok(())
    }

    /// Final save before the process exits.
    pub async fn shutdown(&self) -> AppResult<()> {
        log::debug!("Persisting settings on shutdown");
        self.persist_settings().await
    }

    fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
        self.event_bus.emit(StatusChanged::new(status));
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.event_bus.emit(BusyChanged::new(busy));
        }
    }
}
