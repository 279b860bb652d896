// src/services/submission_controller_tests.rs
//
// Submission workflow tests
//
// Collaborators are mockall doubles: a transport call or settings save that
// is not expected fails the test, which is how "no network call" is proven.

#[cfg(test)]
mod workflow_tests {
    use std::sync::{Arc, Mutex};

    use crate::config::AppConfig;
    use crate::domain::{FailureReason, Settings, SubmissionStatus};
    use crate::error::{AppError, TransportError};
    use crate::events::{BusyChanged, EventBus, NoteSubmitted, SettingsPersisted, StatusChanged};
    use crate::integrations::{MockNoteTransport, TransportResponse};
    use crate::repositories::MockSettingsRepository;
    use crate::services::SubmissionController;

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn response(status_code: u16) -> TransportResponse {
        TransportResponse {
            success: (200..300).contains(&status_code),
            status_code,
            body: String::new(),
        }
    }

    /// Settings store double that records every save.
    fn recording_repo(loaded: Settings) -> (MockSettingsRepository, Arc<Mutex<Vec<Settings>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().returning(move || loaded.clone());
        let sink = Arc::clone(&saved);
        repo.expect_save().returning(move |settings| {
            sink.lock().unwrap().push(settings.clone());
            Ok(())
        });
        (repo, saved)
    }

    fn transport_returning(
        result: Result<TransportResponse, TransportError>,
    ) -> MockNoteTransport {
        let mut transport = MockNoteTransport::new();
        transport
            .expect_post()
            .times(1)
            .returning(move |_, _| result.clone());
        transport
    }

    fn no_network() -> MockNoteTransport {
        let mut transport = MockNoteTransport::new();
        transport.expect_post().times(0);
        transport
    }

    fn build(
        repo: MockSettingsRepository,
        transport: MockNoteTransport,
    ) -> (SubmissionController, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let controller = SubmissionController::new(
            Arc::new(repo),
            Arc::new(transport),
            Arc::clone(&bus),
            &AppConfig::default(),
        )
        .unwrap();
        (controller, bus)
    }

    fn record_statuses(bus: &EventBus) -> Arc<Mutex<Vec<SubmissionStatus>>> {
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&statuses);
        bus.subscribe::<StatusChanged, _>(move |e| sink.lock().unwrap().push(e.status));
        statuses
    }

    fn record_busy(bus: &EventBus) -> Arc<Mutex<Vec<bool>>> {
        let flags = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&flags);
        bus.subscribe::<BusyChanged, _>(move |e| sink.lock().unwrap().push(e.busy));
        flags
    }

    // ========================================================================
    // INITIALIZE
    // ========================================================================

    #[tokio::test]
    async fn test_initialize_restores_remembered_secret() {
        let (repo, _) = recording_repo(Settings::new("ABC123", true));
        let (mut controller, _) = build(repo, no_network());

        controller.initialize().await;

        assert_eq!(controller.secret_input(), "ABC123");
        assert!(controller.remember_secret());
        assert_eq!(controller.status(), SubmissionStatus::Ready);
    }

    #[tokio::test]
    async fn test_initialize_ignores_secret_when_not_remembered() {
        let (repo, _) = recording_repo(Settings::new("stale", false));
        let (mut controller, _) = build(repo, no_network());

        controller.initialize().await;

        assert_eq!(controller.secret_input(), "");
        assert!(!controller.remember_secret());
    }

    // ========================================================================
    // VALIDATION SHORT-CIRCUITS
    // ========================================================================

    #[tokio::test]
    async fn test_empty_content_fails_without_io() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_save().times(0);
        let (mut controller, bus) = build(repo, no_network());
        let busy = record_busy(&bus);

        controller.set_content("  \n ");
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::Failed(FailureReason::EmptyContent));
        assert!(!controller.is_busy());
        assert!(busy.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_over_limit_content_fails_without_network() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_save().times(0);
        let (mut controller, _) = build(repo, no_network());

        controller.set_content("a".repeat(5001));
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(
            status,
            SubmissionStatus::Failed(FailureReason::TooLong { limit: 5000 })
        );
    }

    #[tokio::test]
    async fn test_configured_limit_flows_into_status_message() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_save().times(0);
        let config = AppConfig {
            max_content_length: 10,
            ..AppConfig::default()
        };
        let mut controller = SubmissionController::new(
            Arc::new(repo),
            Arc::new(no_network()),
            Arc::new(EventBus::new()),
            &config,
        )
        .unwrap();

        controller.set_content("a".repeat(11));
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::Failed(FailureReason::TooLong { limit: 10 }));
        assert_eq!(status.message(), "Content exceeds 10 characters.");
        assert_eq!(controller.content_length_display(), "11 / 10");
    }

    #[tokio::test]
    async fn test_content_at_limit_is_sent() {
        let (repo, _) = recording_repo(Settings::default());
        let (mut controller, _) = build(repo, transport_returning(Ok(response(200))));

        controller.set_content("a".repeat(5000));
        controller.set_secret_input("ABC123");

        assert_eq!(controller.submit().await.unwrap(), SubmissionStatus::Success);
    }

    #[tokio::test]
    async fn test_secret_errors_map_to_distinct_statuses() {
        let cases = [
            ("   ", FailureReason::EmptySecret),
            ("https://example.com/nothing", FailureReason::InvalidSecretOrUrl),
            ("https://api.catnote.cn/sapi/", FailureReason::MissingSecretInPath),
        ];

        for (input, expected) in cases {
            let mut repo = MockSettingsRepository::new();
            repo.expect_save().times(0);
            let (mut controller, bus) = build(repo, no_network());
            let busy = record_busy(&bus);

            controller.set_content("note");
            controller.set_secret_input(input);
            let status = controller.submit().await.unwrap();

            assert_eq!(status, SubmissionStatus::Failed(expected), "input {:?}", input);
            assert!(busy.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_validation_failure_passes_through_validating() {
        let (mut controller, bus) = build(MockSettingsRepository::new(), no_network());
        let statuses = record_statuses(&bus);

        controller.set_secret_input("ABC123");
        controller.submit().await.unwrap();

        assert_eq!(
            *statuses.lock().unwrap(),
            vec![
                SubmissionStatus::Validating,
                SubmissionStatus::Failed(FailureReason::EmptyContent),
            ]
        );
    }

    // ========================================================================
    // NETWORK OUTCOMES
    // ========================================================================

    #[tokio::test]
    async fn test_success_posts_to_endpoint_and_persists() {
        let (repo, saved) = recording_repo(Settings::default());
        let mut transport = MockNoteTransport::new();
        transport
            .expect_post()
            .withf(|url, body| {
                url == "https://api.catnote.cn/sapi/ABC123"
                    && *body == serde_json::json!({ "content": "remember the milk" })
            })
            .times(1)
            .returning(|_, _| Ok(response(200)));
        let (mut controller, bus) = build(repo, transport);
        let statuses = record_statuses(&bus);
        let busy = record_busy(&bus);

        controller.set_content("remember the milk");
        controller.set_secret_input("  ABC123  ");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::Success);
        assert_eq!(controller.status(), SubmissionStatus::Success);
        assert!(!controller.is_busy());
        assert_eq!(*saved.lock().unwrap(), vec![Settings::new("ABC123", true)]);
        assert_eq!(
            *statuses.lock().unwrap(),
            vec![
                SubmissionStatus::Validating,
                SubmissionStatus::Sending,
                SubmissionStatus::Success,
            ]
        );
        assert_eq!(*busy.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_busy_is_set_while_request_is_in_flight() {
        let (repo, _) = recording_repo(Settings::default());
        let bus = Arc::new(EventBus::new());

        let in_flight = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&in_flight);
        bus.subscribe::<BusyChanged, _>(move |e| *flag.lock().unwrap() = e.busy);

        let seen_busy = Arc::new(Mutex::new(None));
        let busy_flag = Arc::clone(&in_flight);
        let record = Arc::clone(&seen_busy);
        let mut transport = MockNoteTransport::new();
        transport.expect_post().times(1).returning(move |_, _| {
            *record.lock().unwrap() = Some(*busy_flag.lock().unwrap());
            Ok(response(200))
        });

        let mut controller = SubmissionController::new(
            Arc::new(repo),
            Arc::new(transport),
            Arc::clone(&bus),
            &AppConfig::default(),
        )
        .unwrap();
        controller.set_content("note");
        controller.set_secret_input("ABC123");
        controller.submit().await.unwrap();

        assert_eq!(*seen_busy.lock().unwrap(), Some(true));
        assert!(!*in_flight.lock().unwrap());
    }

    #[tokio::test]
    async fn test_url_input_posts_resolved_secret_but_persists_raw_input() {
        let (repo, saved) = recording_repo(Settings::default());
        let mut transport = MockNoteTransport::new();
        transport
            .expect_post()
            .withf(|url, _| url == "https://api.catnote.cn/sapi/XYZ789")
            .times(1)
            .returning(|_, _| Ok(response(201)));
        let (mut controller, _) = build(repo, transport);

        controller.set_content("note");
        controller.set_secret_input(" https://api.catnote.cn/sapi/XYZ789/ ");
        controller.submit().await.unwrap();

        assert_eq!(
            *saved.lock().unwrap(),
            vec![Settings::new("https://api.catnote.cn/sapi/XYZ789/", true)]
        );
    }

    #[tokio::test]
    async fn test_http_failure_reports_status_code() {
        let (repo, saved) = recording_repo(Settings::default());
        let (mut controller, bus) = build(repo, transport_returning(Ok(response(500))));
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&submitted);
        bus.subscribe::<NoteSubmitted, _>(move |e| {
            sink.lock().unwrap().push((e.status_code, e.success))
        });

        controller.set_content("note");
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::Failed(FailureReason::Http(500)));
        assert_eq!(status.message(), "Submission failed (HTTP 500).");
        assert!(!controller.is_busy());
        assert_eq!(saved.lock().unwrap().len(), 1);
        assert_eq!(*submitted.lock().unwrap(), vec![(500, false)]);
    }

    #[tokio::test]
    async fn test_timeout_is_terminal_and_clears_busy() {
        let (repo, saved) = recording_repo(Settings::default());
        let (mut controller, _) = build(repo, transport_returning(Err(TransportError::Timeout)));

        controller.set_content("note");
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::Timeout);
        assert!(!controller.is_busy());
        assert!(controller.can_submit());
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_is_terminal_and_clears_busy() {
        let (repo, _) = recording_repo(Settings::default());
        let (mut controller, _) = build(
            repo,
            transport_returning(Err(TransportError::NetworkFailure("refused".to_string()))),
        );

        controller.set_content("note");
        controller.set_secret_input("ABC123");
        let status = controller.submit().await.unwrap();

        assert_eq!(status, SubmissionStatus::NetworkError);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_transport_http_failure_error_maps_to_failed() {
        let (repo, _) = recording_repo(Settings::default());
        let (mut controller, _) = build(repo, transport_returning(Err(TransportError::HttpFailure(429))));

        controller.set_content("note");
        controller.set_secret_input("ABC123");

        assert_eq!(
            controller.submit().await.unwrap(),
            SubmissionStatus::Failed(FailureReason::Http(429))
        );
    }

    #[tokio::test]
    async fn test_no_automatic_retry_but_resubmit_works() {
        let (repo, _) = recording_repo(Settings::default());
        let mut transport = MockNoteTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(TransportError::Timeout));
        transport
            .expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(response(200)));
        let (mut controller, _) = build(repo, transport);

        controller.set_content("note");
        controller.set_secret_input("ABC123");

        assert_eq!(controller.submit().await.unwrap(), SubmissionStatus::Timeout);
        assert_eq!(controller.submit().await.unwrap(), SubmissionStatus::Success);
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    #[tokio::test]
    async fn test_save_failure_is_surfaced_after_busy_is_cleared() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_save().times(1).returning(|_| {
            Err(AppError::Persistence(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        });
        let (mut controller, _) = build(repo, transport_returning(Ok(response(200))));

        controller.set_content("note");
        controller.set_secret_input("ABC123");
        let result = controller.submit().await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert!(!controller.is_busy());
        assert_eq!(controller.status(), SubmissionStatus::Success);
    }

    #[tokio::test]
    async fn test_forgotten_secret_is_persisted_empty() {
        let (repo, saved) = recording_repo(Settings::default());
        let (mut controller, bus) = build(repo, no_network());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        bus.subscribe::<SettingsPersisted, _>(move |e| {
            sink.lock().unwrap().push((e.remember_secret, e.secret_stored))
        });

        controller.set_secret_input("ABC123");
        controller.set_remember_secret(false);
        controller.persist_settings().await.unwrap();

        assert_eq!(*saved.lock().unwrap(), vec![Settings::new("", false)]);
        assert_eq!(*events.lock().unwrap(), vec![(false, false)]);
    }

    #[tokio::test]
    async fn test_shutdown_persists_current_input() {
        let (repo, saved) = recording_repo(Settings::default());
        let (mut controller, _) = build(repo, no_network());

        controller.set_secret_input(" NEW456 ");
        controller.shutdown().await.unwrap();

        assert_eq!(*saved.lock().unwrap(), vec![Settings::new("NEW456", true)]);
    }
}
