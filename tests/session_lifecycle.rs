mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use common::{ids, ranking, session, ScriptedBackend, TestSession, GRENOBLE, LYON};
use u_assign::backend::{BackendError, GENERIC_FAILURE_MESSAGE};
use u_assign::config::SessionConfig;
use u_assign::geo::MarkerKind;
use u_assign::models::{Candidate, GeoPoint, InterventionDetails, Role, TechnicianLoad};
use u_assign::session::{AssignmentSession, SessionError, SessionPhase, SubmitOutcome};
use u_assign::validation::ValidationErrorKind;

fn details() -> InterventionDetails {
    InterventionDetails::new("  Boiler pressure drop ").with_description("Gas boiler, 2nd floor")
}

fn spawn_submit(session: &Arc<TestSession>) -> JoinHandle<Result<SubmitOutcome, SessionError>> {
    let session = Arc::clone(session);
    tokio::spawn(async move { session.submit(&details()).await })
}

#[tokio::test(start_paused = true)]
async fn test_submit_without_target_is_rejected() {
    let backend = Arc::new(ScriptedBackend::new(10).then(Ok(ranking())));
    let session = session(&backend);

    let err = session.submit(&details()).await.unwrap_err();
    assert!(matches!(err, SessionError::MissingTargetLocation));
    assert_eq!(backend.calls(), 0);

    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_blank_title_is_rejected() {
    let backend = Arc::new(ScriptedBackend::new(10).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let err = session
        .submit(&InterventionDetails::new("   "))
        .await
        .unwrap_err();
    let SessionError::InvalidRequest(errors) = err else {
        panic!("expected InvalidRequest, got {err:?}");
    };
    assert_eq!(errors[0].kind, ValidationErrorKind::BlankTitle);
    assert_eq!(backend.calls(), 0);
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_read_only_submit_does_nothing() {
    let backend = Arc::new(ScriptedBackend::new(10).then(Ok(ranking())));
    let session =
        AssignmentSession::new(Arc::clone(&backend), SessionConfig::default()).with_read_only(true);

    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::ReadOnly);
    session.update_target_location(LYON).unwrap();
    let before = session.snapshot();
    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::ReadOnly);

    assert_eq!(session.snapshot(), before);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_role_controls_submission() {
    let backend = Arc::new(ScriptedBackend::new(10).then(Ok(ranking())));
    let tech = AssignmentSession::for_role(
        Arc::clone(&backend),
        SessionConfig::default(),
        Role::parse("tech").as_ref(),
    );
    tech.update_target_location(LYON).unwrap();
    assert_eq!(tech.submit(&details()).await.unwrap(), SubmitOutcome::ReadOnly);
    assert_eq!(backend.calls(), 0);

    let dispatcher = AssignmentSession::for_role(
        Arc::clone(&backend),
        SessionConfig::default().with_min_thinking_ms(0),
        Role::parse(" Dispatcher ").as_ref(),
    );
    dispatcher.update_target_location(LYON).unwrap();
    assert_eq!(dispatcher.submit(&details()).await.unwrap(), SubmitOutcome::Completed);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_fast_response_waits_for_thinking_floor() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);

    sleep(Duration::from_millis(1100)).await;
    assert_eq!(backend.calls(), 1);
    assert_eq!(session.phase(), SessionPhase::Thinking);
    assert!(session.snapshot().result.is_none());

    sleep(Duration::from_millis(150)).await;
    assert_eq!(session.phase(), SessionPhase::Result);
    assert_eq!(handle.await.unwrap().unwrap(), SubmitOutcome::Completed);

    let request = &backend.requests()[0];
    assert_eq!(request.title, "Boiler pressure drop");
    assert_eq!(request.latitude, Some(LYON.latitude));
    assert_eq!(request.longitude, Some(LYON.longitude));
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_is_shown_on_arrival() {
    let backend = Arc::new(ScriptedBackend::new(1500).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let start = Instant::now();
    let outcome = session.submit(&details()).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert!(elapsed >= Duration::from_millis(1500));
    assert!(elapsed < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn test_failure_returns_to_idle_with_detail() {
    let backend = Arc::new(
        ScriptedBackend::new(100)
            .then(Err(BackendError::Api {
                status: 409,
                detail: Some("No technicians available for assignment".into()),
            }))
            .then(Ok(ranking())),
    );
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let start = Instant::now();
    let outcome = session.submit(&details()).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1200));
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("No technicians available for assignment".into())
    );

    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(snap.result.is_none());
    assert_eq!(
        snap.error.as_deref(),
        Some("No technicians available for assignment")
    );
    assert_eq!(snap.target, Some(LYON));

    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::Completed);
    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Result);
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_inconsistent_ranking_is_a_failure() {
    let broken = ranking().with_alternative(Candidate::new(2, "Bruno again"));
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(broken)));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let outcome = session.submit(&details()).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed(GENERIC_FAILURE_MESSAGE.into()));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.snapshot().result.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_target_change_discards_pending_response() {
    let backend = Arc::new(ScriptedBackend::new(500).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);
    sleep(Duration::from_millis(200)).await;
    session.update_target_location(GRENOBLE).unwrap();

    assert_eq!(handle.await.unwrap().unwrap(), SubmitOutcome::Superseded);

    sleep(Duration::from_secs(2)).await;
    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert_eq!(snap.target, Some(GRENOBLE));
    assert!(snap.result.is_none());
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_thinking_floor() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);
    sleep(Duration::from_millis(500)).await;
    assert_eq!(session.phase(), SessionPhase::Thinking);
    session.reset();

    assert_eq!(handle.await.unwrap().unwrap(), SubmitOutcome::Superseded);
    sleep(Duration::from_secs(2)).await;

    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(snap.target.is_none());
    assert!(snap.result.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_pending_failure_keeps_error_clear() {
    let backend = Arc::new(
        ScriptedBackend::new(800).then(Err(BackendError::Transport("connection reset".into()))),
    );
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);
    sleep(Duration::from_millis(300)).await;
    session.reset();

    assert_eq!(handle.await.unwrap().unwrap(), SubmitOutcome::Superseded);
    assert!(session.snapshot().error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_submit_releases_session() {
    let backend = Arc::new(
        ScriptedBackend::new(5000)
            .then(Ok(ranking()))
            .then(Ok(ranking())),
    );
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let abandoned =
        tokio::time::timeout(Duration::from_millis(300), session.submit(&details())).await;
    assert!(abandoned.is_err());

    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(snap.error.is_none());
    assert_eq!(snap.target, Some(LYON));

    sleep(Duration::from_secs(10)).await;
    assert_eq!(session.phase(), SessionPhase::Idle);

    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::Completed);
    assert_eq!(backend.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_second_submit_while_thinking_is_rejected() {
    let backend = Arc::new(ScriptedBackend::new(300).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);
    sleep(Duration::from_millis(50)).await;

    let err = session.submit(&details()).await.unwrap_err();
    assert!(matches!(err, SessionError::AlreadyThinking));
    assert_eq!(backend.calls(), 1);

    assert_eq!(handle.await.unwrap().unwrap(), SubmitOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_from_result() {
    let second = ranking().with_rationale("Second pass");
    let backend = Arc::new(
        ScriptedBackend::new(100)
            .then(Ok(ranking()))
            .then(Ok(second)),
    );
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::Completed);
    assert_eq!(session.submit(&details()).await.unwrap(), SubmitOutcome::Completed);

    let snap = session.snapshot();
    assert_eq!(backend.calls(), 2);
    assert_eq!(snap.result.unwrap().rationale, "Second pass");
}

#[tokio::test(start_paused = true)]
async fn test_select_alternative_reorders_locally() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);

    assert!(matches!(
        session.select_alternative(2),
        Err(SessionError::NoResult)
    ));

    session.update_target_location(LYON).unwrap();
    session.submit(&details()).await.unwrap();

    assert!(session.select_alternative(3).unwrap());
    let result = session.snapshot().result.unwrap();
    assert_eq!(ids(&result), vec![3, 2, 1]);

    assert!(!session.select_alternative(3).unwrap());
    assert!(matches!(
        session.select_alternative(99),
        Err(SessionError::UnknownCandidate(99))
    ));
    assert_eq!(ids(&session.snapshot().result.unwrap()), vec![3, 2, 1]);
    assert_eq!(backend.calls(), 1);

    let view = session.snapshot().view().unwrap();
    assert_eq!(view.recommended.score_percent, 41);
}

#[tokio::test(start_paused = true)]
async fn test_select_alternative_while_thinking() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let handle = spawn_submit(&session);
    sleep(Duration::from_millis(10)).await;
    assert!(matches!(
        session.select_alternative(2),
        Err(SessionError::NoResult)
    ));
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_new_target_clears_displayed_result() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();
    session.submit(&details()).await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Result);

    session.update_target_location(GRENOBLE).unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.phase, SessionPhase::Idle);
    assert!(snap.result.is_none());
    assert_eq!(snap.target, Some(GRENOBLE));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_target_leaves_state_untouched() {
    let backend = Arc::new(ScriptedBackend::new(100));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();
    let before = session.snapshot();

    let err = session
        .update_target_location(GeoPoint::new(95.0, 4.0))
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidLocation(_)));
    assert_eq!(session.snapshot(), before);
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_observes_transitions() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let session = session(&backend);
    session.update_target_location(LYON).unwrap();

    let mut rx = session.subscribe();
    let handle = spawn_submit(&session);

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().phase, SessionPhase::Thinking);

    rx.changed().await.unwrap();
    {
        let snap = rx.borrow_and_update();
        assert_eq!(snap.phase, SessionPhase::Result);
        assert_eq!(snap.result.as_ref().unwrap().recommended.technician_id, 1);
    }

    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_sessions_are_independent() {
    let backend = Arc::new(ScriptedBackend::new(100).then(Ok(ranking())));
    let first = session(&backend);
    let second = session(&backend);
    first.update_target_location(LYON).unwrap();
    second.update_target_location(GRENOBLE).unwrap();

    assert_eq!(first.submit(&details()).await.unwrap(), SubmitOutcome::Completed);

    assert_eq!(first.phase(), SessionPhase::Result);
    let other = second.snapshot();
    assert_eq!(other.phase, SessionPhase::Idle);
    assert!(other.result.is_none());
    assert_eq!(other.target, Some(GRENOBLE));
}

#[tokio::test(start_paused = true)]
async fn test_markers_follow_session_state() {
    let load = (10..14)
        .map(|id| TechnicianLoad::new(id, format!("Tech {id}")).with_open_count(id - 9))
        .collect();
    let backend = Arc::new(
        ScriptedBackend::new(100)
            .then(Ok(ranking()))
            .with_load(load),
    );
    let session = session(&backend);

    assert_eq!(session.refresh_load().await.unwrap(), 4);
    assert!(session.markers().is_empty());

    session.update_target_location(LYON).unwrap();
    let markers = session.markers();
    assert_eq!(markers.target, Some(LYON));
    assert_eq!(markers.markers.len(), 3);
    assert!(markers
        .markers
        .iter()
        .all(|m| m.kind == MarkerKind::Placeholder));

    session.submit(&details()).await.unwrap();
    let kinds: Vec<_> = session.markers().markers.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerKind::Recommended,
            MarkerKind::Alternative,
            MarkerKind::Alternative
        ]
    );

    session.reset();
    assert!(session.markers().is_empty());
    assert_eq!(session.snapshot().technician_load.len(), 4);
}
