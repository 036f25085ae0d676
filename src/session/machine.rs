//! The assignment session state machine.

use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::{SessionError, SessionPhase, SessionSnapshot, SubmitOutcome};
use crate::backend::{AssignmentBackend, BackendError};
use crate::config::SessionConfig;
use crate::geo::MarkerSet;
use crate::models::{
    AssignmentRequest, AssignmentResult, GeoPoint, InterventionDetails, Role, TechnicianId,
};
use crate::validation::{validate_point, validate_request, validate_result};

/// Owns the state of one assignment flow and drives its transitions.
///
/// Sessions are independent: each owns its state channel, so any number
/// can share one backend. To reset or move the target while a
/// submission is pending, share the session behind an `Arc` and call
/// those methods from another task.
///
/// # Example
/// ```no_run
/// use u_assign::backend::HttpBackend;
/// use u_assign::config::{ClientConfig, SessionConfig};
/// use u_assign::models::{GeoPoint, InterventionDetails};
/// use u_assign::session::{AssignmentSession, SessionPhase};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new(&ClientConfig::from_env()?)?;
/// let session = AssignmentSession::new(backend, SessionConfig::default());
///
/// session.update_target_location(GeoPoint::new(45.76, 4.84))?;
/// session.submit(&InterventionDetails::new("Boiler repair")).await?;
/// assert_eq!(session.snapshot().phase, SessionPhase::Result);
/// # Ok(())
/// # }
/// ```
pub struct AssignmentSession<B> {
    backend: B,
    config: SessionConfig,
    read_only: bool,
    state: watch::Sender<SessionSnapshot>,
}

impl<B: AssignmentBackend> AssignmentSession<B> {
    /// Creates an idle session with full access.
    pub fn new(backend: B, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            backend,
            config,
            read_only: false,
            state,
        }
    }

    /// Creates a session whose access follows `role`.
    ///
    /// Unknown or missing roles get a read-only session.
    pub fn for_role(backend: B, config: SessionConfig, role: Option<&Role>) -> Self {
        let read_only = !role.is_some_and(Role::can_manage);
        Self::new(backend, config).with_read_only(read_only)
    }

    /// Sets whether submissions are ignored.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    /// Receives every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Markers for the current target/result pair.
    pub fn markers(&self) -> MarkerSet {
        self.state.borrow().markers(self.config.placeholder_limit)
    }

    /// Moves the target. Valid in every state.
    ///
    /// Drops any displayed or pending result and clears the error, since
    /// a ranking for the old location must never be shown against the
    /// new one. An invalid point is rejected and nothing changes.
    pub fn update_target_location(&self, point: GeoPoint) -> Result<(), SessionError> {
        validate_point(&point).map_err(SessionError::InvalidLocation)?;
        self.state.send_modify(|s| {
            s.token += 1;
            s.phase = SessionPhase::Idle;
            s.target = Some(point);
            s.result = None;
            s.error = None;
            debug!(token = s.token, lat = point.latitude, lng = point.longitude, "target moved");
        });
        Ok(())
    }

    /// Returns to `Idle`, clearing result, error and target. Valid in
    /// every state; a pending submission is discarded.
    pub fn reset(&self) {
        self.state.send_modify(|s| {
            s.token += 1;
            s.phase = SessionPhase::Idle;
            s.target = None;
            s.result = None;
            s.error = None;
            debug!(token = s.token, "session reset");
        });
    }

    /// Makes a displayed candidate the recommended one, without a
    /// network call.
    ///
    /// Returns `Ok(false)` if the candidate was already recommended.
    pub fn select_alternative(&self, technician_id: TechnicianId) -> Result<bool, SessionError> {
        let mut outcome = Err(SessionError::NoResult);
        self.state.send_if_modified(|s| {
            if s.phase != SessionPhase::Result {
                return false;
            }
            let Some(result) = s.result.as_mut() else {
                return false;
            };
            match result.promote(technician_id) {
                Some(changed) => {
                    outcome = Ok(changed);
                    changed
                }
                None => {
                    outcome = Err(SessionError::UnknownCandidate(technician_id));
                    false
                }
            }
        });
        if let Ok(true) = outcome {
            info!(technician_id, "recommended technician overridden");
        }
        outcome
    }

    /// Requests a ranking for the current target.
    ///
    /// Rejected synchronously (no network call, no state change) when no
    /// target is set, the details are invalid, or a submission is already
    /// in flight. A read-only session returns `SubmitOutcome::ReadOnly`
    /// and does nothing else.
    ///
    /// Otherwise the session enters `Thinking` and stays there at least
    /// `min_thinking` from now, then shows the result or returns to
    /// `Idle` with the failure message. Collaborator failures never
    /// surface as `Err`.
    pub async fn submit(
        &self,
        details: &InterventionDetails,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.read_only {
            debug!("submit ignored: read-only session");
            return Ok(SubmitOutcome::ReadOnly);
        }

        let (token, request) = self.begin(details)?;
        let guard = ThinkingGuard::new(&self.state, token);
        let floor = Instant::now() + self.config.min_thinking();
        let mut watcher = self.state.subscribe();
        debug!(token, backend = self.backend.name(), "submission started");

        let response = tokio::select! {
            response = self.backend.recommend(&request) => response,
            _ = superseded(&mut watcher, token) => {
                debug!(token, "submission cancelled while awaiting collaborator");
                guard.disarm();
                return Ok(SubmitOutcome::Superseded);
            }
        };
        let response = response.and_then(|result| {
            validate_result(&result)
                .map(|()| result)
                .map_err(BackendError::InvalidResponse)
        });

        tokio::select! {
            _ = sleep_until(floor) => {}
            _ = superseded(&mut watcher, token) => {
                debug!(token, "submission cancelled during thinking floor");
                guard.disarm();
                return Ok(SubmitOutcome::Superseded);
            }
        }

        let outcome = self.finish(token, response);
        guard.disarm();
        Ok(outcome)
    }

    /// Fetches the technician load snapshot used for placeholder markers.
    ///
    /// On failure the previous snapshot is kept; the session error is not
    /// touched. Returns the number of rows received.
    pub async fn refresh_load(&self) -> Result<usize, BackendError> {
        let rows = match self.backend.technician_load().await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "technician load unavailable");
                return Err(err);
            }
        };
        let count = rows.len();
        self.state.send_modify(|s| s.technician_load = rows);
        Ok(count)
    }

    /// Validates and enters `Thinking`, returning the new token.
    fn begin(
        &self,
        details: &InterventionDetails,
    ) -> Result<(u64, AssignmentRequest), SessionError> {
        let mut outcome = Err(SessionError::AlreadyThinking);
        self.state.send_if_modified(|s| {
            if s.phase == SessionPhase::Thinking {
                return false;
            }
            let Some(target) = s.target else {
                outcome = Err(SessionError::MissingTargetLocation);
                return false;
            };
            let request = AssignmentRequest::from_details(details, Some(target));
            if let Err(errors) = validate_request(&request) {
                outcome = Err(SessionError::InvalidRequest(errors));
                return false;
            }
            s.token += 1;
            s.phase = SessionPhase::Thinking;
            s.result = None;
            s.error = None;
            outcome = Ok((s.token, request));
            true
        });
        outcome
    }

    /// Applies a response if `token` is still the pending submission.
    fn finish(
        &self,
        token: u64,
        response: Result<AssignmentResult, BackendError>,
    ) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::Superseded;
        self.state.send_if_modified(|s| {
            if s.token != token || s.phase != SessionPhase::Thinking {
                return false;
            }
            match response {
                Ok(result) => {
                    debug!(
                        token,
                        recommended = result.recommended.technician_id,
                        "recommendation shown"
                    );
                    s.phase = SessionPhase::Result;
                    s.result = Some(result);
                    s.error = None;
                    outcome = SubmitOutcome::Completed;
                }
                Err(err) => {
                    warn!(token, error = %err, "recommendation failed");
                    let message = err.user_message();
                    s.phase = SessionPhase::Idle;
                    s.result = None;
                    s.error = Some(message.clone());
                    outcome = SubmitOutcome::Failed(message);
                }
            }
            true
        });
        if outcome == SubmitOutcome::Superseded {
            debug!(token, "stale response discarded");
        }
        outcome
    }
}

/// Returns the session to `Idle` if a submission is dropped while still
/// `Thinking`, so the next `submit` is not rejected.
struct ThinkingGuard<'a> {
    state: &'a watch::Sender<SessionSnapshot>,
    token: u64,
    armed: bool,
}

impl<'a> ThinkingGuard<'a> {
    fn new(state: &'a watch::Sender<SessionSnapshot>, token: u64) -> Self {
        Self {
            state,
            token,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ThinkingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let token = self.token;
        self.state.send_if_modified(|s| {
            if s.token != token || s.phase != SessionPhase::Thinking {
                return false;
            }
            s.token += 1;
            s.phase = SessionPhase::Idle;
            s.result = None;
            s.error = None;
            debug!(token, "submission dropped while thinking");
            true
        });
    }
}

/// Resolves once the session token moves past `token`.
async fn superseded(watcher: &mut watch::Receiver<SessionSnapshot>, token: u64) {
    loop {
        if watcher.borrow_and_update().token != token {
            return;
        }
        if watcher.changed().await.is_err() {
            // Sender dropped with the session; nothing can supersede us.
            std::future::pending::<()>().await;
        }
    }
}
