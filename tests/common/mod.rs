//! Shared fixtures for session tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use u_assign::backend::{AssignmentBackend, BackendError};
use u_assign::config::SessionConfig;
use u_assign::models::{
    AssignmentRequest, AssignmentResult, Candidate, GeoPoint, TechnicianLoad,
};
use u_assign::session::AssignmentSession;

pub const LYON: GeoPoint = GeoPoint {
    latitude: 45.764,
    longitude: 4.8357,
};

pub const GRENOBLE: GeoPoint = GeoPoint {
    latitude: 45.1885,
    longitude: 5.7245,
};

/// Backend that replays queued responses after a fixed delay.
pub struct ScriptedBackend {
    delay: Duration,
    responses: Mutex<VecDeque<Result<AssignmentResult, BackendError>>>,
    load: Vec<TechnicianLoad>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AssignmentRequest>>,
}

impl ScriptedBackend {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            responses: Mutex::new(VecDeque::new()),
            load: Vec::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, response: Result<AssignmentResult, BackendError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_load(mut self, load: Vec<TechnicianLoad>) -> Self {
        self.load = load;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AssignmentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssignmentBackend for ScriptedBackend {
    async fn recommend(
        &self,
        request: &AssignmentRequest,
    ) -> Result<AssignmentResult, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.delay).await;
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(BackendError::Transport("script exhausted".into())))
    }

    async fn technician_load(&self) -> Result<Vec<TechnicianLoad>, BackendError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.load.clone())
    }
}

pub type TestSession = AssignmentSession<Arc<ScriptedBackend>>;

/// Session sharing `backend`, with the default 1200 ms floor.
pub fn session(backend: &Arc<ScriptedBackend>) -> Arc<TestSession> {
    Arc::new(AssignmentSession::new(
        Arc::clone(backend),
        SessionConfig::default(),
    ))
}

/// A = 0.82 recommended, B = 0.64 and C = 0.41 as alternatives.
pub fn ranking() -> AssignmentResult {
    AssignmentResult::new(
        Candidate::new(1, "Alice Martin")
            .with_overall_score(0.82)
            .with_components(0.9, 0.7, 0.85)
            .with_distance_km(1.2),
    )
    .with_alternative(
        Candidate::new(2, "Bruno Petit")
            .with_overall_score(0.64)
            .with_distance_km(3.4),
    )
    .with_alternative(Candidate::new(3, "Chloé Durand").with_overall_score(0.41))
    .with_rationale("Closest technician with matching history")
}

pub fn ids(result: &AssignmentResult) -> Vec<u64> {
    result.candidates().map(|c| c.technician_id).collect()
}
