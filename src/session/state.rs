//! Observable session state.

use serde::{Deserialize, Serialize};

use crate::geo::{plan_markers, MarkerSet};
use crate::models::{AssignmentResult, GeoPoint, TechnicianLoad};
use crate::presenter::ResultView;

/// Lifecycle phase. There is no error phase: a failed request returns
/// to `Idle` with `error` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Thinking,
    Result,
}

/// Everything an observer needs to render the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    /// Intervention location; required before submitting.
    pub target: Option<GeoPoint>,
    /// Present only in `Result`.
    pub result: Option<AssignmentResult>,
    /// Message from the last failed submission.
    pub error: Option<String>,
    /// Last load snapshot, used for placeholder markers.
    pub technician_load: Vec<TechnicianLoad>,
    /// Bumped by every submission, reset and target change.
    pub token: u64,
}

impl SessionSnapshot {
    pub fn is_thinking(&self) -> bool {
        self.phase == SessionPhase::Thinking
    }

    /// Display view of the current result.
    pub fn view(&self) -> Option<ResultView> {
        self.result.as_ref().map(ResultView::of)
    }

    /// Markers for the current target/result pair.
    pub fn markers(&self, placeholder_limit: usize) -> MarkerSet {
        plan_markers(
            self.target,
            self.result.as_ref(),
            &self.technician_load,
            placeholder_limit,
        )
    }
}

/// How a `submit` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A ranking is now displayed.
    Completed,
    /// The collaborator failed; the message is also in the snapshot.
    Failed(String),
    /// A reset or target change overtook this submission; nothing applied.
    Superseded,
    /// The session is read-only; nothing happened.
    ReadOnly,
}
