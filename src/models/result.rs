//! Assignment result model.
//!
//! The outcome of one scoring request: a single recommended candidate
//! plus ordered alternatives. Alternative order is the collaborator's
//! relevance order and is only changed by an explicit user pick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Candidate, TechnicianId};

/// Ranked recommendation returned by the scoring collaborator.
///
/// # Invariant
/// `recommended.technician_id` never appears inside `alternatives`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    /// Top pick.
    pub recommended: Candidate,
    /// Remaining candidates, most relevant first.
    #[serde(default)]
    pub alternatives: Vec<Candidate>,
    /// Free-text explanation (display only).
    #[serde(default)]
    pub rationale: String,
    /// When the collaborator computed the ranking.
    pub generated_at: DateTime<Utc>,
}

impl AssignmentResult {
    /// Creates a result with no alternatives, stamped now.
    pub fn new(recommended: Candidate) -> Self {
        Self {
            recommended,
            alternatives: Vec::new(),
            rationale: String::new(),
            generated_at: Utc::now(),
        }
    }

    /// Appends an alternative.
    pub fn with_alternative(mut self, candidate: Candidate) -> Self {
        self.alternatives.push(candidate);
        self
    }

    /// Sets the rationale text.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Recommended first, then alternatives in order.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        std::iter::once(&self.recommended).chain(self.alternatives.iter())
    }

    /// Number of candidates including the recommended one.
    pub fn candidate_count(&self) -> usize {
        1 + self.alternatives.len()
    }

    /// Looks up a candidate by technician ID.
    pub fn find(&self, technician_id: TechnicianId) -> Option<&Candidate> {
        self.candidates().find(|c| c.technician_id == technician_id)
    }

    /// Makes `technician_id` the recommended candidate.
    ///
    /// The chosen alternative is removed from `alternatives`, the other
    /// alternatives keep their relative order, and the previous
    /// recommendation is appended at the end (not re-sorted by score).
    ///
    /// # Returns
    /// - `Some(true)` if the ranking changed.
    /// - `Some(false)` if the candidate was already recommended.
    /// - `None` if no candidate has this ID.
    pub fn promote(&mut self, technician_id: TechnicianId) -> Option<bool> {
        if self.recommended.technician_id == technician_id {
            return Some(false);
        }
        let index = self
            .alternatives
            .iter()
            .position(|c| c.technician_id == technician_id)?;
        let chosen = self.alternatives.remove(index);
        let previous = std::mem::replace(&mut self.recommended, chosen);
        self.alternatives.push(previous);
        Some(true)
    }
}
