//! Candidate model.
//!
//! A candidate is one technician's fitness for an intervention as scored
//! by the collaborator. Component scores are opaque inputs: the client
//! never recomputes or renormalizes them.

use serde::{Deserialize, Serialize};

/// Technician identifier as issued by the collaborator.
pub type TechnicianId = u64;

/// A technician evaluated for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Unique technician identifier.
    pub technician_id: TechnicianId,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Combined ranking score (0.0..=1.0).
    pub overall_score: f64,
    /// Workload component (0.0..=1.0, higher = less loaded).
    pub workload_score: f64,
    /// Distance component (0.0..=1.0, higher = closer).
    pub distance_score: f64,
    /// Skill-match component (0.0..=1.0).
    pub skill_score: f64,
    /// Distance to the intervention in km, `None` if unknown.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Current open work items.
    #[serde(default)]
    pub open_assignments: u64,
    /// Past jobs matching the intervention's keywords.
    #[serde(default)]
    pub matching_history: u64,
}

impl Candidate {
    /// Creates a candidate with zeroed scores.
    pub fn new(technician_id: TechnicianId, full_name: impl Into<String>) -> Self {
        Self {
            technician_id,
            full_name: full_name.into(),
            email: String::new(),
            overall_score: 0.0,
            workload_score: 0.0,
            distance_score: 0.0,
            skill_score: 0.0,
            distance_km: None,
            open_assignments: 0,
            matching_history: 0,
        }
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the overall score.
    pub fn with_overall_score(mut self, score: f64) -> Self {
        self.overall_score = score;
        self
    }

    /// Sets the three component scores (workload, distance, skill).
    pub fn with_components(mut self, workload: f64, distance: f64, skill: f64) -> Self {
        self.workload_score = workload;
        self.distance_score = distance;
        self.skill_score = skill;
        self
    }

    /// Sets the known distance in km.
    pub fn with_distance_km(mut self, km: f64) -> Self {
        self.distance_km = Some(km);
        self
    }

    /// Sets the open assignment count.
    pub fn with_open_assignments(mut self, count: u64) -> Self {
        self.open_assignments = count;
        self
    }

    /// Sets the matching history count.
    pub fn with_matching_history(mut self, count: u64) -> Self {
        self.matching_history = count;
        self
    }
}
