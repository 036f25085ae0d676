//! Display-ready views of a ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ring_color, score_percent, skill_label, workload_label};
use super::{RingColor, SkillLabel, WorkloadLabel};
use crate::models::{AssignmentResult, Candidate, TechnicianId};

/// One candidate with its derived display values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateView {
    pub technician_id: TechnicianId,
    pub full_name: String,
    pub email: String,
    pub score_percent: u8,
    pub ring: RingColor,
    pub workload: WorkloadLabel,
    pub skill: SkillLabel,
    /// Component percentages: workload, distance, skill.
    pub components: [u8; 3],
    /// Formatted distance, `None` when unknown.
    pub distance: Option<String>,
    pub summary: String,
}

impl CandidateView {
    /// Derives the view of one candidate.
    pub fn of(candidate: &Candidate) -> Self {
        let percent = score_percent(candidate);
        Self {
            technician_id: candidate.technician_id,
            full_name: candidate.full_name.clone(),
            email: candidate.email.clone(),
            score_percent: percent,
            ring: ring_color(percent),
            workload: workload_label(candidate.open_assignments),
            skill: skill_label(candidate.matching_history),
            components: [
                super::percent_of(candidate.workload_score),
                super::percent_of(candidate.distance_score),
                super::percent_of(candidate.skill_score),
            ],
            distance: candidate.distance_km.map(format_km),
            summary: candidate_summary(candidate),
        }
    }
}

/// A whole ranking ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    pub recommended: CandidateView,
    pub alternatives: Vec<CandidateView>,
    pub rationale: String,
    pub generated_at: DateTime<Utc>,
}

impl ResultView {
    /// Derives the view of a ranking, preserving candidate order.
    pub fn of(result: &AssignmentResult) -> Self {
        Self {
            recommended: CandidateView::of(&result.recommended),
            alternatives: result.alternatives.iter().map(CandidateView::of).collect(),
            rationale: result.rationale.clone(),
            generated_at: result.generated_at,
        }
    }
}

/// One-line description of a candidate's inputs.
///
/// ```
/// use u_assign::models::Candidate;
/// use u_assign::presenter::candidate_summary;
///
/// let c = Candidate::new(1, "Ada").with_open_assignments(2).with_distance_km(3.24);
/// assert_eq!(candidate_summary(&c), "2 open assignments · 3.2 km away · 0 matching past jobs");
/// ```
pub fn candidate_summary(candidate: &Candidate) -> String {
    let mut parts = vec![plural(candidate.open_assignments, "open assignment")];
    if let Some(km) = candidate.distance_km {
        parts.push(format!("{} away", format_km(km)));
    }
    parts.push(plural(candidate.matching_history, "matching past job"));
    parts.join(" · ")
}

fn format_km(km: f64) -> String {
    format!("{km:.1} km")
}

fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
