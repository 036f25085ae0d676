//! Display semantics for scored candidates.
//!
//! Maps raw collaborator scores into percentages, qualitative labels and
//! color bands without changing the ranking itself. Everything here is
//! pure and infallible.
//!
//! # Bands
//!
//! | Function | Band | Rule |
//! |----------|------|------|
//! | `ring_color` | Strong / Moderate / Weak | `>= 75` / `>= 45` / below |
//! | `workload_label` | Low / Moderate / High | `<= 1` / `<= 3` / above |
//! | `skill_label` | High / Medium / Unconfirmed | `>= 5` / `>= 2` / below |
//!
//! Lower bounds of each band are inclusive.

mod labels;
mod view;

pub use labels::{
    ring_color, skill_label, trend_class, trend_icon, trend_label, workload_label, RingColor,
    SkillLabel, WorkloadLabel,
};
pub use view::{candidate_summary, CandidateView, ResultView};

use crate::models::Candidate;

/// Converts the overall score to a whole percentage (0..=100).
///
/// # Rounding
/// Half-up on the percentage. The product is first snapped to 1e-6 so
/// binary noise cannot move a value across the .5 boundary:
/// 0.745 → 75, 0.755 → 76.
pub fn score_percent(candidate: &Candidate) -> u8 {
    percent_of(candidate.overall_score)
}

/// Half-up percentage of a 0..=1 ratio, clamped to 0..=100.
pub fn percent_of(ratio: f64) -> u8 {
    if !ratio.is_finite() {
        return 0;
    }
    let scaled = ((ratio * 100.0) * 1e6).round() / 1e6;
    (scaled + 0.5).floor().clamp(0.0, 100.0) as u8
}
