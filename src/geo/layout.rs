//! Marker placement policies.
//!
//! Two layouts exist:
//! - **Candidates**: once a ranking is shown, recommended first then
//!   alternatives, spread evenly from a 45° base bearing at each
//!   candidate's reported distance (0.4 km when unknown, never under 0.3 km).
//! - **Placeholders**: before any ranking, up to three technicians from
//!   the load snapshot at bearings `60 + i·150` and `0.6 + i·0.25` km.
//!
//! Every update recomputes the full set from the current target and
//! result; nothing is patched incrementally.

use serde::{Deserialize, Serialize};

use super::offset;
use crate::models::{AssignmentResult, GeoPoint, TechnicianId, TechnicianLoad};
use crate::presenter::{ring_color, score_percent, RingColor};

/// Bearing of the first candidate marker (degrees).
pub const CANDIDATE_BASE_BEARING_DEG: f64 = 45.0;

/// Distance used when a candidate's distance is unknown (km).
pub const DEFAULT_CANDIDATE_DISTANCE_KM: f64 = 0.4;

/// Closest a candidate marker may sit to the target (km).
pub const MIN_CANDIDATE_DISTANCE_KM: f64 = 0.3;

const PLACEHOLDER_BASE_BEARING_DEG: f64 = 60.0;
const PLACEHOLDER_BEARING_STEP_DEG: f64 = 150.0;
const PLACEHOLDER_BASE_DISTANCE_KM: f64 = 0.6;
const PLACEHOLDER_DISTANCE_STEP_KM: f64 = 0.25;

/// What a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// The recommended candidate.
    Recommended,
    /// An alternative candidate.
    Alternative,
    /// A technician from the load snapshot, shown before any ranking.
    Placeholder,
}

/// A synthesized technician marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub technician_id: TechnicianId,
    pub label: String,
    pub kind: MarkerKind,
    pub position: GeoPoint,
    /// Bearing from the target (degrees, as laid out).
    pub bearing_deg: f64,
    /// Distance from the target (km, as laid out).
    pub distance_km: f64,
    /// Score percentage, candidates only.
    pub score_percent: Option<u8>,
    /// Ring color band, candidates only.
    pub ring: Option<RingColor>,
}

/// Complete marker state for one target/result pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    /// Intervention target, if one is set.
    pub target: Option<GeoPoint>,
    pub markers: Vec<Marker>,
}

impl MarkerSet {
    /// Whether nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.markers.is_empty()
    }
}

/// Places every candidate of `result` around `target`.
///
/// Candidate `i` of `n` sits at bearing `45 + i·360/n` and distance
/// `max(distance_km.unwrap_or(0.4), 0.3)`.
pub fn candidate_layout(target: GeoPoint, result: &AssignmentResult) -> Vec<Marker> {
    let count = result.candidate_count();
    let step = 360.0 / count as f64;

    result
        .candidates()
        .enumerate()
        .map(|(i, candidate)| {
            let bearing = CANDIDATE_BASE_BEARING_DEG + step * i as f64;
            let distance = candidate
                .distance_km
                .unwrap_or(DEFAULT_CANDIDATE_DISTANCE_KM)
                .max(MIN_CANDIDATE_DISTANCE_KM);
            let percent = score_percent(candidate);
            Marker {
                technician_id: candidate.technician_id,
                label: candidate.full_name.clone(),
                kind: if i == 0 {
                    MarkerKind::Recommended
                } else {
                    MarkerKind::Alternative
                },
                position: offset(target, distance, bearing),
                bearing_deg: bearing,
                distance_km: distance,
                score_percent: Some(percent),
                ring: Some(ring_color(percent)),
            }
        })
        .collect()
}

/// Places up to `limit` load-snapshot technicians around `target`.
pub fn placeholder_layout(target: GeoPoint, load: &[TechnicianLoad], limit: usize) -> Vec<Marker> {
    load.iter()
        .take(limit)
        .enumerate()
        .map(|(i, row)| {
            let bearing = PLACEHOLDER_BASE_BEARING_DEG + PLACEHOLDER_BEARING_STEP_DEG * i as f64;
            let distance = PLACEHOLDER_BASE_DISTANCE_KM + PLACEHOLDER_DISTANCE_STEP_KM * i as f64;
            Marker {
                technician_id: row.technician_id,
                label: row.technician_name.clone(),
                kind: MarkerKind::Placeholder,
                position: offset(target, distance, bearing),
                bearing_deg: bearing,
                distance_km: distance,
                score_percent: None,
                ring: None,
            }
        })
        .collect()
}

/// Computes the full marker set for the current state.
///
/// - No target: nothing to draw.
/// - Target and result: candidate layout.
/// - Target only: placeholder layout from the load snapshot.
pub fn plan_markers(
    target: Option<GeoPoint>,
    result: Option<&AssignmentResult>,
    load: &[TechnicianLoad],
    placeholder_limit: usize,
) -> MarkerSet {
    let Some(target) = target else {
        return MarkerSet::default();
    };
    let markers = match result {
        Some(result) => candidate_layout(target, result),
        None => placeholder_layout(target, load, placeholder_limit),
    };
    MarkerSet {
        target: Some(target),
        markers,
    }
}
