//! Input and response validation for assignment requests.
//!
//! Checks structural integrity before anything crosses the collaborator
//! boundary. Detects:
//! - Missing or malformed target coordinates
//! - Blank or oversized intervention text
//! - Ranking payloads that break the recommended/alternatives contract
//! - Scores outside 0.0..=1.0 and negative distances
//!
//! All checks collect every problem instead of stopping at the first.

use std::collections::HashSet;
use std::fmt;

use crate::models::{AssignmentRequest, AssignmentResult, Candidate, GeoPoint};

/// Maximum title length accepted by the collaborator.
pub const MAX_TITLE_CHARS: usize = 160;

/// Maximum description length accepted by the collaborator.
pub const MAX_DESCRIPTION_CHARS: usize = 4000;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No target location was provided.
    MissingTargetLocation,
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate,
    /// Latitude outside -90..=90 or longitude outside -180..=180.
    CoordinateOutOfRange,
    /// Title is empty after trimming.
    BlankTitle,
    /// Title or description exceeds its length limit.
    TextTooLong,
    /// Two candidates share the same technician ID, or the recommended
    /// candidate is repeated among the alternatives.
    DuplicateCandidate,
    /// A score is outside 0.0..=1.0 or not finite.
    ScoreOutOfRange,
    /// A distance is negative or not finite.
    InvalidDistance,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Joins error messages for display.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a single geographic point.
pub fn validate_point(point: &GeoPoint) -> ValidationResult {
    let mut errors = Vec::new();
    check_point(point, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_point(point: &GeoPoint, errors: &mut Vec<ValidationError>) {
    if point.is_valid() {
        return;
    }
    if !point.latitude.is_finite() || !point.longitude.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFiniteCoordinate,
            format!(
                "Coordinates must be finite (got {}, {})",
                point.latitude, point.longitude
            ),
        ));
        return;
    }
    if !(-90.0..=90.0).contains(&point.latitude) {
        errors.push(ValidationError::new(
            ValidationErrorKind::CoordinateOutOfRange,
            format!("Latitude {} is outside -90..=90", point.latitude),
        ));
    }
    if !(-180.0..=180.0).contains(&point.longitude) {
        errors.push(ValidationError::new(
            ValidationErrorKind::CoordinateOutOfRange,
            format!("Longitude {} is outside -180..=180", point.longitude),
        ));
    }
}

/// Validates a scoring request before it is sent.
///
/// Checks:
/// 1. Both coordinates are present
/// 2. Coordinates are finite and in range
/// 3. Title is not blank and at most `MAX_TITLE_CHARS` characters
/// 4. Description is at most `MAX_DESCRIPTION_CHARS` characters
pub fn validate_request(request: &AssignmentRequest) -> ValidationResult {
    let mut errors = Vec::new();

    match request.target() {
        Some(point) => check_point(&point, &mut errors),
        None => errors.push(ValidationError::new(
            ValidationErrorKind::MissingTargetLocation,
            "A target location is required",
        )),
    }

    let title_len = request.title.trim().chars().count();
    if title_len == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::BlankTitle,
            "Title must not be blank",
        ));
    } else if title_len > MAX_TITLE_CHARS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TextTooLong,
            format!("Title has {title_len} characters (max {MAX_TITLE_CHARS})"),
        ));
    }

    if let Some(description) = &request.description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_CHARS {
            errors.push(ValidationError::new(
                ValidationErrorKind::TextTooLong,
                format!("Description has {len} characters (max {MAX_DESCRIPTION_CHARS})"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a ranking received from the collaborator.
///
/// Checks:
/// 1. The recommended technician does not appear among the alternatives
/// 2. No two alternatives share a technician ID
/// 3. Every score is finite and within 0.0..=1.0
/// 4. Every known distance is finite and non-negative
pub fn validate_result(result: &AssignmentResult) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    seen.insert(result.recommended.technician_id);
    for alt in &result.alternatives {
        if !seen.insert(alt.technician_id) {
            let message = if alt.technician_id == result.recommended.technician_id {
                format!(
                    "Recommended technician {} is repeated among the alternatives",
                    alt.technician_id
                )
            } else {
                format!("Duplicate alternative technician {}", alt.technician_id)
            };
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCandidate,
                message,
            ));
        }
    }

    for candidate in result.candidates() {
        check_candidate(candidate, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_candidate(candidate: &Candidate, errors: &mut Vec<ValidationError>) {
    let scores = [
        ("overall", candidate.overall_score),
        ("workload", candidate.workload_score),
        ("distance", candidate.distance_score),
        ("skill", candidate.skill_score),
    ];
    for (name, score) in scores {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ScoreOutOfRange,
                format!(
                    "Technician {} has {name} score {score} outside 0..=1",
                    candidate.technician_id
                ),
            ));
        }
    }

    if let Some(km) = candidate.distance_km {
        if !km.is_finite() || km < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDistance,
                format!(
                    "Technician {} has invalid distance {km} km",
                    candidate.technician_id
                ),
            ));
        }
    }
}
