//! Scoring request model.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Intervention fields supplied by the caller when submitting.
///
/// The target location is held by the session, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionDetails {
    /// Intervention title (required, used for skill matching).
    pub title: String,
    /// Free-text description (optional, used for skill matching).
    pub description: Option<String>,
    /// Existing intervention being re-assigned, if any.
    pub intervention_id: Option<u64>,
}

impl InterventionDetails {
    /// Creates details with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the intervention ID.
    pub fn with_intervention_id(mut self, id: u64) -> Self {
        self.intervention_id = Some(id);
        self
    }
}

/// Body of `POST /api/interventions/recommendation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    /// Intervention title.
    pub title: String,
    /// Intervention description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target latitude.
    pub latitude: Option<f64>,
    /// Target longitude.
    pub longitude: Option<f64>,
    /// Intervention being assigned.
    pub intervention_id: Option<u64>,
}

impl AssignmentRequest {
    /// Builds a request from caller details and an optional target.
    pub fn from_details(details: &InterventionDetails, target: Option<GeoPoint>) -> Self {
        Self {
            title: details.title.trim().to_string(),
            description: details
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            latitude: target.map(|p| p.latitude),
            longitude: target.map(|p| p.longitude),
            intervention_id: details.intervention_id,
        }
    }

    /// The target point, if both coordinates are present.
    pub fn target(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}
