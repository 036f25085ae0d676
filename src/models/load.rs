//! Technician load snapshot from the dashboard collaborator.

use serde::{Deserialize, Serialize};

use super::TechnicianId;

/// One row of `GET /api/dashboard/technician-load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianLoad {
    /// Technician identifier.
    pub technician_id: TechnicianId,
    /// Display name.
    pub technician_name: String,
    /// Contact email.
    #[serde(default)]
    pub technician_email: String,
    /// Open (scheduled or in progress) interventions.
    #[serde(default)]
    pub open_count: u64,
    /// Interventions completed today.
    #[serde(default)]
    pub completed_today: u64,
    /// Mean completion time in seconds, if any completed.
    #[serde(default)]
    pub average_completion_seconds: Option<f64>,
}

impl TechnicianLoad {
    /// Creates a load row with zero counts.
    pub fn new(technician_id: TechnicianId, technician_name: impl Into<String>) -> Self {
        Self {
            technician_id,
            technician_name: technician_name.into(),
            technician_email: String::new(),
            open_count: 0,
            completed_today: 0,
            average_completion_seconds: None,
        }
    }

    /// Sets the open count.
    pub fn with_open_count(mut self, count: u64) -> Self {
        self.open_count = count;
        self
    }
}
