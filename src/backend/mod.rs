//! Collaborator seam: the scoring and technician-load services.
//!
//! The session only talks to the collaborator through
//! [`AssignmentBackend`]. [`HttpBackend`] is the production
//! implementation; tests substitute scripted in-memory backends.

mod error;
mod http;

pub use error::{BackendError, GENERIC_FAILURE_MESSAGE};
pub use http::{HttpBackend, RECOMMENDATION_PATH, TECHNICIAN_LOAD_PATH};

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{AssignmentRequest, AssignmentResult, TechnicianLoad};

/// Source of technician rankings and load snapshots.
#[async_trait]
pub trait AssignmentBackend: Send + Sync {
    /// Scores technicians for one intervention.
    async fn recommend(&self, request: &AssignmentRequest)
        -> Result<AssignmentResult, BackendError>;

    /// Current per-technician load, most relevant first.
    async fn technician_load(&self) -> Result<Vec<TechnicianLoad>, BackendError>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

#[async_trait]
impl<T: AssignmentBackend + ?Sized> AssignmentBackend for Arc<T> {
    async fn recommend(
        &self,
        request: &AssignmentRequest,
    ) -> Result<AssignmentResult, BackendError> {
        (**self).recommend(request).await
    }

    async fn technician_load(&self) -> Result<Vec<TechnicianLoad>, BackendError> {
        (**self).technician_load().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
