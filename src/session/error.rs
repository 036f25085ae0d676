//! Synchronous session rejections.

use thiserror::Error;

use crate::models::TechnicianId;
use crate::validation::{self, ValidationError};

/// Why a session operation was rejected without changing state.
///
/// Collaborator failures are never returned here; they end up in the
/// session's `error` field instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A target location must be set before requesting a recommendation")]
    MissingTargetLocation,

    #[error("Invalid assignment request: {}", validation::describe(.0))]
    InvalidRequest(Vec<ValidationError>),

    #[error("Invalid target location: {}", validation::describe(.0))]
    InvalidLocation(Vec<ValidationError>),

    #[error("A recommendation is already being computed")]
    AlreadyThinking,

    #[error("No recommendation is being displayed")]
    NoResult,

    #[error("Technician {0} is not among the displayed candidates")]
    UnknownCandidate(TechnicianId),
}
