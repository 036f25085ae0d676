//! Collaborator error types.
//!
//! Every failure mode has a named variant. `user_message` turns any of
//! them into the single string an assignment session exposes.

use serde::Deserialize;
use thiserror::Error;

use crate::validation::{self, ValidationError};

/// Shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The assignment service could not compute a recommendation. Please try again.";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Assignment service returned HTTP {status}{}", detail_suffix(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Inconsistent ranking: {}", validation::describe(.0))]
    InvalidResponse(Vec<ValidationError>),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl BackendError {
    /// Builds an API error from a non-2xx status and its raw body.
    ///
    /// The body is expected as `{ "detail": "..." }`; anything else is
    /// treated as having no detail.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        BackendError::Api { status, detail }
    }

    /// The message a session shows for this failure.
    ///
    /// Prefers the collaborator-supplied `detail`, then the transport
    /// message, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            BackendError::Api { status, .. } => {
                format!("The assignment service returned HTTP {status}.")
            }
            BackendError::Transport(message) if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return BackendError::Transport(format!("Unreadable response: {err}"));
        }
        BackendError::Transport(err.to_string())
    }
}
