//! Assignment session lifecycle.
//!
//! A session governs one user-driven assignment flow:
//!
//! ```text
//!            submit                 response (after floor)
//!   Idle ─────────────▶ Thinking ──────────────────────▶ Result
//!    ▲                     │ failure: error recorded        │ select_alternative
//!    │◀────────────────────┘                                │ (local re-rank)
//!    │◀──────────── reset / update_target_location ─────────┘
//! ```
//!
//! `reset` and `update_target_location` are valid in every state and act
//! as cancellation: each bumps the session token, and a submission whose
//! token no longer matches discards its response.
//!
//! State lives in a `tokio::sync::watch` channel owned by the session.
//! Observers (map layers, views) `subscribe` and only read; they never
//! drive transitions.

mod error;
mod machine;
mod state;

pub use error::SessionError;
pub use machine::AssignmentSession;
pub use state::{SessionPhase, SessionSnapshot, SubmitOutcome};
