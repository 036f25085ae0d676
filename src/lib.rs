//! Smart technician assignment client.
//!
//! Requests a ranked set of technicians for an intervention from the
//! scoring service, turns the ranking into display-ready views, and lays
//! the candidates out as map markers around the intervention site.
//!
//! # Modules
//!
//! - **`models`**: Wire and domain types: `Candidate`, `AssignmentResult`,
//!   `AssignmentRequest`, `TechnicianLoad`, `GeoPoint`, `Role`
//! - **`validation`**: Request and response integrity checks
//! - **`geo`**: Destination-point offsets and marker placement
//! - **`presenter`**: Percent scores, ring colors, workload and skill labels
//! - **`backend`**: Collaborator seam (`AssignmentBackend`) and its HTTP client
//! - **`session`**: `Idle → Thinking → Result` lifecycle with cancellation
//!   and a minimum visible thinking time
//! - **`config`**: Client and session settings with environment overrides
//!
//! # Architecture
//!
//! The scoring algorithm lives in the collaborator; this crate only
//! presents its output. Everything except `backend` and `session` is pure
//! and synchronous. The session is the single writer of its state;
//! observers subscribe and read.
//!
//! # References
//!
//! - Sinnott (1984), "Virtues of the Haversine", Sky and Telescope 68(2)
//! - Veness, "Calculate distance, bearing and more between
//!   Latitude/Longitude points", movable-type.co.uk

pub mod backend;
pub mod config;
pub mod geo;
pub mod models;
pub mod presenter;
pub mod session;
pub mod validation;
