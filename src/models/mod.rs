//! Assignment domain models.
//!
//! Provides the data types exchanged with the scoring collaborator and
//! held by an assignment session. All wire types use the collaborator's
//! camelCase JSON field names.
//!
//! # Domain Mappings
//!
//! | u-assign | Field service | Wire type |
//! |----------|---------------|-----------|
//! | Candidate | Technician fitness | `SmartAssignmentCandidate` |
//! | AssignmentResult | Ranked recommendation | `SmartAssignmentResponse` |
//! | AssignmentRequest | Scoring query | `SmartAssignmentRequest` |
//! | TechnicianLoad | Dashboard load row | `TechnicianLoadResponse` |

mod candidate;
mod geo_point;
mod load;
mod request;
mod result;
mod role;
mod trend;

pub use candidate::{Candidate, TechnicianId};
pub use geo_point::GeoPoint;
pub use load::TechnicianLoad;
pub use request::{AssignmentRequest, InterventionDetails};
pub use result::AssignmentResult;
pub use role::Role;
pub use trend::TrendDirection;
