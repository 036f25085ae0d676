//! User role as reported by the session collaborator.

use serde::{Deserialize, Serialize};

/// Application role. Only managers may request assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Dispatcher,
    Tech,
    /// Any other non-empty role name (normalized to uppercase).
    Other(String),
}

impl Role {
    /// Parses a role name, trimming and uppercasing it first.
    ///
    /// Returns `None` for an empty or whitespace-only name.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_uppercase();
        match normalized.as_str() {
            "" => None,
            "ADMIN" => Some(Role::Admin),
            "DISPATCHER" => Some(Role::Dispatcher),
            "TECH" => Some(Role::Tech),
            _ => Some(Role::Other(normalized)),
        }
    }

    /// Whether this role may request and change assignments.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin | Role::Dispatcher)
    }
}
