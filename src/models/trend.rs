//! Trend direction used by dashboard insight displays.

use serde::{Deserialize, Serialize};

/// Direction of an activity trend.
///
/// Anything other than `UP` or `DOWN` (including a missing value) is
/// `Flat`; this is the designed fallback, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Flat,
}

impl TrendDirection {
    /// Parses a collaborator trend code (case-insensitive).
    pub fn parse(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_uppercase()).as_deref() {
            Some("UP") => TrendDirection::Up,
            Some("DOWN") => TrendDirection::Down,
            _ => TrendDirection::Flat,
        }
    }
}
