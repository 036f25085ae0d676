//! Qualitative labels and trend glyphs.

use serde::{Deserialize, Serialize};

use crate::models::TrendDirection;

/// Score ring color band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingColor {
    /// `>= 75%` (green).
    Strong,
    /// `45..75%` (amber).
    Moderate,
    /// `< 45%` (red).
    Weak,
}

impl RingColor {
    /// Style token.
    pub fn token(&self) -> &'static str {
        match self {
            RingColor::Strong => "strong",
            RingColor::Moderate => "moderate",
            RingColor::Weak => "weak",
        }
    }

    /// Color name for renderers.
    pub fn color(&self) -> &'static str {
        match self {
            RingColor::Strong => "green",
            RingColor::Moderate => "amber",
            RingColor::Weak => "red",
        }
    }
}

/// Workload level derived from open assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadLabel {
    Low,
    Moderate,
    High,
}

impl WorkloadLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadLabel::Low => "Low",
            WorkloadLabel::Moderate => "Moderate",
            WorkloadLabel::High => "High",
        }
    }
}

/// Skill confidence derived from matching history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLabel {
    High,
    Medium,
    Unconfirmed,
}

impl SkillLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLabel::High => "High",
            SkillLabel::Medium => "Medium",
            SkillLabel::Unconfirmed => "Unconfirmed",
        }
    }
}

/// Color band for a score percentage.
pub fn ring_color(percent: u8) -> RingColor {
    match percent {
        75.. => RingColor::Strong,
        45..=74 => RingColor::Moderate,
        _ => RingColor::Weak,
    }
}

/// Workload level for a number of open assignments.
pub fn workload_label(open_assignments: u64) -> WorkloadLabel {
    match open_assignments {
        0..=1 => WorkloadLabel::Low,
        2..=3 => WorkloadLabel::Moderate,
        _ => WorkloadLabel::High,
    }
}

/// Skill confidence for a number of matching past jobs.
pub fn skill_label(matching_history: u64) -> SkillLabel {
    match matching_history {
        5.. => SkillLabel::High,
        2..=4 => SkillLabel::Medium,
        _ => SkillLabel::Unconfirmed,
    }
}

/// Human-readable trend label.
pub fn trend_label(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "Rising",
        TrendDirection::Down => "Falling",
        TrendDirection::Flat => "Stable",
    }
}

/// Style class for a trend.
pub fn trend_class(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "trend-up",
        TrendDirection::Down => "trend-down",
        TrendDirection::Flat => "trend-flat",
    }
}

/// Glyph for a trend.
pub fn trend_icon(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "↑",
        TrendDirection::Down => "↓",
        TrendDirection::Flat => "→",
    }
}
