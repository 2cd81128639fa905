//! Categorical grading of numeric KPIs (§4.7, §4.14).
//!
//! The cyclomatic/hotspot axis and the cognitive axis use different cut
//! points, so they get distinct enums rather than one shared "Level" —
//! conflating them would make a Cognitive grade of `High` collide with a
//! Hotspot grade of `High` at different underlying thresholds.
use serde::Serialize;

use crate::config::{CognitiveThresholds, HotspotThresholds};

/// Grade for hotspot scores (and, by the same boundaries, raw cyclomatic
/// totals where the caller wants a hotspot-style grade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotGrade {
    Low,
    Medium,
    High,
    Critical,
}

impl HotspotGrade {
    pub fn grade(score: f64, thresholds: &HotspotThresholds) -> Self {
        if score >= thresholds.high {
            Self::Critical
        } else if score >= thresholds.medium {
            Self::High
        } else if score >= thresholds.low {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Grade for SonarSource cognitive complexity (§4.7: "separate axis").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveGrade {
    Low,
    Medium,
    High,
    Critical,
    Severe,
}

impl CognitiveGrade {
    /// `thresholds.medium`/`thresholds.high` set the Medium/High upper
    /// bounds (defaults 10, 15); the Low floor (5) and the Critical/Severe
    /// split (25) are fixed per the SonarSource band layout.
    pub fn grade(complexity: usize, thresholds: &CognitiveThresholds) -> Self {
        if complexity > 25 {
            Self::Severe
        } else if complexity > thresholds.high {
            Self::Critical
        } else if complexity > thresholds.medium {
            Self::High
        } else if complexity > 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
#[path = "grading_test.rs"]
mod tests;
