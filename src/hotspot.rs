//! Hotspot scoring (§4.7): `cyclomatic × churn_per_month`, graded.
use crate::config::HotspotThresholds;
use crate::grading::HotspotGrade;

/// A file's hotspot score and its categorical grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub score: f64,
    pub grade: HotspotGrade,
}

/// Combine a file's total cyclomatic complexity with its churn rate into
/// a hotspot score, then grade it against the configured thresholds.
pub fn compute(total_cyclomatic: f64, commits_per_month: f64, thresholds: &HotspotThresholds) -> Hotspot {
    let score = total_cyclomatic * commits_per_month;
    Hotspot {
        score,
        grade: HotspotGrade::grade(score, thresholds),
    }
}

#[cfg(test)]
#[path = "hotspot_test.rs"]
mod tests;
