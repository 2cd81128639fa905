//! Run configuration for the analysis core.
//!
//! `AnalysisConfig` is a plain data struct, not a file loader — parsing
//! CLI flags or TOML/env configuration is the caller's job (see §1/§6
//! of the spec). The core only validates and consumes it.
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{AnalysisError, Result};

/// Source of the current time, injected so tests get deterministic
/// `snapshot_time` values instead of `Utc::now()`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for tests: always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Grading boundaries for cyclomatic-based hotspot scoring (§4.7).
#[derive(Debug, Clone, Copy)]
pub struct HotspotThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for HotspotThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            medium: 300.0,
            high: 1000.0,
        }
    }
}

/// Grading boundaries for cognitive complexity (§4.7, separate axis).
#[derive(Debug, Clone, Copy)]
pub struct CognitiveThresholds {
    pub medium: usize,
    pub high: usize,
}

impl Default for CognitiveThresholds {
    fn default() -> Self {
        Self {
            medium: 10,
            high: 15,
        }
    }
}

/// Cyclomatic grading boundaries (§6 `threshold_low`/`threshold_high`).
#[derive(Debug, Clone, Copy)]
pub struct CyclomaticThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for CyclomaticThresholds {
    fn default() -> Self {
        Self {
            low: 10.0,
            high: 20.0,
        }
    }
}

/// Complexity-increase thresholds that flag a delta warning (§4.11).
#[derive(Debug, Clone, Copy)]
pub struct DeltaThresholds {
    pub cyclomatic_increase: i64,
    pub cognitive_increase: i64,
}

impl Default for DeltaThresholds {
    fn default() -> Self {
        Self {
            cyclomatic_increase: 5,
            cognitive_increase: 3,
        }
    }
}

/// Top-level analysis configuration (§6 configuration inputs table).
///
/// `output_format`/`output_formats`/`report_folder` are accepted (and
/// validated for shape where that's cheap) but otherwise ignored by the
/// core — they are the report layer's contract, carried here only so a
/// caller can pass one struct through the whole pipeline.
pub struct AnalysisConfig {
    pub roots: Vec<PathBuf>,
    pub output_format: Option<String>,
    pub output_formats: Option<String>,
    pub report_folder: Option<PathBuf>,
    pub cyclomatic: CyclomaticThresholds,
    pub cognitive: CognitiveThresholds,
    pub hotspot: HotspotThresholds,
    pub delta: DeltaThresholds,
    pub churn_period_days: u32,
    pub hotspot_threshold: f64,
    pub significance_threshold: f64,
    pub review_branch_only: bool,
    pub review_base_branch: String,
    /// Wall-clock budget for a single git operation (§5 Timeouts).
    pub git_timeout: std::time::Duration,
    /// Worker pool size; `None` lets rayon pick `num_cpus`.
    pub max_parallelism: Option<usize>,
    pub clock: std::sync::Arc<dyn Clock>,
}

impl AnalysisConfig {
    /// Build a config with spec-documented defaults and the given roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            output_format: None,
            output_formats: None,
            report_folder: None,
            cyclomatic: CyclomaticThresholds::default(),
            cognitive: CognitiveThresholds::default(),
            hotspot: HotspotThresholds::default(),
            delta: DeltaThresholds::default(),
            churn_period_days: 30,
            hotspot_threshold: 50.0,
            significance_threshold: 0.25,
            review_branch_only: false,
            review_base_branch: "main".to_string(),
            git_timeout: std::time::Duration::from_secs(60),
            max_parallelism: None,
            clock: std::sync::Arc::new(SystemClock),
        }
    }

    /// Fail-fast validation per §7's Config error kind: invalid thresholds,
    /// negative window, or an empty root list are rejected before any
    /// scanning happens.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(AnalysisError::Config(
                "at least one root path is required".to_string(),
            ));
        }
        if self.churn_period_days == 0 {
            return Err(AnalysisError::Config(
                "churn_period_days must be positive".to_string(),
            ));
        }
        if self.cyclomatic.low >= self.cyclomatic.high {
            return Err(AnalysisError::Config(
                "threshold_low must be less than threshold_high".to_string(),
            ));
        }
        if self.cognitive.medium >= self.cognitive.high {
            return Err(AnalysisError::Config(
                "cognitive_threshold_medium must be less than cognitive_threshold_high"
                    .to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.significance_threshold) {
            return Err(AnalysisError::Config(
                "significance_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
