//! Windowed code churn (§4.5).
//!
//! Churn is expressed as a *rate* — commits per month over the configured
//! analysis window — rather than a raw lifetime commit count, so a file
//! that was rewritten heavily five years ago and hasn't moved since doesn't
//! outrank one under active, ongoing change.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::git::cache::GitCache;

/// A file's churn within the configured window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChurnRate {
    pub commits_in_window: usize,
    pub commits_per_month: f64,
}

/// Compute churn rates for every file touched within `config.churn_period_days`
/// of `now`, keyed by repository-relative path.
pub fn compute(
    git: &GitCache,
    repo_path: &Path,
    now: chrono::DateTime<chrono::Utc>,
    config: &AnalysisConfig,
) -> Result<HashMap<PathBuf, ChurnRate>> {
    let window_days = config.churn_period_days as i64;
    let since = now.timestamp() - window_days * 86_400;
    let months = (window_days as f64 / 30.0).max(1.0 / 30.0);

    let freqs = git.file_frequencies(repo_path, Some(since))?;

    Ok(freqs
        .iter()
        .map(|f| {
            (
                f.path.clone(),
                ChurnRate {
                    commits_in_window: f.commits,
                    commits_per_month: f.commits as f64 / months,
                },
            )
        })
        .collect())
}

#[cfg(test)]
#[path = "churn_test.rs"]
mod tests;
