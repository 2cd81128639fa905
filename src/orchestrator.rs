//! Orchestrator (§4.12): the top-level pipeline tying scan → per-repo
//! analysis → aggregation together, plus the library's two public entry
//! points (§6): [`analyze`] and [`delta`].
//!
//! States are linear — `Idle → Scanning → PerRepoAnalysis(repo) →
//! Aggregated(repo) → Done` — with no backtracking; this module doesn't
//! reify them as a type, since the control flow below already walks them
//! in order. Cancellation is checked between files and between repos.
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::aggregate;
use crate::churn;
use crate::config::AnalysisConfig;
use crate::delta::{self, FileChange};
use crate::error::Result;
use crate::file_analyzer;
use crate::git::cache::GitCache;
use crate::hierarchy;
use crate::model::{File, Repository};
use crate::scan;

/// Cooperative cancellation signal, checked between files and between
/// repositories (§5 Cancellation).
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Scan `config.roots`, analyze every recognized file, and return one
/// aggregated `Repository` per discovered repo root.
pub fn analyze(config: &AnalysisConfig) -> Result<Vec<Repository>> {
    analyze_with_cancellation(config, &CancellationToken::new())
}

/// As [`analyze`], but `cancel` may abort the run between files or repos.
/// A cancelled run never yields a partially-built repository (§5).
pub fn analyze_with_cancellation(config: &AnalysisConfig, cancel: &CancellationToken) -> Result<Vec<Repository>> {
    config.validate()?;

    let grouped = scan::scan(&config.roots);
    let git = GitCache::with_timeout(config.git_timeout);
    let now = config.clock.now();

    tracing::info!(roots = config.roots.len(), "scanning complete, starting per-repo analysis");

    let mut repositories = Vec::new();
    for (repo_root, scanned_files) in grouped {
        if cancel.is_cancelled() {
            tracing::info!("analysis cancelled, stopping before remaining repositories");
            break;
        }

        tracing::debug!(repo = %repo_root.display(), "analyzing repository");
        let is_git_repo = git.repo_for(&repo_root).is_ok();
        let churn_map = if is_git_repo {
            churn::compute(&git, &repo_root, now, config).unwrap_or_default()
        } else {
            HashMap::new()
        };

        let analyzed: Vec<File> = scanned_files
            .par_iter()
            .filter_map(|scanned| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(file_analyzer::analyze(
                    &git,
                    &repo_root,
                    &scanned.path,
                    scanned.language,
                    &churn_map,
                    config,
                ))
            })
            .collect();

        if cancel.is_cancelled() {
            continue;
        }

        let repo_name = repo_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| repo_root.to_string_lossy().into_owned());

        let base_ref = if is_git_repo {
            git.repo_for(&repo_root).ok().and_then(|r| r.current_branch().ok().flatten())
        } else {
            None
        };

        let mut repository = hierarchy::build(
            &repo_root,
            repo_name,
            is_git_repo,
            config.churn_period_days,
            base_ref,
            now,
            analyzed,
        );
        aggregate::aggregate(&mut repository.root, config);
        repositories.push(repository);
    }

    Ok(repositories)
}

/// Compare `base_ref` against `head_ref` across every configured root.
pub fn delta(config: &AnalysisConfig, base_ref: &str, head_ref: &str) -> Result<Vec<FileChange>> {
    config.validate()?;

    let git = GitCache::with_timeout(config.git_timeout);
    let mut changes = Vec::new();
    for root in &config.roots {
        changes.extend(delta::compute(&git, root, base_ref, head_ref, config)?);
    }
    Ok(changes)
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
