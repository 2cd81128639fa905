//! Memoizing wrapper around [`GitRepo`] (§5).
//!
//! `GitRepo::file_frequencies`/`blame_file` each walk the full commit graph
//! or a file's history; both are reused by several analyzers over the same
//! repository. `GitCache` runs each distinct operation at most once per
//! repository root and serves later callers the cached result, guarded by
//! a `parking_lot::Mutex` so concurrent file analyses (driven by `rayon`)
//! don't duplicate the walk.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::{AnalysisError, Result};

use super::{BlameInfo, FileFrequency, GitRepo};

const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(60);

struct Entry {
    repo: Arc<GitRepo>,
    frequencies: Mutex<HashMap<Option<i64>, Arc<Vec<FileFrequency>>>>,
    blames: Mutex<HashMap<PathBuf, Arc<Vec<BlameInfo>>>>,
}

/// Caches [`GitRepo`] handles and their expensive query results, keyed by
/// canonical repository root.
pub struct GitCache {
    repos: Mutex<HashMap<PathBuf, Arc<Entry>>>,
    timeout: Duration,
}

impl Default for GitCache {
    fn default() -> Self {
        Self {
            repos: Mutex::new(HashMap::new()),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }
}

impl GitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every cache-miss git operation by `timeout` (§5 Timeouts).
    /// On timeout the helper thread is abandoned and the operation
    /// returns a `Git` error so the caller can omit the dependent KPIs.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    fn entry_for(&self, path: &Path) -> Result<Arc<Entry>> {
        let repo = GitRepo::open(path)?;
        let key = repo.root_for_cache_key();

        let mut repos = self.repos.lock();
        if let Some(entry) = repos.get(&key) {
            return Ok(entry.clone());
        }

        let entry = Arc::new(Entry {
            repo: Arc::new(repo),
            frequencies: Mutex::new(HashMap::new()),
            blames: Mutex::new(HashMap::new()),
        });
        repos.insert(key, entry.clone());
        Ok(entry)
    }

    /// Open (or reuse) the `GitRepo` for the repository containing `path`.
    pub fn repo_for(&self, path: &Path) -> Result<Arc<GitRepo>> {
        Ok(self.entry_for(path)?.repo.clone())
    }

    /// Memoized [`GitRepo::file_frequencies`], keyed by the `since` window.
    pub fn file_frequencies(&self, path: &Path, since: Option<i64>) -> Result<Arc<Vec<FileFrequency>>> {
        let entry = self.entry_for(path)?;

        if let Some(cached) = entry.frequencies.lock().get(&since) {
            return Ok(cached.clone());
        }

        let root = entry.repo.root_for_cache_key();
        let computed = Arc::new(with_timeout(self.timeout, move || {
            GitRepo::open(&root)?.file_frequencies(since)
        })?);
        entry
            .frequencies
            .lock()
            .insert(since, computed.clone());
        Ok(computed)
    }

    /// Memoized [`GitRepo::blame_file`], keyed by repository-relative path.
    pub fn blame_file(&self, path: &Path, rel_path: &Path) -> Result<Arc<Vec<BlameInfo>>> {
        let entry = self.entry_for(path)?;

        if let Some(cached) = entry.blames.lock().get(rel_path) {
            return Ok(cached.clone());
        }

        let root = entry.repo.root_for_cache_key();
        let rel = rel_path.to_path_buf();
        let computed = Arc::new(with_timeout(self.timeout, move || {
            GitRepo::open(&root)?.blame_file(&rel)
        })?);
        entry
            .blames
            .lock()
            .insert(rel_path.to_path_buf(), computed.clone());
        Ok(computed)
    }
}

/// Run `op` on a detached helper thread and wait up to `timeout` for it.
/// `git2::Repository` is `Send` but not `Sync`, so callers reopen their own
/// handle inside `op` rather than share the cached one across the thread
/// boundary. On timeout the thread is left to finish (or hang) on its own;
/// its result is dropped.
fn with_timeout<T: Send + 'static>(timeout: Duration, op: impl FnOnce() -> Result<T> + Send + 'static) -> Result<T> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(op());
    });
    rx.recv_timeout(timeout).unwrap_or_else(|_| {
        tracing::warn!(?timeout, "git operation timed out, abandoning helper thread");
        Err(AnalysisError::Git(format!("git operation timed out after {timeout:?}")))
    })
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
