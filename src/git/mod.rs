//! Git repository access via libgit2.
//!
//! Provides file change frequencies, git blame for ownership, and ref-to-ref
//! diffing for delta analysis — all used by [`crate::churn`], [`crate::ownership`],
//! and [`crate::delta`]. The `GitRepo` wrapper encapsulates `git2::Repository`
//! and its resolved working directory root, providing a safe API for walking
//! commits, diffing trees, and resolving paths between the filesystem walk
//! and git's path namespace.
pub(crate) mod cache;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use git2::{BlameOptions, DiffOptions, ObjectType, Repository, Sort, Tree};

use crate::error::{AnalysisError, Result};

/// Wrapper around a `git2::Repository` with its resolved root path.
pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

/// How often a file was changed in git history.
pub struct FileFrequency {
    /// Repository-relative file path.
    pub path: PathBuf,
    /// Number of non-merge commits that touched this file.
    pub commits: usize,
    /// Unix timestamp of the earliest commit touching this file.
    pub first_commit: i64,
    /// Unix timestamp of the most recent commit touching this file.
    pub last_commit: i64,
}

/// Per-author blame contribution for a single file.
pub struct BlameInfo {
    /// Author display name from git signature.
    pub author: String,
    /// Author email from git signature.
    pub email: String,
    /// Number of lines attributed to this author.
    pub lines: usize,
    /// Unix timestamp of this author's most recent commit to the file.
    pub last_commit_time: i64,
}

/// The kind of change a file underwent between two refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
}

/// One file's change between a base and head ref.
pub struct FileDiff {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub kind: ChangeKind,
}

fn io_err(path: &Path, source: std::io::Error) -> AnalysisError {
    AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl GitRepo {
    /// Open the git repository that contains `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let root = repo
            .workdir()
            .ok_or_else(|| AnalysisError::Git("bare repositories are not supported".into()))?
            .to_path_buf();
        Ok(Self { repo, root })
    }

    /// Canonical working-directory root, used as a cache key by [`cache::GitCache`].
    pub(crate) fn root_for_cache_key(&self) -> PathBuf {
        self.root.canonicalize().unwrap_or_else(|_| self.root.clone())
    }

    /// Resolve a refspec (branch name, tag, "HEAD", "HEAD~3", ...) to a commit OID string.
    pub fn resolve_ref(&self, refspec: &str) -> Result<String> {
        let obj = self
            .repo
            .revparse_single(refspec)
            .map_err(|e| AnalysisError::Git(format!("cannot resolve ref '{refspec}': {e}")))?;
        let commit = obj
            .peel_to_commit()
            .map_err(|e| AnalysisError::Git(format!("'{refspec}' is not a commit: {e}")))?;
        Ok(commit.id().to_string())
    }

    /// The name of the currently checked-out branch, if HEAD is not detached.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }

    /// Iterate non-merge commits in reverse chronological order, optionally
    /// filtered by a `since` timestamp. Calls `f` for each qualifying commit.
    /// The callback returns `ControlFlow::Continue(())` to keep walking or
    /// `ControlFlow::Break(())` to stop early.
    fn walk_commits(
        &self,
        since: Option<i64>,
        mut f: impl FnMut(&git2::Commit) -> Result<ControlFlow<()>>,
    ) -> Result<()> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TIME)?;

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            // Skip merge commits — they don't represent individual file changes.
            if commit.parent_count() > 1 {
                continue;
            }
            // Commits are in reverse chronological order; once we hit one
            // older than the cutoff, all remaining commits are older too.
            // The window itself is measured on author date (§4.5).
            if since.is_some_and(|ts| commit.author().when().seconds() < ts) {
                break;
            }
            if f(&commit)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Count how many commits touched each file, with first/last timestamps.
    pub fn file_frequencies(&self, since: Option<i64>) -> Result<Vec<FileFrequency>> {
        let mut map: HashMap<PathBuf, FileFrequency> = HashMap::new();

        self.walk_commits(since, |commit| {
            let time = commit.author().when().seconds();
            let paths = self.changed_files(commit)?;
            for path in paths {
                map.entry(path.clone())
                    .and_modify(|f| {
                        f.commits += 1;
                        if time < f.first_commit {
                            f.first_commit = time;
                        }
                        if time > f.last_commit {
                            f.last_commit = time;
                        }
                    })
                    .or_insert(FileFrequency {
                        path,
                        commits: 1,
                        first_commit: time,
                        last_commit: time,
                    });
            }
            Ok(ControlFlow::Continue(()))
        })?;

        let mut result: Vec<FileFrequency> = map.into_values().collect();
        result.sort_by(|a, b| b.commits.cmp(&a.commits));
        Ok(result)
    }

    /// Run git blame on a file and return per-author contributions.
    /// `rel_path` is relative to the git root, blamed as of `HEAD`.
    pub fn blame_file(&self, rel_path: &Path) -> Result<Vec<BlameInfo>> {
        self.blame_file_at(rel_path, None)
    }

    /// Run git blame on a file as of a specific ref (or `HEAD` if `None`).
    pub fn blame_file_at(&self, rel_path: &Path, refspec: Option<&str>) -> Result<Vec<BlameInfo>> {
        let mut opts = BlameOptions::new();
        if let Some(refspec) = refspec {
            let oid = self
                .repo
                .revparse_single(refspec)
                .map_err(|e| AnalysisError::Git(format!("cannot resolve ref '{refspec}': {e}")))?
                .id();
            opts.newest_commit(oid);
        }
        let blame = self.repo.blame_file(rel_path, Some(&mut opts))?;

        let mut map: HashMap<String, BlameInfo> = HashMap::new();

        for hunk in blame.iter() {
            let sig = hunk.final_signature();
            let email = sig.email().unwrap_or("unknown").to_string();
            let author = sig.name().unwrap_or("unknown").to_string();
            // Use the signature timestamp directly — avoids an O(1) git
            // object lookup per hunk that would otherwise be O(N) total.
            let commit_time = sig.when().seconds();
            let lines = hunk.lines_in_hunk();

            // Group by email, case-insensitively (§4.6), so the same
            // author blamed under a different display-name spelling or
            // email case doesn't split into a separate share.
            let key = email.to_lowercase();
            map.entry(key)
                .and_modify(|info| {
                    info.lines += lines;
                    if commit_time > info.last_commit_time {
                        info.last_commit_time = commit_time;
                    }
                })
                .or_insert(BlameInfo {
                    author,
                    email,
                    lines,
                    last_commit_time: commit_time,
                });
        }

        let mut result: Vec<BlameInfo> = map.into_values().collect();
        result.sort_by(|a, b| b.lines.cmp(&a.lines));
        Ok(result)
    }

    /// Collect authors who have commits since the given timestamp.
    pub fn recent_authors(&self, since: Option<i64>) -> Result<HashSet<String>> {
        let mut authors = HashSet::new();

        self.walk_commits(since, |commit| {
            if let Some(email) = commit.author().email() {
                authors.insert(email.to_string());
            }
            Ok(ControlFlow::Continue(()))
        })?;

        Ok(authors)
    }

    /// Canonicalize the git root and walk root, then compute the relative prefix
    /// that maps walk-relative paths to git-relative paths.
    ///
    /// Returns `(canonical_walk_root, prefix)`. For example:
    ///   - `git_root=/a/b`, `walk_root=/a/b/src` → prefix = `"src"`
    ///   - `git_root=/a/b`, `walk_root=/a/b`     → prefix = `""`
    pub fn walk_prefix(&self, walk_root: &Path) -> Result<(PathBuf, PathBuf)> {
        let git_root = self.root.canonicalize().map_err(|e| io_err(&self.root, e))?;
        let canonical_walk = walk_root
            .canonicalize()
            .map_err(|e| io_err(walk_root, e))?;
        let prefix = canonical_walk
            .strip_prefix(&git_root)
            .unwrap_or(Path::new(""))
            .to_path_buf();
        Ok((canonical_walk, prefix))
    }

    /// Convert a file path from walk-relative to git-relative using a
    /// pre-computed prefix from [`walk_prefix`].
    pub fn to_git_path(walk_root: &Path, prefix: &Path, file_path: &Path) -> PathBuf {
        let rel = file_path.strip_prefix(walk_root).unwrap_or(file_path);
        if prefix.as_os_str().is_empty() {
            rel.to_path_buf()
        } else {
            prefix.join(rel)
        }
    }

    /// Extract the file tree at a given git ref (e.g. "HEAD", "main~3") into
    /// a destination directory. Writes blobs as files and recurses into subtrees.
    /// Skips submodules and symlinks.
    pub fn extract_tree_to_dir(&self, refspec: &str, dest: &Path) -> Result<()> {
        let obj = self
            .repo
            .revparse_single(refspec)
            .map_err(|e| AnalysisError::Git(format!("cannot resolve ref '{refspec}': {e}")))?;
        let commit = obj
            .peel_to_commit()
            .map_err(|e| AnalysisError::Git(format!("'{refspec}' is not a commit: {e}")))?;
        let tree = commit.tree()?;
        self.write_tree_recursive(&tree, dest)
    }

    /// Recursively write a git tree to a filesystem directory.
    fn write_tree_recursive(&self, tree: &Tree, dest: &Path) -> Result<()> {
        for entry in tree.iter() {
            let name = entry.name().ok_or_else(|| {
                AnalysisError::Git(format!("non-UTF-8 entry in tree: {:?}", entry.id()))
            })?;
            let path = dest.join(name);

            match entry.kind() {
                Some(ObjectType::Blob) => {
                    let blob = self.repo.find_blob(entry.id())?;
                    fs::write(&path, blob.content()).map_err(|e| io_err(&path, e))?;
                }
                Some(ObjectType::Tree) => {
                    let subtree = self.repo.find_tree(entry.id())?;
                    fs::create_dir_all(&path).map_err(|e| io_err(&path, e))?;
                    self.write_tree_recursive(&subtree, &path)?;
                }
                _ => {} // skip submodules, symlinks, etc.
            }
        }
        Ok(())
    }

    /// Diff a commit against its parent to get the list of changed file paths.
    fn changed_files(&self, commit: &git2::Commit) -> Result<Vec<PathBuf>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path() {
                paths.push(path.to_path_buf());
            }
        }
        Ok(paths)
    }

    /// Diff the trees at two refs, returning the set of file-level changes (§4.11).
    pub fn diff_refs(&self, base_ref: &str, head_ref: &str) -> Result<Vec<FileDiff>> {
        let base_tree = self.tree_for_ref(base_ref)?;
        let head_tree = self.tree_for_ref(head_ref)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(false);
        let diff = self.repo.diff_tree_to_tree(
            Some(&base_tree),
            Some(&head_tree),
            Some(&mut opts),
        )?;

        let mut result = Vec::new();
        for delta in diff.deltas() {
            let kind = match delta.status() {
                git2::Delta::Added => ChangeKind::Added,
                git2::Delta::Deleted => ChangeKind::Deleted,
                git2::Delta::Renamed => ChangeKind::Renamed,
                _ => ChangeKind::Modified,
            };
            result.push(FileDiff {
                old_path: delta.old_file().path().map(Path::to_path_buf),
                new_path: delta.new_file().path().map(Path::to_path_buf),
                kind,
            });
        }
        Ok(result)
    }

    /// Read a file's content as it existed at `refspec` (the `git show
    /// ref:path` surface, §6). Returns `None` if the path doesn't exist
    /// in that tree, e.g. for a file added or deleted between refs.
    pub fn read_file_at(&self, refspec: &str, rel_path: &Path) -> Result<Option<Vec<u8>>> {
        let tree = self.tree_for_ref(refspec)?;
        match tree.get_path(rel_path) {
            Ok(entry) => {
                let blob = self.repo.find_blob(entry.id())?;
                Ok(Some(blob.content().to_vec()))
            }
            Err(_) => Ok(None),
        }
    }

    fn tree_for_ref<'a>(&'a self, refspec: &str) -> Result<Tree<'a>> {
        let obj = self
            .repo
            .revparse_single(refspec)
            .map_err(|e| AnalysisError::Git(format!("cannot resolve ref '{refspec}': {e}")))?;
        let commit = obj
            .peel_to_commit()
            .map_err(|e| AnalysisError::Git(format!("'{refspec}' is not a commit: {e}")))?;
        Ok(commit.tree()?)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
