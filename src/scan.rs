//! Directory scanning (§4.1).
//!
//! Walks each configured root with the `ignore` crate (`.gitignore`-aware,
//! `.git` skipped, symlinks not followed), classifies files through
//! [`crate::lang::registry`], and groups the results by repository root —
//! the nearest ancestor directory containing `.git`, or the supplied root
//! itself when there is none.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::lang::registry::{self, LanguageSpec};

/// One recognized source file and its detected language.
pub struct ScannedFile {
    pub repo_root: PathBuf,
    pub path: PathBuf,
    pub language: &'static LanguageSpec,
}

/// Walk `roots`, deduplicating by canonical path, and return every
/// recognized source file grouped under its owning repository root.
///
/// Non-existent roots are skipped with a warning rather than failing the
/// whole scan (§4.1 edge cases).
pub fn scan(roots: &[PathBuf]) -> BTreeMap<PathBuf, Vec<ScannedFile>> {
    let canonical_roots = dedup_roots(roots);

    let files: Vec<ScannedFile> = canonical_roots
        .par_iter()
        .flat_map(|root| scan_root(root))
        .collect();

    let mut grouped: BTreeMap<PathBuf, Vec<ScannedFile>> = BTreeMap::new();
    for file in files {
        grouped.entry(file.repo_root.clone()).or_default().push(file);
    }
    grouped
}

fn dedup_roots(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for root in roots {
        if !root.exists() {
            tracing::warn!(root = %root.display(), "scan root does not exist, skipping");
            continue;
        }
        let canonical = root.canonicalize().unwrap_or_else(|_| root.clone());
        if seen.insert(canonical.clone()) {
            result.push(canonical);
        }
    }
    result
}

fn scan_root(root: &Path) -> Vec<ScannedFile> {
    // A file given directly is accepted without a directory walk.
    if root.is_file() {
        return match detect_language(root) {
            Some(language) => vec![ScannedFile {
                repo_root: repo_root_for(root, root),
                path: root.to_path_buf(),
                language,
            }],
            None => Vec::new(),
        };
    }

    let walker = WalkBuilder::new(root)
        .hidden(true) // drop dotfiles/dotdirs, §4.1 "name starts with `.`"
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if let Some(language) = detect_language(path) {
            files.push(ScannedFile {
                repo_root: repo_root_for(path, root),
                path: path.to_path_buf(),
                language,
            });
        }
    }
    files
}

/// Detect by extension/filename first, falling back to the file's shebang
/// line for extension-less scripts (e.g. a `Python` tool with no `.py`).
fn detect_language(path: &Path) -> Option<&'static LanguageSpec> {
    registry::detect(path).or_else(|| {
        let first_line = first_line_of(path)?;
        registry::detect_by_shebang(&first_line)
    })
}

fn first_line_of(path: &Path) -> Option<String> {
    use std::io::BufRead;
    let file = std::fs::File::open(path).ok()?;
    let mut line = String::new();
    std::io::BufReader::new(file).read_line(&mut line).ok()?;
    Some(line)
}

/// The nearest ancestor directory containing `.git`, or `scan_root` — the
/// root this file was discovered under — when no `.git` ancestor exists
/// (§4.1: "the first supplied root that contains the file"). Falling back
/// to `path`'s own parent instead would fragment a non-git tree with
/// subdirectories into one repository per leaf directory.
fn repo_root_for(path: &Path, scan_root: &Path) -> PathBuf {
    let start = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    for ancestor in start.ancestors() {
        if ancestor.join(".git").exists() {
            return ancestor.to_path_buf();
        }
    }
    scan_root.to_path_buf()
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
