//! Code ownership via git blame (§4.6).
//!
//! Each file's blamed lines are attributed to authors as fractions of the
//! total; the shared-ownership classification then counts how many authors
//! clear the `significance_threshold`, independent of any absolute line count.
use std::path::Path;

use crate::error::Result;
use crate::git::cache::GitCache;
use crate::model::{AuthorShare, OwnershipClass};

/// Per-file ownership result: author fractions plus the derived
/// shared-ownership classification.
#[derive(Debug, Clone)]
pub struct FileOwnership {
    pub authors: Vec<AuthorShare>,
    pub significant_author_count: usize,
    pub classification: OwnershipClass,
}

/// Blame `rel_path` (repository-relative) and compute its ownership fractions.
pub fn compute(
    git: &GitCache,
    repo_path: &Path,
    rel_path: &Path,
    significance_threshold: f64,
) -> Result<FileOwnership> {
    let blames = git.blame_file(repo_path, rel_path)?;
    Ok(classify(&blames, significance_threshold))
}

fn classify(blames: &[crate::git::BlameInfo], significance_threshold: f64) -> FileOwnership {
    let total_lines: usize = blames.iter().map(|b| b.lines).sum();

    if total_lines == 0 {
        return FileOwnership {
            authors: Vec::new(),
            significant_author_count: 0,
            classification: OwnershipClass::Orphaned,
        };
    }

    let authors: Vec<AuthorShare> = blames
        .iter()
        .map(|b| AuthorShare {
            author: b.author.clone(),
            line_count: b.lines,
            fraction: b.lines as f64 / total_lines as f64,
        })
        .collect();

    let significant_author_count = authors
        .iter()
        .filter(|a| a.fraction >= significance_threshold)
        .count();

    let classification = match significant_author_count {
        0 => OwnershipClass::Orphaned,
        1 => OwnershipClass::SingleOwner,
        _ => OwnershipClass::Shared,
    };

    FileOwnership {
        authors,
        significant_author_count,
        classification,
    }
}

#[cfg(test)]
#[path = "ownership_test.rs"]
mod tests;
