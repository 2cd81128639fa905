//! DeltaAnalyzer (§4.11): compares two snapshots of the same repository
//! (`base_ref` vs `head_ref`) and reports per-file, per-function
//! complexity changes.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cogcom;
use crate::config::{AnalysisConfig, DeltaThresholds};
use crate::cycom;
use crate::error::Result;
use crate::git::cache::GitCache;
use crate::git::ChangeKind;
use crate::lang::registry::{self, LanguageSpec};
use crate::reader;

use serde::Serialize;

/// Whether a file or function was added, removed, or changed between refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Deleted,
    Modified,
}

/// One function's complexity before/after. `*_before` is `None` for an
/// added function, `*_after` is `None` for a deleted one.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionChange {
    pub name: String,
    pub status: ChangeStatus,
    pub cyclomatic_before: Option<f64>,
    pub cyclomatic_after: Option<f64>,
    pub cognitive_before: Option<f64>,
    pub cognitive_after: Option<f64>,
    /// Set when the function's complexity increase crosses a configured
    /// threshold (§4.11 Warnings).
    pub warning: Option<String>,
}

/// One file's change between `base_ref` and `head_ref`.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub status: ChangeStatus,
    pub function_changes: Vec<FunctionChange>,
    pub cyclomatic_delta: i64,
    pub cognitive_delta: i64,
}

/// A function merged from its cyclomatic and cognitive analyses, used
/// only as an intermediate alignment unit.
#[derive(Debug, Clone)]
struct ParsedFunction {
    name: String,
    start_line: usize,
    cyclomatic: Option<f64>,
    cognitive: Option<f64>,
}

/// Compare `base_ref` against `head_ref` in the repository containing
/// `repo_path`, producing one `FileChange` per file the diff touched.
pub fn compute(
    git: &GitCache,
    repo_path: &Path,
    base_ref: &str,
    head_ref: &str,
    config: &AnalysisConfig,
) -> Result<Vec<FileChange>> {
    let repo = git.repo_for(repo_path)?;
    let diffs = repo.diff_refs(base_ref, head_ref)?;

    let mut changes = Vec::new();
    for diff in diffs {
        let (path, status) = match diff.kind {
            ChangeKind::Added => (diff.new_path.clone().unwrap_or_default(), ChangeStatus::Added),
            ChangeKind::Deleted => (diff.old_path.clone().unwrap_or_default(), ChangeStatus::Deleted),
            ChangeKind::Modified | ChangeKind::Renamed => {
                (diff.new_path.clone().or(diff.old_path.clone()).unwrap_or_default(), ChangeStatus::Modified)
            }
        };

        let Some(spec) = registry::detect(&path) else {
            continue;
        };

        let base_path = diff.old_path.as_deref().unwrap_or(&path);
        let head_path = diff.new_path.as_deref().unwrap_or(&path);

        let base_functions = match status {
            ChangeStatus::Added => Vec::new(),
            _ => parse_at(&repo, base_ref, base_path, spec)?,
        };
        let head_functions = match status {
            ChangeStatus::Deleted => Vec::new(),
            _ => parse_at(&repo, head_ref, head_path, spec)?,
        };

        let function_changes = align(base_functions, head_functions, &config.delta);
        let cyclomatic_delta: i64 = function_changes
            .iter()
            .map(|f| {
                f.cyclomatic_after.unwrap_or(0.0) as i64 - f.cyclomatic_before.unwrap_or(0.0) as i64
            })
            .sum();
        let cognitive_delta: i64 = function_changes
            .iter()
            .map(|f| {
                f.cognitive_after.unwrap_or(0.0) as i64 - f.cognitive_before.unwrap_or(0.0) as i64
            })
            .sum();

        changes.push(FileChange {
            path,
            status,
            function_changes,
            cyclomatic_delta,
            cognitive_delta,
        });
    }

    Ok(changes)
}

fn parse_at(
    repo: &crate::git::GitRepo,
    refspec: &str,
    rel_path: &Path,
    spec: &'static LanguageSpec,
) -> Result<Vec<ParsedFunction>> {
    let Some(bytes) = repo.read_file_at(refspec, rel_path)? else {
        return Ok(Vec::new());
    };
    let text = reader::from_bytes(&bytes, spec);
    let cyclomatic = cycom::analyze_content(&text.lines, &text.kinds, spec);
    let cognitive = cogcom::analyze_content(&text.lines, &text.kinds, spec);
    Ok(merge(cyclomatic, cognitive))
}

fn merge(
    cyclomatic: Option<crate::cycom::FileComplexity>,
    cognitive: Option<crate::cogcom::FileCognitive>,
) -> Vec<ParsedFunction> {
    use std::collections::BTreeMap;
    let mut by_line: BTreeMap<usize, ParsedFunction> = BTreeMap::new();

    if let Some(fc) = cyclomatic {
        for f in fc.functions {
            by_line.insert(
                f.start_line,
                ParsedFunction {
                    name: f.name,
                    start_line: f.start_line,
                    cyclomatic: Some(f.complexity as f64),
                    cognitive: None,
                },
            );
        }
    }
    if let Some(fg) = cognitive {
        for f in fg.functions {
            by_line
                .entry(f.start_line)
                .and_modify(|existing| existing.cognitive = Some(f.complexity as f64))
                .or_insert(ParsedFunction {
                    name: f.name,
                    start_line: f.start_line,
                    cyclomatic: None,
                    cognitive: Some(f.complexity as f64),
                });
        }
    }

    by_line.into_values().collect()
}

/// Align base/head function lists by name where a unique match exists;
/// otherwise fall back to pairing by nearest start line (§4.11 step 3).
fn align(base: Vec<ParsedFunction>, head: Vec<ParsedFunction>, thresholds: &DeltaThresholds) -> Vec<FunctionChange> {
    let mut base_by_name: HashMap<String, Vec<ParsedFunction>> = HashMap::new();
    for f in base {
        base_by_name.entry(f.name.clone()).or_default().push(f);
    }
    let mut head_by_name: HashMap<String, Vec<ParsedFunction>> = HashMap::new();
    for f in head {
        head_by_name.entry(f.name.clone()).or_default().push(f);
    }

    let mut names: Vec<String> = base_by_name.keys().chain(head_by_name.keys()).cloned().collect();
    names.sort();
    names.dedup();

    let mut changes = Vec::new();
    for name in names {
        let mut bases = base_by_name.remove(&name).unwrap_or_default();
        let mut heads = head_by_name.remove(&name).unwrap_or_default();
        bases.sort_by_key(|f| f.start_line);
        heads.sort_by_key(|f| f.start_line);

        let paired = bases.len().min(heads.len());
        let mut heads_iter = heads.into_iter();
        let mut bases_iter = bases.into_iter();

        for _ in 0..paired {
            let before = bases_iter.next().unwrap();
            let after = heads_iter.next().unwrap();
            changes.push(matched_change(before, after, thresholds));
        }
        for leftover in bases_iter {
            changes.push(deleted_change(leftover));
        }
        for leftover in heads_iter {
            changes.push(added_change(leftover));
        }
    }

    changes
}

fn matched_change(before: ParsedFunction, after: ParsedFunction, thresholds: &DeltaThresholds) -> FunctionChange {
    let cyclomatic_increase = match (before.cyclomatic, after.cyclomatic) {
        (Some(b), Some(a)) => Some(a - b),
        _ => None,
    };
    let cognitive_increase = match (before.cognitive, after.cognitive) {
        (Some(b), Some(a)) => Some(a - b),
        _ => None,
    };

    let warning = warning_for(cyclomatic_increase, cognitive_increase, thresholds);

    FunctionChange {
        name: after.name,
        status: ChangeStatus::Modified,
        cyclomatic_before: before.cyclomatic,
        cyclomatic_after: after.cyclomatic,
        cognitive_before: before.cognitive,
        cognitive_after: after.cognitive,
        warning,
    }
}

fn added_change(after: ParsedFunction) -> FunctionChange {
    FunctionChange {
        name: after.name,
        status: ChangeStatus::Added,
        cyclomatic_before: None,
        cyclomatic_after: after.cyclomatic,
        cognitive_before: None,
        cognitive_after: after.cognitive,
        warning: None,
    }
}

fn deleted_change(before: ParsedFunction) -> FunctionChange {
    FunctionChange {
        name: before.name,
        status: ChangeStatus::Deleted,
        cyclomatic_before: before.cyclomatic,
        cyclomatic_after: None,
        cognitive_before: before.cognitive,
        cognitive_after: None,
        warning: None,
    }
}

fn warning_for(cyclomatic_increase: Option<f64>, cognitive_increase: Option<f64>, thresholds: &DeltaThresholds) -> Option<String> {
    if let Some(inc) = cyclomatic_increase {
        if inc as i64 >= thresholds.cyclomatic_increase {
            return Some(format!("cyclomatic complexity increased by {inc}"));
        }
    }
    if let Some(inc) = cognitive_increase {
        if inc as i64 >= thresholds.cognitive_increase {
            return Some(format!("cognitive complexity increased by {inc}"));
        }
    }
    None
}

#[cfg(test)]
#[path = "delta_test.rs"]
mod tests;
