//! The analysis data model (§3): KPI, Function, File, Directory, Repository.
//!
//! Nodes are built once by [`crate::hierarchy`]/[`crate::aggregate`] and
//! never mutated afterward — there is no parent pointer anywhere in the
//! tree, and `Directory`/`File` maps are keyed by name in a `BTreeMap` so
//! iteration order is always name-sorted without a separate sort step.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The kind of measurement a [`Kpi`] carries. Ordered so a `BTreeMap<KpiKind, _>`
/// iterates in a stable, deterministic sequence independent of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    Cyclomatic,
    Cognitive,
    Churn,
    Hotspot,
    Ownership,
    SharedOwnership,
    FunctionCount,
    Loc,
    /// Directory-only: the maximum (not averaged) cyclomatic complexity
    /// seen anywhere in the subtree (§4.10).
    CyclomaticMax,
    /// Directory-only: the maximum cognitive complexity in the subtree.
    CognitiveMax,
}

/// One author's share of a file's blamable lines (§4.6).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorShare {
    pub author: String,
    pub line_count: usize,
    pub fraction: f64,
}

/// Per-function auxiliary breakdown attached to a file-level KPI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionValue {
    pub name: String,
    pub value: f64,
}

/// Auxiliary breakdown behind a KPI's headline `value` (§3 `calculation_values`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationValues {
    PerFunction(Vec<FunctionValue>),
    PerAuthor(Vec<AuthorShare>),
    None,
}

impl Default for CalculationValues {
    fn default() -> Self {
        CalculationValues::None
    }
}

/// The tagged-variant KPI value (§9 design note: "model as a tagged
/// variant over `kind`, not an open map").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Count(usize),
    Authors(Vec<AuthorShare>),
    SharedOwnership {
        significant_author_count: usize,
        classification: OwnershipClass,
    },
}

impl KpiValue {
    /// Numeric projection used by aggregation and grading. Returns `None`
    /// for the author-list/shared-ownership variants, which aggregate
    /// through their own dedicated paths instead.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            KpiValue::Number(n) => Some(*n),
            KpiValue::Count(c) => Some(*c as f64),
            _ => None,
        }
    }
}

/// Shared-ownership classification (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipClass {
    SingleOwner,
    Shared,
    Orphaned,
}

/// A named measurement (§3).
#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub kind: KpiKind,
    pub value: KpiValue,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "is_none_calc")]
    pub calculation_values: CalculationValues,
    pub description: String,
}

fn is_none_calc(c: &CalculationValues) -> bool {
    matches!(c, CalculationValues::None)
}

impl Kpi {
    pub fn number(kind: KpiKind, value: f64, unit: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind,
            value: KpiValue::Number(value),
            unit,
            calculation_values: CalculationValues::None,
            description: description.into(),
        }
    }

    pub fn count(kind: KpiKind, value: usize, unit: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind,
            value: KpiValue::Count(value),
            unit,
            calculation_values: CalculationValues::None,
            description: description.into(),
        }
    }
}

/// An ordered map of KPIs keyed by kind. Iterates in `KpiKind`'s declared
/// order (see the `Ord` derive), which is what "deterministic output"
/// (§3, §5) means for this map.
pub type KpiMap = BTreeMap<KpiKind, Kpi>;

/// A single function or method (§3).
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub kpis: KpiMap,
}

/// A source file leaf node (§3).
#[derive(Debug, Clone, Serialize)]
pub struct File {
    pub name: String,
    pub path_relative_to_repo_root: String,
    pub language_tag: String,
    pub loc: usize,
    pub functions: Vec<Function>,
    pub kpis: KpiMap,
    /// Per-file warnings captured instead of propagated (§7).
    pub warnings: Vec<String>,
}

/// An internal directory node (§3).
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    pub dir_name: String,
    pub path_relative_to_repo_root: String,
    pub files: BTreeMap<String, File>,
    pub children: BTreeMap<String, Directory>,
    pub kpis: KpiMap,
}

impl Directory {
    pub fn new(dir_name: impl Into<String>, path_relative_to_repo_root: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            path_relative_to_repo_root: path_relative_to_repo_root.into(),
            files: BTreeMap::new(),
            children: BTreeMap::new(),
            kpis: KpiMap::new(),
        }
    }

    /// Total number of files in this subtree (§8 `file_count` invariant).
    pub fn file_count(&self) -> usize {
        self.files.len() + self.children.values().map(Directory::file_count).sum::<usize>()
    }
}

/// A repository root (§3: "Inherits Directory; additionally ...").
/// Modeled as composition per §9's design note rather than inheritance.
#[derive(Debug, Clone, Serialize)]
pub struct Repository {
    pub repo_name: String,
    pub absolute_root: PathBuf,
    pub is_git_repo: bool,
    pub analysis_window_days: u32,
    pub base_ref: Option<String>,
    pub snapshot_time: DateTime<Utc>,
    pub root: Directory,
}

impl Repository {
    pub fn file_count(&self) -> usize {
        self.root.file_count()
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
