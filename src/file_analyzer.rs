//! FileAnalyzer (§4.8): turns one scanned file into a [`crate::model::File`] node.
//!
//! Reads and decodes the file, runs the cyclomatic and cognitive parsers
//! when the language supports them, merges their per-function results,
//! and attaches file-level churn/ownership/hotspot KPIs from data the
//! caller has already pre-warmed through [`GitCache`]. An unreadable file
//! never aborts the run — it becomes a `File` node with `loc = 0`, no
//! functions, and a warning.
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::churn::ChurnRate;
use crate::cogcom::{self, FileCognitive};
use crate::config::AnalysisConfig;
use crate::cycom::{self, FileComplexity};
use crate::git::cache::GitCache;
use crate::hotspot;
use crate::lang::registry::LanguageSpec;
use crate::model::{CalculationValues, File, Function, FunctionValue, Kpi, KpiKind, KpiMap, KpiValue};
use crate::ownership;
use crate::reader;

/// Analyze one file and produce its `File` node.
pub fn analyze(
    git: &GitCache,
    repo_root: &Path,
    path: &Path,
    language: &'static LanguageSpec,
    churn: &HashMap<PathBuf, ChurnRate>,
    config: &AnalysisConfig,
) -> File {
    let rel_path = path.strip_prefix(repo_root).unwrap_or(path).to_path_buf();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut warnings = Vec::new();

    let text = match reader::read(path, language) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "could not read file");
            warnings.push(format!("could not read {}: {err}", path.display()));
            None
        }
    };

    let loc = text
        .as_ref()
        .map(|t| {
            t.kinds
                .iter()
                .filter(|k| **k == crate::lang::counter::LineKind::Code)
                .count()
        })
        .unwrap_or(0);

    let cyclomatic = text
        .as_ref()
        .and_then(|t| cycom::analyze_content(&t.lines, &t.kinds, language));
    let cognitive = text
        .as_ref()
        .and_then(|t| cogcom::analyze_content(&t.lines, &t.kinds, language));

    if text.is_some() && cyclomatic.is_none() && cognitive.is_none() {
        warnings.push(format!("no complexity markers available for {}", language.name));
    }

    let functions = merge_functions(cyclomatic.as_ref(), cognitive.as_ref());

    let mut kpis = KpiMap::new();
    kpis.insert(
        KpiKind::Loc,
        Kpi::count(KpiKind::Loc, loc, "lines", "Lines of code, excluding blanks and comments"),
    );
    kpis.insert(
        KpiKind::FunctionCount,
        Kpi::count(KpiKind::FunctionCount, functions.len(), "functions", "Number of detected functions"),
    );

    if let Some(fc) = &cyclomatic {
        kpis.insert(KpiKind::Cyclomatic, cyclomatic_file_kpi(fc));
    }
    if let Some(fg) = &cognitive {
        kpis.insert(KpiKind::Cognitive, cognitive_file_kpi(fg));
    }

    if let Some(rate) = churn.get(&rel_path) {
        kpis.insert(
            KpiKind::Churn,
            Kpi::number(
                KpiKind::Churn,
                rate.commits_per_month,
                "commits/month",
                format!("{} commits in the analysis window", rate.commits_in_window),
            ),
        );

        if let Some(fc) = &cyclomatic {
            let hs = hotspot::compute(fc.total_complexity as f64, rate.commits_per_month, &config.hotspot);
            kpis.insert(
                KpiKind::Hotspot,
                Kpi {
                    kind: KpiKind::Hotspot,
                    value: KpiValue::Number(hs.score),
                    unit: "score",
                    calculation_values: CalculationValues::None,
                    description: format!("Cyclomatic complexity × churn rate (grade: {:?})", hs.grade),
                },
            );
        }
    }

    match ownership::compute(git, repo_root, &rel_path, config.significance_threshold) {
        Ok(result) => {
            kpis.insert(
                KpiKind::Ownership,
                Kpi {
                    kind: KpiKind::Ownership,
                    value: KpiValue::Authors(result.authors),
                    unit: "fraction",
                    calculation_values: CalculationValues::None,
                    description: "Blame-derived per-author line ownership fractions".to_string(),
                },
            );
            kpis.insert(
                KpiKind::SharedOwnership,
                Kpi {
                    kind: KpiKind::SharedOwnership,
                    value: KpiValue::SharedOwnership {
                        significant_author_count: result.significant_author_count,
                        classification: result.classification,
                    },
                    unit: "",
                    calculation_values: CalculationValues::None,
                    description: "Ownership classification by significant-author count".to_string(),
                },
            );
        }
        Err(err) => {
            tracing::warn!(path = %rel_path.display(), %err, "ownership unavailable");
            warnings.push(format!("ownership unavailable for {}: {err}", rel_path.display()));
        }
    }

    File {
        name,
        path_relative_to_repo_root: rel_path.to_string_lossy().into_owned(),
        language_tag: language.name.to_string(),
        loc,
        functions,
        kpis,
        warnings,
    }
}

fn cyclomatic_file_kpi(fc: &FileComplexity) -> Kpi {
    let per_function = fc
        .functions
        .iter()
        .map(|f| FunctionValue {
            name: f.name.clone(),
            value: f.complexity as f64,
        })
        .collect();

    Kpi {
        kind: KpiKind::Cyclomatic,
        value: KpiValue::Number(fc.total_complexity as f64),
        unit: "complexity",
        calculation_values: CalculationValues::PerFunction(per_function),
        description: format!("Total cyclomatic complexity ({})", fc.level.as_str()),
    }
}

fn cognitive_file_kpi(fg: &FileCognitive) -> Kpi {
    let per_function = fg
        .functions
        .iter()
        .map(|f| FunctionValue {
            name: f.name.clone(),
            value: f.complexity as f64,
        })
        .collect();

    Kpi {
        kind: KpiKind::Cognitive,
        value: KpiValue::Number(fg.total_complexity as f64),
        unit: "complexity",
        calculation_values: CalculationValues::PerFunction(per_function),
        description: format!("Total cognitive complexity ({})", fg.level.as_str()),
    }
}

/// Merge cyclomatic and cognitive per-function results, keyed by start
/// line, into the model's `Function` records. Neither parser tracks a
/// function's end line, so `line_end` is approximated as `line_start`.
fn merge_functions(cyclomatic: Option<&FileComplexity>, cognitive: Option<&FileCognitive>) -> Vec<Function> {
    let mut by_line: BTreeMap<usize, Function> = BTreeMap::new();

    if let Some(fc) = cyclomatic {
        for f in &fc.functions {
            let mut kpis = KpiMap::new();
            kpis.insert(
                KpiKind::Cyclomatic,
                Kpi::number(
                    KpiKind::Cyclomatic,
                    f.complexity as f64,
                    "complexity",
                    format!("Cyclomatic complexity ({})", f.level.as_str()),
                ),
            );
            by_line.insert(
                f.start_line,
                Function {
                    name: f.name.clone(),
                    line_start: f.start_line,
                    line_end: f.start_line,
                    kpis,
                },
            );
        }
    }

    if let Some(fg) = cognitive {
        for f in &fg.functions {
            let entry = by_line.entry(f.start_line).or_insert_with(|| Function {
                name: f.name.clone(),
                line_start: f.start_line,
                line_end: f.start_line,
                kpis: KpiMap::new(),
            });
            entry.kpis.insert(
                KpiKind::Cognitive,
                Kpi::number(
                    KpiKind::Cognitive,
                    f.complexity as f64,
                    "complexity",
                    format!("Cognitive complexity ({})", f.level.as_str()),
                ),
            );
        }
    }

    by_line.into_values().collect()
}

#[cfg(test)]
#[path = "file_analyzer_test.rs"]
mod tests;
