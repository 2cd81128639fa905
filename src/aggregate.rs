//! Aggregator (§4.10): post-order directory rollups of file KPIs.
//!
//! Complexity KPIs average across a directory's files and (already
//! aggregated) subdirectories, weighted by function count; their peak is
//! kept alongside as a separate `<kpi>_max` KPI rather than folded into
//! the average. Churn averages unweighted (mean of file/subdirectory
//! rates). Ownership is the union of author line counts across the
//! subtree, re-fractioned and re-classified from that combined total.
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::model::{AuthorShare, CalculationValues, Directory, Kpi, KpiKind, KpiMap, KpiValue, OwnershipClass};

/// Recursively aggregate `dir`'s KPIs from its files and its children,
/// aggregating children first (post-order).
pub fn aggregate(dir: &mut Directory, config: &AnalysisConfig) {
    for child in dir.children.values_mut() {
        aggregate(child, config);
    }

    let mut units: Vec<(usize, &KpiMap)> = Vec::new();
    for file in dir.files.values() {
        units.push((file.functions.len().max(1), &file.kpis));
    }
    for child in dir.children.values() {
        units.push((kpi_count(&child.kpis, KpiKind::FunctionCount).max(1), &child.kpis));
    }

    let loc_total: usize = dir.files.values().map(|f| f.loc).sum::<usize>()
        + dir
            .children
            .values()
            .map(|c| kpi_count(&c.kpis, KpiKind::Loc))
            .sum::<usize>();
    let function_count_total: usize = units.iter().map(|(fc, _)| *fc).sum();

    let mut kpis = KpiMap::new();
    kpis.insert(
        KpiKind::Loc,
        Kpi::count(KpiKind::Loc, loc_total, "lines", "Sum of lines of code in this subtree"),
    );
    kpis.insert(
        KpiKind::FunctionCount,
        Kpi::count(
            KpiKind::FunctionCount,
            function_count_total,
            "functions",
            "Sum of functions in this subtree",
        ),
    );

    insert_complexity_rollup(
        &mut kpis,
        &units,
        KpiKind::Cyclomatic,
        KpiKind::CyclomaticMax,
        "Function-count-weighted average cyclomatic complexity",
        "Maximum cyclomatic complexity in this subtree",
    );
    insert_complexity_rollup(
        &mut kpis,
        &units,
        KpiKind::Cognitive,
        KpiKind::CognitiveMax,
        "Function-count-weighted average cognitive complexity",
        "Maximum cognitive complexity in this subtree",
    );

    if let Some(churn) = mean_value(&units, KpiKind::Churn) {
        kpis.insert(
            KpiKind::Churn,
            Kpi::number(
                KpiKind::Churn,
                churn,
                "commits/month",
                "Mean churn rate across files in this subtree",
            ),
        );
    }

    if let Some(hotspot) = weighted_average(&units, KpiKind::Hotspot) {
        kpis.insert(
            KpiKind::Hotspot,
            Kpi::number(
                KpiKind::Hotspot,
                hotspot,
                "score",
                "Function-count-weighted average hotspot score",
            ),
        );
    }

    if let Some((authors, significant_author_count, classification)) = aggregate_ownership(&units, config) {
        kpis.insert(
            KpiKind::Ownership,
            Kpi {
                kind: KpiKind::Ownership,
                value: KpiValue::Authors(authors),
                unit: "fraction",
                calculation_values: CalculationValues::None,
                description: "Subtree-wide author line ownership, union of file-level shares".to_string(),
            },
        );
        kpis.insert(
            KpiKind::SharedOwnership,
            Kpi {
                kind: KpiKind::SharedOwnership,
                value: KpiValue::SharedOwnership {
                    significant_author_count,
                    classification,
                },
                unit: "",
                calculation_values: CalculationValues::None,
                description: "Ownership classification re-derived from the aggregated author map".to_string(),
            },
        );
    }

    dir.kpis = kpis;
}

fn insert_complexity_rollup(
    kpis: &mut KpiMap,
    units: &[(usize, &KpiMap)],
    kind: KpiKind,
    max_kind: KpiKind,
    avg_description: &str,
    max_description: &str,
) {
    if let Some(avg) = weighted_average(units, kind) {
        kpis.insert(kind, Kpi::number(kind, avg, "complexity", avg_description));
    }
    if let Some(max) = max_value(units, kind, max_kind) {
        kpis.insert(max_kind, Kpi::number(max_kind, max, "complexity", max_description));
    }
}

fn kpi_count(kpis: &KpiMap, kind: KpiKind) -> usize {
    kpis.get(&kind)
        .and_then(|k| k.value.as_f64())
        .map(|v| v as usize)
        .unwrap_or(0)
}

/// Average of `kind` across units that carry it, weighted by each unit's
/// function count (already folded into `units`).
fn weighted_average(units: &[(usize, &KpiMap)], kind: KpiKind) -> Option<f64> {
    let mut weighted = 0.0;
    let mut weight_total = 0usize;
    for (weight, kpis) in units {
        if let Some(value) = kpis.get(&kind).and_then(|k| k.value.as_f64()) {
            weighted += value * *weight as f64;
            weight_total += *weight;
        }
    }
    (weight_total > 0).then(|| weighted / weight_total as f64)
}

/// Unweighted mean of `kind` across the units that carry it.
fn mean_value(units: &[(usize, &KpiMap)], kind: KpiKind) -> Option<f64> {
    let values: Vec<f64> = units
        .iter()
        .filter_map(|(_, kpis)| kpis.get(&kind).and_then(|k| k.value.as_f64()))
        .collect();
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// The peak of `kind` across units, also considering a subdirectory's
/// already-rolled-up `max_kind`.
fn max_value(units: &[(usize, &KpiMap)], kind: KpiKind, max_kind: KpiKind) -> Option<f64> {
    let mut max: Option<f64> = None;
    for (_, kpis) in units {
        for candidate in [
            kpis.get(&kind).and_then(|k| k.value.as_f64()),
            kpis.get(&max_kind).and_then(|k| k.value.as_f64()),
        ]
        .into_iter()
        .flatten()
        {
            max = Some(max.map_or(candidate, |m: f64| m.max(candidate)));
        }
    }
    max
}

fn aggregate_ownership(
    units: &[(usize, &KpiMap)],
    config: &AnalysisConfig,
) -> Option<(Vec<AuthorShare>, usize, OwnershipClass)> {
    let mut author_lines: HashMap<String, usize> = HashMap::new();
    for (_, kpis) in units {
        if let Some(Kpi {
            value: KpiValue::Authors(shares),
            ..
        }) = kpis.get(&KpiKind::Ownership)
        {
            for share in shares {
                *author_lines.entry(share.author.clone()).or_insert(0) += share.line_count;
            }
        }
    }

    if author_lines.is_empty() {
        return None;
    }

    let total_lines: usize = author_lines.values().sum();
    let mut authors: Vec<AuthorShare> = author_lines
        .into_iter()
        .map(|(author, line_count)| AuthorShare {
            author,
            line_count,
            fraction: line_count as f64 / total_lines as f64,
        })
        .collect();
    authors.sort_by(|a, b| b.fraction.partial_cmp(&a.fraction).unwrap());

    let significant_author_count = authors
        .iter()
        .filter(|a| a.fraction >= config.significance_threshold)
        .count();
    let classification = match significant_author_count {
        0 => OwnershipClass::Orphaned,
        1 => OwnershipClass::SingleOwner,
        _ => OwnershipClass::Shared,
    };

    Some((authors, significant_author_count, classification))
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
