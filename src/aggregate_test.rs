use super::*;
use crate::model::{File, Function};
use std::path::PathBuf;

fn cyclomatic_kpi(value: f64) -> Kpi {
    Kpi::number(KpiKind::Cyclomatic, value, "complexity", "test")
}

fn ownership_kpi(shares: Vec<AuthorShare>) -> Kpi {
    Kpi {
        kind: KpiKind::Ownership,
        value: KpiValue::Authors(shares),
        unit: "fraction",
        calculation_values: CalculationValues::None,
        description: "test".to_string(),
    }
}

fn file_with(name: &str, loc: usize, functions: usize, cyclomatic: f64, authors: Vec<AuthorShare>) -> File {
    let mut kpis = KpiMap::new();
    kpis.insert(KpiKind::Cyclomatic, cyclomatic_kpi(cyclomatic));
    if !authors.is_empty() {
        kpis.insert(KpiKind::Ownership, ownership_kpi(authors));
    }
    File {
        name: name.to_string(),
        path_relative_to_repo_root: name.to_string(),
        language_tag: "Rust".to_string(),
        loc,
        functions: (0..functions)
            .map(|i| Function {
                name: format!("f{i}"),
                line_start: i + 1,
                line_end: i + 1,
                kpis: KpiMap::new(),
            })
            .collect(),
        kpis,
        warnings: vec![],
    }
}

fn config() -> AnalysisConfig {
    AnalysisConfig::new(vec![PathBuf::from(".")])
}

#[test]
fn cyclomatic_average_is_weighted_by_function_count() {
    let mut dir = Directory::new("root", "");
    dir.files.insert(
        "a.rs".to_string(),
        file_with("a.rs", 10, 1, 10.0, vec![]),
    );
    dir.files.insert(
        "b.rs".to_string(),
        file_with("b.rs", 10, 3, 2.0, vec![]),
    );

    aggregate(&mut dir, &config());

    // (10*1 + 2*3) / 4 = 4.0
    let avg = dir.kpis.get(&KpiKind::Cyclomatic).unwrap().value.as_f64().unwrap();
    assert!((avg - 4.0).abs() < 1e-9);
    let max = dir.kpis.get(&KpiKind::CyclomaticMax).unwrap().value.as_f64().unwrap();
    assert_eq!(max, 10.0);
}

#[test]
fn loc_and_function_count_sum_recursively() {
    let mut child = Directory::new("sub", "sub");
    child.files.insert("c.rs".to_string(), file_with("c.rs", 5, 2, 1.0, vec![]));

    let mut root = Directory::new("root", "");
    root.files.insert("a.rs".to_string(), file_with("a.rs", 10, 1, 1.0, vec![]));
    root.children.insert("sub".to_string(), child);

    aggregate(&mut root, &config());

    assert_eq!(root.kpis.get(&KpiKind::Loc).unwrap().value.as_f64().unwrap(), 15.0);
    assert_eq!(
        root.kpis.get(&KpiKind::FunctionCount).unwrap().value.as_f64().unwrap(),
        3.0
    );
}

#[test]
fn ownership_is_a_line_weighted_union_across_files() {
    let mut dir = Directory::new("root", "");
    dir.files.insert(
        "a.rs".to_string(),
        file_with(
            "a.rs",
            10,
            1,
            1.0,
            vec![AuthorShare {
                author: "Alice".to_string(),
                line_count: 80,
                fraction: 1.0,
            }],
        ),
    );
    dir.files.insert(
        "b.rs".to_string(),
        file_with(
            "b.rs",
            10,
            1,
            1.0,
            vec![AuthorShare {
                author: "Bob".to_string(),
                line_count: 20,
                fraction: 1.0,
            }],
        ),
    );

    aggregate(&mut dir, &config());

    let ownership = dir.kpis.get(&KpiKind::Ownership).unwrap();
    let KpiValue::Authors(authors) = &ownership.value else {
        panic!("expected Authors variant");
    };
    assert_eq!(authors.len(), 2);
    let alice = authors.iter().find(|a| a.author == "Alice").unwrap();
    assert!((alice.fraction - 0.8).abs() < 1e-9);

    let shared = dir.kpis.get(&KpiKind::SharedOwnership).unwrap();
    let KpiValue::SharedOwnership { significant_author_count, classification } = &shared.value else {
        panic!("expected SharedOwnership variant");
    };
    assert_eq!(*significant_author_count, 2);
    assert_eq!(*classification, OwnershipClass::Shared);
}

#[test]
fn directories_with_no_ownership_data_omit_the_kpi() {
    let mut dir = Directory::new("root", "");
    dir.files.insert("a.rs".to_string(), file_with("a.rs", 10, 1, 1.0, vec![]));

    aggregate(&mut dir, &config());

    assert!(!dir.kpis.contains_key(&KpiKind::Ownership));
    assert!(!dir.kpis.contains_key(&KpiKind::SharedOwnership));
}
