use super::*;

#[test]
fn kpi_kind_orders_deterministically_in_a_btreemap() {
    let mut kpis = KpiMap::new();
    kpis.insert(
        KpiKind::Loc,
        Kpi::count(KpiKind::Loc, 10, "lines", "lines of code"),
    );
    kpis.insert(
        KpiKind::Cyclomatic,
        Kpi::number(KpiKind::Cyclomatic, 4.0, "complexity", "cyclomatic complexity"),
    );
    let order: Vec<KpiKind> = kpis.keys().copied().collect();
    assert_eq!(order, vec![KpiKind::Cyclomatic, KpiKind::Loc]);
}

#[test]
fn directory_file_count_sums_recursively() {
    let mut root = Directory::new("root", "");
    root.files.insert(
        "a.py".to_string(),
        File {
            name: "a.py".to_string(),
            path_relative_to_repo_root: "a.py".to_string(),
            language_tag: "Python".to_string(),
            loc: 1,
            functions: vec![],
            kpis: KpiMap::new(),
            warnings: vec![],
        },
    );
    let mut child = Directory::new("sub", "sub");
    child.files.insert(
        "b.py".to_string(),
        File {
            name: "b.py".to_string(),
            path_relative_to_repo_root: "sub/b.py".to_string(),
            language_tag: "Python".to_string(),
            loc: 1,
            functions: vec![],
            kpis: KpiMap::new(),
            warnings: vec![],
        },
    );
    root.children.insert("sub".to_string(), child);

    assert_eq!(root.file_count(), 2);
}

#[test]
fn as_f64_is_none_for_author_list_variants() {
    let value = KpiValue::Authors(vec![]);
    assert_eq!(value.as_f64(), None);
    assert_eq!(KpiValue::Number(3.5).as_f64(), Some(3.5));
    assert_eq!(KpiValue::Count(7).as_f64(), Some(7.0));
}
