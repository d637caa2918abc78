// tests/unit_report.rs
use std::fs;
use tempfile::TempDir;
use vulntally_core::summary::SummaryRow;
use vulntally_core::taxonomy::{Taxonomy, TaxonomyRule};
use vulntally_core::types::AggregateReport;
use vulntally_core::{aggregate, report};

fn reentrancy_taxonomy() -> Taxonomy {
    let mut tax = Taxonomy::new();
    tax.insert(
        "P1".to_string(),
        TaxonomyRule {
            name: "Reentrancy".to_string(),
            swc_ids: ["SWC-107".to_string()].into(),
            detector_prefixes: ["reentrancy".to_string()].into(),
        },
    );
    tax
}

fn build_corpus(out: &std::path::Path) -> Vec<SummaryRow> {
    fs::write(
        out.join("a.sol.myth.json"),
        r#"{"issues":[{"swc-id":"SWC-107","title":"Reentrancy"}]}"#,
    )
    .unwrap();
    fs::write(
        out.join("b.sol.slither.json"),
        r#"{"results":{"detectors":[{"check":"reentrancy-eth"}]}}"#,
    )
    .unwrap();
    vec![
        SummaryRow {
            file: "a.sol".to_string(),
            slither_issues: 0,
            mythril_issues: 1,
        },
        SummaryRow {
            file: "b.sol".to_string(),
            slither_issues: 1,
            mythril_issues: 0,
        },
        SummaryRow {
            file: "c.sol".to_string(),
            slither_issues: 0,
            mythril_issues: 0,
        },
    ]
}

#[test]
fn test_csv_with_taxonomy_columns() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    let rows = build_corpus(out);
    let tax = reentrancy_taxonomy();
    let (records, _) = aggregate::run(out, &rows, &tax);

    let csv_path = out.join("findings.csv");
    report::write_csv(&csv_path, &records, true).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();

    assert_eq!(
        lines.next().unwrap(),
        "file,slither_issues,mythril_issues,mythril_swcs,mythril_titles,slither_detectors,category_hits,category_detail"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("a.sol,0,1,SWC-107,Reentrancy,,P1,"));
    assert_eq!(lines.clone().count(), 2, "one data row per remaining file");
}

#[test]
fn test_csv_without_taxonomy_has_no_category_columns() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    let rows = build_corpus(out);
    let (records, _) = aggregate::run(out, &rows, &Taxonomy::new());

    let csv_path = out.join("findings.csv");
    report::write_csv(&csv_path, &records, false).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();

    assert!(!content.contains("category_hits"));
    assert!(content
        .lines()
        .next()
        .unwrap()
        .ends_with("slither_detectors"));
}

#[test]
fn test_csv_zero_records_emits_lone_file_header() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("findings.csv");
    report::write_csv(&csv_path, &[], true).unwrap();

    assert_eq!(fs::read_to_string(&csv_path).unwrap(), "file\n");
}

#[test]
fn test_csv_quotes_embedded_commas() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    fs::write(
        out.join("q.sol.myth.json"),
        r#"{"issues":[{"swc-id":"SWC-101","title":"Overflow, underflow"}]}"#,
    )
    .unwrap();
    let rows = vec![SummaryRow {
        file: "q.sol".to_string(),
        slither_issues: 0,
        mythril_issues: 1,
    }];
    let (records, _) = aggregate::run(out, &rows, &Taxonomy::new());

    let csv_path = out.join("findings.csv");
    report::write_csv(&csv_path, &records, false).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.contains("\"Overflow, underflow\""));
}

#[test]
fn test_markdown_full_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    let rows = build_corpus(out);
    let tax = reentrancy_taxonomy();
    let (records, agg) = aggregate::run(out, &rows, &tax);

    let md_path = out.join("report.md");
    report::write_markdown(&md_path, &agg, &records, &tax, 15).unwrap();
    let md = fs::read_to_string(&md_path).unwrap();

    assert!(md.starts_with("# Batch Report (3 files)"));
    assert!(md.contains("- Mythril hit rate (>=1 finding): **33.33%**"));
    assert!(md.contains("- Slither hit rate (>=1 finding): **33.33%**"));
    assert!(md.contains("- Any tool hit rate (>=1 finding): **66.67%**"));
    assert!(md.contains("- P1 (Reentrancy): **66.67%**  (2/3)"));
    assert!(md.contains("## Top Mythril SWC"));
    assert!(md.contains("- SWC-107: 1"));
    assert!(md.contains("## Top Slither Detectors"));
    assert!(md.contains("- reentrancy-eth: 1"));
    assert!(md.contains("## Top Categories"));
    assert!(md.contains("- P1 (Reentrancy): 2"));
    assert!(md.contains("## Per-file Findings"));
    // Empty cells render as a placeholder dash.
    assert!(md.contains("| c.sol | 0 | 0 | - | - | - | - | - |"));
}

#[test]
fn test_markdown_without_taxonomy_omits_category_sections() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    let rows = build_corpus(out);
    let (records, agg) = aggregate::run(out, &rows, &Taxonomy::new());

    let md_path = out.join("report.md");
    report::write_markdown(&md_path, &agg, &records, &Taxonomy::new(), 15).unwrap();
    let md = fs::read_to_string(&md_path).unwrap();

    assert!(!md.contains("Category Hit Rates"));
    assert!(!md.contains("Top Categories"));
    assert!(!md.contains("category_hits"));
    assert!(md.contains("- Mythril hit rate (>=1 finding): **33.33%**"));
}

#[test]
fn test_top_n_truncates_frequency_tables() {
    let agg = AggregateReport {
        total_files: 1,
        swc_freq: vec![
            ("SWC-101".to_string(), 5),
            ("SWC-107".to_string(), 3),
            ("SWC-110".to_string(), 1),
        ],
        ..AggregateReport::default()
    };
    let dir = TempDir::new().unwrap();
    let md_path = dir.path().join("report.md");
    report::write_markdown(&md_path, &agg, &[], &Taxonomy::new(), 2).unwrap();
    let md = fs::read_to_string(&md_path).unwrap();

    assert!(md.contains("- SWC-101: 5"));
    assert!(md.contains("- SWC-107: 3"));
    assert!(!md.contains("SWC-110"));
}

#[test]
fn test_percent_formatting() {
    assert_eq!(report::percent(0.0), "0.00%");
    assert_eq!(report::percent(2.0 / 3.0), "66.67%");
    assert_eq!(report::percent(1.0), "100.00%");
}
