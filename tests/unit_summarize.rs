// tests/unit_summarize.rs
use std::fs;
use tempfile::TempDir;
use vulntally_core::{summarize, summary};

#[test]
fn test_scan_counts_shallow_lists() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    fs::write(
        out.join("a.sol.slither.json"),
        r#"{"results":{"detectors":[{"check":"x"},{"check":"y"}]}}"#,
    )
    .unwrap();
    fs::write(out.join("a.sol.myth.json"), r#"{"issues":[{"swc-id":"SWC-107"}]}"#).unwrap();
    fs::write(out.join("b.sol.slither.json"), "{ broken").unwrap();
    // Not a slither artifact; must not produce a row.
    fs::write(out.join("notes.txt"), "ignore me").unwrap();

    let rows = summarize::scan(out);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].file, "a.sol", "lexical discovery order");
    assert_eq!(rows[0].slither_issues, Some(2));
    assert_eq!(rows[0].mythril_issues, Some(1));
    assert_eq!(rows[1].file, "b.sol");
    assert_eq!(rows[1].slither_issues, None, "unparsable counts as unknown");
    assert_eq!(rows[1].mythril_issues, None, "missing output is unknown");
}

#[test]
fn test_scan_parsed_but_shapeless_counts_zero() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    fs::write(out.join("odd.sol.slither.json"), r#"{"success":true}"#).unwrap();
    fs::write(out.join("odd.sol.myth.json"), r#"{"error":null}"#).unwrap();

    let rows = summarize::scan(out);
    assert_eq!(rows[0].slither_issues, Some(0));
    assert_eq!(rows[0].mythril_issues, Some(0));
}

#[test]
fn test_write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let out = dir.path();
    fs::write(
        out.join("a.sol.slither.json"),
        r#"{"results":{"detectors":[{"check":"x"}]}}"#,
    )
    .unwrap();
    fs::write(out.join("b.sol.slither.json"), "nope").unwrap();

    let rows = summarize::scan(out);
    let path = summarize::write(out, &rows).unwrap();
    assert_eq!(path, out.join("summary.csv"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("file,slither_issues,mythril_issues\n"));
    assert!(content.contains("a.sol,1,\n"), "unknown mythril cell is empty");
    assert!(content.contains("b.sol,,\n"));

    // The driving-table reader treats unknown cells as zero.
    let parsed = summary::read(&path).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].slither_issues, 1);
    assert_eq!(parsed[0].mythril_issues, 0);
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(summarize::scan(dir.path()).is_empty());
}
