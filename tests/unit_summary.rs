// tests/unit_summary.rs
use std::fs;
use tempfile::TempDir;
use vulntally_core::error::TallyError;
use vulntally_core::summary::{csv_field, read, split_line};

#[test]
fn test_read_missing_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = read(&dir.path().join("summary.csv")).unwrap_err();
    assert!(matches!(err, TallyError::MissingSummary(_)));
}

#[test]
fn test_read_basic_rows_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(
        &path,
        "file,slither_issues,mythril_issues\nb.sol,3,1\na.sol,0,2\n",
    )
    .unwrap();

    let rows = read(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].file, "b.sol");
    assert_eq!(rows[0].slither_issues, 3);
    assert_eq!(rows[1].mythril_issues, 2, "table order is preserved");
}

#[test]
fn test_read_accepts_file_path_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(
        &path,
        "file_path,slither_issues,mythril_issues\ncorpus/a.sol,1,0\n",
    )
    .unwrap();

    let rows = read(&path).unwrap();
    assert_eq!(rows[0].file, "corpus/a.sol");
}

#[test]
fn test_read_is_best_effort_per_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(
        &path,
        "file,slither_issues,mythril_issues\na.sol,,not-a-number\n,5,5\nb.sol,2\n\n\"c,d.sol\",1,0\n",
    )
    .unwrap();

    let rows = read(&path).unwrap();
    assert_eq!(rows.len(), 3, "nameless and blank rows are skipped");
    assert_eq!(rows[0].slither_issues, 0, "empty cell reads as zero");
    assert_eq!(rows[0].mythril_issues, 0, "garbage cell reads as zero");
    assert_eq!(rows[1].mythril_issues, 0, "short row reads as zero");
    assert_eq!(rows[2].file, "c,d.sol", "quoted names survive");
}

#[test]
fn test_read_empty_file_yields_no_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(&path, "").unwrap();
    assert!(read(&path).unwrap().is_empty());
}

#[test]
fn test_split_line_quoting() {
    assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    assert_eq!(split_line("\"a,b\",c"), vec!["a,b", "c"]);
    assert_eq!(split_line("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
    assert_eq!(split_line("a,,"), vec!["a", "", ""]);
}

#[test]
fn test_csv_field_escaping() {
    assert_eq!(csv_field("plain"), "plain");
    assert_eq!(csv_field("a,b"), "\"a,b\"");
    assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(csv_field(""), "");
}
