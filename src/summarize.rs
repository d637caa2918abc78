// src/summarize.rs
//! Builds the driving summary table from a directory of raw tool outputs.
//!
//! Discovers `*.slither.json` artifacts (lexical order), pairs each with
//! its `<base>.myth.json`, and records shallow issue counts: the length of
//! Slither's `results.detectors` list and of Mythril's `issues` list. These
//! are cheaper counts than the report's recursive extraction and can
//! legitimately differ from it.

use crate::error::{Result, TallyError};
use crate::extract::read_json;
use crate::summary::csv_field;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SLITHER_SUFFIX: &str = ".slither.json";

/// One row of raw counts; `None` means the document was missing or
/// unparsable (emitted as an empty cell, distinct from zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub file: String,
    pub slither_issues: Option<u64>,
    pub mythril_issues: Option<u64>,
}

/// Scans `outdir` for per-file tool outputs and counts their findings.
#[must_use]
pub fn scan(outdir: &Path) -> Vec<CountRow> {
    let mut slither_paths: Vec<PathBuf> = WalkDir::new(outdir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(SLITHER_SUFFIX))
        })
        .collect();
    slither_paths.sort();

    let mut rows = Vec::with_capacity(slither_paths.len());
    for slither_path in slither_paths {
        let name = slither_path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let base = name.trim_end_matches(SLITHER_SUFFIX).to_string();
        let myth_path = outdir.join(format!("{base}.myth.json"));

        rows.push(CountRow {
            file: base,
            slither_issues: slither_count(read_json(&slither_path).as_ref()),
            mythril_issues: if myth_path.exists() {
                mythril_count(read_json(&myth_path).as_ref())
            } else {
                None
            },
        });
    }
    rows
}

fn slither_count(doc: Option<&Value>) -> Option<u64> {
    let doc = doc?;
    let detectors = doc.get("results").and_then(|r| r.get("detectors"));
    Some(detectors.and_then(Value::as_array).map_or(0, |a| a.len() as u64))
}

fn mythril_count(doc: Option<&Value>) -> Option<u64> {
    let doc = doc?;
    Some(
        doc.get("issues")
            .and_then(Value::as_array)
            .map_or(0, |a| a.len() as u64),
    )
}

/// Writes the rows as `summary.csv` in the scanned directory and returns
/// the written path.
///
/// # Errors
/// Returns an error if the table cannot be written.
pub fn write(outdir: &Path, rows: &[CountRow]) -> Result<PathBuf> {
    let path = outdir.join("summary.csv");
    let mut out = String::from("file,slither_issues,mythril_issues\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&row.file),
            opt_cell(row.slither_issues),
            opt_cell(row.mythril_issues)
        ));
    }
    fs::write(&path, out).map_err(|e| TallyError::io(e, &path))?;
    Ok(path)
}

fn opt_cell(count: Option<u64>) -> String {
    count.map_or_else(String::new, |c| c.to_string())
}
