// src/report.rs
//! Renders the aggregate as two artifacts: a CSV of flattened per-file
//! records and a Markdown report with hit rates, Top-N frequency tables,
//! and a per-file findings table. Writing to the caller-supplied paths is
//! the only I/O performed here.

use crate::error::{Result, TallyError};
use crate::summary::csv_field;
use crate::taxonomy::Taxonomy;
use crate::types::{AggregateReport, FileRecord};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Writes the per-file CSV artifact.
///
/// Columns come from the record field list; with zero records, a lone
/// `file` header is emitted with no data rows.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_csv(path: &Path, records: &[FileRecord], with_taxonomy: bool) -> Result<()> {
    let columns = if records.is_empty() {
        vec!["file"]
    } else {
        FileRecord::columns(with_taxonomy)
    };

    let mut out = String::new();
    out.push_str(&columns.join(","));
    out.push('\n');
    for record in records {
        let cells: Vec<String> = columns.iter().map(|c| csv_field(&record.cell(c))).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    fs::write(path, out).map_err(|e| TallyError::io(e, path))
}

/// Writes the Markdown report artifact.
///
/// Taxonomy sections appear only when a mapping was supplied; the per-file
/// table mirrors the CSV columns with `-` for empty cells.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_markdown(
    path: &Path,
    report: &AggregateReport,
    records: &[FileRecord],
    taxonomy: &Taxonomy,
    top: usize,
) -> Result<()> {
    let mut md = String::new();
    let _ = writeln!(md, "# Batch Report ({} files)\n", report.total_files);

    let _ = writeln!(md, "## Hit Rates\n");
    let _ = writeln!(
        md,
        "- Mythril hit rate (>=1 finding): **{}**",
        percent(report.mythril_rate())
    );
    let _ = writeln!(
        md,
        "- Slither hit rate (>=1 finding): **{}**",
        percent(report.slither_rate())
    );
    let _ = writeln!(
        md,
        "- Any tool hit rate (>=1 finding): **{}**\n",
        percent(report.any_tool_rate())
    );

    if !taxonomy.is_empty() {
        let _ = writeln!(md, "## Category Hit Rates (per-file dedup)\n");
        for (key, rule) in taxonomy {
            let n = report.category_files.get(key).copied().unwrap_or(0);
            let _ = writeln!(
                md,
                "- {key} ({}): **{}**  ({n}/{})",
                rule.name,
                percent(report.category_rate(key)),
                report.total_files
            );
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Top Mythril SWC\n");
    for (swc, count) in report.swc_freq.iter().take(top) {
        let _ = writeln!(md, "- {swc}: {count}");
    }

    let _ = writeln!(md, "\n## Top Slither Detectors\n");
    for (det, count) in report.detector_freq.iter().take(top) {
        let _ = writeln!(md, "- {det}: {count}");
    }

    if !taxonomy.is_empty() {
        let _ = writeln!(md, "\n## Top Categories\n");
        for (key, count) in report.category_freq.iter().take(top) {
            let name = taxonomy.get(key).map_or(key.as_str(), |r| r.name.as_str());
            let _ = writeln!(md, "- {key} ({name}): {count}");
        }
    }

    let _ = writeln!(md, "\n## Per-file Findings\n");
    let columns = FileRecord::columns(!taxonomy.is_empty());
    let _ = writeln!(md, "| {} |", columns.join(" | "));
    let _ = writeln!(md, "|{}|", vec!["---"; columns.len()].join("|"));
    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let cell = record.cell(c);
                if cell.is_empty() {
                    "-".to_string()
                } else {
                    cell
                }
            })
            .collect();
        let _ = writeln!(md, "| {} |", cells.join(" | "));
    }

    fs::write(path, md).map_err(|e| TallyError::io(e, path))
}

/// Formats a fraction as a percentage with two decimals, e.g. `66.67%`.
#[must_use]
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
