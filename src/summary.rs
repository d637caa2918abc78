// src/summary.rs
//! The driving summary table: one row per analyzed file with raw per-tool
//! issue counts, produced upstream (see `summarize`). Its absence is the
//! only fatal input error in the engine; malformed rows are tolerated
//! best-effort (missing cells read as zero/empty).

use crate::error::{Result, TallyError};
use std::fs;
use std::path::Path;

/// One parsed row of the driving table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub file: String,
    pub slither_issues: u64,
    pub mythril_issues: u64,
}

/// Reads the driving table, preserving row order.
///
/// The header may name the file column `file_path` or `file`. Rows without
/// a file name are skipped; unparsable counts become zero.
///
/// # Errors
/// Returns `MissingSummary` if the table does not exist, or an I/O error
/// if it cannot be read.
pub fn read(path: &Path) -> Result<Vec<SummaryRow>> {
    if !path.exists() {
        return Err(TallyError::MissingSummary(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| TallyError::io(e, path))?;

    let mut lines = content.lines();
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = split_line(header);
    let file_col = find_column(&columns, "file_path").or_else(|| find_column(&columns, "file"));
    let slither_col = find_column(&columns, "slither_issues");
    let mythril_col = find_column(&columns, "mythril_issues");

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_line(line);
        let Some(file) = file_col.and_then(|i| cells.get(i)) else {
            continue;
        };
        if file.trim().is_empty() {
            continue;
        }
        rows.push(SummaryRow {
            file: file.trim().to_string(),
            slither_issues: parse_count(slither_col.and_then(|i| cells.get(i))),
            mythril_issues: parse_count(mythril_col.and_then(|i| cells.get(i))),
        });
    }
    Ok(rows)
}

fn find_column(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.trim() == name)
}

fn parse_count(cell: Option<&String>) -> u64 {
    cell.and_then(|c| c.trim().parse().ok()).unwrap_or(0)
}

/// Splits one CSV line, honoring double-quoted fields with `""` escapes.
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
#[must_use]
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
