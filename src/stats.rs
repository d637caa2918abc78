// src/stats.rs
//! Quick console statistics over a summary table: per-tool mean/min/max,
//! a Top-N table of the noisiest files, and an optional threshold filter
//! with Markdown/file-list emission for driving follow-up batches.

use crate::error::{Result, TallyError};
use crate::summary::{self, SummaryRow};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Which tool's count column to rank or filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tool {
    Slither,
    Mythril,
}

impl Tool {
    fn count(self, row: &SummaryRow) -> u64 {
        match self {
            Tool::Slither => row.slither_issues,
            Tool::Mythril => row.mythril_issues,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tool::Slither => "slither",
            Tool::Mythril => "mythril",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsOptions {
    pub top: usize,
    pub by: Tool,
    pub filter: Option<Tool>,
    pub ge: Option<u64>,
    pub emit_md: Option<PathBuf>,
    pub emit_list: Option<PathBuf>,
}

/// Prints summary statistics for the given table.
///
/// # Errors
/// Returns an error if the table is missing or an emission path cannot be
/// written.
pub fn run(csv: &Path, opts: &StatsOptions) -> Result<()> {
    let rows = summary::read(csv)?;

    print_overview(&rows);

    if let (Some(tool), Some(threshold)) = (opts.filter, opts.ge) {
        let filtered: Vec<&SummaryRow> =
            rows.iter().filter(|r| tool.count(r) >= threshold).collect();
        println!("Filter: {} >= {threshold}\n", tool.label());
        print_table(&filtered);
        if let Some(md_path) = &opts.emit_md {
            emit_markdown(md_path, &filtered)?;
            println!("\n[OK] Wrote Markdown -> {}", md_path.display());
        }
        return Ok(());
    }

    let mut ranked: Vec<&SummaryRow> = rows.iter().collect();
    ranked.sort_by(|a, b| opts.by.count(b).cmp(&opts.by.count(a)));
    let top: Vec<&SummaryRow> = ranked.into_iter().take(opts.top).collect();

    println!("Top-{} by {}:\n", opts.top, opts.by.label());
    print_table(&top);

    if let Some(list_path) = &opts.emit_list {
        let lines: Vec<&str> = top.iter().map(|r| r.file.as_str()).collect();
        fs::write(list_path, lines.join("\n")).map_err(|e| TallyError::io(e, list_path))?;
        println!("\n[OK] Wrote list -> {} ({} files)", list_path.display(), top.len());
    }

    Ok(())
}

fn print_overview(rows: &[SummaryRow]) {
    let slither: Vec<u64> = rows.iter().map(|r| r.slither_issues).collect();
    let mythril: Vec<u64> = rows.iter().map(|r| r.mythril_issues).collect();

    println!(
        "files={}  slither(mean)={}  mythril(mean)={}",
        rows.len(),
        mean(&slither),
        mean(&mythril)
    );
    println!(
        "slither[min,max]={}  mythril[min,max]={}\n",
        min_max(&slither),
        min_max(&mythril)
    );
}

fn mean(values: &[u64]) -> String {
    if values.is_empty() {
        return "NA".to_string();
    }
    #[allow(clippy::cast_precision_loss)]
    let m = values.iter().sum::<u64>() as f64 / values.len() as f64;
    format!("{m:.2}")
}

fn min_max(values: &[u64]) -> String {
    match (values.iter().min(), values.iter().max()) {
        (Some(lo), Some(hi)) => format!("{lo},{hi}"),
        _ => "NA,NA".to_string(),
    }
}

fn print_table(rows: &[&SummaryRow]) {
    let header = format!("{:<60} {:>14}  {:>14}", "file", "slither_issues", "mythril_issues");
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for row in rows {
        println!(
            "{:<60} {:>14}  {:>14}",
            row.file, row.slither_issues, row.mythril_issues
        );
    }
}

fn emit_markdown(path: &Path, rows: &[&SummaryRow]) -> Result<()> {
    let mut md = String::from("| file | slither_issues | mythril_issues |\n|---|---:|---:|\n");
    for row in rows {
        let _ = writeln!(
            md,
            "| {} | {} | {} |",
            row.file, row.slither_issues, row.mythril_issues
        );
    }
    fs::write(path, md).map_err(|e| TallyError::io(e, path))
}
