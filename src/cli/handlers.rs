//! Handlers behind the CLI subcommands.

use crate::error::TallyError;
use crate::exit::TallyExit;
use crate::stats::StatsOptions;
use crate::{aggregate, report, stats, summarize, summary, taxonomy};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Runs the full aggregation and emits both artifacts.
///
/// The only fatal input error is an absent `summary.csv` (exit code 2,
/// diagnosed before anything is written); per-file problems degrade to
/// empty findings and the run still succeeds.
///
/// # Errors
/// Returns error if an artifact cannot be written.
pub fn handle_report(
    outdir: &Path,
    emit_md: Option<PathBuf>,
    emit_csv: Option<PathBuf>,
    pmap: Option<&Path>,
    top: usize,
) -> Result<TallyExit> {
    let summary_path = outdir.join("summary.csv");
    let rows = match summary::read(&summary_path) {
        Ok(rows) => rows,
        Err(e @ TallyError::MissingSummary(_)) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(TallyExit::MissingInput);
        }
        Err(e) => return Err(e.into()),
    };

    let taxonomy = taxonomy::load(pmap);
    let (records, agg) = aggregate::run(outdir, &rows, &taxonomy);

    let csv_path = emit_csv.unwrap_or_else(|| outdir.join("findings.csv"));
    let md_path = emit_md.unwrap_or_else(|| outdir.join("report.md"));
    report::write_csv(&csv_path, &records, !taxonomy.is_empty())?;
    report::write_markdown(&md_path, &agg, &records, &taxonomy, top)?;

    println!("{} Wrote Markdown -> {}", "[OK]".green(), md_path.display());
    println!("{} Wrote CSV      -> {}", "[OK]".green(), csv_path.display());
    println!(
        "HitRates: mythril={} slither={} any={}",
        report::percent(agg.mythril_rate()),
        report::percent(agg.slither_rate()),
        report::percent(agg.any_tool_rate())
    );
    if !taxonomy.is_empty() {
        println!(
            "{} Taxonomy mapping enabled: {} categories",
            "[OK]".green(),
            taxonomy.len()
        );
    }
    Ok(TallyExit::Success)
}

/// Builds `summary.csv` from a directory of raw tool outputs.
///
/// # Errors
/// Returns error if the table cannot be written.
pub fn handle_summarize(outdir: &Path) -> Result<TallyExit> {
    let rows = summarize::scan(outdir);
    let path = summarize::write(outdir, &rows)?;
    println!(
        "{} Wrote {} ({} files)",
        "[OK]".green(),
        path.display(),
        rows.len()
    );
    Ok(TallyExit::Success)
}

/// Prints quick statistics over a summary table.
///
/// # Errors
/// Returns error if the table is missing or an emission fails.
pub fn handle_stats(csv: &Path, opts: &StatsOptions) -> Result<TallyExit> {
    match stats::run(csv, opts) {
        Ok(()) => Ok(TallyExit::Success),
        Err(e @ TallyError::MissingSummary(_)) => {
            eprintln!("{} {e}", "Error:".red());
            Ok(TallyExit::MissingInput)
        }
        Err(e) => Err(e.into()),
    }
}
