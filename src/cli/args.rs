use crate::stats::Tool;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vulntally",
    version,
    about = "Aggregates Mythril/Slither findings over a contract corpus into CSV and Markdown reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate per-file tool outputs and emit the CSV + Markdown report
    Report {
        /// Directory holding summary.csv and the per-file tool outputs
        outdir: PathBuf,
        /// Markdown report path (default: <OUTDIR>/report.md)
        #[arg(long, value_name = "FILE")]
        emit_md: Option<PathBuf>,
        /// Findings CSV path (default: <OUTDIR>/findings.csv)
        #[arg(long, value_name = "FILE")]
        emit_csv: Option<PathBuf>,
        /// Taxonomy mapping YAML (category -> accepted identifiers)
        #[arg(long, value_name = "FILE")]
        pmap: Option<PathBuf>,
        /// Entries per Top-N frequency table
        #[arg(long, default_value = "15")]
        top: usize,
    },
    /// Build summary.csv from a directory of raw tool outputs
    Summarize {
        /// Directory holding *.slither.json / *.myth.json artifacts
        outdir: PathBuf,
    },
    /// Quick statistics over a summary table
    Stats {
        /// Path to summary.csv
        csv: PathBuf,
        #[arg(long, default_value = "10")]
        top: usize,
        /// Rank files by this tool's count
        #[arg(long, value_enum, default_value_t = Tool::Slither)]
        by: Tool,
        /// Only show files where this tool's count passes --ge
        #[arg(long, value_enum, requires = "ge")]
        filter: Option<Tool>,
        /// Threshold for --filter
        #[arg(long, requires = "filter")]
        ge: Option<u64>,
        /// Write the filtered table as Markdown
        #[arg(long, value_name = "FILE")]
        emit_md: Option<PathBuf>,
        /// Write the Top-N file names, one per line
        #[arg(long, value_name = "FILE")]
        emit_list: Option<PathBuf>,
    },
}
