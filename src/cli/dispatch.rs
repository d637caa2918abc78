//! Command dispatch logic extracted from the binary to keep main small.

use super::args::Commands;
use super::handlers::{handle_report, handle_stats, handle_summarize};
use crate::exit::TallyExit;
use crate::stats::StatsOptions;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<TallyExit> {
    match command {
        Commands::Report {
            outdir,
            emit_md,
            emit_csv,
            pmap,
            top,
        } => handle_report(&outdir, emit_md, emit_csv, pmap.as_deref(), top),

        Commands::Summarize { outdir } => handle_summarize(&outdir),

        Commands::Stats {
            csv,
            top,
            by,
            filter,
            ge,
            emit_md,
            emit_list,
        } => handle_stats(
            &csv,
            &StatsOptions {
                top,
                by,
                filter,
                ge,
                emit_md,
                emit_list,
            },
        ),
    }
}
