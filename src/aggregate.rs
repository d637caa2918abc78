// src/aggregate.rs
//! Single-pass aggregation: walks the driving table in row order, extracts
//! and maps each file's tool output, and accumulates corpus-wide counters.
//!
//! Strictly sequential and single-threaded; all shared state lives in one
//! explicit accumulator owned by the pass.

use crate::extract;
use crate::summary::SummaryRow;
use crate::taxonomy::{self, Taxonomy};
use crate::types::{AggregateReport, FileRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// Corpus-wide counters, updated in place as files are processed.
///
/// Frequency maps count each identifier once per file (the per-file sets
/// are already deduplicated when they arrive here).
#[derive(Debug, Default)]
struct Accumulator {
    mythril_any: usize,
    slither_any: usize,
    any_tool: usize,
    swc_freq: BTreeMap<String, u64>,
    detector_freq: BTreeMap<String, u64>,
    category_freq: BTreeMap<String, u64>,
    category_files: BTreeMap<String, usize>,
}

impl Accumulator {
    fn into_report(self, total_files: usize) -> AggregateReport {
        AggregateReport {
            total_files,
            mythril_any: self.mythril_any,
            slither_any: self.slither_any,
            any_tool: self.any_tool,
            swc_freq: ranked(self.swc_freq),
            detector_freq: ranked(self.detector_freq),
            category_freq: ranked(self.category_freq),
            category_files: self.category_files,
        }
    }
}

/// Aggregates every file named in the driving table.
///
/// Per file, reads `<outdir>/<basename>.myth.json` and
/// `<outdir>/<basename>.slither.json`; a missing or corrupt document for
/// one file degrades to empty findings for that file only. The "any tool"
/// hit count uses the driving table's raw counts, matching the upstream
/// pipeline, while the per-tool counts use the re-extracted ones.
#[must_use]
pub fn run(
    outdir: &Path,
    rows: &[SummaryRow],
    taxonomy: &Taxonomy,
) -> (Vec<FileRecord>, AggregateReport) {
    let mut acc = Accumulator::default();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let base = basename(&row.file);
        let myth = extract::read_json(&outdir.join(format!("{base}.myth.json")));
        let slither = extract::read_json(&outdir.join(format!("{base}.slither.json")));

        let m = extract::mythril_findings(myth.as_ref());
        let s = extract::slither_findings(slither.as_ref());

        if m.count > 0 {
            acc.mythril_any += 1;
        }
        if s.count > 0 {
            acc.slither_any += 1;
        }
        if row.slither_issues > 0 || row.mythril_issues > 0 {
            acc.any_tool += 1;
        }

        for swc in &m.swc_ids {
            *acc.swc_freq.entry(swc.clone()).or_insert(0) += 1;
        }
        for det in &s.detectors {
            *acc.detector_freq.entry(det.clone()).or_insert(0) += 1;
        }

        let triggered = taxonomy::map_categories(taxonomy, &m.swc_ids, &s.detectors);
        for key in triggered.keys() {
            *acc.category_freq.entry(key.clone()).or_insert(0) += 1;
            *acc.category_files.entry(key.clone()).or_insert(0) += 1;
        }

        records.push(FileRecord {
            file: base,
            slither_issues: row.slither_issues,
            mythril_issues: row.mythril_issues,
            mythril_swcs: m.swc_ids,
            mythril_titles: m.titles,
            slither_detectors: s.detectors,
            category_hits: triggered.keys().cloned().collect(),
            category_detail: triggered,
        });
    }

    let report = acc.into_report(rows.len());
    (records, report)
}

/// Ranks a frequency map by descending count. The map iterates in lexical
/// key order and the sort is stable, so ties break lexically. That is the
/// deterministic secondary key for Top-N tables.
fn ranked(freq: BTreeMap<String, u64>) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = freq.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

fn basename(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map_or_else(|| file.to_string(), |n| n.to_string_lossy().into_owned())
}
