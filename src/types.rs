// src/types.rs
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Normalized Mythril output for a single file.
///
/// `count` is the length of the tool's issue list; `swc_ids` and `titles`
/// are deduplicated within the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MythrilFindings {
    pub count: u64,
    pub swc_ids: BTreeSet<String>,
    pub titles: BTreeSet<String>,
}

/// Normalized Slither output for a single file.
///
/// `count` is the number of detector-field occurrences seen during the
/// recursive walk, which can exceed `detectors.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlitherFindings {
    pub count: u64,
    pub detectors: BTreeSet<String>,
}

/// Identifiers that triggered one taxonomy category within one file,
/// split by the tool that supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryMatch {
    pub swcs: BTreeSet<String>,
    pub detectors: BTreeSet<String>,
}

/// One file's aggregated record: raw counts from the driving table,
/// normalized identifier sets, and (when a taxonomy is loaded) the
/// triggered categories with match detail.
///
/// Immutable once built; constructed fresh per aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub file: String,
    pub slither_issues: u64,
    pub mythril_issues: u64,
    pub mythril_swcs: BTreeSet<String>,
    pub mythril_titles: BTreeSet<String>,
    pub slither_detectors: BTreeSet<String>,
    pub category_hits: BTreeSet<String>,
    pub category_detail: BTreeMap<String, CategoryMatch>,
}

impl FileRecord {
    /// Flattened column names, matching the CSV/Markdown artifacts.
    /// Taxonomy columns are present only when a mapping was supplied.
    #[must_use]
    pub fn columns(with_taxonomy: bool) -> Vec<&'static str> {
        let mut cols = vec![
            "file",
            "slither_issues",
            "mythril_issues",
            "mythril_swcs",
            "mythril_titles",
            "slither_detectors",
        ];
        if with_taxonomy {
            cols.push("category_hits");
            cols.push("category_detail");
        }
        cols
    }

    /// Renders one flattened cell by column name. Set-valued columns are
    /// semicolon-joined in sorted order; unknown columns render empty.
    #[must_use]
    pub fn cell(&self, column: &str) -> String {
        match column {
            "file" => self.file.clone(),
            "slither_issues" => self.slither_issues.to_string(),
            "mythril_issues" => self.mythril_issues.to_string(),
            "mythril_swcs" => join_set(&self.mythril_swcs),
            "mythril_titles" => join_set(&self.mythril_titles),
            "slither_detectors" => join_set(&self.slither_detectors),
            "category_hits" => join_set(&self.category_hits),
            "category_detail" => self.detail_string(),
            _ => String::new(),
        }
    }

    /// Human-readable match detail, one segment per triggered category:
    /// `P1(SWC=SWC-107,Det=reentrancy-eth|reentrancy-no-eth);P5(...)`.
    #[must_use]
    pub fn detail_string(&self) -> String {
        let mut pretty = Vec::new();
        for (key, detail) in &self.category_detail {
            let mut parts = Vec::new();
            if !detail.swcs.is_empty() {
                parts.push(format!("SWC={}", join_with(&detail.swcs, "|")));
            }
            if !detail.detectors.is_empty() {
                parts.push(format!("Det={}", join_with(&detail.detectors, "|")));
            }
            pretty.push(format!("{key}({})", parts.join(",")));
        }
        pretty.join(";")
    }
}

/// Corpus-wide aggregate: hit counts, per-category file counts, and ranked
/// frequency tables.
///
/// Frequency tables count files (each identifier once per file), ranked by
/// descending count with ties broken lexically.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    pub total_files: usize,
    pub mythril_any: usize,
    pub slither_any: usize,
    pub any_tool: usize,
    pub swc_freq: Vec<(String, u64)>,
    pub detector_freq: Vec<(String, u64)>,
    pub category_freq: Vec<(String, u64)>,
    pub category_files: BTreeMap<String, usize>,
}

impl AggregateReport {
    #[allow(clippy::cast_precision_loss)]
    fn rate(&self, numerator: usize) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            numerator as f64 / self.total_files as f64
        }
    }

    /// Fraction of files with at least one Mythril issue.
    #[must_use]
    pub fn mythril_rate(&self) -> f64 {
        self.rate(self.mythril_any)
    }

    /// Fraction of files with at least one Slither issue.
    #[must_use]
    pub fn slither_rate(&self) -> f64 {
        self.rate(self.slither_any)
    }

    /// Fraction of files with at least one issue from either tool.
    #[must_use]
    pub fn any_tool_rate(&self) -> f64 {
        self.rate(self.any_tool)
    }

    /// Fraction of files whose triggered-category set contains `key`.
    /// Each file counts at most once per category.
    #[must_use]
    pub fn category_rate(&self, key: &str) -> f64 {
        self.rate(self.category_files.get(key).copied().unwrap_or(0))
    }
}

fn join_set(set: &BTreeSet<String>) -> String {
    join_with(set, ";")
}

fn join_with(set: &BTreeSet<String>, sep: &str) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(sep)
}
