// src/taxonomy.rs
//! Taxonomy mapping: user-supplied rules that fold tool-native identifiers
//! into curated vulnerability categories.
//!
//! Mapping is an optional enhancement. A missing path, missing file, or
//! unparsable file all degrade to an empty rule set with a warning; nothing
//! here is ever fatal. When the crate is built without the `taxonomy`
//! feature (no YAML parser available), the loader is a uniform no-op and
//! every mapping-dependent path takes the "no taxonomy" branch.

use crate::types::CategoryMatch;
use colored::Colorize;
#[cfg(feature = "taxonomy")]
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One taxonomy category: a display name, the exact Mythril SWC ids it
/// accepts, and the Slither detector-name prefixes it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyRule {
    pub name: String,
    pub swc_ids: BTreeSet<String>,
    pub detector_prefixes: BTreeSet<String>,
}

/// Rules keyed by category (e.g. `P1`), in lexical key order.
pub type Taxonomy = BTreeMap<String, TaxonomyRule>;

/// On-disk rule shape:
///
/// ```yaml
/// P1:
///   name: Reentrancy
///   mythril_swc: [SWC-107]
///   slither: [reentrancy]
/// ```
#[cfg(feature = "taxonomy")]
#[derive(Debug, Deserialize)]
struct RawRule {
    name: Option<String>,
    mythril_swc: Option<Vec<String>>,
    slither: Option<Vec<String>>,
}

/// Loads taxonomy rules from a YAML mapping file.
///
/// `None` disables mapping silently; any load failure disables it with a
/// `WARN` on stderr. Entries that are not mappings are skipped.
#[cfg(feature = "taxonomy")]
#[must_use]
pub fn load(path: Option<&Path>) -> Taxonomy {
    let Some(path) = path else {
        return Taxonomy::new();
    };
    if !path.exists() {
        warn(&format!("mapping file not found: {}", path.display()));
        return Taxonomy::new();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn(&format!("cannot read {}: {e}", path.display()));
            return Taxonomy::new();
        }
    };
    let doc: BTreeMap<String, serde_yaml::Value> = match serde_yaml::from_str(&content) {
        Ok(d) => d,
        Err(e) => {
            warn(&format!("cannot parse {}: {e}", path.display()));
            return Taxonomy::new();
        }
    };

    let mut rules = Taxonomy::new();
    for (key, value) in doc {
        // Best-effort per entry, as the upstream loader skips non-mappings.
        let Ok(raw) = serde_yaml::from_value::<RawRule>(value) else {
            continue;
        };
        rules.insert(
            key.clone(),
            TaxonomyRule {
                name: raw.name.unwrap_or(key),
                swc_ids: trimmed_set(raw.mythril_swc),
                detector_prefixes: trimmed_set(raw.slither),
            },
        );
    }
    rules
}

/// Stub loader for builds without the YAML parser: mapping is simply
/// unavailable, and the caller sees the same empty taxonomy as for a
/// missing file.
#[cfg(not(feature = "taxonomy"))]
#[must_use]
pub fn load(path: Option<&Path>) -> Taxonomy {
    if path.is_some() {
        warn("built without the `taxonomy` feature; mapping disabled");
    }
    Taxonomy::new()
}

#[cfg(feature = "taxonomy")]
fn trimmed_set(items: Option<Vec<String>>) -> BTreeSet<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn warn(msg: &str) {
    eprintln!("{} {msg}", "WARN:".yellow());
}

/// Maps one file's normalized identifier sets onto the taxonomy.
///
/// Tool A (Mythril SWC ids) matches exactly; tool B (Slither detectors)
/// matches when an identifier equals or starts with a configured prefix.
/// A rule with no configured identifiers for a tool cannot trigger via
/// that tool. Returns the triggered categories with their match detail.
#[must_use]
pub fn map_categories(
    taxonomy: &Taxonomy,
    swc_ids: &BTreeSet<String>,
    detectors: &BTreeSet<String>,
) -> BTreeMap<String, CategoryMatch> {
    let mut triggered = BTreeMap::new();
    for (key, rule) in taxonomy {
        let swc_hits: BTreeSet<String> = rule.swc_ids.intersection(swc_ids).cloned().collect();

        let mut det_hits = BTreeSet::new();
        for prefix in &rule.detector_prefixes {
            for d in detectors {
                if d == prefix || d.starts_with(prefix.as_str()) {
                    det_hits.insert(d.clone());
                }
            }
        }

        if !swc_hits.is_empty() || !det_hits.is_empty() {
            triggered.insert(
                key.clone(),
                CategoryMatch {
                    swcs: swc_hits,
                    detectors: det_hits,
                },
            );
        }
    }
    triggered
}
