// src/extract.rs
//! Normalizes raw tool output into per-file finding sets.
//!
//! Two independent strategies: Mythril emits a flat `issues` list with a
//! taxonomy code per issue, Slither buries detector names at arbitrary
//! depth, so its extractor is a full recursive walk of the JSON tree.
//! A missing or unparsable document is "no findings", never an error.

use crate::types::{MythrilFindings, SlitherFindings};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads and parses a tool-output document. Any failure (missing file,
/// bad UTF-8, malformed JSON) yields `None`.
#[must_use]
pub fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Extracts findings from a Mythril document (issue-list schema).
///
/// The count is the length of the `issues` array; every non-empty `swc-id`
/// and `title` is collected, trimmed and deduplicated.
#[must_use]
pub fn mythril_findings(doc: Option<&Value>) -> MythrilFindings {
    let mut out = MythrilFindings::default();
    let Some(Value::Object(map)) = doc else {
        return out;
    };
    let Some(Value::Array(issues)) = map.get("issues") else {
        return out;
    };

    out.count = issues.len() as u64;
    for issue in issues {
        if let Some(swc) = issue.get("swc-id").and_then(Value::as_str) {
            if !swc.trim().is_empty() {
                out.swc_ids.insert(swc.trim().to_string());
            }
        }
        if let Some(title) = issue.get("title").and_then(Value::as_str) {
            if !title.trim().is_empty() {
                out.titles.insert(title.trim().to_string());
            }
        }
    }
    out
}

/// Extracts findings from a Slither document (nested detector schema).
///
/// Walks the entire tree; every object exposing a string `check` field, and
/// every `description` sub-object carrying one, records the detector and
/// bumps the occurrence count. A finding represented in both places counts
/// more than once; that quirk is kept for compatibility with the upstream
/// pipeline.
#[must_use]
pub fn slither_findings(doc: Option<&Value>) -> SlitherFindings {
    let mut out = SlitherFindings::default();
    if let Some(value) = doc {
        collect_checks(value, &mut out);
    }
    out
}

fn collect_checks(value: &Value, acc: &mut SlitherFindings) {
    match value {
        Value::Object(map) => {
            if let Some(check) = map.get("check").and_then(Value::as_str) {
                acc.detectors.insert(check.trim().to_string());
                acc.count += 1;
            }
            if let Some(Value::Object(desc)) = map.get("description") {
                if let Some(check) = desc.get("check").and_then(Value::as_str) {
                    acc.detectors.insert(check.trim().to_string());
                    acc.count += 1;
                }
            }
            for v in map.values() {
                collect_checks(v, acc);
            }
        }
        Value::Array(items) => {
            for v in items {
                collect_checks(v, acc);
            }
        }
        _ => {}
    }
}
