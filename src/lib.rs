//! Core library for `vulntally`.
//!
//! Consumes raw Mythril and Slither output for a corpus of contract files,
//! normalizes both schemas into one finding model, optionally maps findings
//! onto a user-supplied vulnerability taxonomy, and renders the aggregate as
//! CSV and Markdown reports. No detection happens here; the analysis tools
//! are upstream black boxes.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod exit;
pub mod extract;
pub mod report;
pub mod stats;
pub mod summarize;
pub mod summary;
pub mod taxonomy;
pub mod types;
