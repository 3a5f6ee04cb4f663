//! Delivery of buffer entries to their mapped destinations.
//!
//! [`push_entry`] fails fast. [`push_all`] is the only place where per-entry
//! errors are turned into recorded outcomes instead of being returned; it
//! attempts every entry and never touches the buffer.

use std::collections::BTreeMap;
use std::fmt;

use crate::adapter::DocumentAdapter;
use crate::assessment::AssessmentConfig;
use crate::buffer::EntryBuffer;
use crate::error::{Error, Result};
use crate::models::{BufferEntry, Capture};

/// Write one entry to the destination its label is mapped to.
pub fn push_entry(
    entry: &BufferEntry,
    config: &AssessmentConfig,
    adapter: &dyn DocumentAdapter,
) -> Result<()> {
    let capture = config
        .capture(&entry.label)
        .ok_or_else(|| Error::LabelNotMapped(entry.label.clone()))?;

    match capture {
        Capture::Spreadsheet {
            destination_id,
            sheet_name,
            cell,
        } => adapter.write_cell(destination_id, sheet_name, cell, &entry.content),
        Capture::Document {
            destination_id,
            heading,
        } => adapter.append_after_heading(destination_id, heading, &entry.content),
    }
}

/// Attempt every entry in buffer order and report each outcome.
pub fn push_all(
    buffer: &EntryBuffer,
    config: &AssessmentConfig,
    adapter: &dyn DocumentAdapter,
) -> PushReport {
    let mut report = PushReport::default();

    for entry in buffer.entries() {
        let outcome = match push_entry(entry, config, adapter) {
            Ok(()) => {
                tracing::info!("Pushed '{}'", entry.label);
                PushOutcome::Ok
            }
            Err(e) => {
                tracing::warn!("Failed to push '{}': {}", entry.label, e);
                PushOutcome::Failed(e.to_string())
            }
        };
        report.results.push(PushResult {
            label: entry.label.clone(),
            outcome,
        });
    }

    tracing::info!(
        "Push finished: {} ok, {} failed",
        report.ok_count(),
        report.failed_count()
    );
    report
}

/// Result of pushing a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Ok,
    Failed(String),
}

impl PushOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Failed(message) => write!(f, "error: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub label: String,
    pub outcome: PushOutcome,
}

/// Per-label outcomes of a batch push, in buffer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    pub results: Vec<PushResult>,
}

impl PushReport {
    pub fn get(&self, label: &str) -> Option<&PushOutcome> {
        self.results
            .iter()
            .find(|r| r.label == label)
            .map(|r| &r.outcome)
    }

    /// `{label: "ok" | "error: ..."}` view of the report.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.results
            .iter()
            .map(|r| (r.label.clone(), r.outcome.to_string()))
            .collect()
    }

    pub fn ok_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.ok_count()
    }

    /// True when every attempted entry was delivered. An empty report counts as success.
    pub fn all_ok(&self) -> bool {
        self.failed_count() == 0
    }
}
