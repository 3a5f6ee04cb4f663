use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured text fragment with its label.
///
/// Labels are stable identifiers: the same label always routes to the same
/// [`Capture`](crate::models::Capture) in the sprint config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferEntry {
    pub label: String,
    pub content: String,
    #[serde(default)]
    pub source: EntrySource,
    /// When the entry was last captured or replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl BufferEntry {
    /// Single-line preview of the content, cut at `width` characters.
    pub fn preview(&self, width: usize) -> String {
        let flat = self.content.replace('\n', " ");
        if flat.chars().count() > width {
            let mut cut: String = flat.chars().take(width).collect();
            cut.push('…');
            cut
        } else {
            flat
        }
    }

    /// Number of lines in the content.
    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count() + 1
    }
}

/// Where a fragment was captured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Pipe,
    Clipboard,
    #[default]
    Unknown,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::Clipboard => "clipboard",
            Self::Unknown => "unknown",
        }
    }
}
