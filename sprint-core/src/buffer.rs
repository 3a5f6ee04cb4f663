//! Persisted, ordered buffer of captured entries.
//!
//! The buffer is a JSON array of [`BufferEntry`] records. Order is
//! meaningful: the most recently added or replaced entry is last.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{BufferEntry, EntrySource};

#[derive(Debug, Clone)]
pub struct EntryBuffer {
    path: PathBuf,
    entries: Vec<BufferEntry>,
}

impl EntryBuffer {
    /// An empty buffer backed by `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the buffer stored at `path`. A missing file is an empty buffer.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No buffer at {}, starting empty", path.display());
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let entries: Vec<BufferEntry> =
            serde_json::from_str(&content).map_err(|e| Error::parse(&path, e))?;

        tracing::debug!("Loaded {} buffer entries from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// Write the buffer to its file, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(|e| Error::encode(&self.path, e))?;
        fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))?;

        tracing::debug!("Saved {} buffer entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[BufferEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&BufferEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Insert or replace the entry for `label`. The entry moves to the end.
    pub fn add(&mut self, label: impl Into<String>, content: impl Into<String>, source: EntrySource) {
        let label = label.into();
        self.entries.retain(|e| e.label != label);
        self.entries.push(BufferEntry {
            label,
            content: content.into(),
            source,
            captured_at: Some(Utc::now()),
        });
    }

    /// Remove the entry for `label`. Absent labels are ignored; callers that
    /// need to report "not found" check [`contains`](Self::contains) first.
    pub fn remove(&mut self, label: &str) {
        self.entries.retain(|e| e.label != label);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rename an entry without changing its content or position.
    ///
    /// If another entry already uses `new_label`, that entry is dropped so
    /// labels stay unique.
    pub fn relabel(&mut self, old_label: &str, new_label: impl Into<String>) -> Result<()> {
        let new_label = new_label.into();
        if !self.contains(old_label) {
            return Err(Error::NotFound(format!(
                "Label '{}' not found in buffer.",
                old_label
            )));
        }
        if old_label == new_label {
            return Ok(());
        }

        self.entries.retain(|e| e.label != new_label);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.label == old_label) {
            entry.label = new_label;
        }
        Ok(())
    }

    /// Replace the content of an existing entry in place.
    pub fn set_content(&mut self, label: &str, content: impl Into<String>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.label == label)
            .ok_or_else(|| Error::NotFound(format!("Label '{}' not found in buffer.", label)))?;
        entry.content = content.into();
        Ok(())
    }
}
