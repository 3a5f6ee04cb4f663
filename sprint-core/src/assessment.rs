//! Per-sprint registry of destinations and label routing.
//!
//! Stored as `<config_dir>/<sprint>.yaml`:
//!
//! ```yaml
//! sprint: sprint-11
//! docs:
//!   - id: 1BxiMVs0XRA5nFMdK
//!     type: sheet
//!     label: Worksheet
//!     added_chapter: 1
//! captures:
//!   port_scan:
//!     destination_id: 1BxiMVs0XRA5nFMdK
//!     type: sheet
//!     sheet_name: Enumeration
//!     cell: B4
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Capture, DestinationDoc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(rename = "sprint")]
    pub name: String,
    #[serde(default)]
    pub docs: Vec<DestinationDoc>,
    #[serde(default)]
    pub captures: BTreeMap<String, Capture>,
    #[serde(skip)]
    config_dir: PathBuf,
}

impl AssessmentConfig {
    /// A new, empty config. Nothing is written until [`save`](Self::save).
    pub fn create(name: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            captures: BTreeMap::new(),
            config_dir: config_dir.into(),
        }
    }

    pub fn load(name: &str, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let path = Self::file_path(&config_dir, name);
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "Sprint '{}' has no config at {}",
                name,
                path.display()
            )));
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| Error::parse(&path, e))?;
        if config.name != name {
            tracing::warn!(
                "{} declares sprint '{}'; using '{}' from the file name",
                path.display(),
                config.name,
                name
            );
            config.name = name.to_string();
        }
        config.config_dir = config_dir;

        tracing::debug!(
            "Loaded sprint '{}' ({} docs, {} captures)",
            config.name,
            config.docs.len(),
            config.captures.len()
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).map_err(|e| Error::io(&self.config_dir, e))?;
        let path = self.path();
        let content = serde_yaml::to_string(self).map_err(|e| Error::encode(&path, e))?;
        fs::write(&path, content).map_err(|e| Error::io(&path, e))?;

        tracing::debug!("Saved sprint '{}' to {}", self.name, path.display());
        Ok(())
    }

    pub(crate) fn file_path(config_dir: &Path, name: &str) -> PathBuf {
        config_dir.join(format!("{}.yaml", name))
    }

    pub fn path(&self) -> PathBuf {
        Self::file_path(&self.config_dir, &self.name)
    }

    /// Register a destination. A doc whose id is already registered is left untouched.
    pub fn add_doc(&mut self, doc: DestinationDoc) {
        if self.docs.iter().any(|d| d.id == doc.id) {
            tracing::debug!("Destination {} already registered", doc.id);
            return;
        }
        self.docs.push(doc);
    }

    /// Map `label` to `capture`, replacing any previous mapping.
    pub fn add_capture(&mut self, label: impl Into<String>, capture: Capture) {
        self.captures.insert(label.into(), capture);
    }

    pub fn capture(&self, label: &str) -> Option<&Capture> {
        self.captures.get(label)
    }

    pub fn doc(&self, id: &str) -> Option<&DestinationDoc> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Chapter number for the next registered destination.
    pub fn next_chapter(&self) -> u32 {
        self.docs.iter().map(|d| d.added_chapter).max().unwrap_or(0) + 1
    }

    /// Heading texts of document captures followed by every capture label,
    /// without duplicates. Used as hints for label suggestion.
    pub fn known_headings(&self) -> Vec<String> {
        let mut headings: Vec<String> = Vec::new();
        let doc_headings = self.captures.values().filter_map(|c| match c {
            Capture::Document { heading, .. } => Some(heading.clone()),
            Capture::Spreadsheet { .. } => None,
        });

        for heading in doc_headings.chain(self.captures.keys().cloned()) {
            if !headings.contains(&heading) {
                headings.push(heading);
            }
        }
        headings
    }
}
