//! Shared fixtures for sprint-core specs.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use sprint_core::adapter::{find_heading_end, heading_texts};
use sprint_core::models::{Capture, DestinationDoc, DestinationKind};
use sprint_core::{AssessmentConfig, DocumentAdapter, Error, Paragraph, ResolvedUrl, Result};

/// A call received by [`RecordingAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    WriteCell {
        spreadsheet_id: String,
        sheet_name: String,
        cell: String,
        value: String,
    },
    Insert {
        document_id: String,
        index: u64,
        text: String,
    },
}

/// In-memory document service that records every write.
#[derive(Default)]
pub struct RecordingAdapter {
    pub calls: RefCell<Vec<Call>>,
    pub sheets: HashMap<String, Vec<String>>,
    pub documents: HashMap<String, Vec<Paragraph>>,
    pub failing: HashSet<String>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: &str, paragraphs: Vec<Paragraph>) -> Self {
        self.documents.insert(id.to_string(), paragraphs);
        self
    }

    /// Every call touching `id` fails as a remote error would.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self, id: &str) -> Result<()> {
        if self.failing.contains(id) {
            Err(Error::Adapter(format!("503 Service Unavailable for {}", id)))
        } else {
            Ok(())
        }
    }
}

impl DocumentAdapter for RecordingAdapter {
    fn list_sheet_names(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        self.check(spreadsheet_id)?;
        Ok(self.sheets.get(spreadsheet_id).cloned().unwrap_or_default())
    }

    fn write_cell(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        cell: &str,
        value: &str,
    ) -> Result<()> {
        self.check(spreadsheet_id)?;
        self.calls.borrow_mut().push(Call::WriteCell {
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
            cell: cell.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn list_headings(&self, document_id: &str) -> Result<Vec<String>> {
        self.check(document_id)?;
        Ok(self
            .documents
            .get(document_id)
            .map(|p| heading_texts(p))
            .unwrap_or_default())
    }

    fn append_after_heading(&self, document_id: &str, heading: &str, content: &str) -> Result<()> {
        self.check(document_id)?;
        let paragraphs = self.documents.get(document_id).cloned().unwrap_or_default();
        let index = find_heading_end(&paragraphs, heading).ok_or_else(|| Error::HeadingNotFound {
            document_id: document_id.to_string(),
            heading: heading.to_string(),
        })?;
        self.calls.borrow_mut().push(Call::Insert {
            document_id: document_id.to_string(),
            index,
            text: format!("\n{}", content),
        });
        Ok(())
    }

    fn resolve_url(&self, url: &str) -> Result<ResolvedUrl> {
        Err(Error::InvalidUrl(url.to_string()))
    }
}

pub fn heading(text: &str, end_index: u64) -> Paragraph {
    Paragraph {
        text: text.to_string(),
        style: "HEADING_1".to_string(),
        end_index: Some(end_index),
    }
}

pub fn body(text: &str, end_index: u64) -> Paragraph {
    Paragraph {
        text: text.to_string(),
        style: "NORMAL_TEXT".to_string(),
        end_index: Some(end_index),
    }
}

/// Sprint with one spreadsheet capture and one document capture.
pub fn sample_config(dir: &std::path::Path) -> AssessmentConfig {
    let mut config = AssessmentConfig::create("sprint-test", dir);
    config.add_doc(DestinationDoc {
        id: "sheet123".to_string(),
        kind: DestinationKind::Spreadsheet,
        label: "WS".to_string(),
        added_chapter: 1,
    });
    config.add_capture(
        "port_scan",
        Capture::spreadsheet("sheet123", "Enumeration", "B4").expect("valid capture"),
    );
    config.add_doc(DestinationDoc {
        id: "doc456".to_string(),
        kind: DestinationKind::Document,
        label: "Report".to_string(),
        added_chapter: 2,
    });
    config.add_capture(
        "exec_summary",
        Capture::document("doc456", "Executive Summary").expect("valid capture"),
    );
    config
}
