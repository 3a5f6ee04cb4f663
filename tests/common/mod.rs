//! Shared fixtures for sprint-hub specs.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use sprint_core::models::{Capture, DestinationDoc, DestinationKind, EntrySource};
use sprint_core::{DocumentAdapter, Error, ResolvedUrl, Result, Workspace};
use sprint_hub::setup::Prompter;

/// In-memory document service. Clones share the same write log, so a test
/// can keep one handle while the code under test owns another.
#[derive(Clone, Default)]
pub struct FakeDocs {
    pub writes: Rc<RefCell<Vec<String>>>,
    pub sheets: HashMap<String, Vec<String>>,
    pub headings: HashMap<String, Vec<String>>,
    pub failing: HashSet<String>,
}

impl FakeDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, id: &str, sheets: &[&str]) -> Self {
        self.sheets
            .insert(id.to_string(), sheets.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_headings(mut self, id: &str, headings: &[&str]) -> Self {
        self.headings
            .insert(id.to_string(), headings.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    /// Boxed clone, in the shape the command handlers connect with.
    pub fn connect(&self) -> impl FnOnce() -> Result<Box<dyn DocumentAdapter>> + '_ {
        move || Ok(Box::new(self.clone()) as Box<dyn DocumentAdapter>)
    }

    fn check(&self, id: &str) -> Result<()> {
        if self.failing.contains(id) {
            Err(Error::Adapter(format!("HTTP 500 for {}", id)))
        } else {
            Ok(())
        }
    }
}

impl DocumentAdapter for FakeDocs {
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
        self.writes
            .borrow_mut()
            .push(format!("{}:{}!{}={}", spreadsheet_id, sheet_name, cell, value));
        Ok(())
    }

    fn list_headings(&self, document_id: &str) -> Result<Vec<String>> {
        self.check(document_id)?;
        Ok(self.headings.get(document_id).cloned().unwrap_or_default())
    }

    fn append_after_heading(&self, document_id: &str, heading: &str, content: &str) -> Result<()> {
        self.check(document_id)?;
        self.writes
            .borrow_mut()
            .push(format!("{}:§{}={}", document_id, heading, content));
        Ok(())
    }

    fn resolve_url(&self, url: &str) -> Result<ResolvedUrl> {
        sprint_hub::google::resolve_url(url)
    }
}

/// A connect function that always fails, as when no token is configured.
pub fn offline() -> Result<Box<dyn DocumentAdapter>> {
    Err(Error::Adapter("No access token configured".to_string()))
}

/// [`Prompter`] answering from a script, in order. Missing answers take
/// the default.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub prompts: RefCell<Vec<String>>,
    pub notes: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str) -> anyhow::Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let answer = self.answers.borrow_mut().pop_front().unwrap_or_default();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn note(&self, message: &str) {
        self.notes.borrow_mut().push(message.to_string());
    }
}

pub const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/sheet123/edit#gid=0";
pub const DOC_URL: &str = "https://docs.google.com/document/d/doc456/edit";

/// Active sprint `sprint-test` with one cell and one heading capture.
pub fn active_sprint(workspace: &Workspace) {
    let mut config = workspace
        .create_assessment("sprint-test")
        .expect("Failed to create sprint");
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
    config.save().expect("Failed to save sprint");
    workspace.set_active("sprint-test").expect("Failed to activate sprint");
}

pub fn captured(workspace: &Workspace, label: &str, content: &str) {
    sprint_hub::commands::capture(workspace, content, EntrySource::Pipe, label)
        .expect("Failed to capture");
}

pub fn labels(workspace: &Workspace) -> Vec<String> {
    let (_, buffer) = sprint_hub::commands::list(workspace).expect("Failed to list");
    buffer.entries().iter().map(|e| e.label.clone()).collect()
}
