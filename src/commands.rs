//! Command handlers shared by the CLI and the dashboard.
//!
//! Handlers load what they need from the [`Workspace`], apply one core
//! operation, persist the result and return something printable. Terminal
//! interaction stays in the caller.

use anyhow::{bail, Result};
use sprint_core::models::{Capture, DestinationDoc, EntrySource};
use sprint_core::{AssessmentConfig, DocumentAdapter, EntryBuffer, Error, PushReport, Workspace};

use crate::setup::{self, Prompter};

/// Create a sprint, optionally register its first destination, and make it active.
pub fn init<F>(
    workspace: &Workspace,
    name: &str,
    url: Option<&str>,
    connect: F,
    prompter: &dyn Prompter,
) -> Result<AssessmentConfig>
where
    F: FnOnce() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
{
    let mut config = workspace.create_assessment(name)?;
    if let Some(url) = url {
        setup::register_destination(&mut config, url, 1, connect, prompter)?;
    }
    config.save()?;
    workspace.set_active(name)?;
    Ok(config)
}

/// Register another destination under the active sprint. Without an
/// explicit chapter the destination goes after the latest one.
pub fn add_destination<F>(
    workspace: &Workspace,
    url: &str,
    chapter: Option<u32>,
    connect: F,
    prompter: &dyn Prompter,
) -> Result<(String, DestinationDoc)>
where
    F: FnOnce() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
{
    let active = workspace.require_active()?;
    let mut config = workspace.load_assessment(&active)?;
    let chapter = chapter.unwrap_or_else(|| config.next_chapter());

    let doc = setup::register_destination(&mut config, url, chapter, connect, prompter)?;
    config.save()?;
    Ok((active, doc))
}

/// Declare or replace the routing of `label` in the active sprint.
pub fn map_capture(workspace: &Workspace, label: &str, capture: Capture) -> Result<String> {
    let active = workspace.require_active()?;
    let mut config = workspace.load_assessment(&active)?;
    if config.doc(capture.destination_id()).is_none() {
        tracing::warn!(
            "Destination {} is not registered in sprint '{}'",
            capture.destination_id(),
            active
        );
    }
    config.add_capture(label, capture);
    config.save()?;
    Ok(active)
}

/// Suggested label for captured text, using the active sprint's headings
/// when it can be loaded.
pub fn suggest_label(workspace: &Workspace, content: &str, command: Option<&str>) -> String {
    let headings = workspace
        .get_active()
        .ok()
        .flatten()
        .and_then(|name| workspace.load_assessment(&name).ok())
        .map(|config| config.known_headings())
        .unwrap_or_default();
    sprint_core::suggest(content, command, &headings)
}

/// Outcome of a capture, for the confirmation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub label: String,
    pub lines: usize,
    pub replaced: bool,
}

/// Store `content` under `label` in the active sprint's buffer.
pub fn capture(
    workspace: &Workspace,
    content: &str,
    source: EntrySource,
    label: &str,
) -> Result<Captured> {
    if content.trim().is_empty() {
        bail!("No input. Pipe something or use --from-clipboard.");
    }
    if label.trim().is_empty() {
        bail!("Label must not be empty.");
    }

    let mut buffer = active_buffer(workspace)?;
    let replaced = buffer.contains(label);
    buffer.add(label, content, source);
    buffer.save()?;

    let entry = buffer.get(label).ok_or_else(|| not_found(label))?;
    Ok(Captured {
        label: label.to_string(),
        lines: entry.line_count(),
        replaced,
    })
}

pub fn remove(workspace: &Workspace, label: &str) -> Result<()> {
    let mut buffer = active_buffer(workspace)?;
    if !buffer.contains(label) {
        return Err(not_found(label).into());
    }
    buffer.remove(label);
    buffer.save()?;
    Ok(())
}

/// Rename an entry in place; its position in the buffer does not change.
pub fn relabel(workspace: &Workspace, old_label: &str, new_label: &str) -> Result<()> {
    if new_label.trim().is_empty() {
        bail!("Label must not be empty.");
    }
    let mut buffer = active_buffer(workspace)?;
    buffer.relabel(old_label, new_label)?;
    buffer.save()?;
    Ok(())
}

pub fn entry_content(workspace: &Workspace, label: &str) -> Result<String> {
    let buffer = active_buffer(workspace)?;
    let entry = buffer.get(label).ok_or_else(|| not_found(label))?;
    Ok(entry.content.clone())
}

pub fn update_content(workspace: &Workspace, label: &str, content: &str) -> Result<()> {
    let mut buffer = active_buffer(workspace)?;
    buffer.set_content(label, content)?;
    buffer.save()?;
    Ok(())
}

/// The active sprint name and its buffer.
pub fn list(workspace: &Workspace) -> Result<(String, EntryBuffer)> {
    let active = workspace.require_active()?;
    let buffer = workspace.load_buffer(&active)?;
    Ok((active, buffer))
}

/// Push every entry of the active sprint. The buffer is cleared only when
/// every entry was delivered; otherwise it is left as is for a retry.
pub fn push(workspace: &Workspace, adapter: &dyn DocumentAdapter) -> Result<PushReport> {
    let active = workspace.require_active()?;
    let config = workspace.load_assessment(&active)?;
    let mut buffer = workspace.load_buffer(&active)?;

    let report = sprint_core::push_all(&buffer, &config, adapter);
    if report.all_ok() && !buffer.is_empty() {
        buffer.clear();
        buffer.save()?;
        tracing::info!("Cleared buffer of sprint '{}'", active);
    }
    Ok(report)
}

fn active_buffer(workspace: &Workspace) -> Result<EntryBuffer> {
    let active = workspace.require_active()?;
    Ok(workspace.load_buffer(&active)?)
}

fn not_found(label: &str) -> Error {
    Error::NotFound(format!("Label '{}' not found in buffer.", label))
}
