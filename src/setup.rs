//! Registering a destination URL under a sprint and declaring which labels
//! route where.
//!
//! Mappings are typed as comma-separated `name=value` pairs:
//! - spreadsheets, once per sheet: `port_scan=B4, ffuf_output=C2`
//! - documents, against the numbered heading list: `exec_summary=1, solutions=3`

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use sprint_core::models::{Capture, DestinationDoc, DestinationKind};
use sprint_core::{AssessmentConfig, DocumentAdapter};

use crate::google;

/// Interactive questions asked while registering a destination.
pub trait Prompter {
    /// Ask for a line of text. An empty answer yields `default`.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Show an informational line.
    fn note(&self, message: &str);
}

/// [`Prompter`] on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .show_default(!default.is_empty())
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn note(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// A label mapping that could not be used, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Parse `name=CELL` pairs for one sheet.
pub fn parse_sheet_mappings(
    raw: &str,
    spreadsheet_id: &str,
    sheet_name: &str,
) -> (Vec<(String, Capture)>, Vec<Skipped>) {
    let mut mappings = Vec::new();
    let mut skipped = Vec::new();

    for (name, cell) in pairs(raw) {
        match Capture::spreadsheet(spreadsheet_id, sheet_name, cell) {
            Ok(capture) => mappings.push((name.to_string(), capture)),
            Err(e) => skipped.push(Skipped {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
    (mappings, skipped)
}

/// Parse `name=NUMBER` pairs, where NUMBER is a 1-based index into `headings`.
pub fn parse_heading_mappings(
    raw: &str,
    document_id: &str,
    headings: &[String],
) -> (Vec<(String, Capture)>, Vec<Skipped>) {
    let mut mappings = Vec::new();
    let mut skipped = Vec::new();

    for (name, number) in pairs(raw) {
        let heading = number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| headings.get(i));

        match heading.map(|h| Capture::document(document_id, h.as_str())) {
            Some(Ok(capture)) => mappings.push((name.to_string(), capture)),
            Some(Err(e)) => skipped.push(Skipped {
                name: name.to_string(),
                reason: e.to_string(),
            }),
            None => skipped.push(Skipped {
                name: name.to_string(),
                reason: format!("bad index '{}'", number),
            }),
        }
    }
    (mappings, skipped)
}

/// Non-empty `name=value` pairs of a comma-separated list; parts without `=` are ignored.
fn pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(',')
        .filter_map(|part| part.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
}

/// Register the destination behind `url` in `config`.
///
/// The URL is validated before `connect` is called. When the service is
/// reachable the user labels the destination and maps capture labels onto
/// its sheets or headings; when it is not (e.g. no credentials), only a
/// label is asked for and mappings can be added later.
pub fn register_destination<F>(
    config: &mut AssessmentConfig,
    url: &str,
    chapter: u32,
    connect: F,
    prompter: &dyn Prompter,
) -> Result<DestinationDoc>
where
    F: FnOnce() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
{
    let resolved = google::resolve_url(url)?;

    let label = match connect() {
        Ok(adapter) => match resolved.kind {
            DestinationKind::Spreadsheet => {
                map_spreadsheet(config, adapter.as_ref(), &resolved.id, prompter)?
            }
            DestinationKind::Document => {
                map_document(config, adapter.as_ref(), &resolved.id, prompter)?
            }
        },
        Err(e) => {
            tracing::warn!("Document service unavailable: {}", e);
            prompter.note(&e.to_string());
            prompter.input("Label (API unavailable, enter manually)", "")?
        }
    };

    let doc = DestinationDoc {
        id: resolved.id,
        kind: resolved.kind,
        label,
        added_chapter: chapter,
    };
    config.add_doc(doc.clone());
    Ok(doc)
}

fn map_spreadsheet(
    config: &mut AssessmentConfig,
    adapter: &dyn DocumentAdapter,
    spreadsheet_id: &str,
    prompter: &dyn Prompter,
) -> Result<String> {
    let sheets = adapter.list_sheet_names(spreadsheet_id)?;
    let default_label = sheets.first().map(String::as_str).unwrap_or("Worksheet");
    let label = prompter.input("Label for this spreadsheet", default_label)?;

    prompter.note(&format!("\nSheets: {}", sheets.join(", ")));
    prompter.note("Enter captures as  name=CELL  pairs, comma-separated.");
    prompter.note("Example:  port_scan=B4, ffuf_output=C2   (or press Enter to skip)\n");

    for sheet in &sheets {
        let raw = prompter.input(&format!("  {}", sheet), "")?;
        let (mappings, skipped) = parse_sheet_mappings(&raw, spreadsheet_id, sheet);
        report_skipped(prompter, &skipped);
        for (name, capture) in mappings {
            config.add_capture(name, capture);
        }
    }
    Ok(label)
}

fn map_document(
    config: &mut AssessmentConfig,
    adapter: &dyn DocumentAdapter,
    document_id: &str,
    prompter: &dyn Prompter,
) -> Result<String> {
    let headings = adapter.list_headings(document_id)?;
    let label = prompter.input("Label for this document", "Report")?;

    prompter.note("\nHeadings found:");
    for (i, heading) in headings.iter().enumerate() {
        prompter.note(&format!("  {}. {}", i + 1, heading));
    }
    prompter.note("Enter captures as  name=NUMBER  pairs.");
    prompter.note("Example:  exec_summary=1, solutions=3   (or press Enter to skip)\n");

    let raw = prompter.input("Captures", "")?;
    let (mappings, skipped) = parse_heading_mappings(&raw, document_id, &headings);
    report_skipped(prompter, &skipped);
    for (name, capture) in mappings {
        config.add_capture(name, capture);
    }
    Ok(label)
}

fn report_skipped(prompter: &dyn Prompter, skipped: &[Skipped]) {
    for s in skipped {
        prompter.note(&format!("Skipping '{}': {}", s.name, s.reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_pairs_become_cell_captures() {
        let (mappings, skipped) =
            parse_sheet_mappings("port_scan=B4, ffuf_output = C2,junk", "sheet123", "Enumeration");
        assert!(skipped.is_empty());
        assert_eq!(
            mappings,
            vec![
                (
                    "port_scan".to_string(),
                    Capture::spreadsheet("sheet123", "Enumeration", "B4").unwrap()
                ),
                (
                    "ffuf_output".to_string(),
                    Capture::spreadsheet("sheet123", "Enumeration", "C2").unwrap()
                ),
            ]
        );
    }

    #[test]
    fn sheet_pairs_without_cell_are_skipped() {
        let (mappings, skipped) = parse_sheet_mappings("port_scan=", "sheet123", "Enumeration");
        assert!(mappings.is_empty());
        assert_eq!(skipped[0].name, "port_scan");
    }

    #[test]
    fn empty_input_maps_nothing() {
        let (mappings, skipped) = parse_sheet_mappings("", "sheet123", "Enumeration");
        assert!(mappings.is_empty() && skipped.is_empty());
    }

    #[test]
    fn heading_numbers_are_one_based() {
        let headings = vec!["Executive Summary".to_string(), "Attack Vectors".to_string()];
        let (mappings, skipped) = parse_heading_mappings("exec_summary=1, vectors=2", "doc456", &headings);
        assert!(skipped.is_empty());
        assert_eq!(mappings[0].1, Capture::document("doc456", "Executive Summary").unwrap());
        assert_eq!(mappings[1].1, Capture::document("doc456", "Attack Vectors").unwrap());
    }

    #[test]
    fn bad_heading_numbers_are_skipped() {
        let headings = vec!["Executive Summary".to_string()];
        let (mappings, skipped) =
            parse_heading_mappings("a=0, b=2, c=x, d=1", "doc456", &headings);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].0, "d");
        let names: Vec<&str> = skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(skipped[2].reason, "bad index 'x'");
    }
}
