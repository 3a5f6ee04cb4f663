//! Boundary to the remote document/spreadsheet service.
//!
//! The core never talks to a concrete service. Push and setup code work
//! against [`DocumentAdapter`]; implementations live outside this crate.
//! The paragraph helpers below hold the heading rules every implementation
//! must follow, so they are written once here.

use crate::error::Result;
use crate::models::DestinationKind;

/// Operations the core needs from a document service.
///
/// Implementations own their timeout and retry policy. Every remote
/// failure, credentials included, is reported as
/// [`Error::Adapter`](crate::Error::Adapter).
pub trait DocumentAdapter {
    /// Sheet titles of a spreadsheet, in workbook order.
    fn list_sheet_names(&self, spreadsheet_id: &str) -> Result<Vec<String>>;

    /// Overwrite `sheet_name!cell` with `value`.
    fn write_cell(&self, spreadsheet_id: &str, sheet_name: &str, cell: &str, value: &str)
        -> Result<()>;

    /// Texts of heading paragraphs, in document order.
    fn list_headings(&self, document_id: &str) -> Result<Vec<String>>;

    /// Insert `content` at the end boundary of the first heading paragraph
    /// whose text contains `heading` (case-insensitive). Fails with
    /// [`Error::HeadingNotFound`](crate::Error::HeadingNotFound) when none does.
    fn append_after_heading(&self, document_id: &str, heading: &str, content: &str) -> Result<()>;

    /// Extract the destination id and kind from a share URL. Fails with
    /// [`Error::InvalidUrl`](crate::Error::InvalidUrl) for anything that is
    /// not a document or spreadsheet URL of this service.
    fn resolve_url(&self, url: &str) -> Result<ResolvedUrl>;
}

impl<T: DocumentAdapter + ?Sized> DocumentAdapter for &T {
    fn list_sheet_names(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        (**self).list_sheet_names(spreadsheet_id)
    }

    fn write_cell(&self, spreadsheet_id: &str, sheet_name: &str, cell: &str, value: &str)
        -> Result<()> {
        (**self).write_cell(spreadsheet_id, sheet_name, cell, value)
    }

    fn list_headings(&self, document_id: &str) -> Result<Vec<String>> {
        (**self).list_headings(document_id)
    }

    fn append_after_heading(&self, document_id: &str, heading: &str, content: &str) -> Result<()> {
        (**self).append_after_heading(document_id, heading, content)
    }

    fn resolve_url(&self, url: &str) -> Result<ResolvedUrl> {
        (**self).resolve_url(url)
    }
}

/// A destination identified from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub id: String,
    pub kind: DestinationKind,
}

/// One paragraph of a structured text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph text with surrounding whitespace removed.
    pub text: String,
    /// Named style, e.g. `HEADING_1` or `NORMAL_TEXT`.
    pub style: String,
    /// Index just past the paragraph's last character, if the service reported one.
    pub end_index: Option<u64>,
}

impl Paragraph {
    pub fn is_heading(&self) -> bool {
        self.style.starts_with("HEADING")
    }
}

/// Non-empty heading texts in document order.
pub fn heading_texts(paragraphs: &[Paragraph]) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| p.is_heading() && !p.text.is_empty())
        .map(|p| p.text.clone())
        .collect()
}

/// End boundary of the first heading paragraph whose text contains
/// `heading`, ignoring case. Content inserted at this index lands directly
/// after the heading.
pub fn find_heading_end(paragraphs: &[Paragraph], heading: &str) -> Option<u64> {
    let needle = heading.to_lowercase();
    paragraphs
        .iter()
        .filter(|p| p.is_heading() && p.text.to_lowercase().contains(&needle))
        .find_map(|p| p.end_index)
}
