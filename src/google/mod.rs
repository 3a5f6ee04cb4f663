//! Google Sheets / Docs implementation of [`DocumentAdapter`].

mod client;
mod token;
mod types;

pub use client::{GoogleClient, GoogleError};
pub use types::*;

use sprint_core::adapter::{find_heading_end, heading_texts};
use sprint_core::models::DestinationKind;
use sprint_core::{DocumentAdapter, Error, ResolvedUrl, Result};
use url::Url;

use crate::settings::Settings;

const GOOGLE_DOCS_HOST: &str = "docs.google.com";

pub struct GoogleAdapter {
    client: GoogleClient,
}

impl GoogleAdapter {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Build the adapter from settings. Fails with an adapter error when no
    /// credentials are available.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(GoogleClient::from_settings(settings)?))
    }
}

impl DocumentAdapter for GoogleAdapter {
    fn list_sheet_names(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        Ok(self.client.get_sheet_titles(spreadsheet_id)?)
    }

    fn write_cell(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        cell: &str,
        value: &str,
    ) -> Result<()> {
        let range = format!("{}!{}", sheet_name, cell);
        self.client.update_cell(spreadsheet_id, &range, value)?;
        tracing::debug!("Wrote {} bytes to {} in {}", value.len(), range, spreadsheet_id);
        Ok(())
    }

    fn list_headings(&self, document_id: &str) -> Result<Vec<String>> {
        let document = self.client.get_document(document_id)?;
        Ok(heading_texts(&document.paragraphs()))
    }

    fn append_after_heading(&self, document_id: &str, heading: &str, content: &str) -> Result<()> {
        let document = self.client.get_document(document_id)?;
        let index = find_heading_end(&document.paragraphs(), heading).ok_or_else(|| {
            Error::HeadingNotFound {
                document_id: document_id.to_string(),
                heading: heading.to_string(),
            }
        })?;

        self.client.insert_text(document_id, index, content)?;
        tracing::debug!("Inserted {} bytes at index {} in {}", content.len(), index, document_id);
        Ok(())
    }

    fn resolve_url(&self, url: &str) -> Result<ResolvedUrl> {
        resolve_url(url)
    }
}

/// Extract the id and kind from a Google Sheets or Docs URL.
///
/// Only `http(s)://docs.google.com/spreadsheets/d/<id>/...` and
/// `http(s)://docs.google.com/document/d/<id>/...` are accepted. The check
/// needs no credentials, so callers can validate a URL before building an
/// adapter.
pub fn resolve_url(raw: &str) -> Result<ResolvedUrl> {
    let invalid = || Error::InvalidUrl(raw.to_string());

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "https" | "http") || url.host_str() != Some(GOOGLE_DOCS_HOST) {
        return Err(invalid());
    }

    let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
    let (kind, id) = match segments.as_slice() {
        ["spreadsheets", "d", id, ..] => (DestinationKind::Spreadsheet, *id),
        ["document", "d", id, ..] => (DestinationKind::Document, *id),
        _ => return Err(invalid()),
    };

    let valid_id =
        !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_id {
        return Err(invalid());
    }

    Ok(ResolvedUrl {
        id: id.to_string(),
        kind,
    })
}
