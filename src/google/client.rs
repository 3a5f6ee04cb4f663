//! HTTP client for the Google Sheets v4 and Docs v1 REST APIs.
//!
//! Requests are blocking; callers push entries one after another and a
//! slow call holds up the batch. Authentication is a bearer token taken
//! from [`Settings`].

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::token;
use super::types::{insert_text_request, Document, Spreadsheet, ValueRange};
use crate::settings::Settings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google API client errors.
#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: access token missing, expired or lacking scope")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(String),

    #[error("No Google credentials: set SPRINT_HUB_ACCESS_TOKEN or provide {0}")]
    MissingCredentials(String),

    #[error("Access token in {0} has expired and could not be refreshed")]
    TokenExpired(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Could not update {path}: {source}")]
    TokenWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<GoogleError> for sprint_core::Error {
    fn from(e: GoogleError) -> Self {
        sprint_core::Error::Adapter(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GoogleClient {
    sheets_url: String,
    docs_url: String,
    access_token: String,
    client: Client,
}

impl GoogleClient {
    /// Create a client from settings, reading (and if needed refreshing) the
    /// token file when no token is set in the environment.
    pub fn from_settings(settings: &Settings) -> Result<Self, GoogleError> {
        let client = http_client()?;
        let access_token = match &settings.access_token {
            Some(token) => token.clone(),
            None => token::load_access_token(&settings.token_path(), &client)?,
        };
        Ok(Self {
            sheets_url: settings.sheets_url.clone(),
            docs_url: settings.docs_url.clone(),
            access_token,
            client,
        })
    }

    /// Create with explicit configuration.
    pub fn new(
        sheets_url: impl Into<String>,
        docs_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, GoogleError> {
        let client = http_client()?;
        Ok(Self {
            sheets_url: sheets_url.into(),
            docs_url: docs_url.into(),
            access_token: access_token.into(),
            client,
        })
    }

    /// Build `base/segments...` with each segment percent-encoded.
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url, GoogleError> {
        let mut url = Url::parse(base)?;
        url.path_segments_mut()
            .map_err(|()| GoogleError::Api(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a request with the auth header.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    /// Handle response, converting HTTP errors to GoogleError.
    fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, GoogleError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json()?)
        } else {
            let body = response.text().unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(GoogleError::NotFound(body)),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GoogleError::Unauthorized),
                _ => Err(GoogleError::Api(format!("{}: {}", status, body))),
            }
        }
    }

    // ============================================================
    // Sheets Operations
    // ============================================================

    /// Sheet titles of a spreadsheet, in workbook order.
    pub fn get_sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleError> {
        let mut url = Self::endpoint(&self.sheets_url, &["spreadsheets", spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let response = self.request(Method::GET, url).send()?;
        let spreadsheet: Spreadsheet = self.handle_response(response)?;
        Ok(spreadsheet.titles())
    }

    /// Overwrite a single cell. `range` is A1 notation, e.g. `Enumeration!B4`.
    pub fn update_cell(
        &self,
        spreadsheet_id: &str,
        range: &str,
        value: &str,
    ) -> Result<(), GoogleError> {
        let mut url = Self::endpoint(
            &self.sheets_url,
            &["spreadsheets", spreadsheet_id, "values", range],
        )?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .request(Method::PUT, url)
            .json(&ValueRange::single(value))
            .send()?;
        self.handle_response::<serde_json::Value>(response)?;
        Ok(())
    }

    // ============================================================
    // Docs Operations
    // ============================================================

    pub fn get_document(&self, document_id: &str) -> Result<Document, GoogleError> {
        let url = Self::endpoint(&self.docs_url, &["documents", document_id])?;
        let response = self.request(Method::GET, url).send()?;
        self.handle_response(response)
    }

    /// Insert `"\n" + content` at `index` of the document body.
    pub fn insert_text(
        &self,
        document_id: &str,
        index: u64,
        content: &str,
    ) -> Result<(), GoogleError> {
        let action = format!("{}:batchUpdate", document_id);
        let url = Self::endpoint(&self.docs_url, &["documents", &action])?;

        let response = self
            .request(Method::POST, url)
            .json(&insert_text_request(index, content))
            .send()?;
        self.handle_response::<serde_json::Value>(response)?;
        Ok(())
    }
}

fn http_client() -> Result<Client, GoogleError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}
