//! Stored OAuth credentials (`token.json`) and their refresh.
//!
//! The file holds an authorized-user record: `token` (or `access_token`),
//! `refresh_token`, `token_uri`, `client_id`, `client_secret` and `expiry`.
//! An expired access token is exchanged for a new one at `token_uri` and the
//! file is rewritten in place, keeping every other field.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::client::GoogleError;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed ahead of time.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredToken {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// The access token when it is present and not about to expire.
    pub fn usable_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        match self.expiry {
            Some(expiry) if expiry <= now + Duration::seconds(EXPIRY_SKEW_SECS) => None,
            _ => Some(token),
        }
    }
}

/// Response of the OAuth token endpoint for a refresh grant.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Access token from `path`, refreshed and written back when expired.
pub fn load_access_token(path: &Path, client: &Client) -> Result<String, GoogleError> {
    let display = path.display().to_string();
    let missing = || GoogleError::MissingCredentials(display.clone());

    let content = fs::read_to_string(path).map_err(|_| missing())?;
    let raw: Value = serde_json::from_str(&content).map_err(|_| missing())?;
    let stored: StoredToken = serde_json::from_value(raw.clone()).map_err(|_| missing())?;

    let now = Utc::now();
    if let Some(token) = stored.usable_token(now) {
        return Ok(token.to_string());
    }
    if stored.token.is_none() && stored.refresh_token.is_none() {
        return Err(missing());
    }

    let (access_token, expiry) = refresh(client, &stored, now)
        .map_err(|e| GoogleError::TokenExpired(format!("{} ({})", display, e)))?;
    write_back(path, raw, &access_token, expiry)?;
    tracing::info!("Refreshed access token in {}", path.display());
    Ok(access_token)
}

fn refresh(
    client: &Client,
    stored: &StoredToken,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), GoogleError> {
    let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
        stored.refresh_token.as_deref(),
        stored.client_id.as_deref(),
        stored.client_secret.as_deref(),
    ) else {
        return Err(GoogleError::RefreshFailed(
            "no refresh_token, client_id or client_secret".to_string(),
        ));
    };

    let token_uri = stored.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
    tracing::debug!("POST {}", token_uri);
    let response = client
        .post(token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(GoogleError::RefreshFailed(format!("{}: {}", status, body)));
    }

    let refreshed: RefreshResponse = response.json()?;
    let expiry = now + Duration::seconds(refreshed.expires_in.unwrap_or(3600));
    Ok((refreshed.access_token, expiry))
}

fn write_back(
    path: &Path,
    mut raw: Value,
    access_token: &str,
    expiry: DateTime<Utc>,
) -> Result<(), GoogleError> {
    let write_error = |source: std::io::Error| GoogleError::TokenWrite {
        path: path.display().to_string(),
        source,
    };

    if let Some(fields) = raw.as_object_mut() {
        let key = if fields.contains_key("token") || !fields.contains_key("access_token") {
            "token"
        } else {
            "access_token"
        };
        fields.insert(key.to_string(), Value::from(access_token));
        fields.insert(
            "expiry".to_string(),
            Value::from(expiry.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
    }

    let content = serde_json::to_string_pretty(&raw)
        .map_err(|e| write_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    fs::write(path, content).map_err(write_error)?;
    restrict_permissions(path).map_err(write_error)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
