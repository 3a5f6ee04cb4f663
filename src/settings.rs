//! Runtime configuration.
//!
//! Configuration is via environment variables:
//! - `SPRINT_HUB_CONFIG_DIR` - Directory for sprint files (default: platform config dir, e.g. `~/.config/sprint-hub`)
//! - `SPRINT_HUB_ACCESS_TOKEN` - OAuth bearer token for the Google APIs (default: read from `token.json`)
//! - `SPRINT_HUB_SHEETS_URL` - Sheets API base URL (default: `https://sheets.googleapis.com/v4`)
//! - `SPRINT_HUB_DOCS_URL` - Docs API base URL (default: `https://docs.googleapis.com/v1`)

use std::path::PathBuf;

use anyhow::Result;
use sprint_core::Workspace;

pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_DOCS_URL: &str = "https://docs.googleapis.com/v1";

const APP_NAME: &str = "sprint-hub";
const TOKEN_FILE: &str = "token.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub access_token: Option<String>,
    pub sheets_url: String,
    pub docs_url: String,
}

impl Settings {
    /// Create settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let config_dir = match std::env::var_os("SPRINT_HUB_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_config_dir()?,
        };

        Ok(Self {
            config_dir,
            access_token: std::env::var("SPRINT_HUB_ACCESS_TOKEN").ok(),
            sheets_url: std::env::var("SPRINT_HUB_SHEETS_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_URL.to_string()),
            docs_url: std::env::var("SPRINT_HUB_DOCS_URL")
                .unwrap_or_else(|_| DEFAULT_DOCS_URL.to_string()),
        })
    }

    /// Settings rooted at an explicit directory, with default API endpoints.
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            access_token: None,
            sheets_url: DEFAULT_SHEETS_URL.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
        }
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(&self.config_dir)
    }

    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join(TOKEN_FILE)
    }
}

fn default_config_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().to_path_buf())
}
