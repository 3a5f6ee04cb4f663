use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the capture/label/push core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Could not serialize {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },

    #[error("No mapping for '{0}'. Add it to the sprint config.")]
    LabelNotMapped(String),

    #[error("Unknown destination type: {0}")]
    UnknownDestinationType(String),

    #[error("Heading '{heading}' not found in document {document_id}")]
    HeadingNotFound {
        document_id: String,
        heading: String,
    },

    #[error("Could not extract a Google Docs or Sheets ID from: {0}")]
    InvalidUrl(String),

    #[error("Document service error: {0}")]
    Adapter(String),

    #[error("Invalid capture: {0}")]
    InvalidCapture(String),

    #[error("Invalid sprint name '{0}'")]
    InvalidName(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
