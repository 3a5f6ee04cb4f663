use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The two kinds of external destination a sprint can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinationKind {
    #[serde(rename = "doc")]
    Document,
    #[serde(rename = "sheet")]
    Spreadsheet,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "doc",
            Self::Spreadsheet => "sheet",
        }
    }

    /// Parse the persisted kind tag.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "doc" => Ok(Self::Document),
            "sheet" => Ok(Self::Spreadsheet),
            other => Err(Error::UnknownDestinationType(other.to_string())),
        }
    }
}

/// A document or spreadsheet registered under a sprint.
///
/// Identity is the remote `id`; registering the same id twice keeps the
/// first registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationDoc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    /// Human-readable name shown in prompts and the dashboard.
    pub label: String,
    /// Ordering hint: the sprint chapter in which the destination was added.
    pub added_chapter: u32,
}

/// Where a labeled entry is written when pushed.
///
/// Each variant carries exactly the fields its kind needs, so a spreadsheet
/// capture without a cell cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CaptureRecord", into = "CaptureRecord")]
pub enum Capture {
    /// Overwrite one cell of a sheet.
    Spreadsheet {
        destination_id: String,
        sheet_name: String,
        cell: String,
    },
    /// Insert right after the first heading containing `heading`.
    Document {
        destination_id: String,
        heading: String,
    },
}

impl Capture {
    pub fn spreadsheet(
        destination_id: impl Into<String>,
        sheet_name: impl Into<String>,
        cell: impl Into<String>,
    ) -> Result<Self> {
        let destination_id = required("destination_id", destination_id.into())?;
        let sheet_name = required("sheet_name", sheet_name.into())?;
        let cell = required("cell", cell.into())?;
        Ok(Self::Spreadsheet {
            destination_id,
            sheet_name,
            cell,
        })
    }

    pub fn document(destination_id: impl Into<String>, heading: impl Into<String>) -> Result<Self> {
        let destination_id = required("destination_id", destination_id.into())?;
        let heading = required("heading", heading.into())?;
        Ok(Self::Document {
            destination_id,
            heading,
        })
    }

    pub fn destination_id(&self) -> &str {
        match self {
            Self::Spreadsheet { destination_id, .. } | Self::Document { destination_id, .. } => {
                destination_id
            }
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Self::Spreadsheet { .. } => DestinationKind::Spreadsheet,
            Self::Document { .. } => DestinationKind::Document,
        }
    }

    /// Short description of the target, e.g. `Enumeration!B4` or `§ Executive Summary`.
    pub fn target(&self) -> String {
        match self {
            Self::Spreadsheet {
                sheet_name, cell, ..
            } => format!("{}!{}", sheet_name, cell),
            Self::Document { heading, .. } => format!("§ {}", heading),
        }
    }
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(Error::InvalidCapture(format!("'{}' must not be empty", field)))
    } else {
        Ok(value)
    }
}

/// Flat on-disk shape of a [`Capture`]. Fields that do not apply to the
/// kind are omitted when written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub destination_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

impl TryFrom<CaptureRecord> for Capture {
    type Error = Error;

    fn try_from(record: CaptureRecord) -> Result<Self> {
        let missing = |field: &str| {
            Error::InvalidCapture(format!(
                "{} capture for '{}' is missing '{}'",
                record.kind, record.destination_id, field
            ))
        };

        match DestinationKind::parse(&record.kind)? {
            DestinationKind::Spreadsheet => {
                let sheet_name = record.sheet_name.clone().ok_or_else(|| missing("sheet_name"))?;
                let cell = record.cell.clone().ok_or_else(|| missing("cell"))?;
                Capture::spreadsheet(record.destination_id, sheet_name, cell)
            }
            DestinationKind::Document => {
                let heading = record.heading.clone().ok_or_else(|| missing("heading"))?;
                Capture::document(record.destination_id, heading)
            }
        }
    }
}

impl From<Capture> for CaptureRecord {
    fn from(capture: Capture) -> Self {
        let kind = capture.kind().as_str().to_string();
        match capture {
            Capture::Spreadsheet {
                destination_id,
                sheet_name,
                cell,
            } => Self {
                destination_id,
                kind,
                sheet_name: Some(sheet_name),
                cell: Some(cell),
                heading: None,
            },
            Capture::Document {
                destination_id,
                heading,
            } => Self {
                destination_id,
                kind,
                sheet_name: None,
                cell: None,
                heading: Some(heading),
            },
        }
    }
}
