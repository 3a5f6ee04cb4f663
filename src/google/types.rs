//! Response and request shapes for the Google Sheets and Docs APIs.

use serde::{Deserialize, Serialize};
use sprint_core::Paragraph;

// ============================================================
// Sheets
// ============================================================

/// `spreadsheets.get` response restricted to `sheets.properties.title`.
#[derive(Debug, Default, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

impl Spreadsheet {
    pub fn titles(self) -> Vec<String> {
        self.sheets.into_iter().map(|s| s.properties.title).collect()
    }
}

/// Body of `spreadsheets.values.update`.
#[derive(Debug, Serialize)]
pub struct ValueRange {
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn single(value: &str) -> Self {
        Self {
            values: vec![vec![value.to_string()]],
        }
    }
}

// ============================================================
// Docs
// ============================================================

/// `documents.get` response, keeping only what heading lookup needs.
#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    pub end_index: Option<u64>,
    pub paragraph: Option<DocParagraph>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocParagraph {
    #[serde(default)]
    pub paragraph_style: ParagraphStyle,
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(default)]
    pub named_style_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Paragraphs of the body in document order. Tables and section breaks are skipped.
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.body
            .content
            .iter()
            .filter_map(|element| {
                let paragraph = element.paragraph.as_ref()?;
                let text: String = paragraph
                    .elements
                    .iter()
                    .filter_map(|e| e.text_run.as_ref())
                    .map(|run| run.content.as_str())
                    .collect();
                Some(Paragraph {
                    text: text.trim().to_string(),
                    style: paragraph.paragraph_style.named_style_type.clone(),
                    end_index: element.end_index,
                })
            })
            .collect()
    }
}

/// `documents.batchUpdate` body with a single text insertion.
///
/// The text starts with a newline so the inserted content begins on its own
/// line below the heading.
pub fn insert_text_request(index: u64, content: &str) -> serde_json::Value {
    serde_json::json!({
        "requests": [{
            "insertText": {
                "location": { "index": index },
                "text": format!("\n{}", content),
            }
        }]
    })
}
