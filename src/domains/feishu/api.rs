//! Remote capability surface of the Feishu open platform.
//!
//! The service layer only ever talks to the platform through [`FeishuApi`],
//! which exposes exactly the operations the fetchers need. Tests substitute
//! a canned double; production uses the reqwest-backed
//! [`super::client::FeishuClient`].

use async_trait::async_trait;
use serde::Deserialize;

use super::error::FeishuResult;

/// Metadata for one sheet inside a spreadsheet workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetMeta {
    pub sheet_id: String,
    #[serde(default)]
    pub title: String,
}

/// A rectangular block of cell values. Cells are heterogeneous JSON: plain
/// scalars, nulls, or rich-text segment objects carrying a `text` field.
pub type SheetValues = Vec<Vec<serde_json::Value>>;

/// Presentation metadata with its slide list.
#[derive(Debug, Clone, Deserialize)]
pub struct Presentation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slide {
    pub object_id: String,
}

/// Bitable app metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct BitableApp {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One data table inside a bitable app.
#[derive(Debug, Clone, Deserialize)]
pub struct BitableTable {
    pub name: String,
    pub table_id: String,
}

/// Drive file metadata. Content is never fetched, only these fields.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub modified_time: String,
}

/// A wiki node with the concrete object it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiNode {
    pub obj_type: String,
    pub obj_token: String,
}

/// The operations this server consumes from the document platform.
///
/// Every call is read-only with respect to the remote service and maps to a
/// single HTTP request in the production implementation.
#[async_trait]
pub trait FeishuApi: Send + Sync {
    /// Raw plain-text content of a doc/docx document.
    async fn document_raw_content(&self, document_id: &str) -> FeishuResult<String>;

    /// All sheets in a spreadsheet workbook.
    async fn sheet_list(&self, spreadsheet_token: &str) -> FeishuResult<Vec<SheetMeta>>;

    /// Cell values for one bounded range, e.g. `"<sheet_id>!A1:Z100"`.
    async fn sheet_values(&self, spreadsheet_token: &str, range: &str) -> FeishuResult<SheetValues>;

    /// Presentation metadata including the slide list.
    async fn presentation(&self, presentation_token: &str) -> FeishuResult<Presentation>;

    /// Bitable app metadata.
    async fn bitable_app(&self, app_token: &str) -> FeishuResult<BitableApp>;

    /// Data tables inside a bitable app.
    async fn bitable_tables(&self, app_token: &str) -> FeishuResult<Vec<BitableTable>>;

    /// Drive file metadata (never file content).
    async fn file_meta(&self, file_token: &str) -> FeishuResult<FileMeta>;

    /// Resolve a wiki node token to its underlying object.
    async fn wiki_node(&self, token: &str) -> FeishuResult<WikiNode>;
}
