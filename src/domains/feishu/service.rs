//! Feishu document retrieval service.
//!
//! Ties the three core pieces together: the reference extractor, the
//! per-type content fetchers, and wiki node resolution for references whose
//! concrete type is not known up front. Every fetcher reshapes the remote
//! payload into a flat text summary; nothing is cached or retried.

use std::sync::Arc;

use tracing::{debug, info};

use super::api::FeishuApi;
use super::error::{FeishuError, FeishuResult};
use super::reference::{DocRef, DocType};

/// At most this many sheets of a workbook are rendered.
const MAX_SHEETS: usize = 3;

/// At most this many data rows per sheet are rendered.
const MAX_ROWS: usize = 10;

/// Bounded cell range fetched from each sheet (columns A-Z, rows 1-100).
const CELL_RANGE: &str = "A1:Z100";

/// Document content retrieval over the platform capability surface.
///
/// Holds a single shared API handle for the process lifetime; the service
/// itself has no mutable state and is safe to share across concurrent tool
/// invocations.
pub struct FeishuService {
    api: Arc<dyn FeishuApi>,
}

impl FeishuService {
    pub fn new(api: Arc<dyn FeishuApi>) -> Self {
        Self { api }
    }

    /// Fetch document content from a raw user string (bare id or URL).
    ///
    /// A reference with a concrete, non-wiki type dispatches directly;
    /// anything else goes through the wiki node resolver first.
    pub async fn fetch(&self, raw: &str) -> FeishuResult<String> {
        let doc_ref = DocRef::parse(raw);
        debug!("parsed reference: type={} id={}", doc_ref.doc_type, doc_ref.id);

        match doc_ref.doc_type {
            DocType::Unknown | DocType::Wiki => self.resolve_node(&doc_ref.id).await,
            doc_type => self.fetch_by_type(doc_type, &doc_ref.id).await,
        }
    }

    /// Dispatch a typed fetch. Total over the closed set; `wiki` and
    /// `unknown` must be resolved to a concrete type before reaching here.
    pub async fn fetch_by_type(&self, doc_type: DocType, token: &str) -> FeishuResult<String> {
        info!("fetching {} content for {}", doc_type, token);
        match doc_type {
            DocType::Doc | DocType::Docx => self.api.document_raw_content(token).await,
            DocType::Sheet | DocType::Sheets => self.spreadsheet_text(token).await,
            DocType::Slides => self.presentation_text(token).await,
            DocType::Bitable => self.bitable_text(token).await,
            DocType::File => self.file_text(token).await,
            DocType::Mindnote => Ok(mindnote_text(token)),
            DocType::Wiki | DocType::Unknown => Err(FeishuError::unsupported(doc_type.as_str())),
        }
    }

    /// Resolve a wiki node token to its underlying object and fetch that.
    pub async fn resolve_node(&self, token: &str) -> FeishuResult<String> {
        let node = self.api.wiki_node(token).await?;
        debug!("node {} resolves to {} {}", token, node.obj_type, node.obj_token);

        let doc_type = DocType::from_tag(&node.obj_type)
            .ok_or_else(|| FeishuError::unsupported(node.obj_type.clone()))?;
        self.fetch_by_type(doc_type, &node.obj_token).await
    }

    /// Render up to [`MAX_SHEETS`] sheets, [`MAX_ROWS`] rows each, as
    /// tab-separated text prefixed by the sheet title.
    async fn spreadsheet_text(&self, token: &str) -> FeishuResult<String> {
        let sheets = self.api.sheet_list(token).await?;

        let mut content = String::from("Spreadsheet content:\n\n");
        for sheet in sheets.iter().take(MAX_SHEETS) {
            let range = format!("{}!{}", sheet.sheet_id, CELL_RANGE);
            let values = self.api.sheet_values(token, &range).await?;

            content.push_str(&format!("Sheet: {}\n", sheet.title));
            for row in values.iter().take(MAX_ROWS) {
                let line: Vec<String> = row.iter().map(cell_text).collect();
                content.push_str(&line.join("\t"));
                content.push('\n');
            }
            content.push('\n');
        }

        Ok(content)
    }

    /// Title, slide count, and each slide's object id; slides are not
    /// rendered.
    async fn presentation_text(&self, token: &str) -> FeishuResult<String> {
        let presentation = self.api.presentation(token).await?;

        let mut content = format!("Presentation title: {}\n\n", presentation.title);
        content.push_str(&format!("{} slide(s)\n\n", presentation.slides.len()));
        for (index, slide) in presentation.slides.iter().enumerate() {
            content.push_str(&format!("Slide {}: {}\n", index + 1, slide.object_id));
        }

        Ok(content)
    }

    /// App name and description, then every data table with name and id.
    async fn bitable_text(&self, token: &str) -> FeishuResult<String> {
        let app = self.api.bitable_app(token).await?;

        let description = app
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "no description".to_string());
        let mut content = format!("Base: {}\nDescription: {}\n\n", app.name, description);

        let tables = self.api.bitable_tables(token).await?;
        content.push_str(&format!("{} table(s):\n", tables.len()));
        for (index, table) in tables.iter().enumerate() {
            content.push_str(&format!("{}. {} ({})\n", index + 1, table.name, table.table_id));
        }

        Ok(content)
    }

    /// File metadata only; file content is never downloaded.
    async fn file_text(&self, token: &str) -> FeishuResult<String> {
        let file = self.api.file_meta(token).await?;
        Ok(format!(
            "File name: {}\nType: {}\nSize: {} bytes\nCreated: {}\nModified: {}",
            file.name, file.kind, file.size, file.created_time, file.modified_time
        ))
    }
}

/// Mindnote content extraction is not available through the API; return a
/// fixed pointer instead of calling out.
fn mindnote_text(token: &str) -> String {
    format!(
        "Mindnote document (ID: {token})\nContent extraction is not supported, view it directly in Feishu."
    )
}

/// Flatten one cell to display text. Cells arrive as plain scalars, nulls,
/// rich-text segment objects with a `text` field, or arrays of segments.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string(),
        serde_json::Value::Array(segments) => {
            segments.iter().map(cell_text).collect::<Vec<_>>().join("")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::feishu::api::{
        BitableApp, BitableTable, FileMeta, Presentation, SheetMeta, SheetValues, Slide, WikiNode,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned capability double. Counts every remote call so tests can
    /// assert that a code path issued none.
    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        doc_content: Option<String>,
        sheet_count: usize,
        rows_per_sheet: usize,
        node: Option<WikiNode>,
    }

    impl FakeApi {
        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl FeishuApi for FakeApi {
        async fn document_raw_content(&self, _document_id: &str) -> FeishuResult<String> {
            self.bump();
            self.doc_content
                .clone()
                .ok_or_else(|| FeishuError::remote(1, "no document"))
        }

        async fn sheet_list(&self, _token: &str) -> FeishuResult<Vec<SheetMeta>> {
            self.bump();
            Ok((0..self.sheet_count)
                .map(|i| SheetMeta {
                    sheet_id: format!("sid{i}"),
                    title: format!("Sheet {i}"),
                })
                .collect())
        }

        async fn sheet_values(&self, _token: &str, range: &str) -> FeishuResult<SheetValues> {
            self.bump();
            assert!(range.ends_with("!A1:Z100"), "unexpected range: {range}");
            Ok((0..self.rows_per_sheet)
                .map(|r| vec![serde_json::json!(format!("r{r}c0")), serde_json::json!(r)])
                .collect())
        }

        async fn presentation(&self, _token: &str) -> FeishuResult<Presentation> {
            self.bump();
            Ok(Presentation {
                title: "Quarterly review".to_string(),
                slides: vec![
                    Slide { object_id: "s1".to_string() },
                    Slide { object_id: "s2".to_string() },
                ],
            })
        }

        async fn bitable_app(&self, _token: &str) -> FeishuResult<BitableApp> {
            self.bump();
            Ok(BitableApp {
                name: "Tracker".to_string(),
                description: None,
            })
        }

        async fn bitable_tables(&self, _token: &str) -> FeishuResult<Vec<BitableTable>> {
            self.bump();
            Ok(vec![BitableTable {
                name: "Tasks".to_string(),
                table_id: "tbl1".to_string(),
            }])
        }

        async fn file_meta(&self, _token: &str) -> FeishuResult<FileMeta> {
            self.bump();
            Ok(FileMeta {
                name: "report.pdf".to_string(),
                kind: "pdf".to_string(),
                size: 2048,
                created_time: "1700000000".to_string(),
                modified_time: "1700000100".to_string(),
            })
        }

        async fn wiki_node(&self, _token: &str) -> FeishuResult<WikiNode> {
            self.bump();
            self.node
                .clone()
                .ok_or_else(|| FeishuError::remote(230005, "node not found"))
        }
    }

    fn service_with(api: FakeApi) -> (FeishuService, Arc<FakeApi>) {
        let api = Arc::new(api);
        (FeishuService::new(api.clone()), api)
    }

    #[tokio::test]
    async fn test_doc_dispatch_returns_raw_content() {
        let (service, api) = service_with(FakeApi {
            doc_content: Some("raw text".to_string()),
            ..Default::default()
        });
        let content = service.fetch_by_type(DocType::Docx, "D1").await.unwrap();
        assert_eq!(content, "raw text");
        assert_eq!(api.count(), 1);

        // doc and docx share the fetcher
        let content = service.fetch_by_type(DocType::Doc, "D1").await.unwrap();
        assert_eq!(content, "raw text");
    }

    #[tokio::test]
    async fn test_mindnote_makes_no_remote_call() {
        let (service, api) = service_with(FakeApi::default());
        let content = service.fetch_by_type(DocType::Mindnote, "MN1").await.unwrap();
        assert!(content.contains("MN1"));
        assert!(content.contains("not supported"));
        assert_eq!(api.count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_wiki_and_unknown() {
        let (service, api) = service_with(FakeApi::default());
        for doc_type in [DocType::Wiki, DocType::Unknown] {
            let err = service.fetch_by_type(doc_type, "T1").await.unwrap_err();
            assert!(matches!(err, FeishuError::UnsupportedType { .. }), "{err}");
        }
        assert_eq!(api.count(), 0);
    }

    #[tokio::test]
    async fn test_spreadsheet_output_is_bounded() {
        // A 50-sheet, 500-row workbook still yields at most 3 sheets of at
        // most 10 rows each.
        let (service, api) = service_with(FakeApi {
            sheet_count: 50,
            rows_per_sheet: 500,
            ..Default::default()
        });
        let content = service.fetch_by_type(DocType::Sheets, "S1").await.unwrap();

        assert_eq!(content.matches("Sheet: ").count(), 3);
        let data_rows = content.lines().filter(|l| l.starts_with('r')).count();
        assert_eq!(data_rows, 3 * 10);
        // one list call plus one values call per rendered sheet
        assert_eq!(api.count(), 1 + 3);
    }

    #[tokio::test]
    async fn test_spreadsheet_rows_are_tab_separated() {
        let (service, _api) = service_with(FakeApi {
            sheet_count: 1,
            rows_per_sheet: 2,
            ..Default::default()
        });
        let content = service.fetch_by_type(DocType::Sheet, "S1").await.unwrap();
        assert!(content.contains("Sheet: Sheet 0"));
        assert!(content.contains("r0c0\t0"));
        assert!(content.contains("r1c0\t1"));
    }

    #[tokio::test]
    async fn test_presentation_lists_slide_ids() {
        let (service, _api) = service_with(FakeApi::default());
        let content = service.fetch_by_type(DocType::Slides, "P1").await.unwrap();
        assert!(content.contains("Presentation title: Quarterly review"));
        assert!(content.contains("2 slide(s)"));
        assert!(content.contains("Slide 1: s1"));
        assert!(content.contains("Slide 2: s2"));
    }

    #[tokio::test]
    async fn test_bitable_lists_tables() {
        let (service, _api) = service_with(FakeApi::default());
        let content = service.fetch_by_type(DocType::Bitable, "B1").await.unwrap();
        assert!(content.contains("Base: Tracker"));
        assert!(content.contains("Description: no description"));
        assert!(content.contains("1 table(s):"));
        assert!(content.contains("1. Tasks (tbl1)"));
    }

    #[tokio::test]
    async fn test_file_metadata_only() {
        let (service, api) = service_with(FakeApi::default());
        let content = service.fetch_by_type(DocType::File, "F1").await.unwrap();
        assert!(content.contains("File name: report.pdf"));
        assert!(content.contains("Size: 2048 bytes"));
        assert_eq!(api.count(), 1);
    }

    #[tokio::test]
    async fn test_wiki_resolution_is_idempotent() {
        let (service, _api) = service_with(FakeApi {
            doc_content: Some("wiki-backed doc".to_string()),
            node: Some(WikiNode {
                obj_type: "docx".to_string(),
                obj_token: "D9".to_string(),
            }),
            ..Default::default()
        });
        let first = service.resolve_node("N1").await.unwrap();
        let second = service.resolve_node("N1").await.unwrap();
        assert_eq!(first, "wiki-backed doc");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_node_with_unsupported_object_type() {
        let (service, _api) = service_with(FakeApi {
            node: Some(WikiNode {
                obj_type: "folder".to_string(),
                obj_token: "X".to_string(),
            }),
            ..Default::default()
        });
        let err = service.resolve_node("N1").await.unwrap_err();
        assert!(err.to_string().contains("folder"));
    }

    #[tokio::test]
    async fn test_node_lookup_failure_propagates() {
        let (service, _api) = service_with(FakeApi::default());
        let err = service.resolve_node("missing").await.unwrap_err();
        assert!(err.to_string().contains("node not found"));
    }

    #[tokio::test]
    async fn test_fetch_routes_bare_token_through_resolver() {
        let (service, api) = service_with(FakeApi {
            doc_content: Some("resolved".to_string()),
            node: Some(WikiNode {
                obj_type: "doc".to_string(),
                obj_token: "D2".to_string(),
            }),
            ..Default::default()
        });
        let content = service.fetch("ABC123").await.unwrap();
        assert_eq!(content, "resolved");
        // node lookup plus the document fetch
        assert_eq!(api.count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_dispatches_typed_url_directly() {
        let (service, api) = service_with(FakeApi {
            doc_content: Some("direct".to_string()),
            ..Default::default()
        });
        let content = service
            .fetch("https://xx.feishu.cn/docx/ABC123")
            .await
            .unwrap();
        assert_eq!(content, "direct");
        assert_eq!(api.count(), 1);
    }

    #[test]
    fn test_cell_text_variants() {
        assert_eq!(cell_text(&serde_json::json!("plain")), "plain");
        assert_eq!(cell_text(&serde_json::json!(null)), "");
        assert_eq!(cell_text(&serde_json::json!(42)), "42");
        assert_eq!(cell_text(&serde_json::json!({"text": "rich"})), "rich");
        assert_eq!(
            cell_text(&serde_json::json!([{"text": "a"}, {"text": "b"}])),
            "ab"
        );
    }
}
