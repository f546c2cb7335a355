//! Reqwest-backed implementation of the Feishu capability surface.
//!
//! Every open platform response uses the `{ code, msg, data }` envelope; a
//! non-zero `code` is a business failure even on HTTP 200. Requests are
//! authenticated with a tenant access token obtained per call - there is no
//! token cache or refresh logic, matching the one-live-call-per-request
//! model of the rest of the server.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api::{
    BitableApp, BitableTable, FeishuApi, FileMeta, Presentation, SheetMeta, SheetValues, WikiNode,
};
use super::error::{FeishuError, FeishuResult};

/// HTTP client for the Feishu open platform.
pub struct FeishuClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_secret: String,
}

/// Standard response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

/// Token endpoint response; the token sits beside `code`/`msg` rather than
/// inside `data`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContentData {
    content: String,
}

#[derive(Debug, Deserialize)]
struct SheetListData {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct ValueRangesData {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: SheetValues,
}

#[derive(Debug, Deserialize)]
struct PresentationData {
    presentation: Presentation,
}

#[derive(Debug, Deserialize)]
struct BitableAppData {
    app: BitableApp,
}

#[derive(Debug, Deserialize)]
struct BitableTablesData {
    #[serde(default)]
    items: Vec<BitableTable>,
}

#[derive(Debug, Deserialize)]
struct FileMetaData {
    file: FileMeta,
}

#[derive(Debug, Deserialize)]
struct WikiNodeData {
    node: WikiNode,
}

impl FeishuClient {
    /// Create a client for the given endpoint and application credentials.
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Obtain a tenant access token for the configured application.
    async fn tenant_access_token(&self) -> FeishuResult<String> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.base_url
        );
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "app_id": self.app_id,
                "app_secret": self.app_secret,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeishuError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: TokenResponse = response.json().await?;
        if body.code != 0 {
            return Err(FeishuError::remote(body.code, body.msg));
        }
        body.tenant_access_token
            .ok_or_else(|| FeishuError::remote(0, "token missing from auth response"))
    }

    /// Issue an authenticated GET and unwrap the response envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> FeishuResult<T> {
        let token = self.tenant_access_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeishuError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        if envelope.code != 0 {
            return Err(FeishuError::remote(envelope.code, envelope.msg));
        }
        envelope
            .data
            .ok_or_else(|| FeishuError::remote(0, "response carried no data"))
    }
}

#[async_trait]
impl FeishuApi for FeishuClient {
    async fn document_raw_content(&self, document_id: &str) -> FeishuResult<String> {
        let path = format!("/open-apis/docx/v1/documents/{document_id}/raw_content");
        let data: RawContentData = self.get(&path, &[("lang", "0")]).await?;
        Ok(data.content)
    }

    async fn sheet_list(&self, spreadsheet_token: &str) -> FeishuResult<Vec<SheetMeta>> {
        let path = format!("/open-apis/sheets/v3/spreadsheets/{spreadsheet_token}/sheets/query");
        let data: SheetListData = self.get(&path, &[]).await?;
        Ok(data.sheets)
    }

    async fn sheet_values(
        &self,
        spreadsheet_token: &str,
        range: &str,
    ) -> FeishuResult<SheetValues> {
        let path =
            format!("/open-apis/sheets/v2/spreadsheets/{spreadsheet_token}/values_batch_get");
        let data: ValueRangesData = self.get(&path, &[("ranges", range)]).await?;
        Ok(data
            .value_ranges
            .into_iter()
            .next()
            .map(|r| r.values)
            .unwrap_or_default())
    }

    async fn presentation(&self, presentation_token: &str) -> FeishuResult<Presentation> {
        let path = format!("/open-apis/slides/v1/presentations/{presentation_token}");
        let data: PresentationData = self.get(&path, &[]).await?;
        Ok(data.presentation)
    }

    async fn bitable_app(&self, app_token: &str) -> FeishuResult<BitableApp> {
        let path = format!("/open-apis/bitable/v1/apps/{app_token}");
        let data: BitableAppData = self.get(&path, &[]).await?;
        Ok(data.app)
    }

    async fn bitable_tables(&self, app_token: &str) -> FeishuResult<Vec<BitableTable>> {
        let path = format!("/open-apis/bitable/v1/apps/{app_token}/tables");
        let data: BitableTablesData = self.get(&path, &[]).await?;
        Ok(data.items)
    }

    async fn file_meta(&self, file_token: &str) -> FeishuResult<FileMeta> {
        let path = format!("/open-apis/drive/v1/files/{file_token}");
        let data: FileMetaData = self.get(&path, &[]).await?;
        Ok(data.file)
    }

    async fn wiki_node(&self, token: &str) -> FeishuResult<WikiNode> {
        let data: WikiNodeData = self
            .get("/open-apis/wiki/v2/spaces/get_node", &[("token", token)])
            .await?;
        Ok(data.node)
    }
}
