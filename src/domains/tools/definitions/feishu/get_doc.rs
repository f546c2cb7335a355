//! Feishu document retrieval tool.
//!
//! Accepts a bare document id or a full platform URL and returns the
//! document's content as plain text. When the Feishu credentials are not
//! configured the tool answers with a fixed message and issues no network
//! call at all.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domains::feishu::FeishuService;
use crate::domains::tools::common::{error_result, success_result};

/// Fixed reply when the Feishu credentials are absent.
pub const UNCONFIGURED_MESSAGE: &str =
    "Feishu service is not configured: set the FEISHU_APP_ID and FEISHU_APP_SECRET environment variables";

/// Parameters for the Feishu document tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFeishuDocParams {
    /// The document id or full URL.
    #[serde(rename = "docId")]
    #[schemars(
        description = "Feishu document ID, usually found in the URL. Accepts a bare ID or a full link for these types: doc, docx, sheet, sheets, mindnote, bitable, file, slides, wiki"
    )]
    pub doc_id: String,
}

/// Feishu document tool implementation.
pub struct GetFeishuDocTool;

impl GetFeishuDocTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-feishu-doc";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the content of a Feishu document as plain text";

    /// Execute the tool logic.
    ///
    /// `feishu` is `None` when credentials were missing at startup; that
    /// short-circuits every call before any network activity.
    pub async fn execute(
        params: &GetFeishuDocParams,
        feishu: Option<&FeishuService>,
    ) -> CallToolResult {
        let Some(service) = feishu else {
            return success_result(UNCONFIGURED_MESSAGE.to_string());
        };

        info!("Fetching Feishu document: {}", params.doc_id);
        match service.fetch(&params.doc_id).await {
            Ok(content) => success_result(content),
            Err(e) => {
                warn!("Feishu document fetch failed: {}", e);
                error_result(&format!("Failed to fetch Feishu document: {e}"))
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        feishu: Option<Arc<FeishuService>>,
    ) -> Result<serde_json::Value, String> {
        let params: GetFeishuDocParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        let result = Self::execute(&params, feishu.as_deref()).await;
        Ok(crate::domains::tools::common::to_http_result(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFeishuDocParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(feishu: Option<Arc<FeishuService>>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let feishu = feishu.clone();
            async move {
                let params: GetFeishuDocParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, feishu.as_deref()).await)
            }
            .boxed()
        })
    }
}
