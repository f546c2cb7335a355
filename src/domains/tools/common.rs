//! Shared helpers for tool implementations.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

/// Create an error result with a text payload.
///
/// Remote-API failures surface to the client this way rather than as
/// protocol-level faults.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Render a `CallToolResult` for the HTTP transport's JSON response.
pub fn to_http_result(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}
