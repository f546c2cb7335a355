//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch for tool calls (used by the HTTP transport)
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::warn;

use crate::domains::feishu::FeishuService;
use crate::domains::weather::WeatherService;

use super::definitions::{GetAlertsTool, GetFeishuDocTool, GetForecastTool};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    weather: Arc<WeatherService>,
    feishu: Option<Arc<FeishuService>>,
}

impl ToolRegistry {
    /// Create a new tool registry over the shared domain services.
    pub fn new(weather: Arc<WeatherService>, feishu: Option<Arc<FeishuService>>) -> Self {
        Self { weather, feishu }
    }

    /// Whether the Feishu document tool has credentials behind it.
    pub fn feishu_configured(&self) -> bool {
        self.feishu.is_some()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetAlertsTool::NAME,
            GetForecastTool::NAME,
            GetFeishuDocTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools. Both the
    /// HTTP and STDIO transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetAlertsTool::to_tool(),
            GetForecastTool::to_tool(),
            GetFeishuDocTool::to_tool(),
        ]
    }

    /// Dispatch a tool call to the appropriate handler by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            GetAlertsTool::NAME => {
                GetAlertsTool::http_handler(arguments, self.weather.clone()).await
            }
            GetForecastTool::NAME => {
                GetForecastTool::http_handler(arguments, self.weather.clone()).await
            }
            GetFeishuDocTool::NAME => {
                GetFeishuDocTool::http_handler(arguments, self.feishu.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WeatherConfig;
    use crate::domains::tools::definitions::feishu::get_doc::UNCONFIGURED_MESSAGE;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(
            Arc::new(WeatherService::new(&WeatherConfig::default())),
            None,
        )
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"get-alerts"));
        assert!(names.contains(&"get-forecast"));
        assert!(names.contains(&"get-feishu-doc"));
    }

    #[test]
    fn test_all_tools_carry_schemas() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
        }
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = test_registry();
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_feishu_call_end_to_end() {
        // Bare id, no credentials: the fixed message comes back and no
        // network call is attempted.
        let registry = test_registry();
        let result = registry
            .call_tool("get-feishu-doc", serde_json::json!({ "docId": "ABC123" }))
            .await
            .unwrap();
        assert_eq!(result["isError"], serde_json::json!(false));
        assert_eq!(result["content"][0]["text"], UNCONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_arguments_rejected() {
        let registry = test_registry();
        let result = registry
            .call_tool("get-forecast", serde_json::json!({ "latitude": "not-a-number" }))
            .await;
        assert!(result.is_err());
    }
}
