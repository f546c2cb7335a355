//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the domain services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! The ToolRouter is built dynamically in `domains/tools/router.rs`; the
//! ToolRegistry handles name-based dispatch for the HTTP transport. Adding a
//! new tool does not require modifying this file.
//!
//! The domain services are constructed once here and injected into the
//! router and registry; there is no global lazily-initialized state.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::feishu::{FeishuClient, FeishuService};
use crate::domains::tools::{ToolRegistry, build_tool_router};
use crate::domains::weather::WeatherService;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls to the domain services. It is cheap to clone; all services
/// are behind `Arc`.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry for name-based tool dispatch (HTTP transport).
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls (STDIO transport).
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The Feishu service is only constructed when both credentials are
    /// present; otherwise the document tool reports itself as unconfigured
    /// without ever touching the network.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let weather = Arc::new(WeatherService::new(&config.weather));
        let feishu = config.feishu.credentials().map(|(app_id, app_secret)| {
            let client = FeishuClient::new(&config.feishu.base_url, app_id, app_secret);
            Arc::new(FeishuService::new(Arc::new(client)))
        });

        Self {
            tool_router: build_tool_router::<Self>(weather.clone(), feishu.clone()),
            registry: Arc::new(ToolRegistry::new(weather, feishu)),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Whether the Feishu document tool has credentials behind it.
    pub fn feishu_configured(&self) -> bool {
        self.registry.feishu_configured()
    }

    /// List all available tools (for the HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for the HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let feishu_note = if self.feishu_configured() {
            "get-feishu-doc (Feishu document content)"
        } else {
            "get-feishu-doc (unconfigured: requires FEISHU_APP_ID and FEISHU_APP_SECRET)"
        };
        ServerInfo {
            instructions: Some(format!(
                "MCP server for weather data and Feishu document access. Tools: \
                 get-alerts (US weather alerts), get-forecast (US weather forecast), {feishu_note}."
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
