//! Weather alerts tool.
//!
//! Fetches the active NWS alerts for a US state and renders them as a flat
//! text list.

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

use crate::domains::tools::common::{error_result, success_result};
use crate::domains::weather::WeatherService;

/// Parameters for the alerts tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAlertsParams {
    /// Two-letter US state code.
    #[schemars(description = "Two-letter state code (e.g. CA, NY)")]
    pub state: String,
}

/// Weather alerts tool implementation.
pub struct GetAlertsTool;

impl GetAlertsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-alerts";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather alerts for a state";

    /// Execute the tool logic.
    pub async fn execute(params: &GetAlertsParams, weather: &WeatherService) -> CallToolResult {
        let state = params.state.trim().to_uppercase();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return error_result(&format!(
                "Invalid state code: {}. Use a two-letter code such as CA or NY",
                params.state
            ));
        }

        info!("Fetching alerts for {}", state);
        let alerts = match weather.alerts(&state).await {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!("Alerts request failed: {}", e);
                return error_result("Failed to retrieve alerts data");
            }
        };

        if alerts.features.is_empty() {
            return success_result(format!("No active alerts for {state}"));
        }

        let formatted: Vec<String> = alerts
            .features
            .iter()
            .map(|f| f.properties.summary())
            .collect();
        success_result(format!(
            "Active alerts for {}:\n\n{}",
            state,
            formatted.join("\n")
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        weather: Arc<WeatherService>,
    ) -> Result<serde_json::Value, String> {
        let params: GetAlertsParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        let result = Self::execute(&params, &weather).await;
        Ok(crate::domains::tools::common::to_http_result(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetAlertsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(weather: Arc<WeatherService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let weather = weather.clone();
            async move {
                let params: GetAlertsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &weather).await)
            }
            .boxed()
        })
    }
}
