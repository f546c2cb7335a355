//! Weather forecast tool.
//!
//! Two-step NWS lookup: resolve the coordinate pair to a grid point, then
//! fetch the forecast URL the grid point advertises. Each stage reports its
//! own friendly failure text.

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

/// Parameters for the forecast tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetForecastParams {
    /// Latitude of the location.
    #[schemars(description = "Latitude of the location")]
    pub latitude: f64,

    /// Longitude of the location.
    #[schemars(description = "Longitude of the location")]
    pub longitude: f64,
}

/// Weather forecast tool implementation.
pub struct GetForecastTool;

impl GetForecastTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-forecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather forecast for a location";

    /// Execute the tool logic.
    pub async fn execute(params: &GetForecastParams, weather: &WeatherService) -> CallToolResult {
        let (latitude, longitude) = (params.latitude, params.longitude);
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return error_result(&format!(
                "Coordinates out of range: {latitude}, {longitude}. Latitude must be within [-90, 90] and longitude within [-180, 180]"
            ));
        }

        info!("Fetching forecast for {}, {}", latitude, longitude);
        let points = match weather.grid_point(latitude, longitude).await {
            Ok(points) => points,
            Err(e) => {
                warn!("Grid point request failed: {}", e);
                return error_result(&format!(
                    "Failed to retrieve grid point data for coordinates: {latitude}, {longitude}. \
                     This location may not be supported by the NWS API (only US locations are supported)."
                ));
            }
        };

        let Some(forecast_url) = points.properties.forecast else {
            return error_result("Failed to get forecast URL from grid point data");
        };

        let forecast = match weather.forecast(&forecast_url).await {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!("Forecast request failed: {}", e);
                return error_result("Failed to retrieve forecast data");
            }
        };

        let periods = forecast.properties.periods;
        if periods.is_empty() {
            return error_result("No forecast periods available");
        }

        let formatted: Vec<String> = periods.iter().map(|p| p.summary()).collect();
        success_result(format!(
            "Forecast for {}, {}:\n\n{}",
            latitude,
            longitude,
            formatted.join("\n")
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        weather: Arc<WeatherService>,
    ) -> Result<serde_json::Value, String> {
        let params: GetForecastParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;
        let result = Self::execute(&params, &weather).await;
        Ok(crate::domains::tools::common::to_http_result(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetForecastParams>(),
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
                let params: GetForecastParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &weather).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WeatherConfig;

    fn offline_service() -> WeatherService {
        WeatherService::new(&WeatherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            user_agent: "test".to_string(),
        })
    }

    #[test]
    fn test_params_deserialize() {
        let params: GetForecastParams =
            serde_json::from_str(r#"{"latitude": 38.9, "longitude": -77.0}"#).unwrap();
        assert_eq!(params.latitude, 38.9);
        assert_eq!(params.longitude, -77.0);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_rejected() {
        let service = offline_service();
        for (lat, lon) in [(91.0, 0.0), (-91.0, 0.0), (0.0, 181.0), (0.0, -181.0)] {
            let result = GetForecastTool::execute(
                &GetForecastParams {
                    latitude: lat,
                    longitude: lon,
                },
                &service,
            )
            .await;
            assert_eq!(result.is_error, Some(true), "accepted {lat}, {lon}");
        }
    }

    #[tokio::test]
    async fn test_grid_point_failure_mentions_us_coverage() {
        use rmcp::model::RawContent;

        let service = offline_service();
        let result = GetForecastTool::execute(
            &GetForecastParams {
                latitude: 48.8566,
                longitude: 2.3522,
            },
            &service,
        )
        .await;
        assert_eq!(result.is_error, Some(true));
        if let Some(RawContent::Text(text)) = result.content.first().map(|c| &c.raw) {
            assert!(text.text.contains("only US locations are supported"));
        } else {
            panic!("expected text content");
        }
    }
}
