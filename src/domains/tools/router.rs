//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires the
//! shared domain services into them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::feishu::FeishuService;
use crate::domains::weather::WeatherService;

use super::definitions::{GetAlertsTool, GetFeishuDocTool, GetForecastTool};

/// Build the tool router with all registered tools.
///
/// `feishu` is `None` when the Feishu credentials are unconfigured; the
/// document tool still registers so clients see it, but it answers with the
/// unconfigured message.
pub fn build_tool_router<S>(
    weather: Arc<WeatherService>,
    feishu: Option<Arc<FeishuService>>,
) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetAlertsTool::create_route(weather.clone()))
        .with_route(GetForecastTool::create_route(weather))
        .with_route(GetFeishuDocTool::create_route(feishu))
}
