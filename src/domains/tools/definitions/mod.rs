//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod feishu;
pub mod weather;

pub use feishu::{GetFeishuDocParams, GetFeishuDocTool};
pub use weather::{GetAlertsParams, GetAlertsTool, GetForecastParams, GetForecastTool};
