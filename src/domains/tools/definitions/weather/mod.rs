//! Weather tool definitions.

pub mod alerts;
pub mod forecast;

pub use alerts::{GetAlertsParams, GetAlertsTool};
pub use forecast::{GetForecastParams, GetForecastTool};
