//! NWS API response types and their text summaries.
//!
//! Only the fields this server renders are modeled; everything else in the
//! GeoJSON payloads is ignored. Every field the API may omit is optional and
//! falls back to a placeholder in the summary, mirroring what clients of
//! this server have come to expect.

use serde::Deserialize;

/// Response of `/alerts?area={STATE}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

impl AlertProperties {
    /// Multi-line summary of one alert, terminated by a separator.
    pub fn summary(&self) -> String {
        [
            format!("Event: {}", self.event.as_deref().unwrap_or("Unknown")),
            format!("Area: {}", self.area_desc.as_deref().unwrap_or("Unknown")),
            format!("Severity: {}", self.severity.as_deref().unwrap_or("Unknown")),
            format!("Status: {}", self.status.as_deref().unwrap_or("Unknown")),
            format!(
                "Headline: {}",
                self.headline.as_deref().unwrap_or("No headline")
            ),
            "---".to_string(),
        ]
        .join("\n")
    }
}

/// Response of `/points/{lat},{lon}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsProperties {
    /// URL of the forecast endpoint for this grid point.
    pub forecast: Option<String>,
}

/// Response of the per-grid-point forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub short_forecast: Option<String>,
}

impl ForecastPeriod {
    /// Multi-line summary of one forecast period, terminated by a separator.
    pub fn summary(&self) -> String {
        let temperature = self
            .temperature
            .map(|t| t.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        [
            format!("{}:", self.name.as_deref().unwrap_or("Unknown")),
            format!(
                "Temperature: {}°{}",
                temperature,
                self.temperature_unit.as_deref().unwrap_or("F")
            ),
            format!(
                "Wind: {} {}",
                self.wind_speed.as_deref().unwrap_or("Unknown"),
                self.wind_direction.as_deref().unwrap_or("")
            ),
            self.short_forecast
                .clone()
                .unwrap_or_else(|| "No forecast available".to_string()),
            "---".to_string(),
        ]
        .join("\n")
    }
}
