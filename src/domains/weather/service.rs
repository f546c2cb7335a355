//! NWS API client.
//!
//! Thin typed client over the three endpoints the weather tools use. The
//! forecast is a two-step lookup: a grid-point call yields a forecast URL,
//! which is then fetched as-is. The tool layer composes the steps so it can
//! report stage-specific failures.

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{WeatherError, WeatherResult};
use super::types::{AlertsResponse, ForecastResponse, PointsResponse};
use crate::core::config::WeatherConfig;

/// HTTP client for the National Weather Service API.
pub struct WeatherService {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl WeatherService {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Active alerts for a two-letter state code (already uppercased).
    pub async fn alerts(&self, state: &str) -> WeatherResult<AlertsResponse> {
        let url = format!("{}/alerts?area={}", self.base_url, state);
        self.get_json(&url).await
    }

    /// Grid-point lookup for a coordinate pair.
    pub async fn grid_point(&self, latitude: f64, longitude: f64) -> WeatherResult<PointsResponse> {
        let url = format!("{}/points/{:.4},{:.4}", self.base_url, latitude, longitude);
        self.get_json(&url).await
    }

    /// Fetch a forecast from the absolute URL a grid-point lookup returned.
    pub async fn forecast(&self, forecast_url: &str) -> WeatherResult<ForecastResponse> {
        self.get_json(forecast_url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> WeatherResult<T> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/geo+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> WeatherService {
        WeatherService::new(&WeatherConfig {
            base_url: server.uri(),
            user_agent: "weather-app/1.0".to_string(),
        })
    }

    #[tokio::test]
    async fn test_alerts_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .and(query_param("area", "CA"))
            .and(header("user-agent", "weather-app/1.0"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": [
                    { "properties": { "event": "Heat Advisory", "severity": "Moderate" } }
                ]
            })))
            .mount(&server)
            .await;

        let alerts = service_for(&server).alerts("CA").await.unwrap();
        assert_eq!(alerts.features.len(), 1);
        assert_eq!(
            alerts.features[0].properties.event.as_deref(),
            Some("Heat Advisory")
        );
    }

    #[tokio::test]
    async fn test_grid_point_formats_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/points/38.8894,-77.0352"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": { "forecast": "https://example.test/forecast" }
            })))
            .mount(&server)
            .await;

        let points = service_for(&server)
            .grid_point(38.8894, -77.0352)
            .await
            .unwrap();
        assert_eq!(
            points.properties.forecast.as_deref(),
            Some("https://example.test/forecast")
        );
    }

    #[tokio::test]
    async fn test_forecast_follows_absolute_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gridpoints/LWX/97,71/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {
                    "periods": [ { "name": "Tonight", "temperature": 65 } ]
                }
            })))
            .mount(&server)
            .await;

        let url = format!("{}/gridpoints/LWX/97,71/forecast", server.uri());
        let forecast = service_for(&server).forecast(&url).await.unwrap();
        assert_eq!(forecast.properties.periods.len(), 1);
        assert_eq!(
            forecast.properties.periods[0].name.as_deref(),
            Some("Tonight")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = service_for(&server).alerts("ZZ").await.unwrap_err();
        assert!(matches!(err, WeatherError::Status(404)));
    }
}
