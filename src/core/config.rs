//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// NWS weather API configuration.
    pub weather: WeatherConfig,

    /// Feishu open platform configuration.
    pub feishu: FeishuConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the National Weather Service API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the NWS API.
    pub base_url: String,

    /// User-Agent header sent with each request (required by the NWS API).
    pub user_agent: String,
}

/// Configuration for the Feishu open platform API.
///
/// Both `app_id` and `app_secret` must be present for the Feishu document
/// tool to be enabled; if either is missing the tool reports itself as
/// unconfigured instead of attempting remote calls.
#[derive(Clone, Serialize, Deserialize)]
pub struct FeishuConfig {
    /// Base URL of the open platform API.
    pub base_url: String,

    /// Application identifier issued by the platform.
    pub app_id: Option<String>,

    /// Application secret paired with the app id.
    pub app_secret: Option<String>,
}

impl FeishuConfig {
    /// Both credentials, or `None` when the Feishu domain is unconfigured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.app_id.as_deref(), self.app_secret.as_deref()) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FeishuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeishuConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id.as_deref().map(mask_secret))
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Mask a credential for display: keep the first and last four characters,
/// star out the rest. Short values are starred out entirely.
pub fn mask_secret(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!(
            "{}{}{}",
            &key[..4],
            "*".repeat(key.len() - 8),
            &key[key.len() - 4..]
        )
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "weather-app/1.0".to_string(),
        }
    }
}

impl Default for FeishuConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.feishu.cn".to_string(),
            app_id: None,
            app_secret: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "weather-feishu".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            weather: WeatherConfig::default(),
            feishu: FeishuConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server-level variables are prefixed with `MCP_` (e.g. `MCP_LOG_LEVEL`,
    /// `MCP_TRANSPORT`); the Feishu credentials use the platform's own
    /// conventional names `FEISHU_APP_ID` and `FEISHU_APP_SECRET`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("NWS_API_BASE") {
            config.weather.base_url = base_url;
        }

        if let Ok(base_url) = std::env::var("FEISHU_BASE_URL") {
            config.feishu.base_url = base_url;
        }

        config.feishu.app_id = std::env::var("FEISHU_APP_ID").ok().filter(|v| !v.is_empty());
        config.feishu.app_secret = std::env::var("FEISHU_APP_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        config
    }
}
