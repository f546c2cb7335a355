//! Weather domain error types.

use thiserror::Error;

/// Result type for weather domain operations.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Errors from the NWS API. The tool boundary converts these into the
/// friendly texts clients see; nothing is retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-success HTTP status.
    #[error("NWS API returned HTTP {0}")]
    Status(u16),
}
