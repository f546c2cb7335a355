//! Weather domain - National Weather Service API client.
//!
//! - `service` - HTTP client for the NWS alert and forecast endpoints
//! - `types` - response payload types and their text summaries
//! - `error` - domain error types

mod error;
pub mod service;
pub mod types;

pub use error::WeatherError;
pub use service::WeatherService;
