//! Feishu document domain.
//!
//! This module handles retrieval of Feishu/Lark document content:
//!
//! - `reference` - parsing a raw user string (bare id or URL) into a typed
//!   document reference
//! - `api` - the capability surface consumed from the open platform, as a
//!   trait so tests can substitute a canned double
//! - `client` - the reqwest-backed implementation of that surface
//! - `service` - per-type content fetchers, the type dispatcher, and wiki
//!   node resolution
//! - `error` - domain error types

pub mod api;
pub mod client;
mod error;
pub mod reference;
pub mod service;

pub use api::FeishuApi;
pub use client::FeishuClient;
pub use error::FeishuError;
pub use reference::{DocRef, DocType};
pub use service::FeishuService;
