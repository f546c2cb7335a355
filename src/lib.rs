//! Weather + Feishu MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing two
//! remote services as callable tools:
//!
//! - The US National Weather Service public API (`get-alerts`, `get-forecast`)
//! - The Feishu/Lark open platform document API (`get-feishu-doc`)
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, the main server
//!   handler, and transport layer abstractions
//! - **domains**: Business logic organized by bounded contexts
//!   - **weather**: NWS API client and response formatting
//!   - **feishu**: document reference parsing, the remote capability surface,
//!     and per-type content fetchers
//!   - **tools**: MCP tool definitions, router, and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use weather_feishu_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer, TransportService};
