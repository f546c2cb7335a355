//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: the two remote-service integrations and the tool surface exposed
//! over the protocol.

pub mod feishu;
pub mod tools;
pub mod weather;
