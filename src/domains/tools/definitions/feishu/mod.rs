//! Feishu tool definitions.

pub mod get_doc;

pub use get_doc::{GetFeishuDocParams, GetFeishuDocTool};
