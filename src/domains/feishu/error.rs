//! Feishu domain error types.

use thiserror::Error;

use super::reference::DocType;

/// Result type for Feishu domain operations.
pub type FeishuResult<T> = Result<T, FeishuError>;

/// Errors that can occur while retrieving Feishu document content.
///
/// None of these are retried or recovered locally; they propagate to the
/// tool boundary, which converts them into a text payload for the client.
#[derive(Debug, Error)]
pub enum FeishuError {
    /// The document type tag is outside the dispatchable set.
    #[error(
        "unsupported document type: {doc_type}. Supported types: {}",
        DocType::SUPPORTED
    )]
    UnsupportedType {
        /// The offending type tag, verbatim.
        doc_type: String,
    },

    /// The open platform returned a non-zero business code.
    #[error("Feishu API error (code {code}): {msg}")]
    RemoteApi { code: i64, msg: String },

    /// The open platform returned a non-success HTTP status.
    #[error("Feishu API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FeishuError {
    /// Create an unsupported-type error for the given tag.
    pub fn unsupported(doc_type: impl Into<String>) -> Self {
        Self::UnsupportedType {
            doc_type: doc_type.into(),
        }
    }

    /// Create a remote API error.
    pub fn remote(code: i64, msg: impl Into<String>) -> Self {
        Self::RemoteApi {
            code,
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_lists_the_closed_set() {
        let err = FeishuError::unsupported("wiki");
        let msg = err.to_string();
        assert!(msg.contains("wiki"));
        for tag in ["doc", "docx", "sheet", "sheets", "slides", "bitable", "file", "mindnote"] {
            assert!(msg.contains(tag), "missing {tag} in: {msg}");
        }
    }

    #[test]
    fn test_remote_error_carries_code_and_message() {
        let err = FeishuError::remote(99991663, "token invalid");
        assert_eq!(
            err.to_string(),
            "Feishu API error (code 99991663): token invalid"
        );
    }
}
