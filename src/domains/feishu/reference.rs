//! Document reference parsing.
//!
//! Callers address a document either by bare id/token or by pasting a full
//! URL from one of the two platform domains. This module turns that raw
//! string into a `(type, id)` pair. Parsing never fails: anything that is
//! not a recognized typed URL degrades to [`DocType::Unknown`], which the
//! service layer resolves through the wiki node lookup.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Closed set of document type tags used by the open platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Doc,
    Docx,
    Sheet,
    Sheets,
    Slides,
    Bitable,
    File,
    Mindnote,
    Wiki,
    /// Placeholder used while the concrete type is not yet known. Never
    /// dispatched to a fetcher directly; the wiki node resolver replaces it
    /// first.
    Unknown,
}

impl DocType {
    /// The dispatchable set, for error messages.
    pub const SUPPORTED: &'static str = "doc, docx, sheet, sheets, slides, bitable, file, mindnote";

    /// Parse a platform type tag. Returns `None` for tags outside the
    /// closed set (including "unknown", which is internal only).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "sheet" => Some(Self::Sheet),
            "sheets" => Some(Self::Sheets),
            "slides" => Some(Self::Slides),
            "bitable" => Some(Self::Bitable),
            "file" => Some(Self::File),
            "mindnote" => Some(Self::Mindnote),
            "wiki" => Some(Self::Wiki),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Sheet => "sheet",
            Self::Sheets => "sheets",
            Self::Slides => "slides",
            Self::Bitable => "bitable",
            Self::File => "file",
            Self::Mindnote => "mindnote",
            Self::Wiki => "wiki",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed document reference: the type tag and the id/token that follows
/// it in the URL (or the raw input when no URL was recognized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    pub doc_type: DocType,
    pub id: String,
}

/// `{domain}/{type}/{id}` where the type is one of the closed set and the id
/// runs until a path/query/fragment delimiter.
static TYPED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:feishu\.cn|larksuite\.com)/(doc|docx|sheet|sheets|mindnote|bitable|file|slides|wiki)/([^/?#]+)",
    )
    .expect("valid typed URL pattern")
});

/// Loose fallback for URLs from a known domain that do not match the typed
/// shape: keep the last path segment as the id. Deliberately permissive; the
/// extracted id is not validated further.
static LOOSE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:feishu\.cn|larksuite\.com)/[^/]*/([^/?#]+)").expect("valid loose URL pattern")
});

impl DocRef {
    /// Parse a raw user-supplied string into a document reference.
    pub fn parse(input: &str) -> Self {
        if input.contains("feishu.cn") || input.contains("larksuite.com") {
            if let Some(caps) = TYPED_URL.captures(input) {
                let doc_type = DocType::from_tag(&caps[1]).unwrap_or(DocType::Unknown);
                return Self {
                    doc_type,
                    id: caps[2].to_string(),
                };
            }
            if let Some(caps) = LOOSE_URL.captures(input) {
                return Self {
                    doc_type: DocType::Unknown,
                    id: caps[1].to_string(),
                };
            }
        }

        // No recognized domain: the whole string is the id.
        Self {
            doc_type: DocType::Unknown,
            id: input.to_string(),
        }
    }
}
