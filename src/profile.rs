//! Per-language snippet marker rules
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// How the block following a marker is delimited.
///
/// Unrecognized names from the config file are kept as [`BlockType::Unrecognized`]
/// so that a single bad profile only disables extraction for its own markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Indentation,
    Brace,
    Marker,
    HtmlTag,
    Unrecognized(String),
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "indentation" => BlockType::Indentation,
            "brace" => BlockType::Brace,
            "marker" => BlockType::Marker,
            "html_tag" => BlockType::HtmlTag,
            _ => BlockType::Unrecognized(value),
        }
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Indentation => write!(f, "indentation"),
            BlockType::Brace => write!(f, "brace"),
            BlockType::Marker => write!(f, "marker"),
            BlockType::HtmlTag => write!(f, "html_tag"),
            BlockType::Unrecognized(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    #[serde(default)]
    pub extensions: Vec<String>,
    pub comment_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_end: Option<String>,
    pub identifier: String,
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_marker: Option<String>,
}

impl LanguageProfile {
    pub fn new(comment_start: &str, identifier: &str, block_type: BlockType) -> Self {
        Self {
            extensions: Vec::new(),
            comment_start: comment_start.to_string(),
            comment_end: None,
            identifier: identifier.to_string(),
            block_type,
            end_marker: None,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment_end(mut self, comment_end: &str) -> Self {
        self.comment_end = Some(comment_end.to_string());
        self
    }

    pub fn with_end_marker(mut self, end_marker: &str) -> Self {
        self.end_marker = Some(end_marker.to_string());
        self
    }

    /// The closing delimiter, treating an empty string as absent.
    pub fn comment_end(&self) -> Option<&str> {
        self.comment_end.as_deref().filter(|end| !end.is_empty())
    }

    /// Text that terminates a `marker` block, `"<identifier> END"` unless configured.
    pub fn end_marker(&self) -> Cow<'_, str> {
        match self.end_marker.as_deref() {
            Some(marker) if !marker.is_empty() => Cow::Borrowed(marker),
            _ => Cow::Owned(format!("{} END", self.identifier)),
        }
    }
}
