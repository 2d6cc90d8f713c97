//! Block extraction strategies selected by a profile's `block_type`
pub mod brace;
pub mod html_tag;
pub mod indentation;
pub mod marker;

use crate::error::Result;
use crate::profile::{BlockType, LanguageProfile};

pub use brace::BraceExtractor;
pub use html_tag::HtmlTagExtractor;
pub use indentation::IndentationExtractor;
pub use marker::MarkerExtractor;

/// Text of an extracted block and the index of the last line it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub end_index: usize,
}

impl Extraction {
    /// Joins `lines` and trims trailing whitespace from the result.
    pub fn from_lines(lines: &[String], end_index: usize) -> Self {
        Self {
            text: lines.join("\n").trim_end().to_string(),
            end_index,
        }
    }

    /// No block found after the marker at `marker_index`.
    pub fn empty(marker_index: usize) -> Self {
        Self {
            text: String::new(),
            end_index: marker_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Trait for block extraction strategies
pub trait BlockExtractor: Send {
    fn extract(&self, lines: &[String], marker_index: usize) -> Result<Extraction>;
    fn name(&self) -> &'static str;
}

/// Builds the strategy for `profile`, or `None` when its block type is unrecognized.
pub fn extractor_for(profile: &LanguageProfile) -> Option<Box<dyn BlockExtractor>> {
    match &profile.block_type {
        BlockType::Indentation => Some(Box::new(IndentationExtractor)),
        BlockType::Brace => Some(Box::new(BraceExtractor)),
        BlockType::Marker => Some(Box::new(MarkerExtractor::new(&profile.end_marker()))),
        BlockType::HtmlTag => Some(Box::new(HtmlTagExtractor::new(&profile.identifier))),
        BlockType::Unrecognized(_) => None,
    }
}

#[cfg(test)]
pub(crate) fn lines_of(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
