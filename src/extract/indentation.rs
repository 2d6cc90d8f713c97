use super::{BlockExtractor, Extraction};
use crate::error::Result;
use log::{debug, trace};

/// Collects the lines indented deeper than the first non-blank line after the marker.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndentationExtractor;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

impl BlockExtractor for IndentationExtractor {
    fn extract(&self, lines: &[String], marker_index: usize) -> Result<Extraction> {
        trace!("Indentation block search starting after line {}", marker_index + 1);
        let Some(start) = (marker_index + 1..lines.len()).find(|&i| !is_blank(&lines[i])) else {
            return Ok(Extraction::empty(marker_index));
        };

        let base_indent = indent_width(&lines[start]);
        debug!(
            "Block starts on line {}. Base indentation is {} spaces.",
            start + 1,
            base_indent
        );

        let end = (start + 1..lines.len())
            .find(|&i| !is_blank(&lines[i]) && indent_width(&lines[i]) <= base_indent)
            .map_or(lines.len() - 1, |dedent| dedent - 1);

        Ok(Extraction::from_lines(&lines[start..=end], end))
    }

    fn name(&self) -> &'static str {
        "indentation"
    }
}
