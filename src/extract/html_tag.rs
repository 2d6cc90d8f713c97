use super::{BlockExtractor, Extraction};
use crate::error::Result;
use log::{debug, trace};
use regex::Regex;

const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Balances opening and closing tags of the first element after the marker.
///
/// Only the tag name of that first element is tracked; nested elements with
/// other names never move the balance.
#[derive(Debug, Clone)]
pub struct HtmlTagExtractor {
    identifier: String,
}

impl HtmlTagExtractor {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
        }
    }

    /// Tag name of a line that opens an element, if it may start a block.
    fn opening_tag_name(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if !trimmed.starts_with('<')
            || trimmed.starts_with("</")
            || trimmed.contains(self.identifier.as_str())
        {
            return None;
        }
        let tag_name = tag_name_of(trimmed);
        (!SELF_CLOSING_TAGS.contains(&tag_name.as_str())).then_some(tag_name)
    }
}

/// Text between `<` and the first `>` or space, lowercased.
fn tag_name_of(trimmed: &str) -> String {
    let head = trimmed.split('>').next().unwrap_or_default();
    let head = head.split(' ').next().unwrap_or_default();
    head.replace('<', "").to_lowercase()
}

struct TagCounter {
    open: Regex,
    close: Regex,
}

impl TagCounter {
    fn new(tag_name: &str) -> Result<Self> {
        let escaped = regex::escape(tag_name);
        Ok(Self {
            // Lines carry no trailing newline, so a bare `<form` at end of line still opens.
            open: Regex::new(&format!(r"(?i)<\s*{escaped}(?:[\s>]|$)"))?,
            close: Regex::new(&format!(r"(?i)</\s*{escaped}\s*>"))?,
        })
    }

    fn delta(&self, line: &str) -> i64 {
        self.open.find_iter(line).count() as i64 - self.close.find_iter(line).count() as i64
    }
}

impl BlockExtractor for HtmlTagExtractor {
    fn extract(&self, lines: &[String], marker_index: usize) -> Result<Extraction> {
        trace!("HTML tag block search starting after line {}", marker_index + 1);
        let Some((start, tag_name)) = (marker_index + 1..lines.len())
            .find_map(|i| self.opening_tag_name(&lines[i]).map(|name| (i, name)))
        else {
            return Ok(Extraction::empty(marker_index));
        };
        debug!(
            "Block starts on line {}. Tracking only the tag '<{}>'",
            start + 1,
            tag_name
        );

        let counter = TagCounter::new(&tag_name)?;
        let mut balance = 0i64;
        for (i, line) in lines.iter().enumerate().skip(start) {
            balance += counter.delta(line);
            if balance <= 0 {
                return Ok(Extraction::from_lines(&lines[start..=i], i));
            }
        }

        let end = lines.len() - 1;
        Ok(Extraction::from_lines(&lines[start..], end))
    }

    fn name(&self) -> &'static str {
        "html_tag"
    }
}
