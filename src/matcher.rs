use crate::profile::LanguageProfile;
use std::path::{Path, PathBuf};

/// A marker line that carries every requested keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub path: PathBuf,
    /// Zero-based index into the file's lines.
    pub line_index: usize,
    pub line: String,
    pub description: String,
}

impl MarkerMatch {
    pub fn line_number(&self) -> usize {
        self.line_index + 1
    }
}

/// Finds marker lines for one language profile and keyword set.
#[derive(Debug, Clone)]
pub struct MarkerMatcher {
    comment_start: String,
    comment_end: Option<String>,
    identifier: String,
    keywords: Vec<String>,
}

impl MarkerMatcher {
    /// Keywords are expected to be lowercase already.
    pub fn new(profile: &LanguageProfile, keywords: &[String]) -> Self {
        Self {
            comment_start: profile.comment_start.clone(),
            comment_end: profile.comment_end().map(str::to_string),
            identifier: profile.identifier.clone(),
            keywords: keywords.to_vec(),
        }
    }

    pub fn is_marker_line(&self, line: &str) -> bool {
        line.trim().starts_with(self.comment_start.as_str()) && line.contains(self.identifier.as_str())
    }

    pub fn has_all_keywords(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.keywords.iter().all(|kw| lowered.contains(kw.as_str()))
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.is_marker_line(line) && self.has_all_keywords(line)
    }

    /// Strips the delimiters and identifier (first occurrence of each, in that order).
    pub fn clean_description(&self, line: &str) -> String {
        let mut desc = line.trim().replacen(self.comment_start.as_str(), "", 1);
        if let Some(end) = &self.comment_end {
            desc = desc.replacen(end.as_str(), "", 1);
        }
        desc.replacen(self.identifier.as_str(), "", 1)
            .trim()
            .to_string()
    }

    /// Returns the first match at or after `from`.
    pub fn next_match(&self, path: &Path, lines: &[String], from: usize) -> Option<MarkerMatch> {
        lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, line)| self.is_match(line))
            .map(|(line_index, line)| MarkerMatch {
                path: path.to_path_buf(),
                line_index,
                line: line.clone(),
                description: self.clean_description(line),
            })
    }
}
