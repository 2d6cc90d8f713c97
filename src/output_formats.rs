use crate::snippet::{Snippet, separator};
use colored::*;
use serde_json::json;
use std::time::Duration;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A finished search ready to be written out.
#[derive(Debug, Clone)]
pub struct Report {
    pub language: String,
    pub keywords: Vec<String>,
    pub snippets: Vec<Snippet>,
    pub elapsed: Duration,
}

impl Report {
    pub fn format(&self, format: OutputFormat, color: bool) -> String {
        match format {
            OutputFormat::Text => self.format_text(color),
            OutputFormat::Json => self.format_json(),
        }
    }

    fn timing_line(&self) -> String {
        format!(
            "Search completed in {:.2} seconds",
            self.elapsed.as_secs_f64()
        )
    }

    /// Plain-text report. With `color`, header lines are highlighted for a terminal.
    pub fn format_text(&self, color: bool) -> String {
        let mut output = vec![
            format!("---- Found {} snippet(s) ----", self.snippets.len()),
            format!("{}\n", self.timing_line()),
        ];

        if self.snippets.is_empty() {
            output.push("No snippets found matching your criteria.".to_string());
        } else {
            for snippet in &self.snippets {
                if color {
                    output.push(format!(
                        "{}\n{}\n\n{}",
                        snippet.location_line().cyan().bold(),
                        snippet.description_line().yellow(),
                        snippet.content
                    ));
                    output.push(separator().dimmed().to_string());
                } else {
                    output.push(snippet.to_string());
                    output.push(separator());
                }
            }
        }

        output.join("\n")
    }

    pub fn format_json(&self) -> String {
        let result = json!({
            "language": self.language,
            "keywords": self.keywords,
            "total_snippets": self.snippets.len(),
            "elapsed_seconds": self.elapsed.as_secs_f64(),
            "snippets": self.snippets,
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }
}
