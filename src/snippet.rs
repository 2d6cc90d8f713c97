use crate::extract::Extraction;
use crate::matcher::MarkerMatch;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Width of the `=` line placed between rendered snippets.
pub const SEPARATOR_WIDTH: usize = 70;

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

fn serialize_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// One extracted block together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    pub line: usize,
    pub description: String,
    pub content: String,
}

impl Snippet {
    pub fn assemble(marker: MarkerMatch, extraction: Extraction) -> Self {
        Self {
            line: marker.line_number(),
            path: marker.path,
            description: marker.description,
            content: extraction.text,
        }
    }

    pub fn location_line(&self) -> String {
        format!(
            "--- SNIPPET FOUND IN: {} (Line {}) ---",
            self.path.display(),
            self.line
        )
    }

    pub fn description_line(&self) -> String {
        format!("--- DESCRIPTION: {} ---", self.description)
    }

    /// The two header lines followed by a blank line.
    pub fn header(&self) -> String {
        format!("{}\n{}\n\n", self.location_line(), self.description_line())
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.header(), self.content)
    }
}
