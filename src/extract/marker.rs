use super::{BlockExtractor, Extraction};
use crate::error::Result;
use log::trace;

/// Takes every line up to an explicit end marker.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    end_marker: String,
}

impl MarkerExtractor {
    pub fn new(end_marker: &str) -> Self {
        Self {
            end_marker: end_marker.to_string(),
        }
    }
}

impl BlockExtractor for MarkerExtractor {
    fn extract(&self, lines: &[String], marker_index: usize) -> Result<Extraction> {
        trace!(
            "Marker block search from line {}, looking for '{}'",
            marker_index + 1,
            self.end_marker
        );
        let start = marker_index + 1;
        if start >= lines.len() {
            return Ok(Extraction::empty(marker_index));
        }

        match (start..lines.len()).find(|&i| lines[i].contains(self.end_marker.as_str())) {
            Some(end) => Ok(Extraction::from_lines(&lines[start..end], end)),
            None => Ok(Extraction::from_lines(&lines[start..], lines.len() - 1)),
        }
    }

    fn name(&self) -> &'static str {
        "marker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines_of;

    #[test]
    fn excludes_end_marker_line() {
        let lines = lines_of("-- @snip users\nSELECT *\nFROM users;\n-- @snip END\nSELECT 1;");
        let block = MarkerExtractor::new("@snip END").extract(&lines, 0).unwrap();
        assert_eq!(block.text, "SELECT *\nFROM users;");
        assert_eq!(block.end_index, 3);
    }

    #[test]
    fn runs_to_end_of_file_without_end_marker() {
        let lines = lines_of("-- @snip\nSELECT 1;\nSELECT 2;\n\n");
        let block = MarkerExtractor::new("@snip END").extract(&lines, 0).unwrap();
        assert_eq!(block.text, "SELECT 1;\nSELECT 2;");
        assert_eq!(block.end_index, 3);
    }

    #[test]
    fn immediate_end_marker_gives_empty_text() {
        let lines = lines_of("-- @snip\n-- @snip END\n");
        let block = MarkerExtractor::new("@snip END").extract(&lines, 0).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.end_index, 1);
    }

    #[test]
    fn marker_on_last_line_is_empty() {
        let lines = lines_of("SELECT 1;\n-- @snip");
        let block = MarkerExtractor::new("@snip END").extract(&lines, 1).unwrap();
        assert_eq!(block, Extraction::empty(1));
    }
}
