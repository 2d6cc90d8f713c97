use super::{BlockExtractor, Extraction};
use crate::error::Result;
use log::trace;

/// Counts `{` against `}` from the first line that opens a brace.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceExtractor;

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

impl BlockExtractor for BraceExtractor {
    fn extract(&self, lines: &[String], marker_index: usize) -> Result<Extraction> {
        trace!("Brace block search starting after line {}", marker_index + 1);
        let Some(start) = (marker_index + 1..lines.len()).find(|&i| lines[i].contains('{')) else {
            return Ok(Extraction::empty(marker_index));
        };

        let mut balance = 0i64;
        for (i, line) in lines.iter().enumerate().skip(start) {
            balance += brace_delta(line);
            if balance <= 0 {
                return Ok(Extraction::from_lines(&lines[start..=i], i));
            }
        }

        let end = lines.len() - 1;
        Ok(Extraction::from_lines(&lines[start..], end))
    }

    fn name(&self) -> &'static str {
        "brace"
    }
}
