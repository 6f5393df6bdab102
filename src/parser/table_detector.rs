//! Table run detection outside sections.
//!
//! A table starts at a delimited row and extends over following rows that
//! split on the same delimiter. A blank line does not end the table when the
//! next non-blank line is another row; anything else does.

use super::triggers::match_bracket_tag;
use crate::model::{Delimiter, TableBlock};

/// A run of table rows found in the line stream.
#[derive(Debug, Clone)]
pub struct DetectedTable {
    /// Index of the first row
    pub start: usize,
    /// Index one past the last row consumed
    pub end: usize,
    /// The coalesced rows
    pub table: TableBlock,
}

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Blank lines allowed between two rows of the same table
    pub max_blank_gap: usize,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self { max_blank_gap: 1 }
    }
}

/// Coalesces consecutive table rows with look-ahead across blank lines.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Collect the table starting at `lines[start]`, whose delimiter has
    /// already been detected.
    pub fn collect<S: AsRef<str>>(
        &self,
        lines: &[S],
        start: usize,
        delimiter: Delimiter,
    ) -> DetectedTable {
        let mut table = TableBlock::new(delimiter);
        let mut end = start;
        let mut index = start;

        while index < lines.len() {
            let line = lines[index].as_ref().trim();
            if line.is_empty() {
                let next = self.next_row(lines, index, delimiter);
                match next {
                    Some(row) => {
                        index = row;
                        continue;
                    }
                    None => break,
                }
            }
            if !is_row(line, delimiter) {
                break;
            }
            table.push_line(line);
            index += 1;
            end = index;
        }

        log::debug!(
            "table of {} rows at line {} ({:?})",
            table.rows.len(),
            start + 1,
            delimiter
        );
        DetectedTable { start, end, table }
    }

    /// Index of the row following a blank run starting at `index`, if the
    /// run is short enough and is followed by a row.
    fn next_row<S: AsRef<str>>(
        &self,
        lines: &[S],
        index: usize,
        delimiter: Delimiter,
    ) -> Option<usize> {
        let mut blanks = 0;
        for (offset, line) in lines[index..].iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                blanks += 1;
                if blanks > self.config.max_blank_gap {
                    return None;
                }
                continue;
            }
            return is_row(line, delimiter).then_some(index + offset);
        }
        None
    }
}

fn is_row(line: &str, delimiter: Delimiter) -> bool {
    match_bracket_tag(line).is_none() && delimiter.matches(line)
}
