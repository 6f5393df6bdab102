//! Table types and cell splitting.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {3,}").unwrap());
static SPACE_SEPARATED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S {3,}\S").unwrap());
static SEPARATOR_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

/// How the cells of a table row are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `a | b | c`
    Pipe,
    /// `a\tb\tc`
    Tab,
    /// Three or more consecutive spaces
    Spaces,
    /// Whole line is a single cell
    None,
}

impl Delimiter {
    /// Detect the delimiter of a line that carries at least two fields.
    ///
    /// Precedence is pipe, then tab, then multi-space. Returns `None` when
    /// the line is not a table row under any delimiter.
    pub fn detect(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.contains('|') && split_cells(line, Delimiter::Pipe).len() >= 2 {
            return Some(Delimiter::Pipe);
        }
        if line.contains('\t') && non_empty_fields(line, Delimiter::Tab) >= 2 {
            return Some(Delimiter::Tab);
        }
        if SPACE_SEPARATED.is_match(line) && non_empty_fields(line, Delimiter::Spaces) >= 2 {
            return Some(Delimiter::Spaces);
        }
        None
    }

    /// Whether `line` is a row with at least two fields under this delimiter.
    pub fn matches(self, line: &str) -> bool {
        match self {
            Delimiter::None => false,
            Delimiter::Pipe => line.contains('|') && split_cells(line, self).len() >= 2,
            Delimiter::Tab | Delimiter::Spaces => non_empty_fields(line, self) >= 2,
        }
    }
}

fn non_empty_fields(line: &str, delimiter: Delimiter) -> usize {
    split_cells(line, delimiter)
        .iter()
        .filter(|c| !c.is_empty())
        .count()
}

/// Split a row into trimmed cells.
///
/// For pipe rows, a single leading and trailing pipe are ignored so that
/// `| a | b |` and `a | b` both yield two cells.
pub fn split_cells(line: &str, delimiter: Delimiter) -> Vec<String> {
    let line = line.trim();
    match delimiter {
        Delimiter::Pipe => {
            let inner = line.strip_prefix('|').unwrap_or(line);
            let inner = inner.strip_suffix('|').unwrap_or(inner);
            inner.split('|').map(|c| c.trim().to_string()).collect()
        }
        Delimiter::Tab => line.split('\t').map(|c| c.trim().to_string()).collect(),
        Delimiter::Spaces => MULTI_SPACE
            .split(line)
            .map(|c| c.trim().to_string())
            .collect(),
        Delimiter::None => vec![line.to_string()],
    }
}

/// Whether a row is a markdown header separator such as `|---|:---:|`.
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL.is_match(c))
}

/// A table parsed from source rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Delimiter fixed from the first row
    pub delimiter: Delimiter,

    /// Rows of cells; the first row is the header
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create an empty table with the given delimiter.
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            rows: Vec::new(),
        }
    }

    /// Parse raw row lines.
    ///
    /// The delimiter is detected from the first non-empty line (falling back
    /// to a single column) and applied to every following line. Blank lines
    /// and markdown separator rows are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let delimiter = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .find(|l| !l.is_empty())
            .and_then(Delimiter::detect)
            .unwrap_or(Delimiter::None);

        let mut table = Self::new(delimiter);
        for line in lines {
            table.push_line(line.as_ref());
        }
        table
    }

    /// Split and append one raw row, skipping blanks and separator rows.
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let cells = split_cells(line, self.delimiter);
        if is_separator_row(&cells) {
            return;
        }
        self.rows.push(cells);
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// The header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Body rows, right-padded with empty cells to the header width.
    ///
    /// Rows longer than the header keep their extra cells.
    pub fn body(&self) -> Vec<Vec<String>> {
        let width = self.column_count();
        self.rows
            .iter()
            .skip(1)
            .map(|row| {
                let mut row = row.clone();
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiters() {
        assert_eq!(Delimiter::detect("A | B | C"), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::detect("| A | B |"), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::detect("A\tB"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::detect("Name    Age"), Some(Delimiter::Spaces));
        assert_eq!(Delimiter::detect("Just a sentence."), None);
        assert_eq!(Delimiter::detect("a |"), None);
    }

    #[test]
    fn test_pipe_beats_tab() {
        assert_eq!(Delimiter::detect("A|B\tC"), Some(Delimiter::Pipe));
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |", Delimiter::Pipe), vec!["a", "b"]);
        assert_eq!(split_cells("a   b    c", Delimiter::Spaces), vec!["a", "b", "c"]);
        assert_eq!(split_cells("  whole line ", Delimiter::None), vec!["whole line"]);
    }

    #[test]
    fn test_table_padding() {
        let table = TableBlock::from_lines(&["A|B|C", "1|2"]);
        assert_eq!(table.delimiter, Delimiter::Pipe);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.body(), vec![vec!["1", "2", ""]]);
    }

    #[test]
    fn test_separator_rows_skipped() {
        let table = TableBlock::from_lines(&["| A | B |", "|---|:---:|", "| 1 | 2 |"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_single_column_fallback() {
        let table = TableBlock::from_lines(&["", "Heading only", "row"]);
        assert_eq!(table.delimiter, Delimiter::None);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.body().len(), 1);
    }
}
