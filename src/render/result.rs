//! Rendering result with outline and statistics.

use crate::model::Outline;
use serde::{Deserialize, Serialize};

/// Result of rendering a document: final markup, its outline and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// The rendered HTML
    pub html: String,

    /// Headings of the final HTML, as linked from the table of contents
    pub outline: Outline,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl RenderedDocument {
    /// Create a new rendered document.
    pub fn new(html: String, outline: Outline, stats: ConversionStats) -> Self {
        Self {
            html,
            outline,
            stats,
        }
    }

    /// Create a result with just markup; the outline is read from it.
    pub fn html_only(html: String) -> Self {
        let outline = super::toc::collect_outline(&html);
        Self {
            html,
            outline,
            stats: ConversionStats::default(),
        }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Source lines scanned
    pub line_count: usize,

    /// Headings emitted outside sections
    pub heading_count: usize,

    /// Paragraphs emitted outside sections
    pub paragraph_count: usize,

    /// List containers emitted outside sections
    pub list_count: usize,

    /// Items across those lists
    pub list_item_count: usize,

    /// Tables emitted outside sections
    pub table_count: usize,

    /// Special sections rendered
    pub section_count: usize,

    /// Ignore sections dropped
    pub ignored_section_count: usize,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Count a list and its items.
    pub fn add_list(&mut self, items: usize) {
        self.list_count += 1;
        self.list_item_count += items;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment rendered section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Increment ignored section count.
    pub fn add_ignored_section(&mut self) {
        self.ignored_section_count += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.line_count += other.line_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.section_count += other.section_count;
        self.ignored_section_count += other.ignored_section_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_stats_merge() {
        let mut stats1 = ConversionStats::new();
        stats1.paragraph_count = 5;
        stats1.add_list(3);

        let stats2 = ConversionStats {
            paragraph_count: 3,
            table_count: 1,
            section_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.list_count, 1);
        assert_eq!(stats1.list_item_count, 3);
        assert_eq!(stats1.table_count, 1);
        assert_eq!(stats1.section_count, 4);
    }

    #[test]
    fn test_html_only_reads_outline() {
        let result = RenderedDocument::html_only("<h2 id=\"a\">A</h2>\n<p>x</p>".to_string());
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.stats, ConversionStats::default());
        assert_eq!(result.html_len(), 26);
    }
}
