//! Blocks produced by the section transducer.

use serde::{Deserialize, Serialize};

use super::{Heading, ListBlock, SectionTag, TableBlock};

/// A special section with the lines buffered while it was open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section kind
    pub tag: SectionTag,

    /// Buffered content lines in source order
    pub lines: Vec<String>,
}

impl Section {
    /// Open an empty section.
    pub fn new(tag: SectionTag) -> Self {
        Self {
            tag,
            lines: Vec::new(),
        }
    }

    /// Buffer a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Whether nothing was buffered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A block-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Heading outside any section
    Heading(Heading),
    /// Paragraph of prose (source text, inline markup not yet rendered)
    Paragraph {
        /// Source text
        text: String,
    },
    /// Coalesced list items
    List(ListBlock),
    /// Coalesced table rows
    Table(TableBlock),
    /// A closed special section
    Section(Section),
}

/// A document as a sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in source order
    pub blocks: Vec<Block>,

    /// Number of source lines scanned
    pub line_count: usize,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Whether the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Section(s) => Some(s),
            _ => None,
        })
    }

    /// Headings emitted outside sections, in document order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading(h) => Some(h),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_accessors() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        doc.push(Block::Heading(Heading::new(2, "Intro")));
        doc.push(Block::Paragraph {
            text: "Hello".into(),
        });
        let mut faq = Section::new(SectionTag::Faq);
        faq.push("What?");
        doc.push(Block::Section(faq));

        assert_eq!(doc.headings().count(), 1);
        assert_eq!(doc.sections().count(), 1);
        assert_eq!(doc.sections().next().map(|s| s.lines.len()), Some(1));
    }
}
