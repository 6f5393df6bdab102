//! Section-state transducer.
//!
//! A single pass over classified lines. Outside a section, headings, lists,
//! tables and prose become blocks directly. A section start switches to
//! buffering until an end directive, the next section start, or the end of
//! input closes it. A section opened by a trigger phrase also closes at the
//! next heading that is not part of its content. Only one section is ever
//! open.

use super::classifier::{LineClassifier, LineKind};
use super::inline::strip_inline;
use super::table_detector::{TableDetector, TableDetectorConfig};
use super::ParseOptions;
use crate::model::{
    Block, Document, Heading, ListBlock, ListKind, Section, SectionTag, TableBlock,
};

/// Transducer state.
#[derive(Debug)]
enum State {
    Idle,
    InSection {
        section: Section,
        /// Opened by a trigger phrase, so a heading may close it
        by_phrase: bool,
    },
}

/// A list being coalesced, with the blank lines seen since its last item.
#[derive(Debug)]
struct OpenList {
    list: ListBlock,
    gap: usize,
}

/// Turns a line stream into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct SectionTransducer {
    classifier: LineClassifier,
    tables: TableDetector,
}

impl SectionTransducer {
    /// Create a transducer with the given options.
    pub fn new(options: ParseOptions) -> Self {
        let tables = TableDetector::with_config(TableDetectorConfig {
            max_blank_gap: options.max_list_gap.max(1),
        });
        Self {
            classifier: LineClassifier::new(options),
            tables,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        self.classifier.options()
    }

    /// Split `text` into lines and run the pass.
    pub fn parse(&self, text: &str) -> Document {
        let lines: Vec<&str> = text.lines().collect();
        self.run(&lines)
    }

    /// Run the pass over pre-split lines.
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> Document {
        let mut pass = Pass {
            document: Document {
                blocks: Vec::new(),
                line_count: lines.len(),
            },
            state: State::Idle,
            list: None,
            max_list_gap: self.options().max_list_gap,
        };

        let mut index = 0;
        while index < lines.len() {
            let kind = self.classifier.classify(lines, index);

            if let (State::Idle, LineKind::TableRow { delimiter, .. }) = (&pass.state, &kind) {
                pass.flush_list();
                let found = self.tables.collect(lines, index, *delimiter);
                if !found.table.is_empty() {
                    pass.document.push(Block::Table(found.table));
                }
                index = found.end.max(index + 1);
                continue;
            }

            pass.step(kind, lines[index].as_ref().trim(), index);
            index += 1;
        }

        pass.finish()
    }
}

/// Mutable state of one pass.
struct Pass {
    document: Document,
    state: State,
    list: Option<OpenList>,
    max_list_gap: usize,
}

impl Pass {
    fn step(&mut self, kind: LineKind, raw: &str, index: usize) {
        if let LineKind::Heading(heading) = &kind {
            if self.heading_closes_section(heading, raw) {
                log::debug!("line {}: heading closes the open section", index + 1);
                self.close_section();
            }
        }

        match kind {
            LineKind::SectionStart {
                tag,
                heading,
                by_phrase,
            } => {
                self.close_section();
                self.open_section(tag, heading, by_phrase, index);
            }
            LineKind::SectionEnd => {
                if matches!(self.state, State::Idle) {
                    log::debug!("line {}: end directive with no open section", index + 1);
                }
                self.close_section();
            }
            LineKind::Blank if matches!(self.state, State::InSection { .. }) => {}
            kind => {
                if let State::InSection { section, .. } = &mut self.state {
                    if section.tag.keeps_raw_rows() {
                        section.push(raw);
                    } else if let Some(text) = kind.buffer_text() {
                        section.push(text);
                    }
                    return;
                }
                self.emit(kind);
            }
        }
    }

    /// Handle a content line outside any section.
    fn emit(&mut self, kind: LineKind) {
        match kind {
            LineKind::Blank => {
                if let Some(open) = self.list.as_mut() {
                    open.gap += 1;
                }
            }
            LineKind::ListItem { kind, text } => self.push_item(kind, text),
            LineKind::Heading(heading) => {
                self.flush_list();
                self.document.push(Block::Heading(heading));
            }
            LineKind::Prose(text) => {
                self.flush_list();
                self.document.push(Block::Paragraph { text });
            }
            LineKind::TableRow { raw, .. } => {
                // Rows are normally coalesced by the caller; a lone row
                // still becomes a table.
                self.flush_list();
                let table = TableBlock::from_lines(&[raw]);
                self.document.push(Block::Table(table));
            }
            LineKind::SectionStart { .. } | LineKind::SectionEnd => {}
        }
    }

    fn push_item(&mut self, kind: ListKind, text: String) {
        let continues = self
            .list
            .as_ref()
            .is_some_and(|open| open.list.kind == kind && open.gap <= self.max_list_gap);
        if !continues {
            self.flush_list();
            self.list = Some(OpenList {
                list: ListBlock::new(kind),
                gap: 0,
            });
        }
        if let Some(open) = self.list.as_mut() {
            open.list.push(text);
            open.gap = 0;
        }
    }

    fn flush_list(&mut self) {
        if let Some(open) = self.list.take() {
            if !open.list.is_empty() {
                self.document.push(Block::List(open.list));
            }
        }
    }

    /// Whether `heading` ends a section opened by a trigger phrase.
    ///
    /// Label lines ending in `:` (`Pros:`, `Step one:`) and, inside an FAQ,
    /// questions are section content. A call to action holds free-form
    /// lines, so only a markdown heading ends it.
    fn heading_closes_section(&self, heading: &Heading, raw: &str) -> bool {
        let State::InSection {
            section,
            by_phrase: true,
        } = &self.state
        else {
            return false;
        };
        match section.tag {
            SectionTag::Cta | SectionTag::Cta1 | SectionTag::Cta2 => raw.starts_with('#'),
            SectionTag::Faq if heading.text.ends_with('?') => false,
            _ => !strip_inline(raw).trim_end().ends_with(':'),
        }
    }

    fn open_section(
        &mut self,
        tag: SectionTag,
        heading: Option<Heading>,
        by_phrase: bool,
        index: usize,
    ) {
        self.flush_list();
        log::debug!("line {}: open {} section", index + 1, tag);

        if let Some(heading) = heading {
            if !tag.suppresses_trigger_heading() {
                self.document.push(Block::Heading(heading));
            }
        }
        self.state = State::InSection {
            section: Section::new(tag),
            by_phrase,
        };
    }

    fn close_section(&mut self) {
        let State::InSection { section, .. } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return;
        };
        log::debug!(
            "close {} section with {} lines",
            section.tag,
            section.lines.len()
        );
        self.document.push(Block::Section(section));
    }

    fn finish(mut self) -> Document {
        self.flush_list();
        self.close_section();
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Delimiter;

    fn parse(text: &str) -> Document {
        SectionTransducer::default().parse(text)
    }

    #[test]
    fn test_idle_blocks() {
        let doc = parse("GETTING STARTED\n\nThis is a normal sentence.\n- one\n- two");
        assert!(matches!(&doc.blocks[0], Block::Heading(h) if h.text == "GETTING STARTED"));
        assert!(matches!(&doc.blocks[1], Block::Paragraph { text } if text == "This is a normal sentence."));
        assert!(matches!(&doc.blocks[2], Block::List(l) if l.len() == 2));
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.line_count, 5);
    }

    #[test]
    fn test_list_coalescing_across_single_blank() {
        let doc = parse("- one\n\n- two\n\n\n- three");
        let lists: Vec<_> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::List(l) => Some(l.len()),
                _ => None,
            })
            .collect();
        assert_eq!(lists, vec![2, 1]);
    }

    #[test]
    fn test_list_kind_change_splits() {
        let doc = parse("- apples\n1) first\n2) second");
        assert!(matches!(&doc.blocks[0], Block::List(l) if l.kind == ListKind::Unordered));
        assert!(matches!(&doc.blocks[1], Block::List(l) if l.kind == ListKind::Ordered && l.len() == 2));
    }

    #[test]
    fn test_bracket_section_buffers_lines() {
        let doc = parse("<KEY-TAKEAWAYS>\n- First point\nSecond point\n\n<KEY-TAKEAWAYS END>\nAfter.");
        let section = doc.sections().next().unwrap();
        assert_eq!(section.tag, SectionTag::KeyTakeaways);
        assert_eq!(section.lines, vec!["First point", "Second point"]);
        assert!(matches!(doc.blocks.last(), Some(Block::Paragraph { text }) if text == "After."));
    }

    #[test]
    fn test_faq_trigger_heading_suppressed() {
        let doc = parse("FAQ\nWhat is X?\nX is Y.");
        assert_eq!(doc.headings().count(), 0);
        let section = doc.sections().next().unwrap();
        assert_eq!(section.tag, SectionTag::Faq);
        assert_eq!(section.lines, vec!["What is X?", "X is Y."]);
    }

    #[test]
    fn test_visible_trigger_heading() {
        let doc = parse("Key Takeaways\n- Fast\n- Cheap");
        let heading = doc.headings().next().unwrap();
        assert_eq!(heading.text, "Key Takeaways");
        assert_eq!(doc.sections().next().unwrap().tag, SectionTag::KeyTakeaways);
    }

    #[test]
    fn test_new_trigger_closes_open_section() {
        let doc = parse("<FAQ>\nWhat is X?\nX is Y.\n<STEPS>\nMix: stir it\n");
        let tags: Vec<_> = doc.sections().map(|s| s.tag.clone()).collect();
        assert_eq!(tags, vec![SectionTag::Faq, SectionTag::Steps]);
        assert_eq!(doc.sections().next().unwrap().lines.len(), 2);
    }

    #[test]
    fn test_unterminated_section_closed_at_end() {
        let doc = parse("Intro text here.\n<IGNORE>\nsecret line");
        let section = doc.sections().next().unwrap();
        assert_eq!(section.tag, SectionTag::Ignore);
        assert_eq!(section.lines, vec!["secret line"]);
    }

    #[test]
    fn test_table_section_keeps_raw_rows() {
        let doc = parse("<TABLE>\nA|B|C\n1|2\n<TABLE END>");
        let section = doc.sections().next().unwrap();
        assert_eq!(section.lines, vec!["A|B|C", "1|2"]);
    }

    #[test]
    fn test_idle_table_coalesced() {
        let doc = parse("Name | Price\nTea | 3\n\nCoffee | 4\n\nDone here.");
        match &doc.blocks[0] {
            Block::Table(table) => {
                assert_eq!(table.delimiter, Delimiter::Pipe);
                assert_eq!(table.rows.len(), 3);
            }
            other => panic!("expected table, got {other:?}"),
        }
        assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn test_heading_closes_phrase_section() {
        let doc = parse("Key Takeaways\n- Fast\n- Cheap\n\n## Pricing\nIt costs five dollars a month.");
        let section = doc.sections().next().unwrap();
        assert_eq!(section.tag, SectionTag::KeyTakeaways);
        assert_eq!(section.lines, vec!["Fast", "Cheap"]);

        let headings: Vec<_> = doc.headings().map(|h| h.text.as_str()).collect();
        assert_eq!(headings, vec!["Key Takeaways", "Pricing"]);
        assert!(matches!(doc.blocks.last(), Some(Block::Paragraph { text }) if text == "It costs five dollars a month."));
    }

    #[test]
    fn test_phrase_toc_leaves_body_alone() {
        let doc = parse("Table of Contents\n\n## Introduction\nThis post explains things.\n\n## Details\nMore words here.");
        let toc = doc.sections().next().unwrap();
        assert_eq!(toc.tag, SectionTag::Toc);
        assert!(toc.lines.is_empty());
        assert_eq!(doc.headings().count(), 2);
        assert_eq!(doc.blocks.len(), 5);
    }

    #[test]
    fn test_section_content_headings_stay_buffered() {
        // FAQ questions
        let doc = parse("FAQ\nWhat is X?\nX is Y.\nHow Does It Scale?\nLinearly.");
        assert_eq!(doc.sections().next().unwrap().lines.len(), 4);
        assert_eq!(doc.headings().count(), 0);

        // label lines
        let doc = parse("Pros and Cons\nPros:\n- Fast\nCons:\n- Loud");
        assert_eq!(doc.sections().next().unwrap().lines, vec!["Pros", "Fast", "Cons", "Loud"]);

        // call to action headline
        let doc = parse("Call to Action\nStart Your Free Trial\nNo card needed.\n## Pricing Details\nRead on.");
        assert_eq!(
            doc.sections().next().unwrap().lines,
            vec!["Start Your Free Trial", "No card needed."]
        );
        assert!(doc.headings().any(|h| h.text == "Pricing Details"));
    }

    #[test]
    fn test_bracket_section_ignores_headings() {
        let doc = parse("<BENEFITS>\n## Saves Time\nSaves money\n<BENEFITS END>");
        assert_eq!(doc.headings().count(), 0);
        assert_eq!(doc.sections().next().unwrap().lines, vec!["Saves Time", "Saves money"]);
    }

    #[test]
    fn test_stray_end_directive_ignored() {
        let doc = parse("<FAQ END>\nHello there.");
        assert_eq!(doc.sections().count(), 0);
        assert_eq!(doc.blocks.len(), 1);
    }
}
