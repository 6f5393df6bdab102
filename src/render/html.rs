//! HTML rendering for parsed documents.

use std::collections::HashSet;

use crate::model::{unique_id, Block, Document, Heading, ListBlock, Outline, SectionTag};
use crate::parser::render_inline;

use super::sections::{render_section, render_table};
use super::{toc, CleanupPipeline, ConversionStats, RenderOptions, RenderedDocument};

/// Escape text content.
pub(crate) fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape a double-quoted attribute value.
pub(crate) fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(doc).html
}

/// Convert a document to HTML with outline and statistics.
pub fn render_document(doc: &Document, options: &RenderOptions) -> RenderedDocument {
    HtmlRenderer::new(options.clone()).render(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: ConversionStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ConversionStats::new(),
        }
    }

    /// Render a document.
    ///
    /// Blocks are assembled in order, the table of contents is reconciled
    /// against the headings of the assembled markup, and cleanup runs last
    /// when configured.
    pub fn render(mut self, doc: &Document) -> RenderedDocument {
        self.stats.line_count = doc.line_count;
        let outline = assign_heading_ids(doc);

        let mut fragments = Vec::with_capacity(doc.blocks.len());
        let mut headings = outline.iter();
        for block in &doc.blocks {
            let fragment = match block {
                Block::Heading(_) => match headings.next() {
                    Some(heading) => {
                        self.stats.add_heading();
                        render_heading(heading)
                    }
                    None => String::new(),
                },
                other => self.render_block(other, &outline),
            };
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        let mut html = toc::reconcile(&fragments.join("\n"));
        if let Some(ref cleanup) = self.options.cleanup {
            html = CleanupPipeline::new(cleanup.clone()).process(&html);
        }

        let outline = toc::collect_outline(&html);
        RenderedDocument::new(html, outline, self.stats)
    }

    fn render_block(&mut self, block: &Block, outline: &Outline) -> String {
        match block {
            Block::Heading(heading) => render_heading(heading),
            Block::Paragraph { text } => {
                self.stats.add_paragraph();
                format!("<p>{}</p>", render_inline(text))
            }
            Block::List(list) => {
                self.stats.add_list(list.len());
                render_list(list)
            }
            Block::Table(table) => {
                self.stats.add_table();
                render_table(table)
            }
            Block::Section(section) => {
                if section.tag == SectionTag::Ignore {
                    self.stats.add_ignored_section();
                } else {
                    self.stats.add_section();
                }
                render_section(
                    &section.tag,
                    &section.lines,
                    &outline.headings,
                    &self.options,
                )
            }
        }
    }
}

/// Headings of the document with ids made unique in document order.
fn assign_heading_ids(doc: &Document) -> Outline {
    let mut taken = HashSet::new();
    doc.headings()
        .map(|h| Heading::with_id(h.level, h.text.clone(), unique_id(&h.id, &mut taken)))
        .collect()
}

fn render_heading(heading: &Heading) -> String {
    format!(
        "<h{level} id=\"{}\">{}</h{level}>",
        escape_attr(&heading.id),
        escape_text(&heading.text),
        level = heading.level
    )
}

fn render_list(list: &ListBlock) -> String {
    let tag = list.kind.tag();
    let mut out = format!("<{tag}>\n");
    for item in &list.items {
        out.push_str(&format!("<li>{}</li>\n", render_inline(item)));
    }
    out.push_str(&format!("</{tag}>"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListKind, Section};

    fn no_cleanup() -> RenderOptions {
        RenderOptions::default().without_cleanup()
    }

    #[test]
    fn test_render_basic_blocks() {
        let mut doc = Document::new();
        doc.push(Block::Heading(Heading::new(2, "Getting Started")));
        doc.push(Block::Paragraph {
            text: "Read **this** first.".into(),
        });
        let mut list = ListBlock::new(ListKind::Ordered);
        list.push("one");
        list.push("two");
        doc.push(Block::List(list));

        let rendered = render_document(&doc, &no_cleanup());
        assert_eq!(
            rendered.html,
            "<h2 id=\"getting-started\">Getting Started</h2>\n<p>Read <strong>this</strong> first.</p>\n<ol>\n<li>one</li>\n<li>two</li>\n</ol>"
        );
        assert_eq!(rendered.stats.heading_count, 1);
        assert_eq!(rendered.stats.paragraph_count, 1);
        assert_eq!(rendered.stats.list_count, 1);
        assert_eq!(rendered.stats.list_item_count, 2);
        assert_eq!(rendered.outline.len(), 1);
    }

    #[test]
    fn test_duplicate_heading_ids_made_unique() {
        let mut doc = Document::new();
        doc.push(Block::Heading(Heading::new(2, "Overview")));
        doc.push(Block::Heading(Heading::new(3, "Overview")));
        let html = to_html(&doc, &no_cleanup());
        assert!(html.contains("<h2 id=\"overview\">"));
        assert!(html.contains("<h3 id=\"overview-2\">"));
    }

    #[test]
    fn test_toc_lists_later_headings() {
        let mut doc = Document::new();
        doc.push(Block::Section(Section::new(SectionTag::Toc)));
        doc.push(Block::Heading(Heading::new(2, "First")));
        doc.push(Block::Heading(Heading::new(2, "Second")));

        let html = to_html(&doc, &no_cleanup());
        assert!(html.starts_with("<div class=\"blog_index_cover\">"));
        assert!(html.contains("<a href=\"#first\">First</a>"));
        assert!(html.contains("<a href=\"#second\">Second</a>"));
    }

    #[test]
    fn test_ignored_section_counts() {
        let mut doc = Document::new();
        let mut ignored = Section::new(SectionTag::Ignore);
        ignored.push("hidden");
        doc.push(Block::Section(ignored));
        doc.push(Block::Paragraph {
            text: "Visible.".into(),
        });

        let rendered = render_document(&doc, &no_cleanup());
        assert_eq!(rendered.html, "<p>Visible.</p>");
        assert_eq!(rendered.stats.ignored_section_count, 1);
        assert_eq!(rendered.stats.section_count, 0);
    }
}
