//! Table of contents reconciliation.
//!
//! The table of contents is rebuilt from the finished markup in one pass:
//! every h2-h4 heading outside the TOC and FAQ blocks gets an id (generated
//! when missing, de-duplicated when repeated) and the TOC list is rewritten
//! to link exactly those headings. A TOC with nothing to link is removed.

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use crate::model::{generate_id, unique_id, Heading, Outline, MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};

use super::options::DEFAULT_TOC_LABEL;
use super::sections::render_toc;

static TOC_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="blog_index_cover">.*?</div>\s*</div>"#).unwrap()
});
static FAQ_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div class="faq_blog">.*?</div>"#).unwrap());
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h([1-6])(\s[^>]*)?>(.*?)</h([1-6])>").unwrap());
static ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)id\s*=\s*"([^"]*)""#).unwrap());
static TOC_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p><strong>(.*?)</strong></p>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A heading element found in markup.
#[derive(Debug, Clone)]
pub(crate) struct HeadingElement {
    /// Byte range of the whole element
    pub range: Range<usize>,
    /// Heading level
    pub level: u8,
    /// Attributes of the opening tag, including leading whitespace
    pub attrs: String,
    /// Inner markup
    pub inner: String,
    /// Value of the id attribute, if any
    pub id: Option<String>,
}

impl HeadingElement {
    /// Inner markup with tags removed, entities decoded and whitespace
    /// collapsed.
    pub fn plain_text(&self) -> String {
        plain_text(&self.inner)
    }

    fn in_outline_range(&self) -> bool {
        (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&self.level)
    }
}

/// Heading elements of `html` whose opening and closing levels agree.
pub(crate) fn heading_elements(html: &str) -> Vec<HeadingElement> {
    HEADING
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if caps[1] != caps[4] {
                return None;
            }
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
            let id = ID_ATTR.captures(&attrs).map(|c| c[1].to_string());
            Some(HeadingElement {
                range: whole.range(),
                level: caps[1].parse().ok()?,
                attrs,
                inner: caps[3].to_string(),
                id,
            })
        })
        .collect()
}

/// Byte ranges of table of contents blocks.
pub(crate) fn toc_blocks(html: &str) -> Vec<Range<usize>> {
    TOC_BLOCK.find_iter(html).map(|m| m.range()).collect()
}

/// Byte ranges of FAQ blocks.
pub(crate) fn faq_blocks(html: &str) -> Vec<Range<usize>> {
    FAQ_BLOCK.find_iter(html).map(|m| m.range()).collect()
}

/// Strip tags, decode entities and collapse whitespace.
pub(crate) fn plain_text(markup: &str) -> String {
    let text = TAG.replace_all(markup, "");
    let text = html_escape::decode_html_entities(&text);
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Remove `range` from `html` together with one adjoining line break.
pub(crate) fn remove_range(html: &mut String, range: Range<usize>) {
    let mut range = range;
    if html[range.end..].starts_with('\n') {
        range.end += 1;
    } else if range.start > 0 && html[..range.start].ends_with('\n') {
        range.start -= 1;
    }
    html.replace_range(range, "");
}

fn excluded_ranges(html: &str) -> Vec<Range<usize>> {
    let mut ranges = toc_blocks(html);
    ranges.extend(faq_blocks(html));
    ranges
}

fn is_excluded(position: usize, excluded: &[Range<usize>]) -> bool {
    excluded.iter().any(|r| r.contains(&position))
}

/// Outline headings of `html`: h2-h4 outside TOC and FAQ blocks.
///
/// Headings without an id get the id they would be assigned by
/// [`reconcile`].
pub fn collect_outline(html: &str) -> Outline {
    let excluded = excluded_ranges(html);
    let mut taken = HashSet::new();
    heading_elements(html)
        .into_iter()
        .filter(|h| h.in_outline_range() && !is_excluded(h.range.start, &excluded))
        .map(|h| {
            let text = h.plain_text();
            let id = match h.id.as_deref() {
                Some(id) if !id.is_empty() => {
                    taken.insert(id.to_string());
                    id.to_string()
                }
                _ => unique_id(&generate_id(&text), &mut taken),
            };
            Heading::with_id(h.level, text, id)
        })
        .collect()
}

/// Rebuild the table of contents from the headings of `html`.
///
/// Without a TOC block the markup is returned unchanged. Otherwise missing
/// and repeated heading ids are assigned, the first TOC block is replaced
/// by a fresh list of every outline heading, and the block is dropped when
/// there are no headings.
pub fn reconcile(html: &str) -> String {
    let Some(first) = TOC_BLOCK.find(html) else {
        return html.to_string();
    };
    let label = TOC_LABEL
        .captures(first.as_str())
        .map(|c| html_escape::decode_html_entities(&c[1]).into_owned())
        .unwrap_or_else(|| DEFAULT_TOC_LABEL.to_string());

    let (mut html, outline) = assign_ids(html);

    let Some(block) = TOC_BLOCK.find(&html).map(|m| m.range()) else {
        return html;
    };
    let toc = render_toc(&outline.headings, &label);
    if toc.is_empty() {
        log::debug!("removing table of contents with no headings");
        remove_range(&mut html, block);
    } else {
        html.replace_range(block, &toc);
    }
    html
}

/// Give every outline heading a unique id, rewriting opening tags as needed.
fn assign_ids(html: &str) -> (String, Outline) {
    let excluded = excluded_ranges(html);
    let elements: Vec<HeadingElement> = heading_elements(html)
        .into_iter()
        .filter(|h| h.in_outline_range() && !is_excluded(h.range.start, &excluded))
        .collect();

    // Existing ids win over generated ones; only the first use of an id
    // keeps it.
    let mut taken = HashSet::new();
    let keeps: Vec<bool> = elements
        .iter()
        .map(|h| match h.id.as_deref() {
            Some(id) if !id.is_empty() => taken.insert(id.to_string()),
            _ => false,
        })
        .collect();

    let mut output = String::with_capacity(html.len() + 64);
    let mut outline = Outline::new();
    let mut last = 0;

    for (element, keep) in elements.iter().zip(keeps) {
        let text = element.plain_text();
        let id = match (&element.id, keep) {
            (Some(id), true) => id.clone(),
            _ => {
                let id = unique_id(&generate_id(&text), &mut taken);
                log::trace!("assigning id {:?} to heading {:?}", id, text);
                output.push_str(&html[last..element.range.start]);
                let attrs = ID_ATTR.replace_all(&element.attrs, "");
                output.push_str(&format!(
                    "<h{level} id=\"{id}\"{attrs}>{inner}</h{level}>",
                    level = element.level,
                    inner = element.inner
                ));
                last = element.range.end;
                id
            }
        };
        outline.push(Heading::with_id(element.level, text, id));
    }
    output.push_str(&html[last..]);

    (output, outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOC: &str = "<div class=\"blog_index_cover\">\n<div class=\"blog_index\">\n<p><strong>Table of Contents</strong></p>\n<ul>\n</ul>\n</div>\n</div>";

    #[test]
    fn test_reconcile_fills_toc_and_ids() {
        let html = format!("{TOC}\n<h2>Intro</h2>\n<p>x</p>\n<h3 id=\"custom\">Deep Dive</h3>");
        let out = reconcile(&html);
        assert!(out.contains("<h2 id=\"intro\">Intro</h2>"));
        assert!(out.contains("<li><a href=\"#intro\">Intro</a></li>\n<li><a href=\"#custom\">Deep Dive</a></li>"));
    }

    #[test]
    fn test_reconcile_without_toc_is_noop() {
        let html = "<h2>Intro</h2>\n<p>x</p>";
        assert_eq!(reconcile(html), html);
    }

    #[test]
    fn test_reconcile_removes_empty_toc() {
        let html = format!("<p>Before</p>\n{TOC}\n<p>After</p>");
        assert_eq!(reconcile(&html), "<p>Before</p>\n<p>After</p>");
    }

    #[test]
    fn test_reconcile_dedupes_ids() {
        let html = format!("{TOC}\n<h2 id=\"a\">One</h2>\n<h2 id=\"a\">Two</h2>\n<h2>One</h2>");
        let out = reconcile(&html);
        assert!(out.contains("<h2 id=\"a\">One</h2>"));
        assert!(out.contains("<h2 id=\"two\">Two</h2>"));
        assert!(out.contains("<h2 id=\"one\">One</h2>"));
        let outline = collect_outline(&out);
        let ids: Vec<_> = outline.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "two", "one"]);
    }

    #[test]
    fn test_reconcile_skips_faq_headings() {
        let html = format!(
            "{TOC}\n<h2>Body</h2>\n<div class=\"faq_blog\">\n<h2>Frequently Asked Questions</h2>\n<h3>What?</h3>\n<p>That.</p>\n</div>"
        );
        let out = reconcile(&html);
        assert!(out.contains("href=\"#body\""));
        assert!(!out.contains("href=\"#what\""));
        assert!(out.contains("<h3>What?</h3>"));
    }

    #[test]
    fn test_reconcile_idempotent() {
        let html = format!("{TOC}\n<h2>A &amp; B</h2>\n<h4 class=\"x\">C</h4>");
        let once = reconcile(&html);
        assert_eq!(reconcile(&once), once);
        assert!(once.contains("<h4 id=\"c\" class=\"x\">C</h4>"));
        assert!(once.contains("<a href=\"#a-b\">A &amp; B</a>"));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<strong>Bold</strong>  &amp; more "), "Bold & more");
    }
}
