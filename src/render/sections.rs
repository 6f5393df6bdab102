//! HTML templates for special sections.
//!
//! Every [`SectionTag`] maps to one fixed markup skeleton. The class names
//! are consumed by an existing style sheet and must not change.

use crate::model::{is_separator_row, split_cells, Delimiter, Heading, SectionTag, TableBlock};
use crate::parser::render_inline;

use super::html::{escape_attr, escape_text};
use super::RenderOptions;

/// Minimum length of a FAQ line that starts with an interrogative word.
const MIN_QUESTION_LEN: usize = 8;

/// Words that open a question even without a trailing `?`. Auxiliary verbs
/// (`is`, `do`, `can`, ...) also start ordinary answers, so they only count
/// with the question mark.
const INTERROGATIVES: &[&str] = &[
    "what", "why", "how", "when", "where", "who", "whom", "whose", "which",
];

/// Fields a comparison row needs to fill all three columns.
const COMPARISON_COLUMNS: usize = 3;

/// Render the buffered lines of a section.
///
/// `outline` is only consulted for the table of contents. Unknown tags fall
/// back to one paragraph per line; the ignore tag renders nothing.
pub fn render_section(
    tag: &SectionTag,
    lines: &[String],
    outline: &[Heading],
    options: &RenderOptions,
) -> String {
    match tag {
        SectionTag::Toc => render_toc(outline, &options.toc_label),
        SectionTag::KeyTakeaways => render_key_takeaways(lines, &options.key_takeaways_label),
        SectionTag::Cta => render_cta(lines, CtaStyle::NewBox, options),
        SectionTag::Cta1 => render_cta(lines, CtaStyle::Box, options),
        SectionTag::Cta2 => render_cta(lines, CtaStyle::BoxWithImage, options),
        SectionTag::Faq => render_faq(lines, &options.faq_title),
        SectionTag::Steps => render_steps(lines),
        SectionTag::Comparison => render_comparison(lines),
        SectionTag::ProsCons => render_pros_cons(lines, options),
        SectionTag::BulletList => render_bullet_list(lines),
        SectionTag::Table => render_table(&TableBlock::from_lines(lines)),
        SectionTag::Ignore => String::new(),
        SectionTag::Unknown(_) => render_paragraphs(lines),
    }
}

/// Table of contents linking each heading by id. Empty without headings.
pub fn render_toc(headings: &[Heading], label: &str) -> String {
    if headings.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"blog_index_cover\">\n<div class=\"blog_index\">\n");
    out.push_str(&format!("<p><strong>{}</strong></p>\n<ul>\n", escape_text(label)));
    for heading in headings {
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            escape_attr(&heading.id),
            escape_text(&heading.text)
        ));
    }
    out.push_str("</ul>\n</div>\n</div>");
    out
}

fn render_key_takeaways(lines: &[String], label: &str) -> String {
    let items = non_empty(lines);
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"kta-list\">\n");
    out.push_str(&format!("<p><strong>{}</strong></p>\n", escape_text(label)));
    out.push_str(&list("ul", &items));
    out.push_str("\n</div>");
    out
}

#[derive(Debug, Clone, Copy)]
enum CtaStyle {
    NewBox,
    Box,
    BoxWithImage,
}

fn render_cta(lines: &[String], style: CtaStyle, options: &RenderOptions) -> String {
    let fields = non_empty(lines);
    let defaults = &options.cta;
    let field = |index: usize, default: &str| -> String {
        fields
            .get(index)
            .map(|s| s.to_string())
            .unwrap_or_else(|| default.to_string())
    };
    let heading = field(0, &defaults.heading);
    let description = field(1, &defaults.description);
    let button = field(2, &defaults.button);
    let image_url = field(3, &defaults.image_url);

    let body = format!(
        "<p class=\"callout_heading\"><strong>{}</strong></p>\n<p>{}</p>\n<a class=\"callout_btn\" href=\"#\">{}</a>",
        render_inline(&heading),
        render_inline(&description),
        escape_text(&button)
    );
    let image = format!(
        "<img src=\"{}\" alt=\"{}\">",
        escape_attr(&image_url),
        escape_attr(&heading)
    );

    match style {
        CtaStyle::NewBox => format!(
            "<div class=\"callout_newbox\">\n<div class=\"callout_content\">\n{body}\n</div>\n<div class=\"callout_img\">{image}</div>\n</div>"
        ),
        CtaStyle::Box => format!("<div class=\"callout_box\">\n{body}\n</div>"),
        CtaStyle::BoxWithImage => {
            format!("<div class=\"callout_box callout_box_img\">\n{image}\n{body}\n</div>")
        }
    }
}

/// Whether a FAQ line reads as a question.
pub fn is_question(line: &str) -> bool {
    let line = line.trim();
    if line.ends_with('?') {
        return line.chars().count() > 1;
    }
    if line.chars().count() < MIN_QUESTION_LEN || line.ends_with(['.', '!']) {
        return false;
    }
    let first = line
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .unwrap_or_default();
    INTERROGATIVES.contains(&first.as_str())
}

fn render_faq(lines: &[String], title: &str) -> String {
    let items = non_empty(lines);
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"faq_blog\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_text(title)));
    for line in items {
        if is_question(line) {
            out.push_str(&format!("<h3>{}</h3>\n", render_inline(line)));
        } else {
            out.push_str(&format!("<p>{}</p>\n", render_inline(line)));
        }
    }
    out.push_str("</div>");
    out
}

fn render_steps(lines: &[String]) -> String {
    let items = non_empty(lines);
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"listing-bx\">\n<ol>\n");
    for (index, line) in items.iter().enumerate() {
        let (title, description) = match line.split_once(':') {
            Some((title, description)) if !title.trim().is_empty() => {
                (title.trim().to_string(), description.trim())
            }
            _ => (format!("Step {}", index + 1), line.trim()),
        };
        if description.is_empty() {
            out.push_str(&format!("<li><strong>{}</strong></li>\n", render_inline(&title)));
        } else {
            out.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                render_inline(&title),
                render_inline(description)
            ));
        }
    }
    out.push_str("</ol>\n</div>");
    out
}

fn render_pros_cons(lines: &[String], options: &RenderOptions) -> String {
    let items = non_empty(lines);
    if items.is_empty() {
        return String::new();
    }
    let (pros, cons) = split_pros_cons(&items, &options.pros_label, &options.cons_label);

    let column = |class: &str, label: &str, items: &[&str]| -> String {
        let mut col = format!(
            "<div class=\"{class}\">\n<p><strong>{}</strong></p>\n",
            escape_text(label)
        );
        if !items.is_empty() {
            col.push_str(&list("ul", items));
            col.push('\n');
        }
        col.push_str("</div>");
        col
    };

    format!(
        "<div class=\"expense_track\">\n{}\n{}\n</div>",
        column("pros", &options.pros_label, &pros),
        column("cons", &options.cons_label, &cons)
    )
}

/// Split items into pros and cons.
///
/// When the buffer carries both a pros label line and a cons label line the
/// labels decide; otherwise the first half (rounded up) are pros.
fn split_pros_cons<'a>(
    items: &[&'a str],
    pros_label: &str,
    cons_label: &str,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let is_label = |line: &str, label: &str| {
        let line = line.trim().trim_end_matches(':').trim();
        line.eq_ignore_ascii_case(label)
    };
    let pros_at = items
        .iter()
        .position(|l| is_label(l, pros_label) || is_label(l, "pros"));
    let cons_at = items
        .iter()
        .position(|l| is_label(l, cons_label) || is_label(l, "cons"));

    if let (Some(p), Some(c)) = (pros_at, cons_at) {
        let take = |from: usize, to: usize| items[from + 1..to].to_vec();
        return if p < c {
            (take(p, c), take(c, items.len()))
        } else {
            (take(p, items.len()), take(c, p))
        };
    }

    let mid = items.len().div_ceil(2);
    (items[..mid].to_vec(), items[mid..].to_vec())
}

fn render_bullet_list(lines: &[String]) -> String {
    let items = non_empty(lines);
    if items.is_empty() {
        return String::new();
    }
    format!("<div class=\"bullet-new-box\">\n{}\n</div>", list("ul", &items))
}

fn render_comparison(lines: &[String]) -> String {
    let rows: Vec<Vec<String>> = non_empty(lines)
        .into_iter()
        .map(|line| split_cells(line, Delimiter::Pipe))
        .filter(|cells| !is_separator_row(cells))
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div class=\"comparison-table\">\n<table>\n");
    let mut body = rows.as_slice();
    if let Some((first, rest)) = rows.split_first() {
        if first.len() >= COMPARISON_COLUMNS {
            out.push_str("<thead>\n");
            out.push_str(&comparison_row(first, "th"));
            out.push_str("</thead>\n");
            body = rest;
        }
    }
    if !body.is_empty() {
        out.push_str("<tbody>\n");
        for row in body {
            out.push_str(&comparison_row(row, "td"));
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n</div>");
    out
}

fn comparison_row(cells: &[String], cell_tag: &str) -> String {
    if cells.len() < COMPARISON_COLUMNS {
        let merged = cells
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        return format!(
            "<tr><{cell_tag} colspan=\"{COMPARISON_COLUMNS}\">{}</{cell_tag}></tr>\n",
            render_inline(&merged)
        );
    }
    // Extra fields stay in the last column.
    let last = cells[COMPARISON_COLUMNS - 1..].join(" | ");
    let mut row = String::from("<tr>");
    for cell in cells[..COMPARISON_COLUMNS - 1]
        .iter()
        .map(|c| c.as_str())
        .chain(std::iter::once(last.as_str()))
    {
        row.push_str(&format!("<{cell_tag}>{}</{cell_tag}>", render_inline(cell)));
    }
    row.push_str("</tr>\n");
    row
}

/// Data table with the first row as header.
pub fn render_table(table: &TableBlock) -> String {
    let Some(header) = table.header() else {
        return String::new();
    };

    let mut out = String::from("<div class=\"travel_table\">\n<table>\n<thead>\n<tr>");
    for cell in header {
        out.push_str(&format!("<th>{}</th>", render_inline(cell)));
    }
    out.push_str("</tr>\n</thead>\n");

    let body = table.body();
    if !body.is_empty() {
        out.push_str("<tbody>\n");
        for row in &body {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&format!("<td>{}</td>", render_inline(cell)));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n</div>");
    out
}

fn render_paragraphs(lines: &[String]) -> String {
    non_empty(lines)
        .into_iter()
        .map(|line| format!("<p>{}</p>", render_inline(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect()
}

fn list(tag: &str, items: &[&str]) -> String {
    let mut out = format!("<{tag}>\n");
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", render_inline(item)));
    }
    out.push_str(&format!("</{tag}>"));
    out
}
