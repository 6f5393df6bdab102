//! Line classification.
//!
//! Each line is run through an ordered chain of predicates; the first one
//! that matches decides the category. The order is significant and is
//! preserved exactly:
//!
//! 1. blank lines and horizontal rules
//! 2. bracket directives (`<FAQ>`, `<FAQ END>`, `[TABLE START]`)
//! 3. bullet list items (`-`, `*`, `•`)
//! 4. table rows (pipe, tab or multi-space separated)
//! 5. trigger phrases ("Key Takeaways", "FAQ", ...)
//! 6. heading rules, in order: markdown `#`, numbering, question,
//!    all caps, Title Case, trailing colon, isolated bold
//! 7. prose
//!
//! Classification never fails; anything unrecognized is prose.

use regex::Regex;
use std::sync::LazyLock;

use super::inline::{split_bold, strip_inline};
use super::triggers::{match_bracket_tag, match_trigger, BracketTag};
use super::ParseOptions;
use crate::model::{Delimiter, Heading, ListKind, SectionTag};

static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,}|(?:- ){2,}-|(?:\* ){2,}\*)$").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•]\s+(\S.*)$").unwrap());
static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+#+)?\s*$").unwrap());
static MULTI_LEVEL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)+)(\.?)\s+(\S.*)$").unwrap());
static SINGLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)([.)])\s+(\S.*)$").unwrap());

/// Longest all-caps heading, in words.
const MAX_CAPS_WORDS: usize = 8;

/// Word-count bounds for Title Case headings.
const TITLE_CASE_WORDS: std::ops::RangeInclusive<usize> = 2..=10;

/// Share of capitalized words required for Title Case.
const TITLE_CASE_RATIO: f32 = 0.6;

/// Longest numbered line that may still be a heading, in words.
const MAX_NUMBERED_HEADING_WORDS: usize = 10;

/// Longest colon heading, in characters.
const MAX_COLON_HEADING_LEN: usize = 60;

/// Longest bold-only heading, in characters.
const MAX_BOLD_HEADING_LEN: usize = 100;

/// Plain characters tolerated around bold markup in a bold heading.
const MAX_TEXT_AROUND_BOLD: usize = 3;

/// Category of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line or horizontal rule
    Blank,
    /// A bracket directive or trigger phrase opening a section.
    ///
    /// `heading` is set when the trigger line is also a heading in its
    /// own right; bracket directives never carry one.
    SectionStart {
        /// Section to open
        tag: SectionTag,
        /// The line read as a heading, if it is one
        heading: Option<Heading>,
        /// Opened by a trigger phrase rather than a bracket directive
        by_phrase: bool,
    },
    /// A bracket end directive
    SectionEnd,
    /// A heading
    Heading(Heading),
    /// A list item with its marker removed
    ListItem {
        /// Ordered or unordered
        kind: ListKind,
        /// Item text
        text: String,
    },
    /// A delimited table row, kept verbatim
    TableRow {
        /// Delimiter detected on this row
        delimiter: Delimiter,
        /// Trimmed source line
        raw: String,
    },
    /// Anything else
    Prose(String),
}

impl LineKind {
    /// Text a section buffers for this line, if any.
    pub fn buffer_text(&self) -> Option<String> {
        match self {
            LineKind::Heading(h) => Some(h.text.clone()),
            LineKind::ListItem { text, .. } => Some(text.clone()),
            LineKind::TableRow { raw, .. } => Some(raw.clone()),
            LineKind::Prose(text) => Some(text.clone()),
            LineKind::Blank | LineKind::SectionStart { .. } | LineKind::SectionEnd => None,
        }
    }
}

/// Classifies lines using their neighbours as context.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    options: ParseOptions,
}

impl LineClassifier {
    /// Create a classifier with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Classify `lines[index]`.
    pub fn classify<S: AsRef<str>>(&self, lines: &[S], index: usize) -> LineKind {
        let Some(line) = lines.get(index) else {
            return LineKind::Blank;
        };
        let line = line.as_ref().trim();

        let kind = self.classify_line(line, lines, index);
        log::trace!("line {}: {:?}", index + 1, kind);
        kind
    }

    fn classify_line<S: AsRef<str>>(&self, line: &str, lines: &[S], index: usize) -> LineKind {
        if line.is_empty() || HORIZONTAL_RULE.is_match(line) {
            return LineKind::Blank;
        }

        if let Some(tag) = match_bracket_tag(line) {
            return match tag {
                BracketTag::Start(tag) => LineKind::SectionStart {
                    tag,
                    heading: None,
                    by_phrase: false,
                },
                BracketTag::End => LineKind::SectionEnd,
            };
        }

        if let Some(caps) = BULLET_ITEM.captures(line) {
            return LineKind::ListItem {
                kind: ListKind::Unordered,
                text: caps[1].trim().to_string(),
            };
        }

        if let Some(delimiter) = Delimiter::detect(line) {
            return LineKind::TableRow {
                delimiter,
                raw: line.to_string(),
            };
        }

        if let Some(tag) = match_trigger(line, self.options.trigger_margin) {
            let heading = match self.detect_heading(line, lines, index) {
                HeadingMatch::Heading(h) => Some(h),
                HeadingMatch::OrderedItem(_) | HeadingMatch::None => None,
            };
            return LineKind::SectionStart {
                tag,
                heading,
                by_phrase: true,
            };
        }

        match self.detect_heading(line, lines, index) {
            HeadingMatch::Heading(h) => LineKind::Heading(h),
            HeadingMatch::OrderedItem(text) => LineKind::ListItem {
                kind: ListKind::Ordered,
                text,
            },
            HeadingMatch::None => LineKind::Prose(line.to_string()),
        }
    }

    /// Run the heading rules in precedence order.
    fn detect_heading<S: AsRef<str>>(&self, line: &str, lines: &[S], index: usize) -> HeadingMatch {
        if let Some(caps) = MARKDOWN_HEADING.captures(line) {
            let level = caps[1].len() as u8;
            return HeadingMatch::Heading(Heading::new(level, strip_inline(&caps[2])));
        }

        if let Some(caps) = MULTI_LEVEL_NUMBER.captures(line) {
            let text = strip_inline(&caps[3]);
            // `2.5 million ...` is a decimal, not a section number.
            if !caps[2].is_empty() || is_numbered_heading(&text) {
                let depth = caps[1].split('.').count().min(usize::from(u8::MAX - 1)) as u8;
                return HeadingMatch::Heading(Heading::new(depth + 1, text));
            }
        }

        if let Some(caps) = SINGLE_NUMBER.captures(line) {
            let text = caps[3].trim().to_string();
            let plain = strip_inline(&text);
            if &caps[2] == "." && is_numbered_heading(&plain) && !has_numbered_neighbour(lines, index)
            {
                return HeadingMatch::Heading(Heading::new(2, plain));
            }
            return HeadingMatch::OrderedItem(text);
        }

        let plain = strip_inline(line);
        if plain.is_empty() {
            return HeadingMatch::None;
        }

        if let Some(level) = question_level(&plain, self.options.max_question_len) {
            return HeadingMatch::Heading(Heading::new(level, plain));
        }

        if let Some(level) = all_caps_level(&plain) {
            let text = plain.trim_end_matches(':').trim_end().to_string();
            return HeadingMatch::Heading(Heading::new(level, text));
        }

        if self.options.detect_title_case {
            if let Some(level) = title_case_level(&plain) {
                return HeadingMatch::Heading(Heading::new(level, plain));
            }
        }

        if self.options.detect_colon_headings {
            if let Some(level) = colon_level(&plain) {
                let text = plain.trim_end_matches(':').trim_end().to_string();
                return HeadingMatch::Heading(Heading::new(level, text));
            }
        }

        if self.options.detect_bold_headings {
            if let Some((level, text)) = bold_heading(line) {
                return HeadingMatch::Heading(Heading::new(level, text));
            }
        }

        HeadingMatch::None
    }
}

/// Outcome of the heading rules for one line.
enum HeadingMatch {
    Heading(Heading),
    /// A `N.` line that reads as a list item rather than a heading
    OrderedItem(String),
    None,
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_numbered_heading(text: &str) -> bool {
    let starts_upper = text.chars().next().is_some_and(|c| c.is_uppercase());
    let ends_clean = !text.ends_with(['.', ',', ';']);
    starts_upper && ends_clean && word_count(text) <= MAX_NUMBERED_HEADING_WORDS
}

/// Whether the nearest non-blank line before or after `index` is also a
/// single-level numbered line.
fn has_numbered_neighbour<S: AsRef<str>>(lines: &[S], index: usize) -> bool {
    let is_numbered = |line: &str| SINGLE_NUMBER.is_match(line.trim());

    let before = lines[..index]
        .iter()
        .rev()
        .map(|l| l.as_ref())
        .find(|l| !l.trim().is_empty());
    let after = lines
        .iter()
        .skip(index + 1)
        .map(|l| l.as_ref())
        .find(|l| !l.trim().is_empty());

    before.is_some_and(is_numbered) || after.is_some_and(is_numbered)
}

fn question_level(text: &str, max_len: usize) -> Option<u8> {
    let len = text.chars().count();
    if !text.ends_with('?') || len > max_len || word_count(text) < 2 {
        return None;
    }
    // A question closing a longer paragraph is prose.
    let body = &text[..text.len() - 1];
    if body.contains(". ") || body.contains("! ") || body.contains("? ") {
        return None;
    }
    Some(if len <= 50 { 3 } else { 4 })
}

fn all_caps_level(text: &str) -> Option<u8> {
    let allowed = text
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == ':');
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if !allowed || letters.len() < 2 || !letters.iter().all(|c| c.is_uppercase()) {
        return None;
    }
    let words = word_count(text);
    if words > MAX_CAPS_WORDS {
        return None;
    }
    Some(if words <= 4 { 2 } else { 3 })
}

fn title_case_level(text: &str) -> Option<u8> {
    if text.ends_with(['.', ',', ';', '!', ':']) || text.chars().count() > 80 {
        return None;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if !TITLE_CASE_WORDS.contains(&words.len()) {
        return None;
    }
    let capitalized = words
        .iter()
        .filter(|w| {
            w.chars()
                .find(|c| c.is_alphanumeric())
                .is_some_and(|c| c.is_uppercase())
        })
        .count();
    if (capitalized as f32) / (words.len() as f32) < TITLE_CASE_RATIO {
        return None;
    }
    Some(match words.len() {
        0..=4 => 2,
        5..=7 => 3,
        _ => 4,
    })
}

fn colon_level(text: &str) -> Option<u8> {
    let len = text.chars().count();
    if !text.ends_with(':') || len < 2 || len > MAX_COLON_HEADING_LEN {
        return None;
    }
    Some(if len <= 30 { 3 } else { 4 })
}

fn bold_heading(line: &str) -> Option<(u8, String)> {
    let (bold, rest) = split_bold(line)?;
    let outside = rest
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count();
    if outside > MAX_TEXT_AROUND_BOLD {
        return None;
    }
    let text = strip_inline(&bold.join(" "));
    let text = text.trim_end_matches(':').trim_end().to_string();
    let len = text.chars().count();
    if len < 2 || len > MAX_BOLD_HEADING_LEN {
        return None;
    }
    Some((if len <= 40 { 3 } else { 4 }, text))
}
