//! Inline markup: bold, italic and links.
//!
//! Source text uses markdown-style emphasis (`**bold**`, `__bold__`,
//! `*italic*`, `_italic_`) and links (`[text](url)`). Everything else is
//! HTML-escaped.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());
static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*").unwrap());
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(\S(?:.*?\S)?)__").unwrap());
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*?[^*\s])?)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\s(])_([^_\s](?:[^_]*?[^_\s])?)_($|[\s).,!?;:])").unwrap()
});

/// Render a line of source text as inline HTML.
pub fn render_inline(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for caps in LINK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&render_emphasis(&text[last..whole.start()]));
        output.push_str("<a href=\"");
        output.push_str(&html_escape::encode_double_quoted_attribute(&caps[2]));
        output.push_str("\">");
        output.push_str(&render_emphasis(&caps[1]));
        output.push_str("</a>");
        last = whole.end();
    }
    output.push_str(&render_emphasis(&text[last..]));
    output
}

/// Escape text and apply bold/italic markers.
fn render_emphasis(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    let bold = BOLD_STARS.replace_all(&escaped, "<strong>$1</strong>");
    let bold = BOLD_UNDERSCORES.replace_all(&bold, "<strong>$1</strong>");
    let italic = ITALIC_STAR.replace_all(&bold, "<em>$1</em>");
    ITALIC_UNDERSCORE
        .replace_all(&italic, |caps: &Captures| {
            format!("{}<em>{}</em>{}", &caps[1], &caps[2], &caps[3])
        })
        .into_owned()
}

/// Remove inline markers, keeping link text and emphasized words.
pub fn strip_inline(text: &str) -> String {
    let text = LINK.replace_all(text, "$1");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    ITALIC_UNDERSCORE
        .replace_all(&text, |caps: &Captures| {
            format!("{}{}{}", &caps[1], &caps[2], &caps[3])
        })
        .trim()
        .to_string()
}

/// Bold spans of a line and the plain text left outside them.
///
/// Returns `None` when the line has no bold markup.
pub fn split_bold(text: &str) -> Option<(Vec<String>, String)> {
    let mut bold = Vec::new();
    let mut rest = String::new();
    let mut last = 0;

    for re in [&*BOLD_STARS, &*BOLD_UNDERSCORES] {
        if !re.is_match(text) {
            continue;
        }
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            rest.push_str(&text[last..whole.start()]);
            bold.push(caps[1].to_string());
            last = whole.end();
        }
        rest.push_str(&text[last..]);
        return Some((bold, rest));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bold_and_italic() {
        assert_eq!(
            render_inline("This is **bold** and *italic*."),
            "This is <strong>bold</strong> and <em>italic</em>."
        );
        assert_eq!(render_inline("__strong__ _soft_"), "<strong>strong</strong> <em>soft</em>");
    }

    #[test]
    fn test_render_link() {
        assert_eq!(
            render_inline("See [the docs](https://example.com/a?b=1&c=2) now"),
            "See <a href=\"https://example.com/a?b=1&amp;c=2\">the docs</a> now"
        );
    }

    #[test]
    fn test_render_escapes_html() {
        assert_eq!(render_inline("5 < 6 & 7 > 3"), "5 &lt; 6 &amp; 7 &gt; 3");
    }

    #[test]
    fn test_snake_case_untouched() {
        assert_eq!(render_inline("call some_function_name now"), "call some_function_name now");
        assert_eq!(render_inline("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn test_strip_inline() {
        assert_eq!(strip_inline("**Bold** [link](http://x.y) *it*"), "Bold link it");
    }

    #[test]
    fn test_split_bold() {
        let (bold, rest) = split_bold("**Overview**:").unwrap();
        assert_eq!(bold, vec!["Overview"]);
        assert_eq!(rest, ":");
        assert!(split_bold("no emphasis").is_none());
    }
}
