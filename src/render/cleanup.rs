//! Post-processing cleanup for assembled HTML.
//!
//! Passes run in a fixed order and the whole pipeline repeats until the
//! markup stops changing, so `process(process(html)) == process(html)`.

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use super::toc;

/// Upper bound on pipeline repetitions while waiting for a fixpoint.
const MAX_ITERATIONS: usize = 8;

static H1_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<h1(\s[^>]*)?>").unwrap());
static H1_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</h1\s*>").unwrap());
static EMPTY_CONTAINERS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    ["p", "li", "ul", "ol"].map(|tag| Regex::new(&format!(r"<{tag}(?:\s[^>]*)?>\s*</{tag}>")).unwrap())
});
static INNER_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: heading demotion, empty containers and whitespace
    Minimal,
    /// Standard cleanup: every pass
    #[default]
    Standard,
}

/// Options for HTML cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Rewrite `<h1>` as `<h2>`
    pub demote_h1: bool,

    /// Keep only the first table of contents block
    pub dedupe_toc: bool,

    /// Drop repeated headings with the same level and text
    pub dedupe_headings: bool,

    /// Keep only the first FAQ block
    pub dedupe_faq: bool,

    /// Remove empty paragraphs, list items and lists
    pub strip_empty: bool,

    /// Trim trailing whitespace, collapse space runs and drop blank lines
    pub collapse_whitespace: bool,

    /// Rebuild the table of contents from the final headings
    pub reconcile_toc: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            demote_h1: true,
            dedupe_toc: false,
            dedupe_headings: false,
            dedupe_faq: false,
            strip_empty: true,
            collapse_whitespace: true,
            reconcile_toc: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            demote_h1: true,
            dedupe_toc: true,
            dedupe_headings: true,
            dedupe_faq: true,
            strip_empty: true,
            collapse_whitespace: true,
            reconcile_toc: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::str::FromStr for CleanupPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(CleanupPreset::Minimal),
            "standard" => Ok(CleanupPreset::Standard),
            other => Err(format!("unknown cleanup preset: {other}")),
        }
    }
}

/// HTML cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// The options in use.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Process HTML through the cleanup pipeline until it is stable.
    pub fn process(&self, html: &str) -> String {
        let mut current = html.to_string();
        for iteration in 0..MAX_ITERATIONS {
            let next = self.process_once(&current);
            if next == current {
                return current;
            }
            log::trace!("cleanup iteration {} changed the markup", iteration + 1);
            current = next;
        }
        log::warn!("cleanup did not settle after {} iterations", MAX_ITERATIONS);
        current
    }

    fn process_once(&self, html: &str) -> String {
        let mut result = html.to_string();

        // Stage 1: character level
        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.demote_h1 {
            result = demote_h1(&result);
        }

        // Stage 2: block de-duplication
        if self.options.dedupe_toc {
            result = keep_first(&result, toc::toc_blocks(&result));
        }

        if self.options.dedupe_headings {
            result = dedupe_headings(&result);
        }

        if self.options.dedupe_faq {
            result = keep_first(&result, toc::faq_blocks(&result));
        }

        // Stage 3: empty containers and whitespace
        if self.options.strip_empty {
            result = strip_empty(&result);
        }

        if self.options.collapse_whitespace {
            result = collapse_whitespace(&result);
        }

        // Stage 4: TOC against the final headings
        if self.options.reconcile_toc {
            result = toc::reconcile(&result);
        }

        result.trim().to_string()
    }
}

fn demote_h1(html: &str) -> String {
    let opened = H1_OPEN.replace_all(html, |caps: &regex::Captures| {
        format!("<h2{}>", caps.get(1).map(|m| m.as_str()).unwrap_or(""))
    });
    H1_CLOSE.replace_all(&opened, "</h2>").into_owned()
}

/// Remove every range but the first, back to front.
fn keep_first(html: &str, ranges: Vec<Range<usize>>) -> String {
    let mut result = html.to_string();
    for range in ranges.into_iter().skip(1).rev() {
        log::debug!("removing duplicate block at byte {}", range.start);
        toc::remove_range(&mut result, range);
    }
    result
}

/// Drop repeated heading level and text pairs. FAQ blocks are left whole so
/// that every question keeps its answer.
fn dedupe_headings(html: &str) -> String {
    let faqs = toc::faq_blocks(html);
    let mut seen = HashSet::new();
    let duplicates: Vec<Range<usize>> = toc::heading_elements(html)
        .into_iter()
        .filter(|h| !faqs.iter().any(|faq| faq.contains(&h.range.start)))
        .filter(|h| !seen.insert((h.level, h.plain_text())))
        .map(|h| h.range)
        .collect();

    let mut result = html.to_string();
    for range in duplicates.into_iter().rev() {
        toc::remove_range(&mut result, range);
    }
    result
}

fn strip_empty(html: &str) -> String {
    let mut result = html.to_string();
    // Inner containers first so that a list left empty goes in the same pass.
    for re in EMPTY_CONTAINERS.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

fn collapse_whitespace(html: &str) -> String {
    html.lines()
        .map(|line| INNER_SPACES.replace_all(line.trim_end(), " ").into_owned())
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
