//! Headings, anchor ids and the document outline.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Smallest heading level ever emitted.
pub const MIN_HEADING_LEVEL: u8 = 2;

/// Largest heading level ever emitted.
pub const MAX_HEADING_LEVEL: u8 = 4;

/// Maximum length of a generated anchor id.
pub const MAX_ID_LEN: usize = 50;

/// Id used when a heading has no usable characters.
const FALLBACK_ID: &str = "section";

/// A heading with its anchor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, always within 2..=4
    pub level: u8,

    /// Heading text (source text, before inline formatting)
    pub text: String,

    /// Anchor id derived from the text
    pub id: String,
}

impl Heading {
    /// Create a heading, coercing the level into the 2..=4 range.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let id = generate_id(&text);
        Self {
            level: clamp_level(level),
            text,
            id,
        }
    }

    /// Create a heading with an explicit id.
    pub fn with_id(level: u8, text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            level: clamp_level(level),
            text: text.into(),
            id: id.into(),
        }
    }
}

/// Coerce a candidate heading level into the emitted range.
///
/// Level 1 (and 0) become level 2; anything deeper than 4 becomes 4.
pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL)
}

/// Generate an anchor id from heading text.
///
/// The result is lowercase, contains only `[a-z0-9-]`, has no leading or
/// trailing hyphen and is at most [`MAX_ID_LEN`] characters long.
/// Accented letters are folded to their base letter; other non-alphanumeric
/// characters are dropped and whitespace runs become a single hyphen.
pub fn generate_id(text: &str) -> String {
    let mut result = String::with_capacity(text.len().min(MAX_ID_LEN));
    let mut pending_hyphen = false;

    for c in text.nfd() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    if result.len() > MAX_ID_LEN {
        result.truncate(MAX_ID_LEN);
        while result.ends_with('-') {
            result.pop();
        }
    }

    if result.is_empty() {
        return FALLBACK_ID.to_string();
    }

    result
}

/// Make `base` unique against ids already taken, appending `-2`, `-3`, ...
///
/// The returned id is recorded in `taken`.
pub fn unique_id(base: &str, taken: &mut std::collections::HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }

    let mut n = 2usize;
    loop {
        let suffix = format!("-{}", n);
        let mut stem = base.to_string();
        if stem.len() + suffix.len() > MAX_ID_LEN {
            stem.truncate(MAX_ID_LEN - suffix.len());
            while stem.ends_with('-') {
                stem.pop();
            }
        }
        let candidate = format!("{}{}", stem, suffix);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// The ordered list of headings of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Headings in document order
    pub headings: Vec<Heading>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a heading.
    pub fn push(&mut self, heading: Heading) {
        self.headings.push(heading);
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Iterate over the headings.
    pub fn iter(&self) -> std::slice::Iter<'_, Heading> {
        self.headings.iter()
    }

    /// Whether a heading with this id exists.
    pub fn contains_id(&self, id: &str) -> bool {
        self.headings.iter().any(|h| h.id == id)
    }
}

impl FromIterator<Heading> for Outline {
    fn from_iter<I: IntoIterator<Item = Heading>>(iter: I) -> Self {
        Self {
            headings: iter.into_iter().collect(),
        }
    }
}
