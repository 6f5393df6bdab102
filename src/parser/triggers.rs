//! Trigger phrases and bracket tags that open special sections.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::SectionTag;

/// Plain-phrase triggers, matched against upper-cased line text.
///
/// Longer phrases come first so that near-matches prefer the most specific
/// trigger ("ADVANTAGES AND DISADVANTAGES" before "ADVANTAGES").
const TRIGGERS: &[(&str, TriggerKind)] = &[
    ("ADVANTAGES AND DISADVANTAGES", TriggerKind::ProsCons),
    ("FREQUENTLY ASKED QUESTIONS", TriggerKind::Faq),
    ("TABLE OF CONTENTS", TriggerKind::Toc),
    ("IMPORTANT POINTS", TriggerKind::KeyTakeaways),
    ("COMMON QUESTIONS", TriggerKind::Faq),
    ("COMPARISON TABLE", TriggerKind::Table),
    ("CALL TO ACTION", TriggerKind::Cta),
    ("KEY TAKEAWAYS", TriggerKind::KeyTakeaways),
    ("PROS AND CONS", TriggerKind::ProsCons),
    ("STEP BY STEP", TriggerKind::Steps),
    ("REQUIREMENTS", TriggerKind::BulletList),
    ("MAIN POINTS", TriggerKind::KeyTakeaways),
    ("GET STARTED", TriggerKind::Cta),
    ("CONTACT US", TriggerKind::Cta),
    ("KEY POINTS", TriggerKind::KeyTakeaways),
    ("HIGHLIGHTS", TriggerKind::KeyTakeaways),
    ("DATA TABLE", TriggerKind::Table),
    ("ADVANTAGES", TriggerKind::BulletList),
    ("BENEFITS", TriggerKind::BulletList),
    ("FEATURES", TriggerKind::BulletList),
    ("CONTENTS", TriggerKind::Toc),
    ("TUTORIAL", TriggerKind::Steps),
    ("PROCESS", TriggerKind::Steps),
    ("HOW TO", TriggerKind::Steps),
    ("STEPS", TriggerKind::Steps),
    ("GUIDE", TriggerKind::Steps),
    ("INDEX", TriggerKind::Toc),
    ("TABLE", TriggerKind::Table),
    ("FAQS", TriggerKind::Faq),
    ("FAQ", TriggerKind::Faq),
    ("Q&A", TriggerKind::Faq),
    ("TOC", TriggerKind::Toc),
    ("CTA", TriggerKind::Cta),
];

/// Const-friendly mirror of the phrase-reachable [`SectionTag`] variants.
#[derive(Debug, Clone, Copy)]
enum TriggerKind {
    Toc,
    KeyTakeaways,
    Cta,
    Faq,
    Steps,
    ProsCons,
    BulletList,
    Table,
}

impl From<TriggerKind> for SectionTag {
    fn from(kind: TriggerKind) -> Self {
        match kind {
            TriggerKind::Toc => SectionTag::Toc,
            TriggerKind::KeyTakeaways => SectionTag::KeyTakeaways,
            TriggerKind::Cta => SectionTag::Cta,
            TriggerKind::Faq => SectionTag::Faq,
            TriggerKind::Steps => SectionTag::Steps,
            TriggerKind::ProsCons => SectionTag::ProsCons,
            TriggerKind::BulletList => SectionTag::BulletList,
            TriggerKind::Table => SectionTag::Table,
        }
    }
}

static START_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9_-]*)>$").unwrap());
static END_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(?:[A-Z][A-Z0-9_ -]*?[ _-])?END>$").unwrap());
static LEGACY_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[\s*TABLE\s+(START|END)\s*\]$").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// An explicit section directive found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketTag {
    /// `<NAME>` or `[TABLE START]`
    Start(SectionTag),
    /// `<NAME END>`, `<END>` or `[TABLE END]`
    End,
}

/// Recognize a bracket directive. The line must consist of the tag alone.
///
/// Start tags must be written in upper case (`<FAQ>`) so that stray lower
/// case markup such as `<div>` is not taken for a directive; end tags are
/// accepted in any case and close whatever section is open.
pub fn match_bracket_tag(line: &str) -> Option<BracketTag> {
    let line = line.trim();
    if !line.starts_with('<') && !line.starts_with('[') {
        return None;
    }

    if let Some(caps) = LEGACY_TABLE.captures(line) {
        return Some(if caps[1].eq_ignore_ascii_case("START") {
            BracketTag::Start(SectionTag::Table)
        } else {
            BracketTag::End
        });
    }

    if END_TAG.is_match(&line.to_uppercase()) {
        return Some(BracketTag::End);
    }

    let caps = START_TAG.captures(line)?;
    let name = &caps[1];
    if name.chars().any(|c| c.is_ascii_lowercase()) {
        return None;
    }
    Some(BracketTag::Start(SectionTag::from_bracket_name(name)))
}

/// Normalize line text for trigger lookup: markdown heading hashes and
/// emphasis markers are dropped, whitespace collapsed, letters upper-cased.
pub fn normalize_trigger_text(text: &str) -> String {
    let text = text.trim().trim_start_matches('#');
    let text = text.replace("**", "").replace("__", "");
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_uppercase()
}

/// Match a line against the trigger phrases.
///
/// Lookup order: exact phrase; phrase plus a trailing `:` or `.`; finally a
/// near-match where the phrase occurs as whole words and the line is at most
/// `margin` characters longer than the phrase.
pub fn match_trigger(text: &str, margin: usize) -> Option<SectionTag> {
    let normalized = normalize_trigger_text(text);
    if normalized.is_empty() {
        return None;
    }

    if let Some(tag) = lookup_exact(&normalized) {
        return Some(tag);
    }

    let stripped = normalized.trim_end_matches([':', '.']).trim_end();
    if stripped.len() != normalized.len() {
        if let Some(tag) = lookup_exact(stripped) {
            return Some(tag);
        }
    }

    let candidate_len = stripped.chars().count();
    TRIGGERS
        .iter()
        .filter(|(phrase, _)| candidate_len <= phrase.chars().count() + margin)
        .find(|(phrase, _)| contains_words(stripped, phrase))
        .map(|(_, kind)| SectionTag::from(*kind))
}

fn lookup_exact(text: &str) -> Option<SectionTag> {
    TRIGGERS
        .iter()
        .find(|(phrase, _)| *phrase == text)
        .map(|(_, kind)| SectionTag::from(*kind))
}

/// Whether `phrase` occurs in `text` bounded by non-alphanumeric characters.
fn contains_words(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
