//! Section tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized special-section kind.
///
/// Each variant has a dedicated HTML template in
/// [`render::render_section`](crate::render::render_section).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionTag {
    /// Table of contents, filled from the document outline
    Toc,
    /// Key takeaways box
    KeyTakeaways,
    /// Call to action with image
    Cta,
    /// Call to action, boxed variant
    Cta1,
    /// Call to action, image-first variant
    Cta2,
    /// Frequently asked questions
    Faq,
    /// Numbered steps
    Steps,
    /// Three-column comparison table
    Comparison,
    /// Two-column pros and cons
    ProsCons,
    /// Plain bullet box
    BulletList,
    /// Data table
    Table,
    /// Dropped from the output entirely
    Ignore,
    /// Bracket tag with no template; rendered as paragraphs
    Unknown(String),
}

impl SectionTag {
    /// Map a bracket tag name (`<NAME>` without brackets) to a tag.
    ///
    /// Names are matched case-insensitively; `_` and spaces count as `-`.
    /// Names without a template become [`SectionTag::Unknown`].
    pub fn from_bracket_name(name: &str) -> Self {
        let normalized = name
            .trim()
            .to_uppercase()
            .replace(['_', ' '], "-");

        match normalized.as_str() {
            "TABLE-OF-CONTENTS" | "TOC" => SectionTag::Toc,
            "KEY-TAKEAWAYS" | "KEY-POINTS" => SectionTag::KeyTakeaways,
            "CALL-TO-ACTION" | "CTA" => SectionTag::Cta,
            "CALL-TO-ACTION-1" | "CTA1" | "CTA-1" => SectionTag::Cta1,
            "CALL-TO-ACTION-2" | "CTA2" | "CTA-2" => SectionTag::Cta2,
            "FAQ" | "FAQS" => SectionTag::Faq,
            "STEPS" | "PROCESS" => SectionTag::Steps,
            "COMPARISON" => SectionTag::Comparison,
            "PROS-AND-CONS" | "PROS-CONS" => SectionTag::ProsCons,
            "BENEFITS" | "FEATURES" | "BULLET-LIST" => SectionTag::BulletList,
            "TABLE" | "DATA-TABLE" => SectionTag::Table,
            "IGNORE" => SectionTag::Ignore,
            _ => SectionTag::Unknown(normalized),
        }
    }

    /// Stable kebab-case name of the tag.
    pub fn name(&self) -> &str {
        match self {
            SectionTag::Toc => "toc",
            SectionTag::KeyTakeaways => "key-takeaways",
            SectionTag::Cta => "cta",
            SectionTag::Cta1 => "cta1",
            SectionTag::Cta2 => "cta2",
            SectionTag::Faq => "faq",
            SectionTag::Steps => "steps",
            SectionTag::Comparison => "comparison",
            SectionTag::ProsCons => "pros-cons",
            SectionTag::BulletList => "bullet-list",
            SectionTag::Table => "table",
            SectionTag::Ignore => "ignore",
            SectionTag::Unknown(name) => name,
        }
    }

    /// Whether a trigger heading for this section is hidden from the body
    /// and the outline.
    pub fn suppresses_trigger_heading(&self) -> bool {
        matches!(self, SectionTag::Toc | SectionTag::Faq)
    }

    /// Whether buffered table rows are kept verbatim for this section.
    pub fn keeps_raw_rows(&self) -> bool {
        matches!(self, SectionTag::Table | SectionTag::Comparison)
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
