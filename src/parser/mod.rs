//! Text parsing module.
//!
//! Lines are classified one at a time ([`LineClassifier`]) and fed through a
//! single-pass state machine ([`SectionTransducer`]) that produces a
//! [`Document`](crate::model::Document).

mod classifier;
mod inline;
mod options;
mod table_detector;
mod transducer;
mod triggers;

pub use classifier::{LineClassifier, LineKind};
pub use inline::{render_inline, split_bold, strip_inline};
pub use options::ParseOptions;
pub use table_detector::{DetectedTable, TableDetector, TableDetectorConfig};
pub use transducer::SectionTransducer;
pub use triggers::{match_bracket_tag, match_trigger, normalize_trigger_text, BracketTag};

use crate::model::Document;

/// Parse text with default options.
pub fn parse_text(text: &str) -> Document {
    SectionTransducer::default().parse(text)
}

/// Parse text with custom options.
pub fn parse_text_with_options(text: &str, options: &ParseOptions) -> Document {
    SectionTransducer::new(options.clone()).parse(text)
}
