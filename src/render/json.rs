//! JSON output for parsed documents, outlines and conversion results.

use serde::Serialize;

use crate::error::{Error, Result};

/// Layout of emitted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

impl JsonFormat {
    /// `Compact` when `compact` is set, `Pretty` otherwise.
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

/// Serialize a [`Document`](crate::model::Document),
/// [`Outline`](crate::model::Outline) or
/// [`ConvertResult`](crate::convert::ConvertResult) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    json.map_err(|e| Error::Render(format!("cannot serialize to JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Document, Heading, Outline};

    #[test]
    fn test_document_blocks_are_tagged() {
        let mut doc = Document::new();
        doc.push(Block::Heading(Heading::new(2, "Setup")));
        doc.push(Block::Paragraph {
            text: "Run it.".into(),
        });

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"type\":\"heading\""));
        assert!(json.contains("\"type\":\"paragraph\""));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_outline_pretty() {
        let outline: Outline = [Heading::with_id(3, "Deep Dive", "deep-dive")]
            .into_iter()
            .collect();

        let json = to_json(&outline, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"id\": \"deep-dive\""));
        assert!(json.contains("\"level\": 3"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_from_compact() {
        assert_eq!(JsonFormat::from_compact(true), JsonFormat::Compact);
        assert_eq!(JsonFormat::from_compact(false), JsonFormat::Pretty);
    }
}
