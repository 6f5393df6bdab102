//! Plain text and markdown extraction.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

use super::TextExtractor;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extractor for UTF-8 text and markdown files.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor {
    _private: (),
}

impl PlainTextExtractor {
    /// Create a new plain text extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "md", "markdown"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| {
            Error::Encoding(format!("input is not valid UTF-8 at byte {}", e.valid_up_to()))
        })?;
        Ok(normalize_text(text))
    }
}

/// Normalize line endings to `\n` and compose Unicode to NFC.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified.nfc().collect()
}
