//! Input format detection.
//!
//! Only plain text and markdown are converted directly; the other formats
//! are recognized so that callers get a precise error instead of garbled
//! output.

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a file for sniffing.
const SNIFF_LEN: usize = 512;

/// ZIP local file header, the container of word-processor documents.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// PDF magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Lower-case tag names that mark a document as HTML.
const HTML_TAGS: &[&str] = &[
    "html", "head", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol",
    "table", "article", "section", "span", "meta",
];

/// Recognized input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain text
    Text,
    /// Markdown source
    Markdown,
    /// HTML markup
    Html,
    /// Word-processor document (ZIP container)
    Docx,
    /// PDF document
    Pdf,
    /// Other binary data
    Binary,
}

impl InputFormat {
    /// Whether the core converter accepts this format as-is.
    pub fn is_text(self) -> bool {
        matches!(self, InputFormat::Text | InputFormat::Markdown)
    }

    /// Short lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            InputFormat::Text => "text",
            InputFormat::Markdown => "markdown",
            InputFormat::Html => "html",
            InputFormat::Docx => "docx",
            InputFormat::Pdf => "pdf",
            InputFormat::Binary => "binary",
        }
    }

    /// Format implied by a file extension, if the extension is known.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(InputFormat::Text),
            "md" | "markdown" => Some(InputFormat::Markdown),
            "html" | "htm" => Some(InputFormat::Html),
            "docx" | "doc" => Some(InputFormat::Docx),
            "pdf" => Some(InputFormat::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the format of a file.
///
/// A known extension decides; otherwise the first bytes are sniffed.
///
/// # Example
/// ```no_run
/// use textpress::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("notes.md").unwrap();
/// assert_eq!(format, InputFormat::Markdown);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    if let Some(format) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(InputFormat::from_extension)
    {
        return Ok(format);
    }

    let mut header = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(detect_format_from_bytes(&header))
}

/// Detect the format of raw bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> InputFormat {
    if data.starts_with(ZIP_MAGIC) {
        return InputFormat::Docx;
    }
    if data.starts_with(PDF_MAGIC) {
        return InputFormat::Pdf;
    }

    let head = &data[..data.len().min(SNIFF_LEN)];
    let head = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    if head.contains(&0) {
        return InputFormat::Binary;
    }

    let text = String::from_utf8_lossy(head);
    if looks_like_html(text.trim_start()) {
        InputFormat::Html
    } else {
        InputFormat::Text
    }
}

/// Check if bytes can be converted directly.
pub fn is_text_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_text()
}

/// Whether text opens with a doctype or a lower-case HTML tag.
///
/// Upper-case section directives such as `<FAQ>` are not HTML.
fn looks_like_html(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('<') else {
        return false;
    };
    if rest
        .get(..8)
        .is_some_and(|s| s.eq_ignore_ascii_case("!doctype"))
    {
        return true;
    }
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    HTML_TAGS.contains(&name.as_str())
}
