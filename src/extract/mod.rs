//! Text extraction at the input boundary.
//!
//! Extractors turn file bytes into the newline-delimited text the converter
//! consumes. Only plain text and markdown are built in; other formats are
//! plugged in by registering further [`TextExtractor`]s.
//!
//! # Example
//!
//! ```no_run
//! use textpress::extract::ExtractorRegistry;
//! use std::path::Path;
//!
//! fn main() -> textpress::Result<()> {
//!     let registry = ExtractorRegistry::with_defaults();
//!     let text = registry.extract_file(Path::new("post.md"))?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod text;

pub use text::{normalize_text, PlainTextExtractor};

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for input extractors.
///
/// Implement this trait to accept a new input format.
pub trait TextExtractor: Send + Sync {
    /// Get the supported file extensions for this extractor.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["md"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract text from raw bytes.
    fn extract(&self, bytes: &[u8]) -> Result<String>;

    /// Check if this extractor supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for input extractors.
///
/// The registry maps file extensions to extractors.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn TextExtractor>>,
    by_name: HashMap<String, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in extractors (plain text, markdown).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextExtractor::new()));
        registry
    }

    /// Register an extractor for all its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        for ext in extractor.supported_extensions() {
            self.extractors
                .insert(ext.to_lowercase(), extractor.clone());
        }
        self.by_name
            .insert(extractor.name().to_lowercase(), extractor);
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(&ext.to_lowercase()).cloned()
    }

    /// Get an extractor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextExtractor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.extractors.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extractors.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Read and extract a file.
    ///
    /// The extension picks the extractor. Files without an extension are
    /// sniffed and accepted when they look like text.
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extract_bytes(&bytes, ext),
            None => self.extract_sniffed(&bytes),
        }
    }

    /// Extract bytes using the extension to choose the extractor.
    pub fn extract_bytes(&self, bytes: &[u8], ext: &str) -> Result<String> {
        let extractor = self.get_by_extension(ext).ok_or_else(|| {
            Error::UnsupportedInput(format!("no extractor for extension: {}", ext))
        })?;
        log::debug!("extracting {} bytes with {}", bytes.len(), extractor.name());
        extractor.extract(bytes)
    }

    fn extract_sniffed(&self, bytes: &[u8]) -> Result<String> {
        match detect_format_from_bytes(bytes) {
            InputFormat::Text => self.extract_bytes(bytes, "txt"),
            other => Err(Error::UnsupportedInput(format!(
                "{} input needs an external extractor",
                other
            ))),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports("md"));
        assert!(registry.supports("TXT"));
        assert!(!registry.supports("docx"));
        assert_eq!(
            registry.supported_extensions(),
            vec!["markdown", "md", "text", "txt"]
        );
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(registry.get_by_name("TEXT").map(|e| e.name().to_string()), Some("text".into()));
        assert!(registry.get_by_name("docx").is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = ExtractorRegistry::with_defaults();
        let err = registry.extract_bytes(b"PK\x03\x04", "docx").unwrap_err();
        assert!(matches!(err, Error::UnsupportedInput(_)));
    }

    #[test]
    fn test_extract_file_without_extension() {
        let registry = ExtractorRegistry::with_defaults();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"FAQ\r\nWhat is X?").unwrap();
        let text = registry.extract_file(file.path()).unwrap();
        assert_eq!(text, "FAQ\nWhat is X?");
    }

    #[test]
    fn test_extract_file_sniffs_html() {
        let registry = ExtractorRegistry::with_defaults();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<html><body>x</body></html>").unwrap();
        let err = registry.extract_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("html input"));
    }
}
