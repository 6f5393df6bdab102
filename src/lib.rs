//! # textpress
//!
//! Convert loosely-structured text and markdown into publishing-ready blog
//! HTML.
//!
//! Each line is classified (heading, list item, table row, section
//! directive, prose), a single-pass state machine groups lines into blocks
//! and special sections, every section is rendered through a fixed HTML
//! template, and a cleanup pass normalizes the assembled markup and
//! reconciles the table of contents with the final headings.
//!
//! ## Quick Start
//!
//! ```
//! let html = textpress::convert_text("## Getting Started\nInstall the tool first.");
//! assert_eq!(
//!     html,
//!     "<h2 id=\"getting-started\">Getting Started</h2>\n<p>Install the tool first.</p>"
//! );
//! ```
//!
//! ## Features
//!
//! - **Special sections**: table of contents, key takeaways, calls to action,
//!   FAQ, steps, comparison, pros and cons, bullet boxes, data tables
//! - **Heading inference**: markdown, numbering, questions, all caps, Title
//!   Case, trailing colons and bold lines
//! - **Table of contents**: always matches the headings of the final HTML
//! - **Generator fallback**: plug in an external generator; the
//!   deterministic converter takes over when it fails
//! - **Parallel batches**: independent documents convert on Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert_batch, ConversionMode, ConvertOptions, ConvertResult, Converter, GeneratedHtml,
    HtmlGenerator, Usage,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use extract::{ExtractorRegistry, PlainTextExtractor, TextExtractor};
pub use model::{Block, Document, Heading, ListBlock, ListKind, Outline, SectionTag, TableBlock};
pub use parser::{parse_text, LineClassifier, LineKind, ParseOptions, SectionTransducer};
pub use render::{
    CleanupOptions, CleanupPreset, ConversionStats, CtaDefaults, JsonFormat, RenderOptions,
    RenderedDocument,
};

use std::path::Path;
use std::sync::Arc;

/// Convert text to blog HTML with default options.
///
/// # Example
///
/// ```
/// let html = textpress::convert_text("FAQ\nWhat is it?\nA converter.");
/// assert!(html.contains("<h3>What is it?</h3>"));
/// ```
pub fn convert_text(text: &str) -> String {
    convert_text_with_options(text, &ConvertOptions::default())
}

/// Convert text to blog HTML with custom options.
///
/// # Example
///
/// ```
/// use textpress::{convert_text_with_options, CleanupPreset, ConvertOptions};
///
/// let options = ConvertOptions::new().with_cleanup_preset(CleanupPreset::Minimal);
/// let html = convert_text_with_options("Plain words.", &options);
/// assert_eq!(html, "<p>Plain words.</p>");
/// ```
pub fn convert_text_with_options(text: &str, options: &ConvertOptions) -> String {
    Converter::new(options.clone()).convert(text).html
}

/// Read a text or markdown file and convert it.
///
/// # Example
///
/// ```no_run
/// let result = textpress::convert_file("post.md")?;
/// std::fs::write("post.html", &result.html)?;
/// # Ok::<(), textpress::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    Textpress::new().convert_file(path)
}

/// Read a file and return its normalized text.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    ExtractorRegistry::with_defaults().extract_file(path.as_ref())
}

/// Builder for converting text and files.
///
/// # Example
///
/// ```no_run
/// use textpress::{CleanupPreset, Textpress};
///
/// let result = Textpress::new()
///     .with_cleanup(CleanupPreset::Minimal)
///     .with_toc_label("On this page")
///     .convert_file("post.md")?;
/// println!("{}", result.html);
/// # Ok::<(), textpress::Error>(())
/// ```
pub struct Textpress {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    generator: Option<Arc<dyn HtmlGenerator>>,
    extractors: ExtractorRegistry,
}

impl Textpress {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            generator: None,
            extractors: ExtractorRegistry::with_defaults(),
        }
    }

    /// Disable the Title Case, colon and bold heading rules.
    pub fn strict(mut self) -> Self {
        self.parse_options = ParseOptions::strict();
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Disable cleanup.
    pub fn without_cleanup(mut self) -> Self {
        self.render_options = self.render_options.without_cleanup();
        self
    }

    /// Set the table of contents label.
    pub fn with_toc_label(mut self, label: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_toc_label(label);
        self
    }

    /// Set the FAQ heading.
    pub fn with_faq_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_faq_title(title);
        self
    }

    /// Set the call-to-action defaults.
    pub fn with_cta_defaults(mut self, cta: CtaDefaults) -> Self {
        self.render_options = self.render_options.with_cta_defaults(cta);
        self
    }

    /// Try an external generator before the deterministic converter.
    pub fn with_generator(mut self, generator: Arc<dyn HtmlGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Register an additional input extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractors.register(extractor);
        self
    }

    /// Build the converter.
    pub fn converter(&self) -> Converter {
        let options = ConvertOptions::new()
            .with_parse_options(self.parse_options.clone())
            .with_render_options(self.render_options.clone());
        let converter = Converter::new(options);
        match &self.generator {
            Some(generator) => converter.with_generator(generator.clone()),
            None => converter,
        }
    }

    /// Convert text.
    pub fn convert(&self, text: &str) -> ConvertResult {
        self.converter().convert(text)
    }

    /// Read a file through the registered extractors and convert it.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        let path = path.as_ref();
        log::info!("converting {}", path.display());
        let text = self.extractors.extract_file(path)?;
        Ok(self.convert(&text))
    }

    /// Convert several files in parallel, keeping their order.
    pub fn convert_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<ConvertResult>> {
        use rayon::prelude::*;

        let converter = self.converter();
        paths
            .par_iter()
            .map(|path| {
                let text = self.extractors.extract_file(path.as_ref())?;
                Ok(converter.convert(&text))
            })
            .collect()
    }
}

impl Default for Textpress {
    fn default() -> Self {
        Self::new()
    }
}
