//! Text to blog HTML conversion with an optional external generator.
//!
//! A [`Converter`] first offers the text to a registered [`HtmlGenerator`]
//! (for example a hosted language model). When there is none, or it fails,
//! or it returns nothing, the deterministic parser and renderer produce the
//! HTML instead. Converting text never fails.
//!
//! # Example
//!
//! ```
//! use textpress::convert::{ConversionMode, Converter, ConvertOptions};
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let result = converter.convert("## Introduction\nSome words here.");
//! assert_eq!(result.mode, ConversionMode::Fallback);
//! assert!(result.html.contains("<h2 id=\"introduction\">Introduction</h2>"));
//! ```

use crate::error::Result;
use crate::model::Outline;
use crate::parser::{ParseOptions, SectionTransducer};
use crate::render::{
    to_json, CleanupPipeline, CleanupPreset, ConversionStats, HtmlRenderer, JsonFormat,
    RenderOptions, RenderedDocument,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Options for text conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Line classification options
    pub parse: ParseOptions,

    /// Rendering and cleanup options
    pub render: RenderOptions,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.render = self.render.with_cleanup_preset(preset);
        self
    }

    /// Disable cleanup.
    pub fn without_cleanup(mut self) -> Self {
        self.render = self.render.without_cleanup();
        self
    }
}

/// Token usage reported by a generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u64,

    /// Completion tokens
    pub output_tokens: u64,
}

impl Usage {
    /// Total tokens.
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Output of an external generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedHtml {
    /// Candidate HTML
    pub html: String,

    /// Token usage, when the generator reports it
    pub usage: Option<Usage>,
}

impl GeneratedHtml {
    /// Create generated output without usage.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            usage: None,
        }
    }

    /// Attach token usage.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// External HTML generator.
///
/// Implementations must be safe to share across threads; batch conversion
/// calls `generate` concurrently.
pub trait HtmlGenerator: Send + Sync {
    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Produce candidate HTML for the text.
    fn generate(&self, text: &str) -> Result<GeneratedHtml>;
}

/// How the HTML of a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// The external generator produced it
    Generated,
    /// The deterministic converter produced it
    Fallback,
}

/// Result of converting one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    /// Final HTML
    pub html: String,

    /// Headings of the final HTML
    pub outline: Outline,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Which path produced the HTML
    pub mode: ConversionMode,

    /// Generator token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ConvertResult {
    fn from_rendered(rendered: RenderedDocument, mode: ConversionMode) -> Self {
        Self {
            html: rendered.html,
            outline: rendered.outline,
            stats: rendered.stats,
            mode,
            usage: None,
        }
    }

    /// Serialize the result to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Get HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Text to HTML converter.
#[derive(Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
    generator: Option<Arc<dyn HtmlGenerator>>,
}

impl Converter {
    /// Create a converter that always uses the deterministic path.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            generator: None,
        }
    }

    /// Register an external generator to try first.
    pub fn with_generator(mut self, generator: Arc<dyn HtmlGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Whether a generator is registered.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Convert text to HTML.
    pub fn convert(&self, text: &str) -> ConvertResult {
        if let Some(generator) = &self.generator {
            match generator.generate(text) {
                Ok(generated) if !generated.html.trim().is_empty() => {
                    log::debug!("using output of generator {}", generator.name());
                    return self.finish_generated(text, generated);
                }
                Ok(_) => {
                    log::warn!(
                        "generator {} returned no HTML, using fallback",
                        generator.name()
                    );
                }
                Err(e) => {
                    log::warn!("generator {} failed: {}, using fallback", generator.name(), e);
                }
            }
        }
        self.convert_fallback(text)
    }

    /// Convert text with the deterministic path only.
    pub fn convert_fallback(&self, text: &str) -> ConvertResult {
        let document = SectionTransducer::new(self.options.parse.clone()).parse(text);
        let rendered = HtmlRenderer::new(self.options.render.clone()).render(&document);
        ConvertResult::from_rendered(rendered, ConversionMode::Fallback)
    }

    /// Convert independent texts in parallel, preserving order.
    pub fn convert_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<ConvertResult> {
        texts
            .par_iter()
            .map(|text| self.convert(text.as_ref()))
            .collect()
    }

    fn finish_generated(&self, text: &str, generated: GeneratedHtml) -> ConvertResult {
        let html = match &self.options.render.cleanup {
            Some(cleanup) => CleanupPipeline::new(cleanup.clone()).process(&generated.html),
            None => generated.html,
        };
        let mut rendered = RenderedDocument::html_only(html);
        rendered.stats.line_count = text.lines().count();

        let mut result = ConvertResult::from_rendered(rendered, ConversionMode::Generated);
        result.usage = generated.usage;
        result
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("options", &self.options)
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .finish()
    }
}

/// Convert independent texts in parallel with default options.
pub fn convert_batch<S: AsRef<str> + Sync>(texts: &[S]) -> Vec<ConvertResult> {
    Converter::default().convert_batch(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Fixed(&'static str);

    impl HtmlGenerator for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn generate(&self, _text: &str) -> Result<GeneratedHtml> {
            Ok(GeneratedHtml::new(self.0).with_usage(Usage {
                input_tokens: 10,
                output_tokens: 20,
            }))
        }
    }

    struct Failing;

    impl HtmlGenerator for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn generate(&self, _text: &str) -> Result<GeneratedHtml> {
            Err(Error::Generator("quota exceeded".into()))
        }
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_parse_options(ParseOptions::strict())
            .without_cleanup();
        assert!(options.render.cleanup.is_none());
    }

    #[test]
    fn test_fallback_without_generator() {
        let result = Converter::default().convert("Plain words.");
        assert_eq!(result.mode, ConversionMode::Fallback);
        assert_eq!(result.html, "<p>Plain words.</p>");
        assert!(result.usage.is_none());
    }

    #[test]
    fn test_generated_output_is_cleaned() {
        let converter = Converter::default()
            .with_generator(Arc::new(Fixed("<h1>Title</h1>\n\n<p></p>\n<p>Body</p>")));
        let result = converter.convert("ignored");
        assert_eq!(result.mode, ConversionMode::Generated);
        assert_eq!(result.html, "<h2>Title</h2>\n<p>Body</p>");
        assert_eq!(result.usage.map(|u| u.total()), Some(30));
    }

    #[test]
    fn test_failing_generator_falls_back() {
        let converter = Converter::default().with_generator(Arc::new(Failing));
        let result = converter.convert("Plain words.");
        assert_eq!(result.mode, ConversionMode::Fallback);
        assert_eq!(result.html, "<p>Plain words.</p>");
    }

    #[test]
    fn test_empty_generation_falls_back() {
        let converter = Converter::default().with_generator(Arc::new(Fixed("  \n")));
        assert_eq!(converter.convert("Plain words.").mode, ConversionMode::Fallback);
    }

    #[test]
    fn test_convert_batch_keeps_order() {
        let results = convert_batch(&["First one.", "Second one."]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].html, "<p>First one.</p>");
        assert_eq!(results[1].html, "<p>Second one.</p>");
    }

    #[test]
    fn test_result_json() {
        let result = Converter::default().convert("Plain words.");
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"mode\":\"fallback\""));
        assert!(!json.contains("usage"));
    }
}
