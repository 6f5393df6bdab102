//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Label of the table of contents block.
pub const DEFAULT_TOC_LABEL: &str = "Table of Contents";

/// Label of the key takeaways block.
pub const DEFAULT_KEY_TAKEAWAYS_LABEL: &str = "Key Takeaways";

/// Heading of the FAQ block.
pub const DEFAULT_FAQ_TITLE: &str = "Frequently Asked Questions";

/// Options for rendering a document to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Post-processing cleanup; `None` skips cleanup entirely
    pub cleanup: Option<CleanupOptions>,

    /// Label shown at the top of the table of contents
    pub toc_label: String,

    /// Label shown at the top of the key takeaways box
    pub key_takeaways_label: String,

    /// Heading of the FAQ block
    pub faq_title: String,

    /// Label of the pros column
    pub pros_label: String,

    /// Label of the cons column
    pub cons_label: String,

    /// Values used for missing call-to-action fields
    pub cta: CtaDefaults,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Disable cleanup.
    pub fn without_cleanup(mut self) -> Self {
        self.cleanup = None;
        self
    }

    /// Set the table of contents label.
    pub fn with_toc_label(mut self, label: impl Into<String>) -> Self {
        self.toc_label = label.into();
        self
    }

    /// Set the key takeaways label.
    pub fn with_key_takeaways_label(mut self, label: impl Into<String>) -> Self {
        self.key_takeaways_label = label.into();
        self
    }

    /// Set the FAQ heading.
    pub fn with_faq_title(mut self, title: impl Into<String>) -> Self {
        self.faq_title = title.into();
        self
    }

    /// Set the pros and cons column labels.
    pub fn with_pros_cons_labels(
        mut self,
        pros: impl Into<String>,
        cons: impl Into<String>,
    ) -> Self {
        self.pros_label = pros.into();
        self.cons_label = cons.into();
        self
    }

    /// Set the call-to-action defaults.
    pub fn with_cta_defaults(mut self, cta: CtaDefaults) -> Self {
        self.cta = cta;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cleanup: Some(CleanupOptions::standard()),
            toc_label: DEFAULT_TOC_LABEL.to_string(),
            key_takeaways_label: DEFAULT_KEY_TAKEAWAYS_LABEL.to_string(),
            faq_title: DEFAULT_FAQ_TITLE.to_string(),
            pros_label: "Pros".to_string(),
            cons_label: "Cons".to_string(),
            cta: CtaDefaults::default(),
        }
    }
}

/// Fallback values for call-to-action blocks.
///
/// Buffered lines map positionally to heading, description, button label
/// and image URL; any that are missing take these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaDefaults {
    /// Callout heading
    pub heading: String,

    /// Callout description
    pub description: String,

    /// Button label
    pub button: String,

    /// Image URL
    pub image_url: String,
}

impl Default for CtaDefaults {
    fn default() -> Self {
        Self {
            heading: "Ready to Get Started?".to_string(),
            description: "Take the next step today.".to_string(),
            button: "Get Started".to_string(),
            image_url: "https://via.placeholder.com/300x200".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_toc_label("Contents")
            .with_faq_title("Questions")
            .with_pros_cons_labels("Upsides", "Downsides")
            .without_cleanup();

        assert_eq!(options.toc_label, "Contents");
        assert_eq!(options.faq_title, "Questions");
        assert_eq!(options.pros_label, "Upsides");
        assert_eq!(options.cons_label, "Downsides");
        assert!(options.cleanup.is_none());
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.cleanup.is_some());
        assert_eq!(options.toc_label, DEFAULT_TOC_LABEL);
        assert_eq!(options.cta.button, "Get Started");
    }

    #[test]
    fn test_cleanup_preset() {
        let options = RenderOptions::new().with_cleanup_preset(CleanupPreset::Minimal);
        let cleanup = options.cleanup.unwrap();
        assert!(!cleanup.dedupe_headings);
        assert!(cleanup.strip_empty);
    }
}
