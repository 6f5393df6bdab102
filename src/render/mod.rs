//! Rendering module for converting documents to HTML.

mod cleanup;
mod html;
mod json;
mod options;
mod result;
mod sections;
pub mod toc;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use html::{render_document, to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{
    CtaDefaults, RenderOptions, DEFAULT_FAQ_TITLE, DEFAULT_KEY_TAKEAWAYS_LABEL, DEFAULT_TOC_LABEL,
};
pub use result::{ConversionStats, RenderedDocument};
pub use sections::{is_question, render_section, render_table, render_toc};
