//! Template rendering: rule-driven items, version bump and JSON output.

pub mod document;
pub mod error;
pub mod filter;
pub mod items;
pub mod patch;
pub mod render;

pub use document::{
    Font, GenerationRule, Items, KeyBinding, RenderedDocument, Tab, TemplateDocument,
    load_template,
};
pub use error::{Result, TemplateError};
pub use filter::{CodeFilter, LengthBounds, PrefixFilter, RulePipeline, SuffixFilter};
pub use items::{EXPORT_EXTENSION, GeneratedItems, generate_items};
pub use patch::{patch_config_version, update_template_file};
pub use render::{
    RenderOptions, RenderOutcome, TEMPLATE_SUFFIX, discover_template_variants, locate_template,
    render_document, render_template,
};
