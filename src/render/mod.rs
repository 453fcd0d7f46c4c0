//! Rendering module for converting document trees to plain text.

mod cleanup;
mod json;
mod options;
mod result;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{ExtractionStats, RenderResult};
pub use text::{
    render_batch, render_value, to_plain_text, to_text, to_text_with_stats, TextRenderer,
};
