//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};
use crate::parser::DEFAULT_MAX_DEPTH;

/// Options for rendering documents to plain text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Spaces added per nesting level for nested list content
    pub list_indent: usize,

    /// Maximum node nesting depth; deeper nodes render as empty text
    pub max_depth: usize,

    /// Text cleanup applied after rendering
    pub cleanup: Option<CleanupOptions>,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width for nested lists.
    pub fn with_list_indent(mut self, spaces: usize) -> Self {
        self.list_indent = spaces;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
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

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.list_indent)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            list_indent: 2,
            max_depth: DEFAULT_MAX_DEPTH,
            cleanup: None,
            collect_stats: false,
        }
    }
}
