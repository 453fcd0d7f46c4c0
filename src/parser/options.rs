//! Parsing options and configuration.

/// Default nesting limit for both parsing and rendering.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for turning JSON payloads into document trees.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum node nesting depth; deeper subtrees are dropped (lenient)
    /// or rejected (strict)
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (malformed content degrades to empty nodes).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (malformed content is an error).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Report unknown node types and malformed fields
    Strict,
    /// Treat anything malformed as empty and continue
    #[default]
    Lenient,
}
