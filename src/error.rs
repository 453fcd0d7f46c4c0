//! Error types for unadf library.
//!
//! Rendering and criteria extraction never fail; these errors only come from
//! the layers that read input (I/O, JSON text) or validate it strictly.

use std::io;
use thiserror::Error;

/// Result type alias for unadf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or validating documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A node is structurally invalid (strict mode only).
    #[error("Malformed node at {path}: {reason}")]
    MalformedNode {
        /// Location of the node, e.g. `doc.content[2].content[0]`
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// A node carries a type tag the parser does not know (strict mode only).
    #[error("Unknown node type '{kind}' at {path}")]
    UnknownNodeType {
        /// Location of the node
        path: String,
        /// The unrecognized `type` value
        kind: String,
    },

    /// The document nests deeper than the configured limit (strict mode only).
    #[error("Document nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    /// Error while producing output (JSON results).
    #[error("Rendering error: {0}")]
    Render(String),
}
