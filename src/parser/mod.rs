//! Structured document parsing module.

mod document_parser;
mod options;

pub use document_parser::{parse_input, parse_node, DocumentParser};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_DEPTH};
