//! # unadf
//!
//! Plain-text rendering for structured rich-text documents (Atlassian
//! Document Format) and acceptance criteria extraction for issue trackers.
//!
//! Issue descriptions arrive either as a JSON node tree or, from older
//! tracker deployments, as a plain string. This library turns both into
//! one readable plain-text form and locates the acceptance criteria
//! section inside it.
//!
//! ## Quick Start
//!
//! ```
//! use unadf::{extract_acceptance_criteria, parse_str, to_plain_text};
//!
//! fn main() -> unadf::Result<()> {
//!     let input = parse_str(
//!         r#"{"type": "doc", "content": [
//!             {"type": "paragraph", "content": [{"type": "text", "text": "AC:"}]},
//!             {"type": "bulletList", "content": [
//!                 {"type": "listItem", "content": [
//!                     {"type": "paragraph", "content": [{"type": "text", "text": "Exports CSV"}]}
//!                 ]}
//!             ]}
//!         ]}"#,
//!     )?;
//!
//!     let text = to_plain_text(&input);
//!     assert_eq!(text, "AC:\n\n• Exports CSV");
//!     assert_eq!(extract_acceptance_criteria(Some(text.as_str())), "• Exports CSV");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lenient by default**: unknown or malformed nodes never fail a render
//! - **Strict checking**: path-qualified errors for validation tooling
//! - **Nested lists**: indentation per nesting level, configurable
//! - **Cleanup pipeline**: text normalization before handing text to a generator
//! - **Parallel batches**: uses Rayon for many descriptions at once

pub mod criteria;
pub mod detect;
pub mod error;
pub mod issue;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use criteria::{CriteriaExtractor, CriteriaMatch, CriteriaPattern, ExtractOptions, SectionBound};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat, InputKind};
pub use error::{Error, Result};
pub use issue::{CriteriaSource, IssueNarrative, IssueOptions};
pub use model::{Input, Node, PanelType, TaskState};
pub use parser::{DocumentParser, ErrorMode, ParseOptions};
pub use render::{
    CleanupOptions, CleanupPreset, ExtractionStats, JsonFormat, RenderOptions, RenderResult,
    TextRenderer,
};

use std::io::Read;
use std::path::Path;

/// Render an input to plain text.
///
/// Never fails: absent input, empty documents and unrecognized shapes all
/// render as `""`.
///
/// # Example
///
/// ```
/// use unadf::{to_plain_text, Input, Node};
///
/// let doc = Node::doc(vec![Node::heading("Title", 2), Node::paragraph("Body")]);
/// assert_eq!(to_plain_text(&Input::document(doc)), "## Title\n\nBody");
/// assert_eq!(to_plain_text(&Input::text("legacy")), "legacy");
/// assert_eq!(to_plain_text(&Input::Empty), "");
/// ```
pub fn to_plain_text(input: &Input) -> String {
    render::to_plain_text(input)
}

/// Extract the acceptance criteria section from plain text.
///
/// Returns `""` when the text is absent, empty, or has no recognized heading.
pub fn extract_acceptance_criteria(text: Option<&str>) -> String {
    criteria::extract(text)
}

/// Parse a JSON string into an input.
///
/// A JSON string literal becomes legacy text, `null` becomes empty input.
pub fn parse_str(json: &str) -> Result<Input> {
    DocumentParser::from_json_str(json)?.parse()
}

/// Parse a JSON string with custom options.
///
/// # Example
///
/// ```
/// use unadf::{parse_str_with_options, ParseOptions};
///
/// let result = parse_str_with_options(
///     r#"{"type": "doc", "content": [{"type": "mystery"}]}"#,
///     ParseOptions::new().strict(),
/// );
/// assert!(result.is_err());
/// ```
pub fn parse_str_with_options(json: &str, options: ParseOptions) -> Result<Input> {
    DocumentParser::from_json_str_with_options(json, options)?.parse()
}

/// Parse an input from bytes.
///
/// Bytes that do not look like JSON are taken as legacy plain text.
pub fn parse_bytes(data: &[u8]) -> Result<Input> {
    DocumentParser::from_bytes(data)?.parse()
}

/// Parse an input from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Input> {
    DocumentParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse an input from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Input> {
    DocumentParser::from_reader(reader)?.parse()
}

/// Parse an input from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Input> {
    DocumentParser::from_reader_with_options(reader, options)?.parse()
}

/// Parse an input file.
///
/// # Example
///
/// ```no_run
/// use unadf::parse_file;
///
/// let input = parse_file("description.json").unwrap();
/// println!("{}", unadf::to_plain_text(&input));
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Input> {
    DocumentParser::open(path)?.parse()
}

/// Parse an input file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Input> {
    DocumentParser::open_with_options(path, options)?.parse()
}

/// Extract plain text from a document file.
///
/// # Example
///
/// ```no_run
/// use unadf::extract_text;
///
/// let text = extract_text("description.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let input = parse_file(path)?;
    Ok(to_plain_text(&input))
}

/// Render a document file to plain text with custom options.
///
/// # Example
///
/// ```no_run
/// use unadf::{to_text, CleanupPreset, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_list_indent(4)
///     .with_cleanup_preset(CleanupPreset::Standard);
/// let text = to_text("description.json", &options).unwrap();
/// ```
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let input = parse_file(path)?;
    Ok(render::to_text(&input, options))
}

/// Render a document file to a JSON result with statistics.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let input = parse_file(path)?;
    let result = render::to_text_with_stats(&input, &RenderOptions::default());
    render::to_json(&result, format)
}

/// Builder for parsing, rendering and criteria extraction.
///
/// # Example
///
/// ```
/// use unadf::{SectionBound, Unadf};
///
/// let result = Unadf::new()
///     .lenient()
///     .with_list_indent(4)
///     .with_section_bound(SectionBound::NextHeading)
///     .parse_str(r#""Summary\n\nAC:\n- fast\n\n## Notes\nlater""#)?;
///
/// assert_eq!(result.acceptance_criteria(), "- fast");
/// # Ok::<(), unadf::Error>(())
/// ```
pub struct Unadf {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    extract_options: ExtractOptions,
}

impl Unadf {
    /// Create a new Unadf builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            extract_options: ExtractOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Enable strict parsing mode.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Set maximum nesting depth for both parsing and rendering.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_depth(depth);
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Set spaces of indentation per list nesting level.
    pub fn with_list_indent(mut self, spaces: usize) -> Self {
        self.render_options = self.render_options.with_list_indent(spaces);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Collect render statistics.
    pub fn with_stats(mut self) -> Self {
        self.render_options = self.render_options.with_stats(true);
        self
    }

    /// Set where an acceptance criteria section ends.
    pub fn with_section_bound(mut self, bound: SectionBound) -> Self {
        self.extract_options = self.extract_options.with_bound(bound);
        self
    }

    /// Parse a JSON string and return a result wrapper.
    pub fn parse_str(self, json: &str) -> Result<UnadfResult> {
        let input = DocumentParser::from_json_str_with_options(json, self.parse_options.clone())?
            .parse()?;
        Ok(self.into_result(input))
    }

    /// Parse bytes and return a result wrapper.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnadfResult> {
        let input = DocumentParser::from_bytes_with_options(data, self.parse_options.clone())?
            .parse()?;
        Ok(self.into_result(input))
    }

    /// Parse a file and return a result wrapper.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<UnadfResult> {
        let input = DocumentParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(self.into_result(input))
    }

    fn into_result(self, input: Input) -> UnadfResult {
        UnadfResult {
            input,
            render_options: self.render_options,
            extract_options: self.extract_options,
        }
    }
}

impl Default for Unadf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an input.
pub struct UnadfResult {
    /// The parsed input
    pub input: Input,
    render_options: RenderOptions,
    extract_options: ExtractOptions,
}

impl UnadfResult {
    /// Render to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.input, &self.render_options)
    }

    /// Render to plain text with statistics.
    pub fn to_text_with_stats(&self) -> RenderResult {
        render::to_text_with_stats(&self.input, &self.render_options)
    }

    /// Render to a JSON result.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.to_text_with_stats(), format)
    }

    /// Extract acceptance criteria from the rendered text.
    pub fn acceptance_criteria(&self) -> String {
        CriteriaExtractor::new(self.extract_options.clone()).extract(&self.to_text())
    }

    /// Get the parsed input.
    pub fn input(&self) -> &Input {
        &self.input
    }
}
