//! Input format detection.
//!
//! Trackers hand over narrative fields either as structured JSON documents
//! or as legacy plain text. Detection only looks at the leading bytes, so a
//! JSON payload that later fails to parse is still reported as JSON.

use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Raw encoding of an input file or buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON payload (document object, fragment array, string or null)
    Json,
    /// Legacy plain text
    PlainText,
    /// Nothing but whitespace
    Empty,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::PlainText => write!(f, "plain text"),
            InputFormat::Empty => write!(f, "empty"),
        }
    }
}

/// Shape of an already decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Object tagged `"type": "doc"`
    Document,
    /// Any other node object, or an array of nodes
    Fragment,
    /// JSON string
    PlainText,
    /// `null` or an empty string
    Empty,
    /// Booleans and numbers
    Unsupported,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SNIFF_LEN: usize = 512;

/// Detect the input format of a file.
///
/// # Example
/// ```no_run
/// use unadf::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("issue-description.json").unwrap();
/// println!("Input is {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(SNIFF_LEN as u64);
    let mut head = Vec::with_capacity(SNIFF_LEN);
    reader.read_to_end(&mut head)?;
    Ok(detect_format_from_bytes(&head))
}

/// Detect the input format from the leading bytes of a buffer.
///
/// `[` only counts as JSON when the next non-blank byte opens an object or
/// closes the array, so text such as `"[INFO] build failed"` stays text.
pub fn detect_format_from_bytes(data: &[u8]) -> InputFormat {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let trimmed = trim_ascii_start(data);

    match trimmed.first() {
        None => InputFormat::Empty,
        Some(b'{') | Some(b'"') => InputFormat::Json,
        Some(b'[') => match trim_ascii_start(&trimmed[1..]).first() {
            Some(b'{') | Some(b']') => InputFormat::Json,
            _ => InputFormat::PlainText,
        },
        Some(_) if trim_ascii_end(trimmed) == b"null" => InputFormat::Json,
        Some(_) => InputFormat::PlainText,
    }
}

/// Classify a decoded JSON value.
pub fn detect_input_kind(value: &Value) -> InputKind {
    match value {
        Value::Null => InputKind::Empty,
        Value::String(s) if s.is_empty() => InputKind::Empty,
        Value::String(_) => InputKind::PlainText,
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("doc") => InputKind::Document,
            _ => InputKind::Fragment,
        },
        Value::Array(_) => InputKind::Fragment,
        Value::Bool(_) | Value::Number(_) => InputKind::Unsupported,
    }
}

/// Check if a JSON value is a complete structured document.
pub fn is_document(value: &Value) -> bool {
    detect_input_kind(value) == InputKind::Document
}

/// Check if bytes look like a JSON payload.
pub fn is_json_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data) == InputFormat::Json
}

fn trim_ascii_start(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[start..]
}

fn trim_ascii_end(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &data[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_json_object() {
        assert_eq!(
            detect_format_from_bytes(b"  {\"type\": \"doc\"}"),
            InputFormat::Json
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{\"type\": \"doc\"}"),
            InputFormat::Json
        );
    }

    #[test]
    fn test_detect_bracketed_text() {
        assert_eq!(
            detect_format_from_bytes(b"[INFO] build failed"),
            InputFormat::PlainText
        );
        assert_eq!(
            detect_format_from_bytes(b"[ {\"type\": \"rule\"} ]"),
            InputFormat::Json
        );
        assert_eq!(detect_format_from_bytes(b"[]"), InputFormat::Json);
    }

    #[test]
    fn test_detect_null_and_empty() {
        assert_eq!(detect_format_from_bytes(b"null\n"), InputFormat::Json);
        assert_eq!(detect_format_from_bytes(b"nullable field"), InputFormat::PlainText);
        assert_eq!(detect_format_from_bytes(b" \n\t"), InputFormat::Empty);
        assert_eq!(detect_format_from_bytes(b""), InputFormat::Empty);
    }

    #[test]
    fn test_detect_input_kind() {
        assert_eq!(detect_input_kind(&json!({"type": "doc"})), InputKind::Document);
        assert_eq!(
            detect_input_kind(&json!({"type": "paragraph"})),
            InputKind::Fragment
        );
        assert_eq!(detect_input_kind(&json!([])), InputKind::Fragment);
        assert_eq!(detect_input_kind(&json!("text")), InputKind::PlainText);
        assert_eq!(detect_input_kind(&json!("")), InputKind::Empty);
        assert_eq!(detect_input_kind(&Value::Null), InputKind::Empty);
        assert_eq!(detect_input_kind(&json!(true)), InputKind::Unsupported);
    }

    #[test]
    fn test_is_document() {
        assert!(is_document(&json!({"type": "doc", "content": []})));
        assert!(!is_document(&json!({"content": []})));
    }
}
