//! Structured document parser over `serde_json` values.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::model::{Input, Node, PanelType, TaskState};

use super::options::{ErrorMode, ParseOptions};

const ROOT_PATH: &str = "$";

/// Parser turning a tracker payload into an [`Input`].
///
/// In lenient mode (the default) parsing never fails once the payload is
/// valid JSON: anything malformed degrades to an empty or unknown node.
pub struct DocumentParser {
    value: Value,
    options: ParseOptions,
}

impl DocumentParser {
    /// Parse JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_str_with_options(json, ParseOptions::default())
    }

    /// Parse JSON text with custom options.
    pub fn from_json_str_with_options(json: &str, options: ParseOptions) -> Result<Self> {
        let value = serde_json::from_str(json)?;
        Ok(Self { value, options })
    }

    /// Parse raw bytes: JSON payloads are decoded, anything else is legacy text.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse raw bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let value = match detect_format_from_bytes(data) {
            InputFormat::Json => serde_json::from_slice(strip_bom(data))?,
            InputFormat::PlainText => Value::String(String::from_utf8_lossy(data).into_owned()),
            InputFormat::Empty => Value::Null,
        };
        Ok(Self { value, options })
    }

    /// Parse from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Open a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Build the renderer input.
    pub fn parse(&self) -> Result<Input> {
        parse_input(&self.value, &self.options)
    }
}

/// Convert a JSON value into an [`Input`].
///
/// `null` is empty, a string is legacy text, an object is a document and an
/// array is treated as a bare list of top-level blocks.
pub fn parse_input(value: &Value, options: &ParseOptions) -> Result<Input> {
    match value {
        Value::Null => Ok(Input::Empty),
        Value::String(text) => Ok(Input::Text(text.clone())),
        Value::Object(_) => Ok(Input::Document(parse_node(value, options)?)),
        Value::Array(items) => {
            let walker = Walker { options };
            let content = walker.parse_children(items, ROOT_PATH, 1)?;
            Ok(Input::Document(Node::Doc { content }))
        }
        Value::Bool(_) | Value::Number(_) => match options.error_mode {
            ErrorMode::Strict => Err(Error::MalformedNode {
                path: ROOT_PATH.to_string(),
                reason: "expected a document object, a string or null".to_string(),
            }),
            ErrorMode::Lenient => Ok(Input::Empty),
        },
    }
}

/// Convert a single JSON node (and its subtree) into a [`Node`].
pub fn parse_node(value: &Value, options: &ParseOptions) -> Result<Node> {
    Walker { options }.parse(value, ROOT_PATH, 0)
}

impl From<&Value> for Input {
    fn from(value: &Value) -> Self {
        // Lenient parsing has no failure path.
        parse_input(value, &ParseOptions::default()).unwrap_or_default()
    }
}

struct Walker<'a> {
    options: &'a ParseOptions,
}

impl Walker<'_> {
    fn strict(&self) -> bool {
        self.options.error_mode == ErrorMode::Strict
    }

    fn malformed(&self, path: &str, reason: &str, fallback: Node) -> Result<Node> {
        if self.strict() {
            return Err(Error::MalformedNode {
                path: path.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(fallback)
    }

    fn parse(&self, value: &Value, path: &str, depth: usize) -> Result<Node> {
        if depth >= self.options.max_depth {
            if self.strict() {
                return Err(Error::DepthExceeded(self.options.max_depth));
            }
            log::warn!(
                "Dropping subtree at {} beyond depth {}",
                path,
                self.options.max_depth
            );
            return Ok(Node::Unknown {
                kind: String::new(),
            });
        }

        let Some(obj) = value.as_object() else {
            return self.malformed(path, "node is not an object", unknown(""));
        };

        let Some(kind) = obj.get("type").and_then(Value::as_str) else {
            return self.malformed(path, "missing string `type`", unknown(""));
        };

        let content = match obj.get("content") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => self.parse_children(items, path, depth + 1)?,
            Some(_) => {
                if self.strict() {
                    return Err(Error::MalformedNode {
                        path: path.to_string(),
                        reason: "`content` is not an array".to_string(),
                    });
                }
                Vec::new()
            }
        };

        let node = match kind {
            "doc" => Node::Doc { content },
            "paragraph" => Node::Paragraph { content },
            "heading" => {
                let level = match attr_int(obj, "level") {
                    None => 1,
                    Some(level @ 1..=6) => level as u8,
                    Some(_) => {
                        if self.strict() {
                            return Err(Error::MalformedNode {
                                path: path.to_string(),
                                reason: "heading level outside 1-6".to_string(),
                            });
                        }
                        attr_int(obj, "level").map_or(1, |l| l.clamp(1, 6) as u8)
                    }
                };
                Node::Heading { level, content }
            }
            "text" => match obj.get("text").and_then(Value::as_str) {
                Some(text) => Node::text(text),
                None => return self.malformed(path, "text node without `text`", Node::text("")),
            },
            "hardBreak" => Node::HardBreak,
            "rule" => Node::Rule,
            "mention" => Node::Mention {
                text: attr_str(obj, "text"),
                id: attr_str(obj, "id"),
            },
            "emoji" => Node::Emoji {
                text: attr_str(obj, "text"),
                short_name: attr_str(obj, "shortName"),
            },
            "status" => Node::Status {
                text: attr_str(obj, "text").unwrap_or_default(),
            },
            "date" => Node::Date {
                timestamp: attr_int(obj, "timestamp"),
            },
            "inlineCard" | "blockCard" => Node::InlineCard {
                url: attr_str(obj, "url"),
            },
            "bulletList" => Node::BulletList { content },
            "orderedList" => Node::OrderedList {
                start: attr_int(obj, "order")
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(1),
                content,
            },
            "listItem" => Node::ListItem { content },
            "taskList" | "decisionList" => Node::TaskList { content },
            "taskItem" | "decisionItem" => Node::TaskItem {
                state: TaskState::from_attr(attr_str(obj, "state").as_deref()),
                content,
            },
            "codeBlock" => Node::CodeBlock {
                language: attr_str(obj, "language").filter(|l| !l.is_empty()),
                content,
            },
            "blockquote" => Node::Blockquote { content },
            "panel" => Node::Panel {
                panel_type: PanelType::from_attr(attr_str(obj, "panelType").as_deref()),
                content,
            },
            "expand" | "nestedExpand" => Node::Expand {
                title: attr_str(obj, "title").filter(|t| !t.is_empty()),
                content,
            },
            "table" => Node::Table { content },
            "tableRow" => Node::TableRow { content },
            "tableHeader" => Node::TableHeader { content },
            "tableCell" => Node::TableCell { content },
            other => {
                if self.strict() {
                    return Err(Error::UnknownNodeType {
                        path: path.to_string(),
                        kind: other.to_string(),
                    });
                }
                log::debug!("Unknown node type '{}' at {}", other, path);
                unknown(other)
            }
        };

        Ok(node)
    }

    fn parse_children(&self, items: &[Value], path: &str, depth: usize) -> Result<Vec<Node>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.parse(item, &format!("{}.content[{}]", path, i), depth))
            .collect()
    }
}

fn unknown(kind: &str) -> Node {
    Node::Unknown {
        kind: kind.to_string(),
    }
}

fn attr<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get("attrs")?.as_object()?.get(key)
}

fn attr_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    attr(obj, key).and_then(Value::as_str).map(str::to_string)
}

/// Integer attribute; trackers send some numbers as strings (e.g. date timestamps).
fn attr_int(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match attr(obj, key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}
