//! Plain text rendering for structured documents.
//!
//! The renderer is a depth-first walk that returns an owned string per node.
//! Block-level siblings are joined with a blank line, list items with a
//! single newline, and inline content is concatenated. Empty nodes render to
//! an empty string and never add separators to their parent.

use chrono::DateTime;
use rayon::prelude::*;
use serde_json::Value;

use crate::model::{Input, Node, TaskState};

use super::{CleanupPipeline, ExtractionStats, RenderOptions, RenderResult};

const BLOCK_SEPARATOR: &str = "\n\n";
const BULLET: &str = "• ";
const CELL_SEPARATOR: &str = " | ";

/// Render an input to plain text with default options.
///
/// Never fails: absent or malformed input renders as `""` and plain text is
/// returned unchanged.
pub fn to_plain_text(input: &Input) -> String {
    TextRenderer::new(RenderOptions::default()).render(input)
}

/// Render a raw JSON value (document, fragment, string or `null`).
pub fn render_value(value: &Value) -> String {
    to_plain_text(&Input::from(value))
}

/// Render an input with custom options, applying cleanup if configured.
pub fn to_text(input: &Input, options: &RenderOptions) -> String {
    TextRenderer::new(options.clone()).render(input)
}

/// Render an input and collect extraction statistics.
pub fn to_text_with_stats(input: &Input, options: &RenderOptions) -> RenderResult {
    TextRenderer::new(options.clone()).render_with_stats(input)
}

/// Render many inputs in parallel; output order matches input order.
pub fn render_batch(inputs: &[Input], options: &RenderOptions) -> Vec<String> {
    inputs
        .par_iter()
        .map(|input| TextRenderer::new(options.clone()).render(input))
        .collect()
}

/// Plain text renderer.
pub struct TextRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
    indent: String,
    truncated: bool,
}

impl TextRenderer {
    /// Create a new plain text renderer.
    pub fn new(options: RenderOptions) -> Self {
        let indent = options.indent();
        Self {
            options,
            stats: ExtractionStats::new(),
            indent,
            truncated: false,
        }
    }

    /// Render an input to plain text.
    pub fn render(mut self, input: &Input) -> String {
        self.render_internal(input)
    }

    /// Render an input with extraction statistics.
    pub fn render_with_stats(mut self, input: &Input) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(input);
        self.stats.count_text(&content);
        RenderResult::new(content, self.stats)
    }

    fn render_internal(&mut self, input: &Input) -> String {
        let output = match input {
            Input::Empty => return String::new(),
            Input::Text(text) => text.clone(),
            Input::Document(node) => self.render_node(node, 0),
        };

        match self.options.cleanup {
            Some(ref cleanup_options) => CleanupPipeline::new(cleanup_options.clone()).process(&output),
            None => output,
        }
    }

    fn track(&mut self, update: impl FnOnce(&mut ExtractionStats)) {
        if self.options.collect_stats {
            update(&mut self.stats);
        }
    }

    fn render_node(&mut self, node: &Node, depth: usize) -> String {
        if depth >= self.options.max_depth {
            if !self.truncated {
                log::warn!(
                    "Document nesting exceeds {} levels; deeper content is dropped",
                    self.options.max_depth
                );
                self.truncated = true;
            }
            return String::new();
        }

        match node {
            Node::Doc { content } => self.render_blocks(content, depth),
            Node::Paragraph { content } => {
                let text = self.render_inline(content, depth);
                if !text.is_empty() {
                    self.track(ExtractionStats::add_paragraph);
                }
                text
            }
            Node::Heading { level, content } => {
                let text = self.render_inline(content, depth);
                if text.is_empty() {
                    return text;
                }
                self.track(ExtractionStats::add_heading);
                let level = (*level).clamp(1, 6) as usize;
                format!("{} {}", "#".repeat(level), text)
            }
            Node::Text { text } => text.clone(),
            Node::HardBreak => "\n".to_string(),
            Node::Rule => "---".to_string(),
            Node::Mention { text, id } => {
                let rendered = render_mention(text.as_deref(), id.as_deref());
                if !rendered.is_empty() {
                    self.track(ExtractionStats::add_mention);
                }
                rendered
            }
            Node::Emoji { text, short_name } => text
                .as_ref()
                .or(short_name.as_ref())
                .cloned()
                .unwrap_or_default(),
            Node::Status { text } => {
                if text.is_empty() {
                    String::new()
                } else {
                    format!("[{}]", text)
                }
            }
            Node::Date { timestamp } => (*timestamp).and_then(format_date).unwrap_or_default(),
            Node::InlineCard { url } => url.clone().unwrap_or_default(),
            Node::BulletList { content } => self.render_list(content, depth, |_| BULLET.to_string()),
            Node::OrderedList { start, content } => {
                let start = u64::from(*start);
                self.render_list(content, depth, |i| format!("{}. ", start + i as u64))
            }
            Node::ListItem { content } => self.render_list_item(content, depth),
            Node::TaskList { content } => self.render_task_list(content, depth),
            Node::TaskItem { state, content } => self.render_task_item(*state, content, depth),
            Node::CodeBlock { language, content } => {
                let code: String = content
                    .iter()
                    .filter_map(|child| match child {
                        Node::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect();
                if code.is_empty() {
                    return code;
                }
                self.track(ExtractionStats::add_code_block);
                format!("```{}\n{}\n```", language.as_deref().unwrap_or(""), code)
            }
            Node::Blockquote { content } => {
                let inner = self.render_blocks(content, depth);
                inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Node::Panel {
                panel_type,
                content,
            } => {
                let inner = self.render_blocks(content, depth);
                if inner.is_empty() {
                    return inner;
                }
                self.track(ExtractionStats::add_panel);
                format!("{}\n{}", panel_type.tag(), inner)
            }
            Node::Expand { title, content } => {
                let inner = self.render_blocks(content, depth);
                match title.as_deref() {
                    Some(title) if inner.is_empty() => title.to_string(),
                    Some(title) => format!("{}\n{}", title, inner),
                    None => inner,
                }
            }
            Node::Table { content } => {
                let rows = join_non_empty(
                    content.iter().map(|row| self.render_node(row, depth + 1)),
                    "\n",
                );
                if !rows.is_empty() {
                    self.track(ExtractionStats::add_table);
                }
                rows
            }
            Node::TableRow { content } => {
                let cells: Vec<String> = content
                    .iter()
                    .map(|cell| self.render_node(cell, depth + 1))
                    .collect();
                if cells.iter().all(String::is_empty) {
                    return String::new();
                }
                cells.join(CELL_SEPARATOR)
            }
            Node::TableHeader { content } | Node::TableCell { content } => {
                let text = join_non_empty(
                    content.iter().map(|block| self.render_node(block, depth + 1)),
                    " ",
                );
                text.replace('\n', " ")
            }
            Node::Unknown { kind } => {
                log::debug!("Skipping unrecognized node type '{}'", kind);
                self.track(ExtractionStats::add_unknown);
                String::new()
            }
        }
    }

    fn render_blocks(&mut self, content: &[Node], depth: usize) -> String {
        join_non_empty(
            content.iter().map(|block| self.render_node(block, depth + 1)),
            BLOCK_SEPARATOR,
        )
    }

    fn render_inline(&mut self, content: &[Node], depth: usize) -> String {
        content
            .iter()
            .map(|child| self.render_node(child, depth + 1))
            .collect()
    }

    fn render_list(
        &mut self,
        items: &[Node],
        depth: usize,
        marker: impl Fn(usize) -> String,
    ) -> String {
        let mut lines = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let body = self.render_node(item, depth + 1);
            if body.is_empty() {
                continue;
            }
            self.track(ExtractionStats::add_list_item);
            match body.strip_prefix('\n') {
                // item opens with a nested list: the marker stands alone
                Some(nested) => lines.push(format!("{}\n{}", marker(i).trim_end(), nested)),
                None => lines.push(format!("{}{}", marker(i), body)),
            }
        }
        lines.join("\n")
    }

    /// Item body: the first block sits right after the marker, every later
    /// line (continuations and nested lists) is indented one level. A body
    /// that opens with a nested list starts on its own line instead.
    fn render_list_item(&mut self, content: &[Node], depth: usize) -> String {
        let mut leading_list = None;
        let body = join_non_empty(
            content.iter().map(|child| {
                let rendered = self.render_node(child, depth + 1);
                if leading_list.is_none() && !rendered.is_empty() {
                    leading_list = Some(child.is_list());
                }
                rendered
            }),
            "\n",
        );
        if leading_list == Some(true) {
            format!("\n{}", indent_all(&body, &self.indent))
        } else {
            indent_continuation(&body, &self.indent)
        }
    }

    fn render_task_list(&mut self, content: &[Node], depth: usize) -> String {
        let mut lines = Vec::with_capacity(content.len());
        for child in content {
            let rendered = self.render_node(child, depth + 1);
            if rendered.is_empty() {
                continue;
            }
            if child.is_list() {
                lines.push(indent_all(&rendered, &self.indent));
            } else {
                lines.push(rendered);
            }
        }
        lines.join("\n")
    }

    fn render_task_item(&mut self, state: TaskState, content: &[Node], depth: usize) -> String {
        let text = self.render_inline(content, depth);
        if text.is_empty() {
            return text;
        }
        self.track(ExtractionStats::add_list_item);
        indent_continuation(&format!("{}{}", state.marker(), text), &self.indent)
    }
}

fn join_non_empty(parts: impl Iterator<Item = String>, separator: &str) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn indent_line(line: &str, indent: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{}", indent, line)
    }
}

fn indent_all(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| indent_line(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_continuation(text: &str, indent: &str) -> String {
    match text.split_once('\n') {
        Some((first, rest)) => format!("{}\n{}", first, indent_all(rest, indent)),
        None => text.to_string(),
    }
}

fn render_mention(text: Option<&str>, id: Option<&str>) -> String {
    let name = text
        .map(|t| t.trim_start_matches('@'))
        .filter(|t| !t.is_empty())
        .or(id.filter(|i| !i.is_empty()));
    name.map(|n| format!("@{}", n)).unwrap_or_default()
}

fn format_date(timestamp_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PanelType;
    use crate::render::CleanupPreset;
    use serde_json::json;

    fn doc(content: Vec<Node>) -> Input {
        Input::Document(Node::doc(content))
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(to_plain_text(&Input::Empty), "");
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!({})), "");
        assert_eq!(to_plain_text(&doc(vec![])), "");
    }

    #[test]
    fn test_plain_text_pass_through() {
        assert_eq!(render_value(&json!("plain text")), "plain text");
        assert_eq!(to_plain_text(&Input::text("  keep  me \n")), "  keep  me \n");
    }

    #[test]
    fn test_paragraphs_joined_by_blank_line() {
        let input = doc(vec![
            Node::paragraph("First"),
            Node::paragraph("Second"),
            Node::paragraph("Third"),
        ]);
        assert_eq!(to_plain_text(&input), "First\n\nSecond\n\nThird");
    }

    #[test]
    fn test_empty_paragraph_adds_no_separator() {
        let input = doc(vec![
            Node::paragraph("A"),
            Node::Paragraph { content: vec![] },
            Node::paragraph("B"),
        ]);
        assert_eq!(to_plain_text(&input), "A\n\nB");
    }

    #[test]
    fn test_inline_concatenation() {
        let input = doc(vec![Node::Paragraph {
            content: vec![Node::text("Hello "), Node::text("world")],
        }]);
        assert_eq!(to_plain_text(&input), "Hello world");
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let input = doc(vec![Node::heading("Title", level)]);
            let expected = format!("{} Title", "#".repeat(level as usize));
            assert_eq!(to_plain_text(&input), expected);
        }
    }

    #[test]
    fn test_bullet_list() {
        let input = doc(vec![Node::bullet_list(["One", "Two", "Three"])]);
        assert_eq!(to_plain_text(&input), "• One\n• Two\n• Three");
    }

    #[test]
    fn test_ordered_list() {
        let input = doc(vec![Node::ordered_list(["One", "Two", "Three"])]);
        assert_eq!(to_plain_text(&input), "1. One\n2. Two\n3. Three");
    }

    #[test]
    fn test_ordered_list_start() {
        let input = doc(vec![Node::OrderedList {
            start: 3,
            content: vec![Node::list_item("C"), Node::list_item("D")],
        }]);
        assert_eq!(to_plain_text(&input), "3. C\n4. D");
    }

    #[test]
    fn test_nested_list_indented() {
        let input = doc(vec![Node::BulletList {
            content: vec![
                Node::ListItem {
                    content: vec![Node::paragraph("Parent"), Node::bullet_list(["Child"])],
                },
                Node::list_item("Sibling"),
            ],
        }]);
        assert_eq!(to_plain_text(&input), "• Parent\n  • Child\n• Sibling");
    }

    #[test]
    fn test_item_opening_with_nested_list() {
        let input = doc(vec![Node::BulletList {
            content: vec![Node::ListItem {
                content: vec![Node::bullet_list(["Child"])],
            }],
        }]);
        assert_eq!(to_plain_text(&input), "•\n  • Child");

        let input = doc(vec![Node::OrderedList {
            start: 1,
            content: vec![
                Node::ListItem {
                    content: vec![Node::bullet_list(["A", "B"]), Node::paragraph("after")],
                },
                Node::list_item("Next"),
            ],
        }]);
        assert_eq!(to_plain_text(&input), "1.\n  • A\n  • B\n  after\n2. Next");
    }

    #[test]
    fn test_nested_list_custom_indent() {
        let input = doc(vec![Node::OrderedList {
            start: 1,
            content: vec![Node::ListItem {
                content: vec![
                    Node::paragraph("Parent"),
                    Node::BulletList {
                        content: vec![Node::ListItem {
                            content: vec![Node::paragraph("Child"), Node::ordered_list(["Leaf"])],
                        }],
                    },
                ],
            }],
        }]);
        let options = RenderOptions::new().with_list_indent(4);
        assert_eq!(
            to_text(&input, &options),
            "1. Parent\n    • Child\n        1. Leaf"
        );
    }

    #[test]
    fn test_code_block() {
        let input = doc(vec![Node::code_block("const x = 1;", Some("javascript"))]);
        assert_eq!(to_plain_text(&input), "```javascript\nconst x = 1;\n```");

        let input = doc(vec![Node::code_block("ls -la", None)]);
        assert_eq!(to_plain_text(&input), "```\nls -la\n```");
    }

    #[test]
    fn test_code_block_verbatim() {
        let input = doc(vec![Node::CodeBlock {
            language: None,
            content: vec![Node::text("a < b && "), Node::text("*c*")],
        }]);
        assert_eq!(to_plain_text(&input), "```\na < b && *c*\n```");
    }

    #[test]
    fn test_blockquote() {
        let input = doc(vec![Node::Blockquote {
            content: vec![Node::paragraph("Quoted"), Node::paragraph("Twice")],
        }]);
        assert_eq!(to_plain_text(&input), "> Quoted\n>\n> Twice");
    }

    #[test]
    fn test_panel() {
        let input = doc(vec![Node::Panel {
            panel_type: PanelType::Info,
            content: vec![Node::paragraph("Heads up")],
        }]);
        assert_eq!(to_plain_text(&input), "[INFO]\nHeads up");

        let input = doc(vec![Node::Panel {
            panel_type: PanelType::default(),
            content: vec![Node::paragraph("Generic")],
        }]);
        assert_eq!(to_plain_text(&input), "[NOTE]\nGeneric");
    }

    #[test]
    fn test_mention() {
        let input = doc(vec![Node::Paragraph {
            content: vec![Node::text("cc "), Node::mention("John Doe")],
        }]);
        assert_eq!(to_plain_text(&input), "cc @John Doe");

        assert_eq!(render_mention(Some("@Jane"), None), "@Jane");
        assert_eq!(render_mention(None, Some("5b10ac8d")), "@5b10ac8d");
        assert_eq!(render_mention(None, None), "");
    }

    #[test]
    fn test_table() {
        let input = doc(vec![Node::table([["Name", "Role"], ["Ana", "Dev"]])]);
        assert_eq!(to_plain_text(&input), "Name | Role\nAna | Dev");
    }

    #[test]
    fn test_table_header_cells_render_like_data_cells() {
        let header = Node::TableRow {
            content: vec![
                Node::TableHeader {
                    content: vec![Node::paragraph("H1")],
                },
                Node::TableHeader {
                    content: vec![Node::paragraph("H2")],
                },
            ],
        };
        let input = doc(vec![Node::Table {
            content: vec![header],
        }]);
        assert_eq!(to_plain_text(&input), "H1 | H2");
    }

    #[test]
    fn test_unknown_node_keeps_siblings() {
        let input = doc(vec![
            Node::paragraph("Before"),
            Node::Unknown {
                kind: "mediaSingle".to_string(),
            },
            Node::paragraph("After"),
        ]);
        assert_eq!(to_plain_text(&input), "Before\n\nAfter");
    }

    #[test]
    fn test_leaf_whitespace_preserved() {
        let input = doc(vec![Node::paragraph("  padded  ")]);
        assert_eq!(to_plain_text(&input), "  padded  ");
    }

    #[test]
    fn test_inline_extras() {
        let input = doc(vec![Node::Paragraph {
            content: vec![
                Node::text("Line one"),
                Node::HardBreak,
                Node::text("Line two "),
                Node::Status {
                    text: "IN PROGRESS".to_string(),
                },
                Node::text(" "),
                Node::Emoji {
                    text: None,
                    short_name: Some(":tada:".to_string()),
                },
                Node::text(" due "),
                Node::Date {
                    timestamp: Some(1_582_152_559_000),
                },
            ],
        }]);
        assert_eq!(
            to_plain_text(&input),
            "Line one\nLine two [IN PROGRESS] :tada: due 2020-02-19"
        );
    }

    #[test]
    fn test_task_list() {
        let input = doc(vec![Node::TaskList {
            content: vec![
                Node::TaskItem {
                    state: TaskState::Done,
                    content: vec![Node::text("Write tests")],
                },
                Node::TaskList {
                    content: vec![Node::TaskItem {
                        state: TaskState::Todo,
                        content: vec![Node::text("Cover edge cases")],
                    }],
                },
            ],
        }]);
        assert_eq!(
            to_plain_text(&input),
            "[x] Write tests\n  [ ] Cover edge cases"
        );
    }

    #[test]
    fn test_expand_and_rule() {
        let input = doc(vec![
            Node::Expand {
                title: Some("Details".to_string()),
                content: vec![Node::paragraph("Hidden")],
            },
            Node::Rule,
        ]);
        assert_eq!(to_plain_text(&input), "Details\nHidden\n\n---");
    }

    #[test]
    fn test_depth_guard() {
        let mut node = Node::paragraph("deep");
        for _ in 0..10 {
            node = Node::Blockquote {
                content: vec![node],
            };
        }
        let input = doc(vec![Node::paragraph("shallow"), node]);

        let options = RenderOptions::new().with_max_depth(4);
        assert_eq!(to_text(&input, &options), "shallow");
    }

    #[test]
    fn test_render_with_stats() {
        let input = doc(vec![
            Node::heading("Scope", 2),
            Node::paragraph("Some words here"),
            Node::bullet_list(["a", "b"]),
            Node::table([["x", "y"]]),
            Node::Unknown {
                kind: "media".to_string(),
            },
        ]);
        let result = to_text_with_stats(&input, &RenderOptions::default());

        assert_eq!(result.stats.heading_count, 1);
        // Paragraphs inside list items and table cells count too.
        assert_eq!(result.stats.paragraph_count, 5);
        assert_eq!(result.stats.list_item_count, 2);
        assert_eq!(result.stats.table_count, 1);
        assert_eq!(result.stats.unknown_node_count, 1);
        assert!(result.stats.word_count > 0);
    }

    #[test]
    fn test_cleanup_applied_by_to_text() {
        let input = doc(vec![Node::paragraph("Caf\u{0065}\u{0301} ● item   ")]);
        let options = RenderOptions::new().with_cleanup_preset(CleanupPreset::Standard);
        assert_eq!(to_text(&input, &options), "Café • item");
    }

    #[test]
    fn test_render_batch_preserves_order() {
        let inputs = vec![
            Input::text("first"),
            doc(vec![Node::paragraph("second")]),
            Input::Empty,
        ];
        let rendered = render_batch(&inputs, &RenderOptions::default());
        assert_eq!(rendered, vec!["first", "second", ""]);
    }
}
