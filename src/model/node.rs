//! Node types for the structured document tree.

use super::{PanelType, TaskState};

/// A single node in a structured document.
///
/// Each variant corresponds to one `type` tag of the tracker's rich-text
/// format and carries only the fields meaningful for that tag. Tags the
/// parser does not recognize become [`Node::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Document root (`doc`)
    Doc { content: Vec<Node> },

    /// Paragraph of inline content
    Paragraph { content: Vec<Node> },

    /// Heading with level 1-6
    Heading { level: u8, content: Vec<Node> },

    /// Literal text run (marks are dropped)
    Text { text: String },

    /// Line break inside inline content (`hardBreak`)
    HardBreak,

    /// Horizontal rule
    Rule,

    /// User mention
    Mention {
        /// Display text, e.g. "John Doe" or "@John Doe"
        text: Option<String>,
        /// Account id
        id: Option<String>,
    },

    /// Emoji
    Emoji {
        /// Unicode rendering of the emoji
        text: Option<String>,
        /// Short name such as `:smile:`
        short_name: Option<String>,
    },

    /// Status lozenge
    Status { text: String },

    /// Date, as epoch milliseconds
    Date { timestamp: Option<i64> },

    /// Inline smart link
    InlineCard { url: Option<String> },

    /// Unordered list (`bulletList`)
    BulletList { content: Vec<Node> },

    /// Ordered list; `start` is the number of the first item
    OrderedList { start: u32, content: Vec<Node> },

    /// Item of a bullet or ordered list
    ListItem { content: Vec<Node> },

    /// Checklist (`taskList`)
    TaskList { content: Vec<Node> },

    /// Checklist entry (`taskItem`)
    TaskItem { state: TaskState, content: Vec<Node> },

    /// Code block with optional language tag
    CodeBlock {
        language: Option<String>,
        content: Vec<Node>,
    },

    /// Block quote
    Blockquote { content: Vec<Node> },

    /// Callout panel
    Panel {
        panel_type: PanelType,
        content: Vec<Node>,
    },

    /// Collapsible section (`expand` and `nestedExpand`)
    Expand {
        title: Option<String>,
        content: Vec<Node>,
    },

    /// Table
    Table { content: Vec<Node> },

    /// Table row
    TableRow { content: Vec<Node> },

    /// Header cell
    TableHeader { content: Vec<Node> },

    /// Data cell
    TableCell { content: Vec<Node> },

    /// Any node type not listed above
    Unknown { kind: String },
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Create a document root.
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc { content }
    }

    /// Create a paragraph holding a single text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            content: vec![Node::text(text)],
        }
    }

    /// Create a heading holding a single text run.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Node::Heading {
            level: level.clamp(1, 6),
            content: vec![Node::text(text)],
        }
    }

    /// Create a list item wrapping a single paragraph.
    pub fn list_item(text: impl Into<String>) -> Self {
        Node::ListItem {
            content: vec![Node::paragraph(text)],
        }
    }

    /// Create a bullet list of single-paragraph items.
    pub fn bullet_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::BulletList {
            content: items.into_iter().map(Node::list_item).collect(),
        }
    }

    /// Create an ordered list of single-paragraph items, numbered from 1.
    pub fn ordered_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::OrderedList {
            start: 1,
            content: items.into_iter().map(Node::list_item).collect(),
        }
    }

    /// Create a code block.
    pub fn code_block(code: impl Into<String>, language: Option<&str>) -> Self {
        Node::CodeBlock {
            language: language.map(str::to_string),
            content: vec![Node::text(code)],
        }
    }

    /// Create a mention with display text.
    pub fn mention(text: impl Into<String>) -> Self {
        Node::Mention {
            text: Some(text.into()),
            id: None,
        }
    }

    /// Create a table from rows of cell texts.
    pub fn table<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Table {
            content: rows
                .into_iter()
                .map(|cells| Node::TableRow {
                    content: cells
                        .into_iter()
                        .map(|text| Node::TableCell {
                            content: vec![Node::paragraph(text)],
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// The `type` tag this node was parsed from.
    pub fn kind(&self) -> &str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Text { .. } => "text",
            Node::HardBreak => "hardBreak",
            Node::Rule => "rule",
            Node::Mention { .. } => "mention",
            Node::Emoji { .. } => "emoji",
            Node::Status { .. } => "status",
            Node::Date { .. } => "date",
            Node::InlineCard { .. } => "inlineCard",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::TaskList { .. } => "taskList",
            Node::TaskItem { .. } => "taskItem",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Blockquote { .. } => "blockquote",
            Node::Panel { .. } => "panel",
            Node::Expand { .. } => "expand",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "tableRow",
            Node::TableHeader { .. } => "tableHeader",
            Node::TableCell { .. } => "tableCell",
            Node::Unknown { kind } => kind,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content }
            | Node::Panel { content, .. }
            | Node::Expand { content, .. }
            | Node::Table { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content } => content,
            Node::Text { .. }
            | Node::HardBreak
            | Node::Rule
            | Node::Mention { .. }
            | Node::Emoji { .. }
            | Node::Status { .. }
            | Node::Date { .. }
            | Node::InlineCard { .. }
            | Node::Unknown { .. } => &[],
        }
    }

    /// Whether this node is a list container (bullet, ordered or task list).
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Node::BulletList { .. } | Node::OrderedList { .. } | Node::TaskList { .. }
        )
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    /// Nesting depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert!(matches!(Node::heading("x", 0), Node::Heading { level: 1, .. }));
        assert!(matches!(Node::heading("x", 9), Node::Heading { level: 6, .. }));
    }

    #[test]
    fn test_kind_round_trips_tag() {
        assert_eq!(Node::paragraph("a").kind(), "paragraph");
        assert_eq!(Node::bullet_list(["a"]).kind(), "bulletList");
        assert_eq!(
            Node::Unknown {
                kind: "mediaSingle".to_string()
            }
            .kind(),
            "mediaSingle"
        );
    }

    #[test]
    fn test_node_count_and_depth() {
        let doc = Node::doc(vec![Node::paragraph("a"), Node::bullet_list(["x", "y"])]);
        // doc, paragraph, text, list, 2 * (item, paragraph, text)
        assert_eq!(doc.node_count(), 10);
        assert_eq!(doc.depth(), 5);
        assert_eq!(Node::Rule.depth(), 1);
    }

    #[test]
    fn test_is_list() {
        assert!(Node::bullet_list(["a"]).is_list());
        assert!(Node::ordered_list(["a"]).is_list());
        assert!(Node::TaskList { content: vec![] }.is_list());
        assert!(!Node::paragraph("a").is_list());
    }

    #[test]
    fn test_table_builder_shape() {
        let table = Node::table([["a", "b"], ["c", "d"]]);
        assert_eq!(table.children().len(), 2);
        assert_eq!(table.children()[0].children().len(), 2);
    }
}
