//! Top-level renderer input.

use super::Node;

/// What a tracker hands over in a narrative field.
///
/// Trackers supply either a structured document, a legacy plain-text
/// string, or nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// A structured document tree
    Document(Node),
    /// Legacy plain text, passed through unchanged
    Text(String),
    /// Absent field (`null` or missing)
    #[default]
    Empty,
}

impl Input {
    /// Wrap a document tree.
    pub fn document(node: Node) -> Self {
        Input::Document(node)
    }

    /// Wrap plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Check if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        match self {
            Input::Empty => true,
            Input::Text(text) => text.is_empty(),
            Input::Document(node) => match node {
                Node::Doc { content } => content.is_empty(),
                Node::Unknown { .. } => true,
                _ => false,
            },
        }
    }

    /// The document tree, if this input is structured.
    pub fn as_document(&self) -> Option<&Node> {
        match self {
            Input::Document(node) => Some(node),
            _ => None,
        }
    }
}

impl From<Node> for Input {
    fn from(node: Node) -> Self {
        Input::Document(node)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Input::from("abc"), Input::Text("abc".to_string()));
        assert_eq!(Input::from(None::<String>), Input::Empty);
        assert_eq!(
            Input::from(Node::paragraph("x")),
            Input::Document(Node::paragraph("x"))
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Input::Empty.is_empty());
        assert!(Input::text("").is_empty());
        assert!(Input::document(Node::doc(vec![])).is_empty());
        assert!(!Input::document(Node::doc(vec![Node::paragraph("a")])).is_empty());
        assert!(!Input::document(Node::text("a")).is_empty());
    }
}
