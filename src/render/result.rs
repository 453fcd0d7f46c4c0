//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered plain text
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while walking a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of non-empty paragraphs
    pub paragraph_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of list and checklist items
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of panels
    pub panel_count: u32,

    /// Number of mentions
    pub mention_count: u32,

    /// Nodes skipped because their type is not recognized
    pub unknown_node_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment code block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Increment panel count.
    pub fn add_panel(&mut self) {
        self.panel_count += 1;
    }

    /// Increment mention count.
    pub fn add_mention(&mut self) {
        self.mention_count += 1;
    }

    /// Increment unknown node count.
    pub fn add_unknown(&mut self) {
        self.unknown_node_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("• First item\n• Second");

        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.char_count, 17);
    }
}
