//! Acceptance criteria detection in free text.
//!
//! Issue descriptions often carry their acceptance criteria as a labeled
//! section instead of a dedicated field. The extractor tries a fixed chain
//! of line-anchored heading patterns and returns the body under the first
//! one that matches.
//!
//! # Example
//!
//! ```
//! use unadf::criteria::extract;
//!
//! let text = "Description\n\nAcceptance Criteria:\n- A\n- B";
//! assert_eq!(extract(Some(text)), "- A\n- B");
//! assert_eq!(extract(None), "");
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const LABELED: &str = r"(?mi)^[ \t]*(?:#{1,6}[ \t]*)?acceptance[ \t]+criteria[ \t]*:[ \t]*\r?$";
const ABBREVIATED: &str = r"(?mi)^[ \t]*(?:#{1,6}[ \t]*)?ac[ \t]*:[ \t]*\r?$";
const MARKDOWN_HEADING: &str = r"(?mi)^[ \t]*#{1,6}[ \t]*acceptance[ \t]+criteria[ \t]*\r?$";
const ANY_HEADING: &str = r"(?m)^[ \t]*#{1,6}[ \t]+\S";

/// Heading shapes recognized as the start of a criteria section, in
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaPattern {
    /// `Acceptance Criteria:` on its own line
    Labeled,
    /// `AC:` on its own line
    Abbreviated,
    /// `## Acceptance Criteria` without a colon
    MarkdownHeading,
}

impl CriteriaPattern {
    /// All patterns in the order they are tried.
    pub const PRIORITY: [CriteriaPattern; 3] = [
        CriteriaPattern::Labeled,
        CriteriaPattern::Abbreviated,
        CriteriaPattern::MarkdownHeading,
    ];

    fn source(&self) -> &'static str {
        match self {
            CriteriaPattern::Labeled => LABELED,
            CriteriaPattern::Abbreviated => ABBREVIATED,
            CriteriaPattern::MarkdownHeading => MARKDOWN_HEADING,
        }
    }
}

impl fmt::Display for CriteriaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaPattern::Labeled => write!(f, "'Acceptance Criteria:' label"),
            CriteriaPattern::Abbreviated => write!(f, "'AC:' label"),
            CriteriaPattern::MarkdownHeading => write!(f, "markdown heading"),
        }
    }
}

/// Where a criteria section ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionBound {
    /// Run to the end of the text (or the next criteria heading)
    #[default]
    EndOfText,
    /// Also stop before any markdown heading line such as `## Notes`
    NextHeading,
}

/// Options for criteria extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Where the extracted section ends
    pub bound: SectionBound,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the section bound.
    pub fn with_bound(mut self, bound: SectionBound) -> Self {
        self.bound = bound;
        self
    }
}

/// A located criteria section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaMatch {
    /// Pattern that recognized the heading
    pub pattern: CriteriaPattern,
    /// Section body without the heading line, blank edges trimmed
    pub body: String,
}

/// Acceptance criteria extractor with precompiled patterns.
pub struct CriteriaExtractor {
    patterns: Vec<(CriteriaPattern, Regex)>,
    stop: Regex,
}

impl CriteriaExtractor {
    /// Create an extractor.
    pub fn new(options: ExtractOptions) -> Self {
        let patterns = CriteriaPattern::PRIORITY
            .iter()
            .map(|p| (*p, Regex::new(p.source()).expect("static regex")))
            .collect();

        // A section never swallows another criteria heading.
        let mut stops = vec![LABELED, ABBREVIATED, MARKDOWN_HEADING];
        if options.bound == SectionBound::NextHeading {
            stops.push(ANY_HEADING);
        }
        let stop = Regex::new(
            &stops
                .iter()
                .map(|s| format!("(?:{})", s))
                .collect::<Vec<_>>()
                .join("|"),
        )
        .expect("static regex");

        Self { patterns, stop }
    }

    /// Locate the criteria section, reporting which pattern matched.
    pub fn find(&self, text: &str) -> Option<CriteriaMatch> {
        for (pattern, regex) in &self.patterns {
            let Some(heading) = regex.find(text) else {
                continue;
            };
            log::debug!("Acceptance criteria heading matched by {}", pattern);

            let rest = &text[heading.end()..];
            let rest = rest.strip_prefix('\n').unwrap_or(rest);
            let section = match self.stop.find(rest) {
                Some(next) => &rest[..next.start()],
                None => rest,
            };

            return Some(CriteriaMatch {
                pattern: *pattern,
                body: trim_blank_lines(section).to_string(),
            });
        }
        None
    }

    /// Extract the criteria body, or `""` if no heading is present.
    pub fn extract(&self, text: &str) -> String {
        self.find(text).map(|m| m.body).unwrap_or_default()
    }
}

impl Default for CriteriaExtractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

/// Extract acceptance criteria with default options.
///
/// Absent or empty input yields `""`.
pub fn extract(text: Option<&str>) -> String {
    static DEFAULT: OnceLock<CriteriaExtractor> = OnceLock::new();
    match text {
        Some(text) if !text.is_empty() => DEFAULT.get_or_init(CriteriaExtractor::default).extract(text),
        _ => String::new(),
    }
}

/// Drop blank lines at both edges; everything in between is kept byte for byte.
fn trim_blank_lines(section: &str) -> &str {
    let mut start = None;
    let mut end = 0;
    let mut offset = 0;
    for line in section.split_inclusive('\n') {
        if !line.trim().is_empty() {
            start.get_or_insert(offset);
            let content = line.strip_suffix('\n').unwrap_or(line);
            let content = content.strip_suffix('\r').unwrap_or(content);
            end = offset + content.len();
        }
        offset += line.len();
    }
    match start {
        Some(start) => &section[start..end],
        None => "",
    }
}
