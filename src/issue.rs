//! Narrative fields of a tracker issue.
//!
//! Maps an already fetched issue response body onto the plain-text fields a
//! downstream generator consumes. Descriptions are rendered with the
//! document renderer; acceptance criteria come from a dedicated field when
//! the tracker has one and from the description otherwise.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::criteria::{CriteriaExtractor, ExtractOptions};
use crate::error::Result;
use crate::model::Input;
use crate::render::{RenderOptions, TextRenderer};

/// Options for issue mapping.
#[derive(Debug, Clone, Default)]
pub struct IssueOptions {
    /// Field id holding structured acceptance criteria (e.g. `customfield_10035`)
    pub criteria_field: Option<String>,

    /// Rendering options for description and criteria fields
    pub render: RenderOptions,

    /// Options for the description fallback extraction
    pub extract: ExtractOptions,
}

impl IssueOptions {
    /// Create new issue options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acceptance criteria field id.
    pub fn with_criteria_field(mut self, field: impl Into<String>) -> Self {
        self.criteria_field = Some(field.into());
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }
}

/// Where the acceptance criteria of an issue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaSource {
    /// The configured criteria field
    Field,
    /// A labeled section of the description
    Extracted,
    /// Not found
    #[default]
    None,
}

/// Plain-text narrative of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueNarrative {
    /// Issue key, e.g. `PROJ-123`
    pub key: String,

    /// One-line summary
    pub summary: String,

    /// Rendered description
    pub description: String,

    /// Acceptance criteria
    pub acceptance_criteria: String,

    /// Origin of `acceptance_criteria`
    pub criteria_source: CriteriaSource,
}

impl IssueNarrative {
    /// Build the narrative from an issue response value.
    ///
    /// Missing or malformed fields become empty strings.
    pub fn from_json(issue: &Value, options: &IssueOptions) -> Self {
        let fields = issue.get("fields").unwrap_or(&Value::Null);

        let description = render_field(fields.get("description"), &options.render);

        let from_field = options
            .criteria_field
            .as_deref()
            .map(|id| render_field(fields.get(id), &options.render))
            .filter(|text| !text.trim().is_empty());

        let (acceptance_criteria, criteria_source) = match from_field {
            Some(text) => (text, CriteriaSource::Field),
            None => {
                let extracted = CriteriaExtractor::new(options.extract.clone()).extract(&description);
                if extracted.is_empty() {
                    (extracted, CriteriaSource::None)
                } else {
                    (extracted, CriteriaSource::Extracted)
                }
            }
        };

        log::debug!(
            "Issue {}: description {} bytes, criteria from {:?}",
            issue.get("key").and_then(Value::as_str).unwrap_or("<no key>"),
            description.len(),
            criteria_source
        );

        Self {
            key: string_field(issue.get("key")),
            summary: string_field(fields.get("summary")),
            description,
            acceptance_criteria,
            criteria_source,
        }
    }

    /// Check if the issue carries any acceptance criteria.
    pub fn has_criteria(&self) -> bool {
        self.criteria_source != CriteriaSource::None
    }
}

/// Parse an issue response body.
///
/// # Example
///
/// ```
/// use unadf::issue::{parse_issue_str, IssueOptions};
///
/// let body = r#"{"key": "PROJ-1", "fields": {"summary": "Login", "description": "AC:\n- works"}}"#;
/// let issue = parse_issue_str(body, &IssueOptions::default()).unwrap();
/// assert_eq!(issue.acceptance_criteria, "- works");
/// ```
pub fn parse_issue_str(json: &str, options: &IssueOptions) -> Result<IssueNarrative> {
    let value: Value = serde_json::from_str(json)?;
    Ok(IssueNarrative::from_json(&value, options))
}

fn render_field(field: Option<&Value>, options: &RenderOptions) -> String {
    let input = field.map(Input::from).unwrap_or_default();
    TextRenderer::new(options.clone()).render(&input)
}

fn string_field(field: Option<&Value>) -> String {
    field
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adf_paragraphs(texts: &[&str]) -> Value {
        json!({
            "type": "doc",
            "version": 1,
            "content": texts
                .iter()
                .map(|t| json!({"type": "paragraph", "content": [{"type": "text", "text": t}]}))
                .collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_structured_description() {
        let issue = json!({
            "key": "PROJ-7",
            "fields": {
                "summary": "Export report",
                "description": adf_paragraphs(&["Users need CSV.", "AC:", "- has header row"])
            }
        });
        let narrative = IssueNarrative::from_json(&issue, &IssueOptions::default());

        assert_eq!(narrative.key, "PROJ-7");
        assert_eq!(narrative.summary, "Export report");
        assert_eq!(narrative.description, "Users need CSV.\n\nAC:\n\n- has header row");
        assert_eq!(narrative.acceptance_criteria, "- has header row");
        assert_eq!(narrative.criteria_source, CriteriaSource::Extracted);
    }

    #[test]
    fn test_criteria_field_preferred() {
        let issue = json!({
            "key": "PROJ-8",
            "fields": {
                "description": "Acceptance Criteria:\n- from description",
                "customfield_10035": adf_paragraphs(&["- from field"])
            }
        });
        let options = IssueOptions::new().with_criteria_field("customfield_10035");
        let narrative = IssueNarrative::from_json(&issue, &options);

        assert_eq!(narrative.acceptance_criteria, "- from field");
        assert_eq!(narrative.criteria_source, CriteriaSource::Field);
    }

    #[test]
    fn test_empty_criteria_field_falls_back() {
        let issue = json!({
            "fields": {
                "description": "Acceptance Criteria:\n- from description",
                "customfield_10035": null
            }
        });
        let options = IssueOptions::new().with_criteria_field("customfield_10035");
        let narrative = IssueNarrative::from_json(&issue, &options);

        assert_eq!(narrative.acceptance_criteria, "- from description");
        assert_eq!(narrative.criteria_source, CriteriaSource::Extracted);
    }

    #[test]
    fn test_missing_fields() {
        let narrative = IssueNarrative::from_json(&json!({}), &IssueOptions::default());
        assert_eq!(narrative, IssueNarrative::default());
        assert!(!narrative.has_criteria());
    }

    #[test]
    fn test_parse_issue_str_invalid_json() {
        assert!(parse_issue_str("{\"key\":", &IssueOptions::default()).is_err());
    }
}
