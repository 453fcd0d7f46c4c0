//! Integration tests for acceptance criteria extraction.

use unadf::criteria::extract;
use unadf::{
    extract_acceptance_criteria, parse_str, to_plain_text, CriteriaExtractor, CriteriaPattern,
    ExtractOptions, SectionBound,
};

#[test]
fn test_absent_and_empty() {
    assert_eq!(extract(None), "");
    assert_eq!(extract(Some("")), "");
    assert_eq!(extract(Some("no keywords here")), "");
}

#[test]
fn test_labeled_section() {
    assert_eq!(
        extract(Some("Description\n\nAcceptance Criteria:\n- A\n- B")),
        "- A\n- B"
    );
}

#[test]
fn test_abbreviated_section() {
    assert_eq!(extract(Some("Description\n\nAC:\n- C\n- D")), "- C\n- D");
}

#[test]
fn test_pattern_reported() {
    let extractor = CriteriaExtractor::default();

    let found = extractor.find("## Acceptance Criteria\n- E").unwrap();
    assert_eq!(found.pattern, CriteriaPattern::MarkdownHeading);
    assert_eq!(found.body, "- E");

    let found = extractor.find("ac:\n- F").unwrap();
    assert_eq!(found.pattern, CriteriaPattern::Abbreviated);

    assert!(extractor.find("Acceptance Criteria are below").is_none());
}

#[test]
fn test_idempotence_returns_empty() {
    let texts = [
        "Description\n\nAcceptance Criteria:\n- A\n- B",
        "Description\n\nAC:\n- C\n- D",
        "### Acceptance Criteria\n1. First\n2. Second",
    ];
    for text in texts {
        let body = extract(Some(text));
        assert!(!body.is_empty());
        assert_eq!(extract(Some(body.as_str())), "");
    }
}

#[test]
fn test_extract_from_rendered_document() {
    let input = parse_str(
        r#"{"type": "doc", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "Users can reset passwords."}]},
            {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Acceptance Criteria"}]},
            {"type": "orderedList", "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Email is sent"}]}]},
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Link expires"}]}]}
            ]},
            {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Notes"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "See design doc."}]}
        ]}"#,
    )
    .unwrap();
    let text = to_plain_text(&input);

    assert_eq!(
        extract_acceptance_criteria(Some(text.as_str())),
        "1. Email is sent\n2. Link expires\n\n## Notes\n\nSee design doc."
    );

    let bounded = CriteriaExtractor::new(ExtractOptions::new().with_bound(SectionBound::NextHeading));
    assert_eq!(bounded.extract(&text), "1. Email is sent\n2. Link expires");
}

#[test]
fn test_extractor_shared_across_threads() {
    let extractor = std::sync::Arc::new(CriteriaExtractor::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let extractor = extractor.clone();
            std::thread::spawn(move || extractor.extract(&format!("AC:\n- item {}", i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("- item {}", i));
    }
}
