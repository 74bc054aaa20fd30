//! Mutation engine scenarios over realistic templates

use letterpress_editor::{auto_tag, ComponentMutation, EditError, MAX_CONTENT_LEN};
use letterpress_markup::parse;

const TEMPLATE: &str = r#"<mjml><mj-head><mj-title>Spring Sale</mj-title></mj-head><mj-body><mj-section padding="20px"><mj-column><mj-text font-size="16px" css-class="editable-headline">Big spring sale</mj-text><mj-text css-class="editable-text-1">Everything must go</mj-text><mj-button href="https://shop.test" css-class="cta editable-button-1">Shop</mj-button></mj-column></mj-section></mj-body></mjml>"#;

#[test]
fn test_update_preserves_untouched_structure() {
    let outcome = ComponentMutation::UpdateContent {
        logical_id: "headline".to_string(),
        content: "Bigger spring sale".to_string(),
        hint: None,
    }
    .apply(TEMPLATE)
    .unwrap();

    // Only the headline changed; every other byte of the canonical
    // template survives.
    let expected = TEMPLATE.replace("Big spring sale", "Bigger spring sale");
    assert_eq!(outcome.source, expected);
}

#[test]
fn test_oversized_update_is_atomic() {
    let mutation = ComponentMutation::UpdateContent {
        logical_id: "headline".to_string(),
        content: "y".repeat(MAX_CONTENT_LEN + 1),
        hint: None,
    };

    match mutation.apply(TEMPLATE) {
        Err(EditError::Validation { message }) => {
            assert!(message.contains(&MAX_CONTENT_LEN.to_string()));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    // Caller's text was never replaced; nothing to roll back.
}

#[test]
fn test_update_at_limit_is_accepted() {
    let content = "z".repeat(MAX_CONTENT_LEN);
    let outcome = ComponentMutation::UpdateContent {
        logical_id: "headline".to_string(),
        content: content.clone(),
        hint: None,
    }
    .apply(TEMPLATE)
    .unwrap();
    assert!(outcome.source.contains(&content));
}

#[test]
fn test_duplicate_marker_never_collides_with_existing() {
    let before = parse(TEMPLATE).unwrap();
    let mut existing = Vec::new();
    collect_markers(&before, &mut existing);

    let outcome = ComponentMutation::Duplicate {
        logical_id: "button-1".to_string(),
        hint: None,
    }
    .apply(TEMPLATE)
    .unwrap();

    let new_marker = format!("editable-{}", outcome.new_id.unwrap());
    assert!(!existing.contains(&new_marker));

    let after = parse(&outcome.source).unwrap();
    let mut markers = Vec::new();
    collect_markers(&after, &mut markers);
    assert_eq!(markers.len(), existing.len() + 1);
}

fn collect_markers(doc: &letterpress_markup::Document, out: &mut Vec<String>) {
    fn walk(el: &letterpress_markup::Element, out: &mut Vec<String>) {
        if let Some(value) = el.attr("css-class") {
            for token in value.split_whitespace() {
                if token.starts_with("editable-") {
                    out.push(token.to_string());
                }
            }
        }
        for child in &el.children {
            if let letterpress_markup::Node::Element(child_el) = child {
                walk(child_el, out);
            }
        }
    }
    if let Some(root) = doc.root() {
        walk(root, out);
    }
}

#[test]
fn test_duplicate_clone_keeps_authored_classes() {
    let outcome = ComponentMutation::Duplicate {
        logical_id: "button-1".to_string(),
        hint: None,
    }
    .apply(TEMPLATE)
    .unwrap();

    let new_id = outcome.new_id.unwrap();
    // The authored "cta" class survives; the marker is replaced, not
    // appended.
    assert!(outcome
        .source
        .contains(&format!(r#"css-class="cta editable-{}""#, new_id)));
    assert!(!outcome
        .source
        .contains(&format!("editable-button-1 editable-{}", new_id)));
}

#[test]
fn test_delete_then_lookup_fails() {
    let outcome = ComponentMutation::Delete {
        logical_id: "headline".to_string(),
        hint: None,
    }
    .apply(TEMPLATE)
    .unwrap();

    assert!(!outcome.source.contains("Big spring sale"));
    assert!(outcome.source.contains("Everything must go"));

    let err = ComponentMutation::UpdateContent {
        logical_id: "headline".to_string(),
        content: "gone".to_string(),
        hint: None,
    }
    .apply(&outcome.source)
    .unwrap_err();
    assert!(matches!(err, EditError::NotFound { .. }));
}

#[test]
fn test_mutation_sequence_duplicate_update_delete() {
    // Load-time tagging, then a realistic editing sequence addressed only
    // by logical ids.
    let tagged = auto_tag(
        "<mjml><mj-head></mj-head><mj-body><mj-text>Original</mj-text></mj-body></mjml>",
    )
    .unwrap();

    let dup = ComponentMutation::Duplicate {
        logical_id: "text-1".to_string(),
        hint: None,
    }
    .apply(&tagged)
    .unwrap();
    let clone_id = dup.new_id.unwrap();

    let updated = ComponentMutation::UpdateContent {
        logical_id: clone_id.clone(),
        content: "Edited copy".to_string(),
        hint: None,
    }
    .apply(&dup.source)
    .unwrap();
    assert!(updated.source.contains("Original"));
    assert!(updated.source.contains("Edited copy"));

    let removed = ComponentMutation::Delete {
        logical_id: "text-1".to_string(),
        hint: Some("Original".to_string()),
    }
    .apply(&updated.source)
    .unwrap();
    assert!(!removed.source.contains("Original"));
    assert!(removed.source.contains("Edited copy"));
}

#[test]
fn test_parse_error_is_structured_not_fatal() {
    let err = ComponentMutation::Delete {
        logical_id: "headline".to_string(),
        hint: None,
    }
    .apply("<mjml><mj-body>")
    .unwrap_err();
    assert!(matches!(err, EditError::Parse(_)));
}
