//! Tag declarator
//!
//! The transformer only surfaces a marker on the compiled output when the
//! marker value is declared in the document head. For every distinct
//! marker present in the body, this module appends a declaration of the
//! form
//!
//! ```text
//! <mj-selector path=".editable-<id>">
//!   <mj-html-attribute name="data-editable">true</mj-html-attribute>
//! </mj-selector>
//! ```
//!
//! inside `mj-head > mj-html-attributes`, creating the prelude when the
//! head exists without one. A document without a head has nothing to
//! declare into and is returned unchanged.

use crate::mappings::extract_mappings;
use crate::markers::{collect_paths, element_at_mut};
use letterpress_markup::{parse, serialize, Element, Node, ParseError};

const HEAD_TAG: &str = "mj-head";
const PRELUDE_TAG: &str = "mj-html-attributes";
const SELECTOR_TAG: &str = "mj-selector";

/// Declare every marker value used in the document. Idempotent.
pub fn declare_markers(source: &str) -> Result<String, ParseError> {
    let markers = distinct_marker_values(source);
    if markers.is_empty() {
        return Ok(source.to_string());
    }

    let mut doc = parse(source)?;

    let head_path = match collect_paths(&doc, |el| el.tag_name == HEAD_TAG).into_iter().next() {
        Some(path) => path,
        None => {
            tracing::debug!("document has no head section, markers left undeclared");
            return Ok(source.to_string());
        }
    };

    // Locate or create the prelude inside the head.
    let prelude_path = match collect_paths(&doc, |el| el.tag_name == PRELUDE_TAG)
        .into_iter()
        .find(|path| path.starts_with(&head_path))
    {
        Some(path) => path,
        None => {
            let head = element_at_mut(&mut doc, &head_path)
                .ok_or_else(|| ParseError::malformed_tag(0, "head section vanished"))?;
            head.children.push(Node::Element(Element::new(PRELUDE_TAG)));
            let mut path = head_path.clone();
            path.push(head.children.len() - 1);
            path
        }
    };

    let prelude = element_at_mut(&mut doc, &prelude_path)
        .ok_or_else(|| ParseError::malformed_tag(0, "prelude section vanished"))?;

    let declared: Vec<String> = prelude
        .children
        .iter()
        .filter_map(|node| match node {
            Node::Element(el) if el.tag_name == SELECTOR_TAG => {
                el.attr("path").map(|p| p.trim_start_matches('.').to_string())
            }
            _ => None,
        })
        .collect();

    let mut appended = false;
    for marker in &markers {
        if declared.iter().any(|d| d == marker) {
            continue;
        }
        prelude.children.push(Node::Element(selector_decl(marker)));
        appended = true;
    }

    if !appended {
        return Ok(source.to_string());
    }

    Ok(serialize(&doc))
}

fn distinct_marker_values(source: &str) -> Vec<String> {
    let mut values = Vec::new();
    for entry in extract_mappings(source) {
        if !values.contains(&entry.marker_value) {
            values.push(entry.marker_value);
        }
    }
    values
}

fn selector_decl(marker: &str) -> Element {
    let mut attribute = Element::new("mj-html-attribute");
    attribute.set_attr("name", "data-editable");
    attribute.children.push(Node::Text {
        content: "true".to_string(),
    });

    let mut selector = Element::new(SELECTOR_TAG);
    selector.set_attr("path", format!(".{}", marker));
    selector.children.push(Node::Element(attribute));
    selector
}
