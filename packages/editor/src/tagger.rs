//! Default tagger
//!
//! Assigns an editable marker to every eligible element (text, button,
//! image) that does not already carry one. Counters are local to one call
//! so the function stays referentially transparent; a re-run over a
//! document with a different element population reassigns ids to different
//! elements, which is why this runs exactly once per document-loading
//! transition and never per keystroke.

use crate::markers::{marker_tokens, ElementKind, MARKER_ATTR, MARKER_PREFIX};
use letterpress_markup::{parse, serialize, Element, ParseError, VisitorMut};

/// Assign `editable-<kind>-<n>` markers to untagged eligible elements.
///
/// Returns the input text unchanged (textually) when no element needed a
/// marker, avoiding spurious re-serialization churn.
pub fn auto_tag(source: &str) -> Result<String, ParseError> {
    let mut doc = parse(source)?;

    let mut tagger = DefaultTagger::default();
    tagger.visit_document_mut(&mut doc);

    if !tagger.changed {
        return Ok(source.to_string());
    }

    tracing::debug!(assigned = tagger.assigned, "auto-tagged eligible elements");
    Ok(serialize(&doc))
}

#[derive(Default)]
struct DefaultTagger {
    text_count: u32,
    button_count: u32,
    image_count: u32,
    assigned: u32,
    changed: bool,
}

impl DefaultTagger {
    fn next_marker(&mut self, kind: ElementKind) -> String {
        let counter = match kind {
            ElementKind::Text => &mut self.text_count,
            ElementKind::Button => &mut self.button_count,
            ElementKind::Image => &mut self.image_count,
        };
        *counter += 1;
        format!("{}{}-{}", MARKER_PREFIX, kind.as_str(), counter)
    }
}

impl VisitorMut for DefaultTagger {
    fn visit_element_mut(&mut self, element: &mut Element) {
        if let Some(kind) = ElementKind::eligible(&element.tag_name) {
            if marker_tokens(element).is_empty() {
                let marker = self.next_marker(kind);
                let value = match element.attr(MARKER_ATTR) {
                    Some(existing) if !existing.trim().is_empty() => {
                        format!("{} {}", existing, marker)
                    }
                    _ => marker,
                };
                element.set_attr(MARKER_ATTR, value);
                self.assigned += 1;
                self.changed = true;
            }
        }

        letterpress_markup::visitor::walk_element_mut(self, element);
    }
}
