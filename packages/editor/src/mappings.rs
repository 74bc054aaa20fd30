//! Mapping extractor
//!
//! Walks the source tree before transformation and records, per marker
//! value, a normalized content fingerprint. The resulting list is the only
//! bridge between source and compiled trees for one pass; it is recomputed
//! every pass and never persisted.

use crate::markers::{marker_tokens, ElementKind, MARKER_PREFIX};
use letterpress_markup::{normalize_text, parse, Element, Visitor};
use serde::{Deserialize, Serialize};

/// One marker occurrence in the source tree.
///
/// Lifetime: one transformation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Full marker token (`editable-<logicalId>`).
    pub marker_value: String,

    /// Identifier portion of the marker. Not guaranteed unique.
    pub logical_id: String,

    /// Normalized content snapshot at extraction time.
    pub content: String,

    /// Kind derived from the source tag name.
    pub kind: ElementKind,
}

/// Extract mapping entries in document (depth-first, pre-order) order.
///
/// One entry per distinct marker token per element. A parse failure yields
/// an empty list; callers treat "no editable entries" and "failed to find
/// any" identically.
pub fn extract_mappings(source: &str) -> Vec<MappingEntry> {
    let doc = match parse(source) {
        Ok(doc) => doc,
        Err(error) => {
            tracing::debug!(%error, "mapping extraction skipped unparseable source");
            return Vec::new();
        }
    };

    let mut collector = MappingCollector::default();
    collector.visit_document(&doc);
    collector.entries
}

#[derive(Default)]
struct MappingCollector {
    entries: Vec<MappingEntry>,
}

impl Visitor for MappingCollector {
    fn visit_element(&mut self, element: &Element) {
        let mut seen: Vec<&str> = Vec::new();
        for token in marker_tokens(element) {
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);

            self.entries.push(MappingEntry {
                marker_value: token.to_string(),
                logical_id: token[MARKER_PREFIX.len()..].to_string(),
                content: normalize_text(&element.text_content()),
                kind: ElementKind::for_tag(&element.tag_name),
            });
        }

        letterpress_markup::visitor::walk_element(self, element);
    }
}
