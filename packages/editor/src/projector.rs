//! Marker projector
//!
//! After the external transformer runs, the compiled tree carries declared
//! markers as `class` tokens and nothing else that correlates it with the
//! source tree. For each mapping entry the projector picks the single best
//! matching compiled element and annotates it with the interactive
//! identifiers the selection layer needs.
//!
//! Selection within a class group is deliberately simple and auditable:
//! a singleton group is annotated unconditionally; otherwise the entry's
//! content fingerprint is matched exactly, then as a substring, and when
//! both fail the entry is skipped. Skipping is a documented limitation of
//! fingerprint identity, not an error.

use crate::mappings::MappingEntry;
use crate::markers::{
    collect_paths, content_at, element_at, element_at_mut, has_token, ElementKind, NodePath,
    ANNOTATION_ENABLED, ANNOTATION_ID, ANNOTATION_INDEX, ANNOTATION_KIND, CLASS_ATTR,
};
use indexmap::IndexMap;
use letterpress_markup::{parse, serialize, ParseError};
use serde::{Deserialize, Serialize};

/// What the interactive layer sees for one annotated compiled element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub logical_id: String,
    pub kind: ElementKind,
    pub tag_name: String,
    pub content: String,
    pub attributes: IndexMap<String, String>,

    /// Rank of the mapping entry in extraction order. The only
    /// stable-enough key to tell duplicate logical ids apart within a
    /// single pass; not stable across passes.
    pub index: usize,
}

/// Annotated compiled text plus the registry built while annotating.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub html: String,
    pub registry: Vec<RegistryEntry>,
}

/// Annotate the compiled tree with interactive identifiers.
///
/// Returns the compiled text unchanged when `mappings` is empty. The
/// compiled tree is never mutated structurally, only annotated.
pub fn project(compiled: &str, mappings: &[MappingEntry]) -> Result<Projection, ParseError> {
    if mappings.is_empty() {
        return Ok(Projection {
            html: compiled.to_string(),
            registry: Vec::new(),
        });
    }

    let mut doc = parse(compiled)?;
    let mut registry = Vec::new();

    for (index, entry) in mappings.iter().enumerate() {
        let group = collect_paths(&doc, |el| {
            el.attr(CLASS_ATTR)
                .is_some_and(|value| has_token(value, &entry.marker_value))
        });

        let chosen = match select(&doc, &group, entry) {
            Some(path) => path,
            None => continue,
        };

        let element = match element_at_mut(&mut doc, &chosen) {
            Some(el) => el,
            None => continue,
        };

        element.set_attr(ANNOTATION_ENABLED, "true");
        element.set_attr(ANNOTATION_ID, entry.logical_id.clone());
        element.set_attr(ANNOTATION_INDEX, index.to_string());
        element.set_attr(ANNOTATION_KIND, entry.kind.as_str());

        if let Some(element) = element_at(&doc, &chosen) {
            registry.push(RegistryEntry {
                logical_id: entry.logical_id.clone(),
                kind: entry.kind,
                tag_name: element.tag_name.clone(),
                content: content_at(&doc, &chosen),
                attributes: element.attributes.clone(),
                index,
            });
        }
    }

    Ok(Projection {
        html: serialize(&doc),
        registry,
    })
}

fn select(
    doc: &letterpress_markup::Document,
    group: &[NodePath],
    entry: &MappingEntry,
) -> Option<NodePath> {
    match group.len() {
        0 => {
            tracing::debug!(
                marker = %entry.marker_value,
                "no compiled element carries this marker class"
            );
            None
        }
        1 => Some(group[0].clone()),
        _ => {
            let exact = group
                .iter()
                .find(|path| content_at(doc, path) == entry.content);
            if let Some(path) = exact {
                return Some(path.clone());
            }

            let containing = group
                .iter()
                .find(|path| content_at(doc, path).contains(&entry.content));
            if let Some(path) = containing {
                return Some(path.clone());
            }

            tracing::warn!(
                marker = %entry.marker_value,
                candidates = group.len(),
                "ambiguous marker class with no content match, entry skipped"
            );
            None
        }
    }
}
