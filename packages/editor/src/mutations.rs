//! Component mutations
//!
//! High-level semantic operations on the source tree, addressed only by the
//! weak identifiers available after transformation: a logical id plus an
//! optional content hint from the interactive layer.
//!
//! ## Mutation Semantics
//!
//! ### UpdateContent
//! - Content policy validated before the tree is touched
//! - Atomic replacement of the element's text content
//! - Attributes, including the marker, are untouched
//!
//! ### Duplicate
//! - Deep clone inserted as the immediately-following sibling
//! - Clone receives a freshly minted marker, never the original's
//!
//! ### Delete
//! - Removes the element and its entire subtree, nothing else
//!
//! All three either return a fully mutated document or an error with the
//! caller's document untouched. Silent partial application is a
//! correctness bug, not a degraded mode.

use crate::errors::EditError;
use crate::markers::{
    collect_paths, content_at, element_at, element_at_mut, has_token, sibling_list_mut, NodePath,
    MARKER_ATTR, MARKER_PREFIX,
};
use letterpress_markup::{normalize_text, parse, serialize, Document, Node};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Content policy: maximum accepted length in characters.
pub const MAX_CONTENT_LEN: usize = 5000;

/// Semantic mutations addressed by logical id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentMutation {
    /// Replace the text content of a component (text-only elements)
    UpdateContent {
        logical_id: String,
        content: String,
        hint: Option<String>,
    },

    /// Clone a component and insert the clone as the next sibling
    Duplicate {
        logical_id: String,
        hint: Option<String>,
    },

    /// Remove a component and its subtree
    Delete {
        logical_id: String,
        hint: Option<String>,
    },
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// The new serialized source document.
    pub source: String,

    /// Logical id minted by [`ComponentMutation::Duplicate`].
    pub new_id: Option<String>,
}

impl ComponentMutation {
    /// Validate content policy without touching any tree.
    pub fn validate(&self) -> Result<(), EditError> {
        if let ComponentMutation::UpdateContent { content, .. } = self {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return Err(EditError::validation("content must not be empty"));
            }
            if trimmed.chars().count() > MAX_CONTENT_LEN {
                return Err(EditError::validation(format!(
                    "content exceeds the {} character limit",
                    MAX_CONTENT_LEN
                )));
            }
        }
        Ok(())
    }

    /// Apply this mutation to the current source text.
    ///
    /// On any error the caller's text is simply not replaced; nothing is
    /// ever partially applied.
    pub fn apply(&self, source: &str) -> Result<MutationOutcome, EditError> {
        self.validate()?;

        let mut doc = parse(source)?;

        match self {
            ComponentMutation::UpdateContent {
                logical_id,
                content,
                hint,
            } => {
                let path = locate(&doc, logical_id, hint.as_deref())?;
                let element = element_at_mut(&mut doc, &path)
                    .ok_or_else(|| EditError::not_found(logical_id))?;

                element.children = vec![Node::Text {
                    content: content.trim().to_string(),
                }];
                element.self_closing = false;

                Ok(MutationOutcome {
                    source: serialize(&doc),
                    new_id: None,
                })
            }

            ComponentMutation::Duplicate { logical_id, hint } => {
                let path = locate(&doc, logical_id, hint.as_deref())?;
                let original = element_at(&doc, &path)
                    .ok_or_else(|| EditError::not_found(logical_id))?;

                let new_id = mint_copy_id(logical_id);
                let new_marker = format!("{}{}", MARKER_PREFIX, new_id);

                let mut clone = original.clone();
                let mut tokens: Vec<&str> = clone
                    .attr(MARKER_ATTR)
                    .map(|v| {
                        v.split_whitespace()
                            .filter(|t| !t.starts_with(MARKER_PREFIX))
                            .collect()
                    })
                    .unwrap_or_default();
                tokens.push(&new_marker);
                let value = tokens.join(" ");
                clone.set_attr(MARKER_ATTR, value);

                let (siblings, index) = sibling_list_mut(&mut doc, &path)
                    .ok_or_else(|| EditError::not_found(logical_id))?;
                siblings.insert(index + 1, Node::Element(clone));

                Ok(MutationOutcome {
                    source: serialize(&doc),
                    new_id: Some(new_id),
                })
            }

            ComponentMutation::Delete { logical_id, hint } => {
                let path = locate(&doc, logical_id, hint.as_deref())?;
                let (siblings, index) = sibling_list_mut(&mut doc, &path)
                    .ok_or_else(|| EditError::not_found(logical_id))?;
                siblings.remove(index);

                Ok(MutationOutcome {
                    source: serialize(&doc),
                    new_id: None,
                })
            }
        }
    }
}

/// Shared disambiguation: pick the authoritative source element for a
/// logical id.
///
/// Candidates are all elements whose marker token set contains
/// `editable-<logicalId>`, in document order. A supplied hint prefers
/// exact normalized equality, then substring containment; with no hint or
/// no match the first candidate wins. That fallback is deterministic but
/// not necessarily correct when content is ambiguous; an accepted
/// limitation.
fn locate(doc: &Document, logical_id: &str, hint: Option<&str>) -> Result<NodePath, EditError> {
    let token = format!("{}{}", MARKER_PREFIX, logical_id);
    let mut candidates = collect_paths(doc, |el| {
        el.attr(MARKER_ATTR).is_some_and(|v| has_token(v, &token))
    });

    match candidates.len() {
        0 => Err(EditError::not_found(logical_id)),
        1 => Ok(candidates.remove(0)),
        _ => {
            if let Some(hint) = hint {
                let hint = normalize_text(hint);

                if let Some(path) = candidates
                    .iter()
                    .find(|path| content_at(doc, path) == hint)
                {
                    return Ok(path.clone());
                }
                if let Some(path) = candidates
                    .iter()
                    .find(|path| content_at(doc, path).contains(&hint))
                {
                    return Ok(path.clone());
                }
            }

            tracing::debug!(
                logical_id,
                candidates = candidates.len(),
                "ambiguous logical id, falling back to first in document order"
            );
            Ok(candidates.remove(0))
        }
    }
}

/// Mint a logical id for a duplicate: `<base>-copy-<timestamp>-<random>`.
///
/// The randomized suffix is what keeps duplicate-minted ids from colliding
/// with anything present in the document at duplication time.
fn mint_copy_id(base: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();

    format!("{}-copy-{}-{}", base, millis, suffix)
}
