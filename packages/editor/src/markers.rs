//! Marker tokens and tree addressing
//!
//! An editable marker is a `editable-<logicalId>` token held in the
//! `css-class` attribute of a source element (the attribute is a
//! space-separated token set and may carry unrelated authored classes).
//! The transformer surfaces declared markers as `class` tokens on the
//! compiled output, which is the only correlation the two trees share.

use letterpress_markup::{normalize_text, Document, Element, Node};
use serde::{Deserialize, Serialize};

/// Marker attribute on source elements.
pub const MARKER_ATTR: &str = "css-class";

/// Class attribute on compiled elements.
pub const CLASS_ATTR: &str = "class";

/// Prefix of every editable marker token.
pub const MARKER_PREFIX: &str = "editable-";

/// Annotation attributes written onto compiled elements by the projector.
pub const ANNOTATION_ENABLED: &str = "data-editable";
pub const ANNOTATION_ID: &str = "data-editable-id";
pub const ANNOTATION_INDEX: &str = "data-editable-index";
pub const ANNOTATION_KIND: &str = "data-editable-type";

/// Classifier for editable source elements, derived from the tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Button,
    Image,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
        }
    }

    /// Kind for any marked element. Non-eligible tags that carry an
    /// authored marker classify as text.
    pub fn for_tag(tag_name: &str) -> Self {
        match tag_name {
            "mj-button" => ElementKind::Button,
            "mj-image" => ElementKind::Image,
            _ => ElementKind::Text,
        }
    }

    /// Kinds the default tagger assigns markers to.
    pub fn eligible(tag_name: &str) -> Option<Self> {
        match tag_name {
            "mj-text" => Some(ElementKind::Text),
            "mj-button" => Some(ElementKind::Button),
            "mj-image" => Some(ElementKind::Image),
            _ => None,
        }
    }
}

/// Token-set membership test on a space-separated attribute value.
pub fn has_token(value: &str, token: &str) -> bool {
    value.split_whitespace().any(|t| t == token)
}

/// Marker tokens carried by an element, in attribute order.
pub fn marker_tokens(element: &Element) -> Vec<&str> {
    element
        .attr(MARKER_ATTR)
        .map(|value| {
            value
                .split_whitespace()
                .filter(|t| t.starts_with(MARKER_PREFIX))
                .collect()
        })
        .unwrap_or_default()
}

/// Address of a node: child indexes from the document's top-level list.
pub type NodePath = Vec<usize>;

/// Collect paths of all elements matching `pred`, in document order.
pub fn collect_paths<F>(doc: &Document, pred: F) -> Vec<NodePath>
where
    F: Fn(&Element) -> bool,
{
    let mut paths = Vec::new();
    for (i, node) in doc.nodes.iter().enumerate() {
        if let Node::Element(el) = node {
            collect_into(el, vec![i], &pred, &mut paths);
        }
    }
    paths
}

fn collect_into<F>(el: &Element, path: NodePath, pred: &F, paths: &mut Vec<NodePath>)
where
    F: Fn(&Element) -> bool,
{
    if pred(el) {
        paths.push(path.clone());
    }
    for (i, child) in el.children.iter().enumerate() {
        if let Node::Element(child_el) = child {
            let mut child_path = path.clone();
            child_path.push(i);
            collect_into(child_el, child_path, pred, paths);
        }
    }
}

pub fn element_at<'a>(doc: &'a Document, path: &[usize]) -> Option<&'a Element> {
    let (first, rest) = path.split_first()?;
    let mut el = match doc.nodes.get(*first)? {
        Node::Element(el) => el,
        _ => return None,
    };
    for idx in rest {
        el = match el.children.get(*idx)? {
            Node::Element(child) => child,
            _ => return None,
        };
    }
    Some(el)
}

pub fn element_at_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Option<&'a mut Element> {
    let (first, rest) = path.split_first()?;
    let mut el = match doc.nodes.get_mut(*first)? {
        Node::Element(el) => el,
        _ => return None,
    };
    for idx in rest {
        el = match el.children.get_mut(*idx)? {
            Node::Element(child) => child,
            _ => return None,
        };
    }
    Some(el)
}

/// The sibling list containing the addressed node, plus its index in it.
pub fn sibling_list_mut<'a>(
    doc: &'a mut Document,
    path: &[usize],
) -> Option<(&'a mut Vec<Node>, usize)> {
    let (last, parent) = path.split_last()?;
    if parent.is_empty() {
        return Some((&mut doc.nodes, *last));
    }
    let el = element_at_mut(doc, parent)?;
    Some((&mut el.children, *last))
}

/// Normalized text content of the element at `path`.
pub fn content_at(doc: &Document, path: &[usize]) -> String {
    element_at(doc, path)
        .map(|el| normalize_text(&el.text_content()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_markup::parse;

    #[test]
    fn test_has_token_is_a_set_test() {
        assert!(has_token("cta editable-button-1", "editable-button-1"));
        assert!(!has_token("cta editable-button-10", "editable-button-1"));
        assert!(!has_token("", "editable-button-1"));
    }

    #[test]
    fn test_marker_tokens_filters_prefix() {
        let doc = parse(r#"<mj-text css-class="lead editable-text-1 editable-greeting">x</mj-text>"#)
            .unwrap();
        let root = doc.root().unwrap();
        assert_eq!(
            marker_tokens(root),
            vec!["editable-text-1", "editable-greeting"]
        );
    }

    #[test]
    fn test_collect_paths_document_order() {
        let doc = parse(
            "<mjml><mj-body><mj-text css-class=\"editable-a\">1</mj-text><mj-section><mj-text css-class=\"editable-a\">2</mj-text></mj-section></mj-body></mjml>",
        )
        .unwrap();

        let paths = collect_paths(&doc, |el| {
            el.attr(MARKER_ATTR).is_some_and(|v| has_token(v, "editable-a"))
        });
        assert_eq!(paths.len(), 2);
        assert_eq!(content_at(&doc, &paths[0]), "1");
        assert_eq!(content_at(&doc, &paths[1]), "2");
    }

    #[test]
    fn test_sibling_list_addresses_parent_children() {
        let mut doc = parse("<mjml><mj-body><mj-text>a</mj-text><mj-text>b</mj-text></mj-body></mjml>")
            .unwrap();
        let paths = collect_paths(&doc, |el| el.tag_name == "mj-text");
        assert_eq!(paths.len(), 2);

        let (siblings, idx) = sibling_list_mut(&mut doc, &paths[1]).unwrap();
        assert_eq!(siblings.len(), 2);
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_kind_for_tag() {
        assert_eq!(ElementKind::for_tag("mj-button"), ElementKind::Button);
        assert_eq!(ElementKind::for_tag("mj-image"), ElementKind::Image);
        assert_eq!(ElementKind::for_tag("mj-divider"), ElementKind::Text);
        assert_eq!(ElementKind::eligible("mj-divider"), None);
    }
}
