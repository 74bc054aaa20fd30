use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span for nodes created by mutations rather than the parser.
    pub fn synthetic() -> Self {
        Self { start: 0, end: 0 }
    }
}

/// Root document node
///
/// A document is a sequence of top-level nodes. Authoring documents have a
/// single `mjml` root element; compiled HTML may additionally carry a
/// doctype and comments before the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// First element node at the top level (the document root, if any).
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Element (tag, attributes, children)
    Element(Element),

    /// Raw text run, stored verbatim (no entity decoding)
    Text { content: String },

    /// Comment, content between `<!--` and `-->`
    Comment { content: String },

    /// Doctype or other `<!...>` declaration, content after `<!`
    Doctype { content: String },
}

/// Element node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag_name: String,

    /// Attribute order is preserved through parse → serialize.
    pub attributes: IndexMap<String, String>,

    pub children: Vec<Node>,

    /// Written as `<tag />` by the serializer.
    pub self_closing: bool,

    pub span: Span,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            self_closing: false,
            span: Span::synthetic(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Concatenated text of all descendant text runs, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text { content } => out.push_str(content),
            Node::Element(child_el) => collect_text(child_el, out),
            _ => {}
        }
    }
}

/// Trim and collapse internal whitespace runs to single spaces.
///
/// This is the normalization applied to content snapshots before any
/// comparison between source and compiled trees.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
