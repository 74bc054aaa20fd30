use crate::ast::{Document, Element, Node};

/// Visitor pattern for traversing document trees immutably
///
/// Default implementations walk the entire tree in document (depth-first,
/// pre-order) order. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_text(&mut self, _content: &str) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _content: &str) {
        // Leaf node, no children to walk
    }

    fn visit_doctype(&mut self, _content: &str) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for node in &doc.nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Element(el) => visitor.visit_element(el),
        Node::Text { content } => visitor.visit_text(content),
        Node::Comment { content } => visitor.visit_comment(content),
        Node::Doctype { content } => visitor.visit_doctype(content),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    for child in &element.children {
        visitor.visit_node(child);
    }
}

/// Mutable visitor pattern for transforming document trees
///
/// Same traversal order as [`Visitor`], with mutable access to nodes.
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }

    fn visit_text_mut(&mut self, _content: &mut String) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for node in &mut doc.nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    match node {
        Node::Element(el) => visitor.visit_element_mut(el),
        Node::Text { content } => visitor.visit_text_mut(content),
        _ => {}
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    for child in &mut element.children {
        visitor.visit_node_mut(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    struct TagCollector {
        tags: Vec<String>,
    }

    impl Visitor for TagCollector {
        fn visit_element(&mut self, element: &Element) {
            self.tags.push(element.tag_name.clone());
            walk_element(self, element);
        }
    }

    #[test]
    fn test_visitor_preorder_traversal() {
        let doc = parse(
            "<mjml><mj-body><mj-section><mj-text>a</mj-text></mj-section><mj-button>b</mj-button></mj-body></mjml>",
        )
        .unwrap();

        let mut collector = TagCollector { tags: Vec::new() };
        collector.visit_document(&doc);

        assert_eq!(
            collector.tags,
            vec!["mjml", "mj-body", "mj-section", "mj-text", "mj-button"]
        );
    }
}
