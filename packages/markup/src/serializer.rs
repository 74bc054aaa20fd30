use crate::ast::{Document, Element, Node};
use crate::parser::is_void_element;

/// Serialize a document tree back to markup text.
pub fn serialize(doc: &Document) -> String {
    Serializer::new().serialize(doc)
}

/// Serializer converts a document tree back to markup text.
///
/// Output is canonical: double-quoted attribute values separated by single
/// spaces, void elements without closers, self-closing elements as
/// `<tag />`. Text, comment, and doctype content is written verbatim, so
/// any text produced by this serializer re-parses to an identical tree and
/// re-serializes to identical bytes.
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self, doc: &Document) -> String {
        let mut output = String::new();
        for node in &doc.nodes {
            self.serialize_node(node, &mut output);
        }
        output
    }

    fn serialize_node(&self, node: &Node, output: &mut String) {
        match node {
            Node::Element(el) => self.serialize_element(el, output),
            Node::Text { content } => output.push_str(content),
            Node::Comment { content } => {
                output.push_str("<!--");
                output.push_str(content);
                output.push_str("-->");
            }
            Node::Doctype { content } => {
                output.push_str("<!");
                output.push_str(content);
                output.push('>');
            }
        }
    }

    fn serialize_element(&self, el: &Element, output: &mut String) {
        output.push('<');
        output.push_str(&el.tag_name);

        for (name, value) in &el.attributes {
            output.push(' ');
            output.push_str(name);
            output.push('=');
            self.serialize_attr_value(value, output);
        }

        if el.self_closing && el.children.is_empty() {
            output.push_str(" />");
            return;
        }

        output.push('>');

        if is_void_element(&el.tag_name) {
            return;
        }

        for child in &el.children {
            self.serialize_node(child, output);
        }

        output.push_str("</");
        output.push_str(&el.tag_name);
        output.push('>');
    }

    /// Values containing a double quote are written single-quoted; a value
    /// containing both quote kinds falls back to entity-escaped quotes.
    fn serialize_attr_value(&self, value: &str, output: &mut String) {
        if !value.contains('"') {
            output.push('"');
            output.push_str(value);
            output.push('"');
        } else if !value.contains('\'') {
            output.push('\'');
            output.push_str(value);
            output.push('\'');
        } else {
            output.push('"');
            output.push_str(&value.replace('"', "&quot;"));
            output.push('"');
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn roundtrip(source: &str) -> String {
        serialize(&parse(source).unwrap())
    }

    #[test]
    fn test_roundtrip_preserves_canonical_form() {
        let cases = [
            "<mjml><mj-body><mj-text>Hello</mj-text></mj-body></mjml>",
            r#"<mj-button href="https://x.test" css-class="cta editable-button-1">Buy</mj-button>"#,
            "<mj-text>\n  spaced\n  text\n</mj-text>",
            r#"<mj-image src="a.png" alt="" />"#,
            "<!doctype html><html><head><style>.x { color: red; }</style></head><body></body></html>",
            "<div><!-- keep me --><img src=\"a.png\"><br></div>",
        ];

        for source in cases {
            let once = roundtrip(source);
            assert_eq!(once, source, "first pass should be stable for {source}");
            assert_eq!(roundtrip(&once), once, "second pass must be identity");
        }
    }

    #[test]
    fn test_serializer_output_reparses_identically() {
        // Non-canonical input: unquoted + single-quoted attributes.
        let source = "<mj-section background-color=#fff><mj-text css-class='a b'>Hi</mj-text></mj-section>";
        let doc = parse(source).unwrap();
        let text = serialize(&doc);
        let redoc = parse(&text).unwrap();

        assert_eq!(doc, redoc);
        assert_eq!(serialize(&redoc), text);
    }

    #[test]
    fn test_attr_value_with_double_quote_uses_single_quotes() {
        let mut el = crate::ast::Element::new("mj-text");
        el.set_attr("data-note", r#"say "hi""#);

        let doc = crate::ast::Document {
            nodes: vec![Node::Element(el)],
        };
        let text = serialize(&doc);
        assert!(text.contains(r#"data-note='say "hi"'"#));

        let redoc = parse(&text).unwrap();
        assert_eq!(redoc.root().unwrap().attr("data-note"), Some(r#"say "hi""#));
    }

    #[test]
    fn test_untouched_structure_survives_mutation_style_pass() {
        // Parse, touch nothing, serialize: canonical text must be stable.
        let source = r##"<mjml><mj-head><mj-title>T</mj-title></mj-head><mj-body><mj-text color="#333" css-class="editable-text-1">Hi</mj-text></mj-body></mjml>"##;
        assert_eq!(roundtrip(source), source);
    }
}
