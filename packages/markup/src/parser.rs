use crate::ast::{Document, Element, Node, Span};
use crate::error::{ParseError, ParseResult};
use indexmap::IndexMap;

/// HTML elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose bodies are raw text, never scanned for nested markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(tag))
}

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(tag))
}

/// Parse markup text into a document tree.
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source).parse_document()
}

/// Recursive-descent parser over the raw markup text.
///
/// Handles both the authoring dialect (mj-* elements) and the compiled HTML
/// the transformer emits: quoted/unquoted attributes, self-closing tags,
/// void elements, comments (including conditional comments), doctype, and
/// raw-text elements (`style`, `script`).
pub struct Parser<'src> {
    input: &'src str,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(input: &'src str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse a complete document
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let nodes = self.parse_nodes(None)?;
        Ok(Document { nodes })
    }

    /// Parse sibling nodes until EOF (top level) or the parent's closing tag.
    fn parse_nodes(&mut self, parent: Option<(&str, usize)>) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            if self.is_at_end() {
                if let Some((tag, start)) = parent {
                    return Err(ParseError::unclosed_element(start, tag));
                }
                break;
            }

            if self.starts_with("</") {
                if parent.is_some() {
                    break;
                }
                return Err(ParseError::malformed_tag(
                    self.pos,
                    "closing tag without matching open tag",
                ));
            }

            if self.starts_with("<!--") {
                nodes.push(self.parse_comment()?);
            } else if self.starts_with("<!") {
                nodes.push(self.parse_doctype()?);
            } else if self.at_element_start() {
                nodes.push(Node::Element(self.parse_element()?));
            } else {
                nodes.push(self.parse_text());
            }
        }

        Ok(nodes)
    }

    /// Parse an element, including its children and closing tag.
    fn parse_element(&mut self) -> ParseResult<Element> {
        let start = self.pos;
        self.advance(); // consume '<'

        let tag_name = self.parse_name()?;
        let attributes = self.parse_attributes(start)?;

        // Self-closing form
        if self.starts_with("/>") {
            self.advance_by(2);
            return Ok(Element {
                tag_name,
                attributes,
                children: Vec::new(),
                self_closing: true,
                span: Span::new(start, self.pos),
            });
        }

        if !self.eat('>') {
            return Err(ParseError::unexpected_eof(self.pos));
        }

        // Void elements have no children and no closing tag
        if is_void_element(&tag_name) {
            return Ok(Element {
                tag_name,
                attributes,
                children: Vec::new(),
                self_closing: false,
                span: Span::new(start, self.pos),
            });
        }

        let children = if is_raw_text_element(&tag_name) {
            let raw = self.parse_raw_text(&tag_name, start)?;
            if raw.is_empty() {
                Vec::new()
            } else {
                vec![Node::Text { content: raw }]
            }
        } else {
            self.parse_nodes(Some((tag_name.as_str(), start)))?
        };

        self.expect_closing_tag(&tag_name)?;

        Ok(Element {
            tag_name,
            attributes,
            children,
            self_closing: false,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_attributes(&mut self, tag_start: usize) -> ParseResult<IndexMap<String, String>> {
        let mut attributes = IndexMap::new();

        loop {
            self.skip_whitespace();

            match self.peek() {
                None => return Err(ParseError::unexpected_eof(self.pos)),
                Some('>') => break,
                Some('/') if self.starts_with("/>") => break,
                Some(_) => {
                    let name = self.parse_attr_name(tag_start)?;
                    self.skip_whitespace();

                    let value = if self.eat('=') {
                        self.skip_whitespace();
                        self.parse_attr_value()?
                    } else {
                        String::new()
                    };

                    attributes.insert(name, value);
                }
            }
        }

        Ok(attributes)
    }

    fn parse_attr_name(&mut self, tag_start: usize) -> ParseResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                break;
            }
            self.advance();
        }

        if self.pos == start {
            return Err(ParseError::malformed_tag(
                tag_start,
                format!("invalid attribute at {}", start),
            ));
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_attr_value(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        let value = self.input[start..self.pos].to_string();
                        self.advance();
                        return Ok(value);
                    }
                    self.advance();
                }
                Err(ParseError::unexpected_eof(self.pos))
            }
            Some(_) => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_whitespace() || c == '>' {
                        break;
                    }
                    self.advance();
                }
                Ok(self.input[start..self.pos].to_string())
            }
            None => Err(ParseError::unexpected_eof(self.pos)),
        }
    }

    /// Raw text body: everything up to the matching closing tag.
    fn parse_raw_text(&mut self, tag: &str, tag_start: usize) -> ParseResult<String> {
        let needle = format!("</{}", tag.to_ascii_lowercase());
        let haystack = self.input[self.pos..].to_ascii_lowercase();

        match haystack.find(&needle) {
            Some(offset) => {
                let raw = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset;
                Ok(raw)
            }
            None => Err(ParseError::unclosed_element(tag_start, tag)),
        }
    }

    fn expect_closing_tag(&mut self, expected: &str) -> ParseResult<()> {
        let close_start = self.pos;
        if !self.starts_with("</") {
            return Err(ParseError::unclosed_element(close_start, expected));
        }
        self.advance_by(2);

        let found = self.parse_name()?;
        self.skip_whitespace();

        if !self.eat('>') {
            return Err(ParseError::unexpected_eof(self.pos));
        }

        if !found.eq_ignore_ascii_case(expected) {
            return Err(ParseError::mismatched_closing_tag(
                close_start,
                expected,
                found,
            ));
        }

        Ok(())
    }

    fn parse_comment(&mut self) -> ParseResult<Node> {
        let start = self.pos;
        self.advance_by(4); // consume '<!--'

        match self.input[self.pos..].find("-->") {
            Some(offset) => {
                let content = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset + 3;
                Ok(Node::Comment { content })
            }
            None => Err(ParseError::malformed_tag(start, "unterminated comment")),
        }
    }

    fn parse_doctype(&mut self) -> ParseResult<Node> {
        let start = self.pos;
        self.advance_by(2); // consume '<!'

        match self.input[self.pos..].find('>') {
            Some(offset) => {
                let content = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset + 1;
                Ok(Node::Doctype { content })
            }
            None => Err(ParseError::malformed_tag(start, "unterminated declaration")),
        }
    }

    /// Text run: everything up to the next markup start. A stray `<` that
    /// does not begin a tag, comment, or declaration is treated as text.
    fn parse_text(&mut self) -> Node {
        let start = self.pos;

        loop {
            match self.peek() {
                None => break,
                Some('<') => {
                    if self.at_element_start() || self.starts_with("</") || self.starts_with("<!") {
                        break;
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }

        Node::Text {
            content: self.input[start..self.pos].to_string(),
        }
    }

    /// `<` followed by an ASCII letter starts an element.
    fn at_element_start(&self) -> bool {
        let mut chars = self.input[self.pos..].chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn parse_name(&mut self) -> ParseResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '.' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(ParseError::malformed_tag(start, "expected tag name"));
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn advance_by(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
