//! # Letterpress Markup
//!
//! Parser and serializer for the email authoring dialect (mj-* markup) and
//! for the compiled HTML the external transformer produces.
//!
//! Both representations are ordered trees of elements (tag name, ordered
//! attribute map, ordered children) plus raw text runs, comments, and
//! doctype nodes. Text and attribute values are stored verbatim so that
//! everything a mutation does not touch survives parse → serialize
//! byte-for-byte.

pub mod ast;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod visitor;

pub use ast::{normalize_text, Document, Element, Node, Span};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, Parser};
pub use serializer::{serialize, Serializer};
pub use visitor::{Visitor, VisitorMut};
