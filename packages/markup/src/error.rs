use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Malformed tag at {pos}: {message}")]
    MalformedTag { pos: usize, message: String },

    #[error("Mismatched closing tag at {pos}: expected </{expected}>, found </{found}>")]
    MismatchedClosingTag {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Unclosed element <{tag}> starting at {pos}")]
    UnclosedElement { pos: usize, tag: String },
}

impl ParseError {
    pub fn unexpected_eof(pos: usize) -> Self {
        Self::UnexpectedEof { pos }
    }

    pub fn malformed_tag(pos: usize, message: impl Into<String>) -> Self {
        Self::MalformedTag {
            pos,
            message: message.into(),
        }
    }

    pub fn mismatched_closing_tag(
        pos: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::MismatchedClosingTag {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unclosed_element(pos: usize, tag: impl Into<String>) -> Self {
        Self::UnclosedElement {
            pos,
            tag: tag.into(),
        }
    }
}
