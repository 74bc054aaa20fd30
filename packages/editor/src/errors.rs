//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Parse error: {0}")]
    Parse(#[from] letterpress_markup::ParseError),

    #[error("Component not found: {logical_id}")]
    NotFound { logical_id: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },
}

impl EditError {
    pub fn not_found(logical_id: impl Into<String>) -> Self {
        Self::NotFound {
            logical_id: logical_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
