//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. The lenient accessors in `service` never
//! surface these; they are for callers driving the document directly.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid tree operation: {0}")]
    InvalidTree(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl DomError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
