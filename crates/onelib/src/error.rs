//! Error types
//!
//! Only operations with genuinely invalid input fail. The fail-soft helpers
//! (`load`, `copy`) and the DOM accessors never return these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Chunk size must be positive, got {0}")]
    InvalidChunkSize(usize),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("DOM error: {0}")]
    Dom(#[from] dom::DomError),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard helper available on this system")]
    Unavailable,

    #[error("Clipboard helper '{program}' failed: {reason}")]
    Helper { program: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
