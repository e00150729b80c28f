//! Editor error type

/// Non-fatal errors surfaced by editor operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Malformed JSON, or JSON of the wrong shape
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Well-formed JSON that is not a project document
    #[error("invalid project document: {0}")]
    InvalidDocument(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("version '{0}' not found")]
    UnknownVersion(String),
    #[error("object '{0}' not found")]
    UnknownObject(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
