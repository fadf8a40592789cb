use thiserror::Error;

// ---------------------------------------------------------------------------
// DocSide
// ---------------------------------------------------------------------------

/// Which of the two compared documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSide {
    Doc1,
    Doc2,
}

impl DocSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocSide::Doc1 => "document 1",
            DocSide::Doc2 => "document 2",
        }
    }
}

impl std::fmt::Display for DocSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DmError
// ---------------------------------------------------------------------------

/// Top-level error type for the dm-core crate and dependents.
///
/// `EmptyDocument` is an input precondition failure; `Extraction`,
/// `Segmentation` and `Embedding` are collaborator failures that abort the
/// whole comparison (no partial report is ever produced). A document that
/// segments to zero sentences is NOT an error; it yields a valid
/// zero-match result.
#[derive(Debug, Error)]
pub enum DmError {
    #[error("{side} contains no extractable text")]
    EmptyDocument { side: DocSide },

    #[error("text extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("segmentation service error: {0}")]
    Segmentation(String),

    #[error("embedding provider error: {0}")]
    Embedding(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, DmError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
