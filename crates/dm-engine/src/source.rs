//! Text extraction boundary.
//!
//! OCR and document-format parsing live behind [`TextSource`]; the engine
//! only sees extracted strings. The built-in [`PlainTextSource`] covers the
//! `.txt` path so the pipeline is usable end-to-end without a parser stack;
//! deployments inject richer sources for PDF/DOCX/image input.

use std::path::Path;

use dm_core::{DmError, Result};

// ---------------------------------------------------------------------------
// TextSource
// ---------------------------------------------------------------------------

/// Extraction collaborator: file in, full document text out.
///
/// Implementations return an empty string (or an error) on total failure;
/// the engine rejects empty text before comparison, so a failed extraction
/// can never silently produce an empty report.
pub trait TextSource {
    fn extract(&self, path: &Path) -> Result<String>;
}

// ---------------------------------------------------------------------------
// PlainTextSource
// ---------------------------------------------------------------------------

/// Reads `.txt` files verbatim; rejects every other extension explicitly
/// rather than guessing at binary content.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        if extension.as_deref() != Some("txt") {
            return Err(DmError::Extraction {
                path: path.display().to_string(),
                reason: "unsupported file type (expected .txt)".to_string(),
            });
        }

        std::fs::read_to_string(path).map_err(|e| DmError::Extraction {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
