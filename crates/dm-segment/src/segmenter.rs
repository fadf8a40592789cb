//! Sentence segmentation with post-processing.
//!
//! Boundary detection itself is delegated to a [`SegmentationService`], an
//! injected collaborator wrapping whatever NLP model the deployment uses.
//! This module owns the post-processing policy applied to the raw spans:
//!
//! 1. Segments whose trimmed length is under 3 characters are dropped as
//!    noise (stray punctuation, OCR debris).
//! 2. Segments longer than the configured maximum are re-split: first on
//!    `;`, then on `:`, accepting a split only when every resulting part is
//!    under the limit; otherwise the segment is sliced at fixed width.
//!    Every part of a re-split segment carries `is_split = true` and
//!    inherits the parent segment's character span.
//! 3. Ids are assigned as a running counter over emitted sentences, so a
//!    re-split segment consumes several ids.

use dm_core::{Result, Sentence};

/// Minimum trimmed length (in characters) for a segment to be kept.
const MIN_SEGMENT_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// SegmentationService
// ---------------------------------------------------------------------------

/// A raw sentence span produced by a boundary detector.
///
/// Offsets are character positions into the text passed to `segment_spans`.
#[derive(Debug, Clone)]
pub struct RawSpan {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

/// Boundary-detection collaborator: text in, ordered spans out.
///
/// Implementations must be safe for concurrent use (stateless per call or
/// internally synchronized); independent comparisons may run in parallel.
pub trait SegmentationService {
    fn segment_spans(&self, text: &str) -> Result<Vec<RawSpan>>;

    /// Warm up any lazily-loaded model. Called explicitly by the engine at
    /// startup; the default is a no-op for model-free implementations.
    fn preload(&self) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SentenceSegmenter
// ---------------------------------------------------------------------------

/// Splits raw text into an ordered sequence of addressable [`Sentence`]s.
pub struct SentenceSegmenter<S> {
    service: S,
    max_sentence_length: usize,
}

impl<S: SegmentationService> SentenceSegmenter<S> {
    pub fn new(service: S, max_sentence_length: usize) -> Self {
        Self {
            service,
            max_sentence_length,
        }
    }

    /// Warm up the underlying boundary detector.
    pub fn preload(&self) -> Result<()> {
        self.service.preload()
    }

    /// Segment `text` into sentences.
    ///
    /// Empty or whitespace-only input yields an empty sequence; it is never
    /// an error at this layer.
    pub fn segment(&self, text: &str) -> Result<Vec<Sentence>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let spans = self.service.segment_spans(text)?;
        let mut sentences: Vec<Sentence> = Vec::with_capacity(spans.len());

        for span in spans {
            let trimmed = span.text.trim();
            let char_len = trimmed.chars().count();

            if char_len < MIN_SEGMENT_CHARS {
                continue;
            }

            if char_len > self.max_sentence_length {
                for part in split_long_segment(trimmed, self.max_sentence_length) {
                    let id = sentences.len();
                    sentences.push(Sentence::new(
                        id,
                        part,
                        span.start_char,
                        span.end_char,
                        true,
                    ));
                }
            } else {
                let id = sentences.len();
                sentences.push(Sentence::new(
                    id,
                    trimmed,
                    span.start_char,
                    span.end_char,
                    false,
                ));
            }
        }

        Ok(sentences)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Break an oversized segment at natural break points.
///
/// Tries `;` first, then `:`; a split is only accepted when every trimmed
/// part fits under `max_len`. When no delimiter produces an acceptable
/// split the segment is sliced at fixed character width.
fn split_long_segment(segment: &str, max_len: usize) -> Vec<String> {
    for delimiter in [';', ':'] {
        if segment.contains(delimiter) {
            let parts: Vec<String> = segment
                .split(delimiter)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if !parts.is_empty() && parts.iter().all(|p| p.chars().count() < max_len) {
                return parts;
            }
        }
    }

    // Last resort: fixed-width slices on character boundaries.
    let chars: Vec<char> = segment.chars().collect();
    chars
        .chunks(max_len)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
