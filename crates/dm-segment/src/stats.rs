//! Document-level statistics and structure utilities.
//!
//! These operate purely on the segmented sentence sequence plus the raw
//! text; nothing here feeds back into matching.

use serde::{Deserialize, Serialize};

use dm_core::{document_fingerprint, Sentence};

// ---------------------------------------------------------------------------
// DocumentProfile
// ---------------------------------------------------------------------------

/// Aggregate statistics for one compared document, included in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentProfile {
    /// Number of sentences emitted by segmentation.
    pub sentence_count: usize,
    /// Sum of sentence character counts.
    pub total_chars: usize,
    /// Shortest sentence length in characters; 0 when there are none.
    pub min_length: usize,
    /// Longest sentence length in characters; 0 when there are none.
    pub max_length: usize,
    /// Mean sentence length in characters; 0.0 when there are none.
    pub avg_length: f64,
    /// SHA-256 of the raw extracted text this profile was computed from.
    pub fingerprint: String,
}

/// Profile a document from its raw text and segmented sentences.
pub fn profile_document(raw_text: &str, sentences: &[Sentence]) -> DocumentProfile {
    let fingerprint = document_fingerprint(raw_text);
    if sentences.is_empty() {
        return DocumentProfile {
            sentence_count: 0,
            total_chars: 0,
            min_length: 0,
            max_length: 0,
            avg_length: 0.0,
            fingerprint,
        };
    }

    let lengths: Vec<usize> = sentences.iter().map(|s| s.length).collect();
    let total_chars: usize = lengths.iter().sum();
    DocumentProfile {
        sentence_count: sentences.len(),
        total_chars,
        min_length: *lengths.iter().min().expect("non-empty"),
        max_length: *lengths.iter().max().expect("non-empty"),
        avg_length: total_chars as f64 / sentences.len() as f64,
        fingerprint,
    }
}

// ---------------------------------------------------------------------------
// Paragraph grouping
// ---------------------------------------------------------------------------

/// Character gap between consecutive segments above which a new paragraph
/// is assumed (a blank line in the source).
const PARAGRAPH_GAP_CHARS: usize = 2;

/// Group sentences into paragraphs based on the character gap between
/// consecutive source spans.
pub fn group_into_paragraphs(sentences: &[Sentence]) -> Vec<Vec<Sentence>> {
    let mut paragraphs: Vec<Vec<Sentence>> = Vec::new();
    let mut current: Vec<Sentence> = Vec::new();

    for sentence in sentences {
        if let Some(prev) = current.last() {
            let gap = sentence.start_char.saturating_sub(prev.end_char);
            if gap > PARAGRAPH_GAP_CHARS {
                paragraphs.push(std::mem::take(&mut current));
            }
        }
        current.push(sentence.clone());
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

// ---------------------------------------------------------------------------
// Sentence context
// ---------------------------------------------------------------------------

/// The neighborhood of one sentence, for display alongside a difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceContext {
    pub before: Vec<String>,
    pub target: String,
    pub after: Vec<String>,
}

/// Collect up to `window` sentences on each side of `index`.
/// Returns `None` when `index` is out of bounds.
pub fn sentence_context(
    sentences: &[Sentence],
    index: usize,
    window: usize,
) -> Option<SentenceContext> {
    let target = sentences.get(index)?;
    let before = sentences[index.saturating_sub(window)..index]
        .iter()
        .map(|s| s.text.clone())
        .collect();
    let after_end = (index + 1 + window).min(sentences.len());
    let after = sentences[index + 1..after_end]
        .iter()
        .map(|s| s.text.clone())
        .collect();
    Some(SentenceContext {
        before,
        target: target.text.clone(),
        after,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(id: usize, text: &str, start: usize, end: usize) -> Sentence {
        Sentence::new(id, text, start, end, false)
    }

    #[test]
    fn profile_of_empty_document() {
        let p = profile_document("", &[]);
        assert_eq!(p.sentence_count, 0);
        assert_eq!(p.total_chars, 0);
        assert_eq!(p.avg_length, 0.0);
        assert_eq!(p.fingerprint.len(), 64);
    }

    #[test]
    fn profile_computes_lengths() {
        let sentences = vec![
            sentence(0, "abcd", 0, 4),
            sentence(1, "ab", 5, 7),
            sentence(2, "abcdef", 8, 14),
        ];
        let p = profile_document("raw", &sentences);
        assert_eq!(p.sentence_count, 3);
        assert_eq!(p.total_chars, 12);
        assert_eq!(p.min_length, 2);
        assert_eq!(p.max_length, 6);
        assert!((p.avg_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn profile_fingerprint_tracks_raw_text() {
        let a = profile_document("text a", &[]);
        let b = profile_document("text b", &[]);
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn paragraphs_split_on_gaps() {
        let sentences = vec![
            sentence(0, "one", 0, 3),
            sentence(1, "two", 4, 7),
            // Gap of 4 chars: a blank line in the source.
            sentence(2, "three", 11, 16),
        ];
        let paragraphs = group_into_paragraphs(&sentences);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].len(), 2);
        assert_eq!(paragraphs[1].len(), 1);
    }

    #[test]
    fn paragraphs_of_empty_input() {
        assert!(group_into_paragraphs(&[]).is_empty());
    }

    #[test]
    fn context_window_clamps_at_edges() {
        let sentences: Vec<Sentence> = (0..5)
            .map(|i| sentence(i, &format!("s{}", i), i * 3, i * 3 + 2))
            .collect();
        let ctx = sentence_context(&sentences, 0, 2).unwrap();
        assert!(ctx.before.is_empty());
        assert_eq!(ctx.target, "s0");
        assert_eq!(ctx.after, vec!["s1", "s2"]);

        let ctx = sentence_context(&sentences, 4, 2).unwrap();
        assert_eq!(ctx.before, vec!["s2", "s3"]);
        assert!(ctx.after.is_empty());
    }

    #[test]
    fn context_out_of_bounds_is_none() {
        assert!(sentence_context(&[], 0, 1).is_none());
    }

    #[test]
    fn profile_round_trips_json() {
        let sentences = vec![sentence(0, "abcd", 0, 4)];
        let p = profile_document("raw", &sentences);
        let json = serde_json::to_string(&p).expect("serialize");
        let restored: DocumentProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.sentence_count, 1);
        assert_eq!(restored.fingerprint, p.fingerprint);
    }
}
