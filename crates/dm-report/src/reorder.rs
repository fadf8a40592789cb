//! Reordering detection.
//!
//! A position-drift heuristic, not an edit-distance move detector: a matched
//! pair whose sequence positions diverge by more than twice the context
//! window is reported as moved content. Positions here are 0-based sequence
//! indices; only the difference list is 1-indexed for presentation.

use serde::{Deserialize, Serialize};

use dm_match::SentenceMatch;

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// A matched sentence that appears at a substantially different position in
/// the second document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reordering {
    /// Text of the sentence as it appears in document 1.
    pub text: String,
    /// Position in document 1's sentence sequence.
    pub expected_position: usize,
    /// Position in document 2's sentence sequence.
    pub actual_position: usize,
    /// `actual_position - expected_position`; negative when the sentence
    /// moved earlier.
    pub displacement: i64,
}

/// Flag every match displaced beyond `2 × context_window`, regardless of its
/// similarity value.
pub fn detect_reorderings(matches: &[SentenceMatch], context_window: usize) -> Vec<Reordering> {
    let tolerance = (context_window * 2) as i64;
    matches
        .iter()
        .filter_map(|m| {
            let displacement = m.index2 as i64 - m.index1 as i64;
            if displacement.abs() > tolerance {
                Some(Reordering {
                    text: m.sentence1.text.clone(),
                    expected_position: m.index1,
                    actual_position: m.index2,
                    displacement,
                })
            } else {
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::Sentence;

    fn match_at(index1: usize, index2: usize) -> SentenceMatch {
        let text = format!("sentence {}", index1);
        SentenceMatch {
            sentence1: Sentence::new(index1, &text, 0, text.len(), false),
            sentence2: Sentence::new(index2, &text, 0, text.len(), false),
            similarity: 0.99,
            index1,
            index2,
            exact_match: true,
            normalized_match: true,
        }
    }

    #[test]
    fn small_drift_is_not_a_reordering() {
        // Tolerance with the default window of 2 is 4.
        let matches = vec![match_at(0, 0), match_at(1, 4), match_at(2, 6)];
        let reorderings = detect_reorderings(&matches, 2);
        assert!(reorderings.is_empty());
    }

    #[test]
    fn displacement_beyond_tolerance_is_reported() {
        let matches = vec![match_at(0, 5)];
        let reorderings = detect_reorderings(&matches, 2);
        assert_eq!(reorderings.len(), 1);
        assert_eq!(reorderings[0].expected_position, 0);
        assert_eq!(reorderings[0].actual_position, 5);
        assert_eq!(reorderings[0].displacement, 5);
    }

    #[test]
    fn backward_moves_have_negative_displacement() {
        let matches = vec![match_at(8, 1)];
        let reorderings = detect_reorderings(&matches, 2);
        assert_eq!(reorderings.len(), 1);
        assert_eq!(reorderings[0].displacement, -7);
    }

    #[test]
    fn tolerance_scales_with_window() {
        let matches = vec![match_at(0, 5)];
        assert_eq!(detect_reorderings(&matches, 2).len(), 1);
        assert!(detect_reorderings(&matches, 3).is_empty());
    }

    #[test]
    fn exact_boundary_is_tolerated() {
        // |0 - 4| == 4 is not beyond the tolerance.
        let matches = vec![match_at(0, 4)];
        assert!(detect_reorderings(&matches, 2).is_empty());
    }
}
