//! Greedy sentence matching with positional-context corroboration.
//!
//! Matching strategy:
//!
//! 1. One batched embedding call per document, then the full pairwise
//!    cosine-similarity matrix.
//! 2. All `(similarity, i, j)` candidates are sorted by descending
//!    similarity (ties broken by ascending `(i, j)` for determinism) and
//!    consumed greedily, an approximation of maximum-weight matching rather
//!    than an optimal assignment. At tens-to-low-hundreds of sentences per
//!    document the approximation is accurate enough and far simpler.
//! 3. The walk stops outright at the first candidate below the similarity
//!    threshold; everything after it is below threshold too.
//! 4. A candidate still has to pass a context-validity check: a window of
//!    offsets around `(i, j)` is inspected, and if at least two neighbor
//!    pairs could be checked but none shows elevated similarity, the
//!    candidate is rejected as a coincidental cross-position match (e.g. a
//!    boilerplate clause repeated elsewhere in the document).
//! 5. Sentences left unconsumed on either side are reported as present in
//!    only that document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use dm_core::{normalize_sentence, CompareConfig, Result, Sentence};

use crate::embed::EmbeddingProvider;
use crate::similarity::similarity_matrix;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One accepted pairing between a sentence of each document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub sentence1: Sentence,
    pub sentence2: Sentence,
    /// Cosine similarity of the pair's embeddings.
    pub similarity: f64,
    /// Position of `sentence1` in document 1's sentence sequence.
    pub index1: usize,
    /// Position of `sentence2` in document 2's sentence sequence.
    pub index2: usize,
    /// Literal text equality.
    pub exact_match: bool,
    /// Equality after normalization (case, whitespace, edge punctuation).
    pub normalized_match: bool,
}

/// The outcome of matching two sentence sequences.
///
/// Every index of each document appears in exactly one place: some match's
/// `index1`/`index2`, or the corresponding leftover list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<SentenceMatch>,
    pub only_in_doc1: Vec<Sentence>,
    pub only_in_doc2: Vec<Sentence>,
    /// Fraction of all sentences (both documents) that found a partner.
    pub match_score: f64,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Match two documents' sentences via the given embedding provider.
///
/// Zero sentences on either side is a valid degenerate input: the result has
/// `match_score = 0` with every sentence unmatched, and the embedding
/// provider is not invoked at all.
pub fn match_documents<E: EmbeddingProvider>(
    sentences1: &[Sentence],
    sentences2: &[Sentence],
    provider: &E,
    config: &CompareConfig,
) -> Result<MatchResult> {
    if sentences1.is_empty() || sentences2.is_empty() {
        return Ok(MatchResult {
            matches: Vec::new(),
            only_in_doc1: sentences1.to_vec(),
            only_in_doc2: sentences2.to_vec(),
            match_score: 0.0,
        });
    }

    let texts1: Vec<String> = sentences1.iter().map(|s| s.text.clone()).collect();
    let texts2: Vec<String> = sentences2.iter().map(|s| s.text.clone()).collect();

    // One batched call per document.
    let embeddings1 = provider.encode(&texts1)?;
    let embeddings2 = provider.encode(&texts2)?;

    let matrix = similarity_matrix(&embeddings1, &embeddings2);
    let (matches, only_in_doc1, only_in_doc2) =
        find_best_matches(sentences1, sentences2, &matrix, config);

    let total = sentences1.len() + sentences2.len();
    let match_score = if total > 0 {
        (2 * matches.len()) as f64 / total as f64
    } else {
        0.0
    };

    Ok(MatchResult {
        matches,
        only_in_doc1,
        only_in_doc2,
        match_score,
    })
}

/// Greedy best-first matching over a precomputed similarity matrix.
///
/// Exposed separately so the acceptance logic can be exercised with
/// hand-built matrices.
pub fn find_best_matches(
    sentences1: &[Sentence],
    sentences2: &[Sentence],
    matrix: &[Vec<f64>],
    config: &CompareConfig,
) -> (Vec<SentenceMatch>, Vec<Sentence>, Vec<Sentence>) {
    let mut candidates: Vec<(f64, usize, usize)> =
        Vec::with_capacity(sentences1.len() * sentences2.len());
    for (i, row) in matrix.iter().enumerate() {
        for (j, &similarity) in row.iter().enumerate() {
            candidates.push((similarity, i, j));
        }
    }

    // Highest similarity first; ties resolved toward in-order pairings.
    candidates.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut matches: Vec<SentenceMatch> = Vec::new();
    let mut used1: HashSet<usize> = HashSet::new();
    let mut used2: HashSet<usize> = HashSet::new();

    for (similarity, i, j) in candidates {
        // Sorted descending, so everything from here on is below threshold.
        if similarity < config.similarity_threshold {
            break;
        }
        if used1.contains(&i) || used2.contains(&j) {
            continue;
        }
        if !context_validity(i, j, matrix, &used1, &used2, config) {
            continue;
        }

        let text1 = &sentences1[i].text;
        let text2 = &sentences2[j].text;
        matches.push(SentenceMatch {
            sentence1: sentences1[i].clone(),
            sentence2: sentences2[j].clone(),
            similarity,
            index1: i,
            index2: j,
            exact_match: text1 == text2,
            normalized_match: normalize_sentence(text1) == normalize_sentence(text2),
        });
        used1.insert(i);
        used2.insert(j);
    }

    let only_in_doc1 = sentences1
        .iter()
        .enumerate()
        .filter(|(i, _)| !used1.contains(i))
        .map(|(_, s)| s.clone())
        .collect();
    let only_in_doc2 = sentences2
        .iter()
        .enumerate()
        .filter(|(j, _)| !used2.contains(j))
        .map(|(_, s)| s.clone())
        .collect();

    (matches, only_in_doc1, only_in_doc2)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Does a candidate pair sit at compatible document positions?
///
/// Inspects the symmetric offset window around `(idx1, idx2)`, skipping
/// offset 0 and any neighbor already consumed. Each in-bounds, unconsumed
/// offset is a context check; similarity above the support threshold counts
/// as support. With two or more checks and zero support the pair is
/// rejected.
fn context_validity(
    idx1: usize,
    idx2: usize,
    matrix: &[Vec<f64>],
    used1: &HashSet<usize>,
    used2: &HashSet<usize>,
    config: &CompareConfig,
) -> bool {
    let rows = matrix.len() as i64;
    let cols = matrix.first().map_or(0, |r| r.len()) as i64;
    let window = config.context_window as i64;

    let mut context_checks = 0;
    let mut context_support = 0;

    for offset in -window..=window {
        if offset == 0 {
            continue;
        }
        let i = idx1 as i64 + offset;
        let j = idx2 as i64 + offset;
        if i < 0 || i >= rows || j < 0 || j >= cols {
            continue;
        }
        let (i, j) = (i as usize, j as usize);
        if used1.contains(&i) || used2.contains(&j) {
            continue;
        }
        context_checks += 1;
        if matrix[i][j] > config.context_support_threshold {
            context_support += 1;
        }
    }

    // Enough neighbors to judge and none of them line up: likely a
    // coincidental match at incompatible positions.
    !(context_checks >= 2 && context_support == 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
