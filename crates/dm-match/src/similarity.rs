//! Cosine similarity and the pairwise similarity matrix.

use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm. For the L2-normalized
/// embeddings the providers produce this is a plain dot product, but the
/// norms are computed anyway so un-normalized providers also behave.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Full pairwise similarity matrix: `matrix[i][j]` is the cosine similarity
/// between `rows[i]` and `cols[j]`.
///
/// Rows are computed in parallel; the matrix is the only O(n·m) structure in
/// the pipeline and dominates the cost of a comparison.
pub fn similarity_matrix(rows: &[Vec<f32>], cols: &[Vec<f32>]) -> Vec<Vec<f64>> {
    rows.par_iter()
        .map(|row| cols.iter().map(|col| cosine_similarity(row, col)).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
