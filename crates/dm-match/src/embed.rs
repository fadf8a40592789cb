//! Sentence embedding boundary.
//!
//! The matcher only needs `encode`: a batched, order-preserving mapping from
//! sentence texts to fixed-dimension vectors, deterministic for identical
//! input and model version. Deployments inject a model-backed provider;
//! [`HashingEmbedder`] is the built-in fallback and test double.

use dm_core::Result;

// ---------------------------------------------------------------------------
// EmbeddingProvider
// ---------------------------------------------------------------------------

/// Embedding collaborator consumed by the matcher.
///
/// Implementations must be safe for concurrent use; the core calls `encode`
/// once per document per comparison and holds no other state about the
/// provider.
pub trait EmbeddingProvider {
    /// Encode a batch of texts into one vector each, in input order.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Warm up any lazily-loaded model. Called explicitly by the engine at
    /// startup; the default is a no-op for model-free implementations.
    fn preload(&self) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HashingEmbedder
// ---------------------------------------------------------------------------

/// Default embedding dimension for [`HashingEmbedder`].
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Deterministic hashed character-trigram embedder.
///
/// Each sentence is lowercased, whitespace runs are collapsed, and every
/// character trigram is hashed into one of `dim` buckets; the bucket counts
/// are L2-normalized. Identical texts therefore embed to identical unit
/// vectors, and a single-character OCR corruption perturbs only the handful
/// of trigrams that cross it, keeping cosine similarity high.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];

        // Lowercase and collapse whitespace so formatting never moves
        // trigram buckets.
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .collect();

        if chars.is_empty() {
            return vector;
        }

        if chars.len() < 3 {
            vector[bucket_of(&chars, self.dim)] += 1.0;
        } else {
            for window in chars.windows(3) {
                vector[bucket_of(window, self.dim)] += 1.0;
            }
        }

        // L2 normalization: cosine similarity reduces to a dot product.
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Rolling 31-multiplier hash of a character window, reduced to a bucket.
fn bucket_of(window: &[char], dim: usize) -> usize {
    let mut hash = 0usize;
    for &ch in window {
        hash = hash.wrapping_mul(31).wrapping_add(ch as usize);
    }
    hash % dim
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    fn encode_one(text: &str) -> Vec<f32> {
        let embedder = HashingEmbedder::default();
        embedder
            .encode(&[text.to_string()])
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn encode_preserves_order_and_count() {
        let embedder = HashingEmbedder::default();
        let texts = vec!["first".to_string(), "second".to_string()];
        let vectors = embedder.encode(&texts).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len(), DEFAULT_EMBEDDING_DIM);
    }

    #[test]
    fn identical_texts_embed_identically() {
        let a = encode_one("The borrower shall repay the loan.");
        let b = encode_one("The borrower shall repay the loan.");
        assert_eq!(a, b);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vectors_are_unit_norm() {
        let v = encode_one("Some sentence of reasonable length.");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn case_and_spacing_do_not_matter() {
        let a = encode_one("The  Borrower   shall repay");
        let b = encode_one("the borrower shall repay");
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn single_char_corruption_stays_similar() {
        let a = encode_one("This is the second sentence of the agreement.");
        let b = encode_one("This is the seccond sentence of the agreement.");
        let sim = cosine_similarity(&a, &b);
        assert!(sim > 0.85, "OCR-level noise should stay above 0.85: {}", sim);
        assert!(sim < 1.0);
    }

    #[test]
    fn unrelated_texts_are_dissimilar() {
        let a = encode_one("Quarterly revenue grew beyond every projection.");
        let b = encode_one("Falcons migrate across high mountain deserts.");
        let sim = cosine_similarity(&a, &b);
        assert!(sim < 0.5, "unrelated sentences scored {}", sim);
    }

    #[test]
    fn short_text_gets_a_single_bucket() {
        let v = encode_one("ab");
        let nonzero = v.iter().filter(|x| **x != 0.0).count();
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let v = encode_one("   ");
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
