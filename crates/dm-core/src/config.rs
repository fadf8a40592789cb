// ---------------------------------------------------------------------------
// CompareConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for a comparison run.
///
/// All fields are overridable by the caller; the defaults are the values the
/// pipeline was tuned with and are safe for contract-sized documents.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Minimum cosine similarity for two sentences to be considered a match
    /// candidate. Default: 0.85.
    pub similarity_threshold: f64,
    /// Number of neighboring sentences inspected on each side when checking
    /// that a candidate pair sits at compatible document positions.
    /// Default: 2.
    pub context_window: usize,
    /// Similarity a neighboring pair must exceed to count as context support.
    /// Default: 0.7.
    pub context_support_threshold: f64,
    /// Segments longer than this (in characters) are re-split before
    /// matching. Default: 500.
    pub max_sentence_length: usize,
}

impl CompareConfig {
    /// Maximum index displacement a matched pair may have before it is
    /// reported as a reordering.
    pub fn reorder_tolerance(&self) -> usize {
        self.context_window * 2
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            context_window: 2,
            context_support_threshold: 0.7,
            max_sentence_length: 500,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
