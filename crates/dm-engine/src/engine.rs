//! Comparison engine: composition root of the pipeline.
//!
//! [`ComparisonEngine`] wires the injected collaborators (segmentation
//! service, embedding provider) to the matching and reporting stages:
//!
//! 1. Reject empty/whitespace input outright, naming the offending side.
//! 2. Segment both documents into sentences.
//! 3. Match sentences (one batched embedding call per document).
//! 4. Aggregate matches, leftovers, classifications and reorderings into a
//!    [`Report`], stamped with run metadata and elapsed wall-clock time.
//!
//! The pipeline is a pure synchronous computation with no cross-request
//! state: one engine can serve concurrent comparisons as long as the
//! injected services tolerate concurrent calls. A document that segments to
//! zero sentences is a valid degenerate input, not an error.

use std::path::Path;
use std::time::Instant;

use dm_core::{CompareConfig, DmError, DocSide, Result};
use dm_match::{match_documents, EmbeddingProvider, HashingEmbedder};
use dm_report::{build_report, Report};
use dm_segment::{profile_document, RuleSegmenter, SegmentationService, SentenceSegmenter};

use crate::source::TextSource;

// ---------------------------------------------------------------------------
// ComparisonEngine
// ---------------------------------------------------------------------------

pub struct ComparisonEngine<S, E> {
    segmenter: SentenceSegmenter<S>,
    embedder: E,
    config: CompareConfig,
}

impl<S: SegmentationService, E: EmbeddingProvider> ComparisonEngine<S, E> {
    /// Build an engine around explicitly injected collaborators. The engine
    /// never reaches for global model state.
    pub fn new(segmentation: S, embedder: E, config: CompareConfig) -> Self {
        let segmenter = SentenceSegmenter::new(segmentation, config.max_sentence_length);
        Self {
            segmenter,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Warm up both injected services (model loading, caches). Intended to
    /// be called once at startup so the first comparison does not pay the
    /// loading cost.
    pub fn preload(&self) -> Result<()> {
        self.segmenter.preload()?;
        self.embedder.preload()
    }

    /// Compare two extracted document texts and produce a [`Report`].
    pub fn compare(&self, text1: &str, text2: &str) -> Result<Report> {
        let start = Instant::now();

        if text1.trim().is_empty() {
            return Err(DmError::EmptyDocument { side: DocSide::Doc1 });
        }
        if text2.trim().is_empty() {
            return Err(DmError::EmptyDocument { side: DocSide::Doc2 });
        }

        let sentences1 = self.segmenter.segment(text1)?;
        let sentences2 = self.segmenter.segment(text2)?;

        let result = match_documents(&sentences1, &sentences2, &self.embedder, &self.config)?;

        let doc1 = profile_document(text1, &sentences1);
        let doc2 = profile_document(text2, &sentences2);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        Ok(build_report(
            &result,
            &sentences1,
            &sentences2,
            doc1,
            doc2,
            &self.config,
            elapsed_ms,
        ))
    }

    /// Extract both documents through `source`, then compare.
    ///
    /// Extraction failures surface as [`DmError::Extraction`] ("could not
    /// read document"), distinct from comparison-stage failures.
    pub fn compare_sources<T: TextSource>(
        &self,
        source: &T,
        path1: &Path,
        path2: &Path,
    ) -> Result<Report> {
        let text1 = source.extract(path1)?;
        let text2 = source.extract(path2)?;
        self.compare(&text1, &text2)
    }
}

impl ComparisonEngine<RuleSegmenter, HashingEmbedder> {
    /// Engine with the built-in rule-based segmenter and hashing embedder.
    pub fn with_defaults(config: CompareConfig) -> Self {
        Self::new(RuleSegmenter, HashingEmbedder::default(), config)
    }
}

impl Default for ComparisonEngine<RuleSegmenter, HashingEmbedder> {
    fn default() -> Self {
        Self::with_defaults(CompareConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
