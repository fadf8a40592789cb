//! Report aggregation: the structured output of a comparison run.
//!
//! The [`Report`] is the wire format: it serializes directly to the JSON
//! shape callers receive, so field names and enum spellings here are a
//! compatibility surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dm_core::{CompareConfig, Sentence};
use dm_match::{MatchResult, SentenceMatch};
use dm_segment::DocumentProfile;

use crate::classify::{classify_match, severity_for, suggest_causes, Classification, Severity};
use crate::reorder::{detect_reorderings, Reordering};

// ---------------------------------------------------------------------------
// DifferenceKind / Difference
// ---------------------------------------------------------------------------

/// Disposition of a single difference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Both documents contain the sentence, with diverging content.
    Mismatch,
    /// The sentence appears only in document 2.
    MissingInDoc1,
    /// The sentence appears only in document 1.
    MissingInDoc2,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceKind::Mismatch => "mismatch",
            DifferenceKind::MissingInDoc1 => "missing_in_doc1",
            DifferenceKind::MissingInDoc2 => "missing_in_doc2",
        }
    }
}

/// One divergence between the documents.
///
/// Positions are 1-indexed for presentation; a side that has no
/// counterpart carries `None` for its position and text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,
    pub classification: Classification,
    pub severity: Severity,
    pub position1: Option<usize>,
    pub position2: Option<usize>,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub similarity: f64,
    pub suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary / Verdict / QualityAnalysis
// ---------------------------------------------------------------------------

/// Aggregate counts and scores for the whole comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// `match_score × 100`, rounded to two decimals.
    pub overall_match: f64,
    pub total_sentences_doc1: usize,
    pub total_sentences_doc2: usize,
    pub matched_sentences: usize,
    pub exact_matches: usize,
    pub minor_differences: usize,
    /// Significant matched pairs plus every unmatched sentence.
    pub significant_differences: usize,
    /// Sentences present only in document 2.
    pub missing_in_doc1: usize,
    /// Sentences present only in document 1.
    pub missing_in_doc2: usize,
    pub reorderings_detected: usize,
    /// Mean similarity across matches, rounded to three decimals.
    pub avg_similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Identical,
    VerySimilar,
    Similar,
    Different,
    VeryDifferent,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Identical => "identical",
            VerdictStatus::VerySimilar => "very_similar",
            VerdictStatus::Similar => "similar",
            VerdictStatus::Different => "different",
            VerdictStatus::VeryDifferent => "very_different",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

/// Overall judgement about document similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub message: String,
    /// Presentation color for the verdict banner.
    pub color: String,
    pub confidence: Confidence,
}

/// Breakdown of match quality by classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub total_matches: usize,
    pub exact_matches: usize,
    pub minor_differences: usize,
    pub rewordings: usize,
    pub significant_differences: usize,
    /// Unrounded mean similarity across matches.
    pub avg_similarity: f64,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The top-level output of a single comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Stable unique identifier for this comparison run (UUIDv4).
    pub run_id: Uuid,
    /// UTC timestamp when the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Wall-clock duration of the comparison in milliseconds.
    pub elapsed_ms: u64,
    pub summary: Summary,
    pub verdict: Verdict,
    /// Sorted ascending by `(position1, position2)` with absent positions
    /// ordered last.
    pub differences: Vec<Difference>,
    pub reorderings: Vec<Reordering>,
    pub recommendations: Vec<String>,
    pub quality_analysis: QualityAnalysis,
    pub doc1: DocumentProfile,
    pub doc2: DocumentProfile,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Breakdown of classifications across the accepted matches.
pub fn analyze_match_quality(matches: &[SentenceMatch]) -> QualityAnalysis {
    let mut quality = QualityAnalysis {
        total_matches: matches.len(),
        exact_matches: 0,
        minor_differences: 0,
        rewordings: 0,
        significant_differences: 0,
        avg_similarity: 0.0,
    };
    if matches.is_empty() {
        return quality;
    }

    for m in matches {
        match classify_match(m) {
            Classification::ExactMatch => quality.exact_matches += 1,
            Classification::MinorDifference => quality.minor_differences += 1,
            Classification::Rewording => quality.rewordings += 1,
            Classification::Significant | Classification::Addition => {
                quality.significant_differences += 1
            }
        }
    }
    quality.avg_similarity =
        matches.iter().map(|m| m.similarity).sum::<f64>() / matches.len() as f64;
    quality
}

/// Merge matches, leftovers, classifications and reorderings into one
/// structured [`Report`].
pub fn build_report(
    result: &MatchResult,
    sentences1: &[Sentence],
    sentences2: &[Sentence],
    doc1: DocumentProfile,
    doc2: DocumentProfile,
    config: &CompareConfig,
    elapsed_ms: u64,
) -> Report {
    let quality = analyze_match_quality(&result.matches);
    let reorderings = detect_reorderings(&result.matches, config.context_window);

    let mut differences: Vec<Difference> = Vec::new();

    // Non-exact matches. Exact pairs never enter the difference list.
    for m in &result.matches {
        if m.exact_match {
            continue;
        }
        let classification = classify_match(m);
        differences.push(Difference {
            kind: DifferenceKind::Mismatch,
            classification,
            severity: severity_for(classification),
            position1: Some(m.index1 + 1),
            position2: Some(m.index2 + 1),
            text1: Some(m.sentence1.text.clone()),
            text2: Some(m.sentence2.text.clone()),
            similarity: m.similarity,
            suggestions: suggest_causes(m),
        });
    }

    // Sentences present only in document 1.
    for sentence in &result.only_in_doc1 {
        differences.push(Difference {
            kind: DifferenceKind::MissingInDoc2,
            classification: Classification::Addition,
            severity: Severity::High,
            position1: Some(sentence.id + 1),
            position2: None,
            text1: Some(sentence.text.clone()),
            text2: None,
            similarity: 0.0,
            suggestions: vec![
                "This sentence appears in document 1 but not in document 2".to_string(),
            ],
        });
    }

    // Sentences present only in document 2.
    for sentence in &result.only_in_doc2 {
        differences.push(Difference {
            kind: DifferenceKind::MissingInDoc1,
            classification: Classification::Addition,
            severity: Severity::High,
            position1: None,
            position2: Some(sentence.id + 1),
            text1: None,
            text2: Some(sentence.text.clone()),
            similarity: 0.0,
            suggestions: vec![
                "This sentence appears in document 2 but not in document 1".to_string(),
            ],
        });
    }

    differences.sort_by(|a, b| {
        let key_a = (
            a.position1.unwrap_or(usize::MAX),
            a.position2.unwrap_or(usize::MAX),
        );
        let key_b = (
            b.position1.unwrap_or(usize::MAX),
            b.position2.unwrap_or(usize::MAX),
        );
        key_a.cmp(&key_b)
    });

    let summary = Summary {
        overall_match: round_to(result.match_score * 100.0, 2),
        total_sentences_doc1: sentences1.len(),
        total_sentences_doc2: sentences2.len(),
        matched_sentences: result.matches.len(),
        exact_matches: quality.exact_matches,
        minor_differences: quality.minor_differences,
        significant_differences: quality.significant_differences
            + result.only_in_doc1.len()
            + result.only_in_doc2.len(),
        missing_in_doc1: result.only_in_doc2.len(),
        missing_in_doc2: result.only_in_doc1.len(),
        reorderings_detected: reorderings.len(),
        avg_similarity: round_to(quality.avg_similarity, 3),
    };

    let verdict = verdict_for(&summary);
    let recommendations = recommendations_for(&summary, &differences, &reorderings);

    Report {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        elapsed_ms,
        summary,
        verdict,
        differences,
        reorderings,
        recommendations,
        quality_analysis: quality,
        doc1,
        doc2,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn verdict_for(summary: &Summary) -> Verdict {
    let pct = summary.overall_match;
    let (status, message, color) = if pct >= 98.0 {
        (
            VerdictStatus::Identical,
            "Documents are virtually identical",
            "green",
        )
    } else if pct >= 90.0 {
        (
            VerdictStatus::VerySimilar,
            "Documents are very similar with minor differences",
            "green",
        )
    } else if pct >= 75.0 {
        (
            VerdictStatus::Similar,
            "Documents are similar but have notable differences",
            "yellow",
        )
    } else if pct >= 50.0 {
        (
            VerdictStatus::Different,
            "Documents have significant differences",
            "orange",
        )
    } else {
        (
            VerdictStatus::VeryDifferent,
            "Documents are substantially different",
            "red",
        )
    };

    Verdict {
        status,
        message: message.to_string(),
        color: color.to_string(),
        confidence: if summary.matched_sentences > 5 {
            Confidence::High
        } else {
            Confidence::Medium
        },
    }
}

/// Independently evaluated recommendation rules, in fixed order.
fn recommendations_for(
    summary: &Summary,
    differences: &[Difference],
    reorderings: &[Reordering],
) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    let ocr_hits = differences
        .iter()
        .filter(|d| d.suggestions.iter().any(|s| s.contains("OCR")))
        .count();
    if ocr_hits > 3 {
        recommendations.push(
            "Multiple potential OCR errors detected. Consider rescanning document with higher \
             quality settings."
                .to_string(),
        );
    }

    if !reorderings.is_empty() {
        recommendations.push(format!(
            "Detected {} sentences that appear in different order. Verify if content was \
             intentionally reorganized.",
            reorderings.len()
        ));
    }

    if summary.missing_in_doc1 > 0 {
        recommendations.push(format!(
            "{} sentence(s) appear only in document 2. Check if content was added or if OCR \
             missed these sections.",
            summary.missing_in_doc1
        ));
    }

    if summary.missing_in_doc2 > 0 {
        recommendations.push(format!(
            "{} sentence(s) appear only in document 1. Check if content was removed or if OCR \
             failed.",
            summary.missing_in_doc2
        ));
    }

    if summary.overall_match < 90.0 {
        recommendations.push(
            "Documents have notable differences. Manual review recommended for important \
             documents."
                .to_string(),
        );
    }

    if summary.overall_match >= 95.0 && summary.minor_differences > 0 {
        recommendations.push(
            "Documents are very similar. Differences appear to be minor (typos, punctuation). \
             Verify if these are acceptable variations."
                .to_string(),
        );
    }

    if recommendations.is_empty() && summary.overall_match >= 98.0 {
        recommendations
            .push("Documents match very closely. No significant issues detected.".to_string());
    }

    recommendations
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
