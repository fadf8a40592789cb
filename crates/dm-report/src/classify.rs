//! Difference classification and causal suggestions.
//!
//! Classification is an ordered rule table rather than nested conditionals:
//! the first rule whose predicate holds decides the outcome, and the
//! fallback is `Significant`. The similarity cutoffs here are fixed
//! constants, deliberately distinct from the configurable *acceptance*
//! threshold; changing them would change what an existing report means.

use serde::{Deserialize, Serialize};

use dm_match::SentenceMatch;

/// Above this similarity a non-exact pair is still only a minor difference.
const MINOR_SIMILARITY: f64 = 0.95;

/// Above this similarity a pair is a rewording; at or below, significant.
const REWORDING_SIMILARITY: f64 = 0.85;

// ---------------------------------------------------------------------------
// Classification / Severity
// ---------------------------------------------------------------------------

/// How a matched pair (or unmatched sentence) differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    ExactMatch,
    MinorDifference,
    Rewording,
    Significant,
    /// Content present in only one document.
    Addition,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::ExactMatch => "exact_match",
            Classification::MinorDifference => "minor_difference",
            Classification::Rewording => "rewording",
            Classification::Significant => "significant",
            Classification::Addition => "addition",
        }
    }
}

/// Reader-facing weight of a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

struct Rule {
    name: &'static str,
    applies: fn(&SentenceMatch) -> bool,
    outcome: Classification,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "exact_text",
        applies: |m| m.exact_match,
        outcome: Classification::ExactMatch,
    },
    Rule {
        name: "normalized_equal",
        applies: |m| m.normalized_match,
        outcome: Classification::MinorDifference,
    },
    Rule {
        name: "near_identical",
        applies: |m| m.similarity > MINOR_SIMILARITY,
        outcome: Classification::MinorDifference,
    },
    Rule {
        name: "high_similarity",
        applies: |m| m.similarity > REWORDING_SIMILARITY,
        outcome: Classification::Rewording,
    },
];

/// Classify a matched pair. First applicable rule wins; anything that clears
/// no rule is a significant difference.
pub fn classify_match(m: &SentenceMatch) -> Classification {
    for rule in &RULES {
        if (rule.applies)(m) {
            return rule.outcome;
        }
    }
    Classification::Significant
}

/// Names of the classification rules in evaluation order.
pub fn classification_rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

/// Map a classification to its severity.
pub fn severity_for(classification: Classification) -> Severity {
    match classification {
        Classification::ExactMatch => Severity::None,
        Classification::MinorDifference => Severity::Low,
        Classification::Rewording => Severity::Medium,
        Classification::Significant | Classification::Addition => Severity::High,
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Character pairs scanners commonly confuse.
const OCR_CONFUSIONS: [(char, char); 6] = [
    ('l', '1'),
    ('O', '0'),
    ('S', '5'),
    ('I', '1'),
    ('Z', '2'),
    ('B', '8'),
];

/// Propose likely causes for a non-exact match.
///
/// Heuristics, not inference: confusable-character containment in either
/// direction, a character-count delta above 10, and a word-count delta
/// above 3. The containment check tolerates false positives by design of
/// the original heuristic.
pub fn suggest_causes(m: &SentenceMatch) -> Vec<String> {
    let text1 = &m.sentence1.text;
    let text2 = &m.sentence2.text;
    let mut suggestions = Vec::new();

    for (a, b) in OCR_CONFUSIONS {
        if text1.contains(a) && text2.contains(b) {
            suggestions.push(format!("Possible OCR error: '{}' -> '{}'", a, b));
        }
        if text1.contains(b) && text2.contains(a) {
            suggestions.push(format!("Possible OCR error: '{}' -> '{}'", b, a));
        }
    }

    let len_diff = text1.chars().count().abs_diff(text2.chars().count());
    if len_diff > 10 {
        suggestions.push(format!("Length difference: {} characters", len_diff));
    }

    let words1 = text1.split_whitespace().count();
    let words2 = text2.split_whitespace().count();
    if words1.abs_diff(words2) > 3 {
        suggestions.push(format!(
            "Word count difference: {} vs {} words",
            words1, words2
        ));
    }

    suggestions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
