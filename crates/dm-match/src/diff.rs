//! Word-level diff using Myers algorithm via the `similar` crate.
//!
//! Operates on lowercased words so case-only edits do not produce spurious
//! diffs, while the output carries the original display text. Adjacent
//! delete/insert runs are merged into a single `Substituted` entry to keep
//! the output compact for side-by-side rendering.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Disposition of a group of words in the diff output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WordDiffKind {
    Equal,
    Inserted,
    Deleted,
    Substituted,
}

/// A grouped, word-level diff entry.
///
/// `left` and `right` hold display text: for `Equal` both sides are
/// populated, for `Inserted` only `right`, for `Deleted` only `left`, and
/// for `Substituted` both are non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDiff {
    pub kind: WordDiffKind,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute a grouped word-level diff between two sentences.
pub fn word_diff(left: &str, right: &str) -> Vec<WordDiff> {
    let left_words: Vec<&str> = left.split_whitespace().collect();
    let right_words: Vec<&str> = right.split_whitespace().collect();

    let left_norm: Vec<String> = left_words.iter().map(|w| w.to_lowercase()).collect();
    let right_norm: Vec<String> = right_words.iter().map(|w| w.to_lowercase()).collect();

    let ops = similar::capture_diff_slices(Algorithm::Myers, &left_norm, &right_norm);

    // One group per op; similar already emits maximal runs.
    let mut groups: Vec<WordDiff> = Vec::new();
    for op in &ops {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => groups.push(WordDiff {
                kind: WordDiffKind::Equal,
                left: collect_words(&left_words, *old_index, *len),
                right: collect_words(&right_words, *new_index, *len),
            }),
            DiffOp::Delete {
                old_index, old_len, ..
            } => groups.push(WordDiff {
                kind: WordDiffKind::Deleted,
                left: collect_words(&left_words, *old_index, *old_len),
                right: Vec::new(),
            }),
            DiffOp::Insert {
                new_index, new_len, ..
            } => groups.push(WordDiff {
                kind: WordDiffKind::Inserted,
                left: Vec::new(),
                right: collect_words(&right_words, *new_index, *new_len),
            }),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => groups.push(WordDiff {
                kind: WordDiffKind::Substituted,
                left: collect_words(&left_words, *old_index, *old_len),
                right: collect_words(&right_words, *new_index, *new_len),
            }),
        }
    }

    merge_delete_insert(groups)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn collect_words(words: &[&str], start: usize, len: usize) -> Vec<String> {
    words[start..start + len]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

/// Merge adjacent Deleted+Inserted groups into Substituted entries.
fn merge_delete_insert(groups: Vec<WordDiff>) -> Vec<WordDiff> {
    let mut result: Vec<WordDiff> = Vec::new();
    let mut iter = groups.into_iter().peekable();

    while let Some(group) = iter.next() {
        if group.kind == WordDiffKind::Deleted {
            if let Some(next) = iter.peek() {
                if next.kind == WordDiffKind::Inserted {
                    let next = iter.next().expect("peeked");
                    result.push(WordDiff {
                        kind: WordDiffKind::Substituted,
                        left: group.left,
                        right: next.right,
                    });
                    continue;
                }
            }
        }
        result.push(group);
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sentences_produce_single_equal_group() {
        let diffs = word_diff("the borrower shall repay", "the borrower shall repay");
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, WordDiffKind::Equal);
        assert_eq!(diffs[0].left.len(), 4);
    }

    #[test]
    fn case_only_difference_is_equal() {
        let diffs = word_diff("The Borrower shall repay", "the borrower shall repay");
        assert!(diffs.iter().all(|d| d.kind == WordDiffKind::Equal));
        // Display text keeps the original casing of each side.
        assert_eq!(diffs[0].left[0], "The");
        assert_eq!(diffs[0].right[0], "the");
    }

    #[test]
    fn insertion_detected() {
        let diffs = word_diff("the borrower shall repay", "the borrower shall promptly repay");
        let inserted: Vec<&str> = diffs
            .iter()
            .filter(|d| d.kind == WordDiffKind::Inserted)
            .flat_map(|d| d.right.iter().map(|s| s.as_str()))
            .collect();
        assert_eq!(inserted, vec!["promptly"]);
    }

    #[test]
    fn deletion_detected() {
        let diffs = word_diff("the borrower shall promptly repay", "the borrower shall repay");
        let deleted: Vec<&str> = diffs
            .iter()
            .filter(|d| d.kind == WordDiffKind::Deleted)
            .flat_map(|d| d.left.iter().map(|s| s.as_str()))
            .collect();
        assert_eq!(deleted, vec!["promptly"]);
    }

    #[test]
    fn substitution_merged_from_delete_insert() {
        let diffs = word_diff("the borrower shall repay", "the lender shall repay");
        let sub = diffs
            .iter()
            .find(|d| d.kind == WordDiffKind::Substituted)
            .expect("substitution group");
        assert_eq!(sub.left, vec!["borrower"]);
        assert_eq!(sub.right, vec!["lender"]);
    }

    #[test]
    fn empty_left_is_all_inserted() {
        let diffs = word_diff("", "new clause text");
        assert!(diffs.iter().all(|d| d.kind == WordDiffKind::Inserted));
    }

    #[test]
    fn empty_right_is_all_deleted() {
        let diffs = word_diff("old clause text", "");
        assert!(diffs.iter().all(|d| d.kind == WordDiffKind::Deleted));
    }

    #[test]
    fn both_empty_no_groups() {
        assert!(word_diff("", "").is_empty());
    }

    #[test]
    fn serializes_to_snake_case() {
        let diffs = word_diff("alpha", "beta");
        let json = serde_json::to_string(&diffs).expect("serialize");
        assert!(json.contains("\"substituted\""));
    }
}
