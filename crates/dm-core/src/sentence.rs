use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sentence
// ---------------------------------------------------------------------------

/// Minimal comparable unit of text produced by segmentation.
///
/// `start_char` / `end_char` are character offsets into the source text of
/// the segment this sentence came from; a sentence produced by re-splitting
/// an oversized segment inherits the parent segment's span. All lengths and
/// offsets count characters, not bytes, so they line up with what a reader
/// sees in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position of this sentence in the emitted sequence (0-based, running
    /// counter; a re-split segment consumes several ids).
    pub id: usize,
    /// Trimmed sentence text as displayed to the user.
    pub text: String,
    /// Character offset of the source segment's first character.
    pub start_char: usize,
    /// Character offset one past the source segment's last character.
    pub end_char: usize,
    /// Character count of `text`.
    pub length: usize,
    /// `true` when this sentence was carved out of an oversized segment.
    pub is_split: bool,
}

impl Sentence {
    /// Construct a sentence, deriving `length` from the text.
    pub fn new(
        id: usize,
        text: impl Into<String>,
        start_char: usize,
        end_char: usize,
        is_split: bool,
    ) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            id,
            text,
            start_char,
            end_char,
            length,
            is_split,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a sentence for equality comparison: lowercase, collapse internal
/// whitespace runs to a single space, strip leading/trailing `. , ! ? ; :`
/// and spaces.
///
/// The result is only ever compared against another normalized sentence;
/// display always uses the original text.
pub fn normalize_sentence(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c| matches!(c, ' ' | '.' | ',' | '!' | '?' | ';' | ':'))
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_new_derives_char_length() {
        let s = Sentence::new(0, "café bar", 0, 8, false);
        assert_eq!(s.length, 8, "length counts characters, not bytes");
    }

    #[test]
    fn sentence_round_trips_json() {
        let s = Sentence::new(3, "The borrower shall repay.", 10, 35, true);
        let json = serde_json::to_string(&s).expect("serialize");
        let restored: Sentence = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, s);
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_sentence("The Borrower SHALL"), "the borrower shall");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(
            normalize_sentence("the  borrower\t shall\n repay"),
            "the borrower shall repay"
        );
    }

    #[test]
    fn normalize_strips_edge_punctuation() {
        assert_eq!(normalize_sentence("  Hello, world!  "), "hello, world");
        assert_eq!(normalize_sentence("..; terms :,."), "terms");
    }

    #[test]
    fn normalize_keeps_interior_punctuation() {
        assert_eq!(
            normalize_sentence("Pay $100, then stop."),
            "pay $100, then stop"
        );
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize_sentence(""), "");
        assert_eq!(normalize_sentence("  .,  "), "");
    }

    #[test]
    fn normalized_equality_ignores_case_and_trailing_period() {
        let a = normalize_sentence("This is a Sentence.");
        let b = normalize_sentence("this is a sentence");
        assert_eq!(a, b);
    }
}
