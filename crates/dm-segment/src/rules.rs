//! Rule-based sentence boundary detection.
//!
//! A dependency-free [`SegmentationService`] implementation used as the
//! built-in default and in tests. Boundary rules:
//!
//! - A run of terminator punctuation (`.`, `!`, `?`), plus any trailing
//!   closing quotes/brackets, ends a sentence when followed by whitespace
//!   or end of input.
//! - A period does NOT end a sentence when the preceding word is a known
//!   abbreviation or a single-letter initial, or when the next word starts
//!   with a lowercase letter (mid-sentence periods such as "approx. five").
//! - A blank line ends the current sentence even without a terminator.
//!
//! Production deployments inject a model-backed service instead; this
//! detector aims for predictable behavior on contract prose, not full
//! NLP-grade accuracy.

use dm_core::Result;

use crate::segmenter::{RawSpan, SegmentationService};

/// Words after which a period is treated as part of the token, not a
/// sentence boundary. Compared lowercase, without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "no", "vs", "etc", "inc", "ltd", "co", "corp", "jr",
    "sr", "art", "sec", "fig", "approx",
];

// ---------------------------------------------------------------------------
// RuleSegmenter
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSegmenter;

impl SegmentationService for RuleSegmenter {
    fn segment_spans(&self, text: &str) -> Result<Vec<RawSpan>> {
        Ok(split_spans(text))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn split_spans(text: &str) -> Vec<RawSpan> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans: Vec<RawSpan> = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let ch = chars[i];

        if matches!(ch, '.' | '!' | '?') {
            // Consume the whole terminator run ("...", "?!") and any closers.
            let mut end = i + 1;
            while end < chars.len() && matches!(chars[end], '.' | '!' | '?') {
                end += 1;
            }
            while end < chars.len()
                && matches!(chars[end], '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
            {
                end += 1;
            }

            let at_end = end >= chars.len();
            let followed_by_ws = !at_end && chars[end].is_whitespace();
            let period_guard = ch == '.'
                && (is_abbreviation_before(&chars, i) || next_word_is_lowercase(&chars, end));

            if (at_end || followed_by_ws) && !period_guard {
                push_span(&mut spans, &chars, start, end);
                i = end;
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                start = i;
                continue;
            }

            i = end;
            continue;
        }

        // Blank line: force a boundary even without a terminator.
        if ch == '\n' && i + 1 < chars.len() && chars[i + 1] == '\n' {
            push_span(&mut spans, &chars, start, i);
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            start = i;
            continue;
        }

        i += 1;
    }

    push_span(&mut spans, &chars, start, chars.len());
    spans
}

/// Emit the span `[start, end)` unless it is empty after trimming.
fn push_span(spans: &mut Vec<RawSpan>, chars: &[char], start: usize, end: usize) {
    if start >= end {
        return;
    }
    let text: String = chars[start..end].iter().collect();
    if text.trim().is_empty() {
        return;
    }
    spans.push(RawSpan {
        text,
        start_char: start,
        end_char: end,
    });
}

/// Is the word immediately before the period at `period_idx` an
/// abbreviation or a single-letter initial?
fn is_abbreviation_before(chars: &[char], period_idx: usize) -> bool {
    let mut word_start = period_idx;
    while word_start > 0 && chars[word_start - 1].is_alphabetic() {
        word_start -= 1;
    }
    if word_start == period_idx {
        return false;
    }
    let word: String = chars[word_start..period_idx]
        .iter()
        .collect::<String>()
        .to_lowercase();
    if period_idx - word_start == 1 {
        // Single-letter initial, e.g. "John Q. Public".
        return true;
    }
    ABBREVIATIONS.contains(&word.as_str())
}

/// Does the next non-whitespace character after `idx` start a lowercase
/// word?
fn next_word_is_lowercase(chars: &[char], idx: usize) -> bool {
    let mut j = idx;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    j < chars.len() && chars[j].is_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
