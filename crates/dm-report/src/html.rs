//! Downloadable HTML rendering of a [`Report`].
//!
//! Pure string assembly, no templating dependency. Mismatched pairs get an
//! inline word-level diff; all user-supplied text is escaped.

use dm_match::diff::{word_diff, WordDiffKind};

use crate::report::{Difference, DifferenceKind, Report};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a report as a standalone HTML page.
pub fn render_html(report: &Report, file1_name: &str, file2_name: &str) -> String {
    let summary = &report.summary;
    let verdict = &report.verdict;

    let mut html = String::with_capacity(8 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>Document Comparison Report</title>\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 40px; }\n\
         .header { background: #f0f0f0; padding: 20px; border-radius: 8px; }\n\
         .verdict { color: white; padding: 15px; border-radius: 8px; margin: 20px 0; }\n\
         .stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; }\n\
         .stat { background: #f9f9f9; padding: 15px; border-radius: 8px; }\n\
         .difference { border-left: 4px solid #ddd; padding: 15px; margin: 15px 0; \
         background: #f9f9f9; }\n\
         .severity-high { border-left-color: #ff4444; }\n\
         .severity-medium { border-left-color: #ffaa00; }\n\
         .severity-low { border-left-color: #44ff44; }\n\
         del { background: #ffecec; text-decoration: line-through; }\n\
         ins { background: #eaffea; text-decoration: none; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<div class=\"header\">\n<h1>Document Comparison Report</h1>\n");
    html.push_str(&format!(
        "<p><strong>Document 1:</strong> {}</p>\n<p><strong>Document 2:</strong> {}</p>\n</div>\n",
        escape_html(file1_name),
        escape_html(file2_name)
    ));

    html.push_str(&format!(
        "<div class=\"verdict\" style=\"background: {};\">\n<h2>{}</h2>\n\
         <p>Overall Match: {}%</p>\n</div>\n",
        escape_html(&verdict.color),
        escape_html(&verdict.message),
        summary.overall_match
    ));

    html.push_str("<h2>Summary Statistics</h2>\n<div class=\"stats\">\n");
    for (value, label) in [
        (summary.total_sentences_doc1, "Sentences in Doc 1"),
        (summary.total_sentences_doc2, "Sentences in Doc 2"),
        (summary.matched_sentences, "Matched Sentences"),
        (summary.exact_matches, "Exact Matches"),
        (summary.minor_differences, "Minor Differences"),
        (summary.significant_differences, "Significant Differences"),
    ] {
        html.push_str(&format!(
            "<div class=\"stat\"><h3>{}</h3><p>{}</p></div>\n",
            value, label
        ));
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<h2>Detailed Differences ({})</h2>\n",
        report.differences.len()
    ));
    for (i, diff) in report.differences.iter().enumerate() {
        html.push_str(&render_difference(i + 1, diff));
    }

    html.push_str("<h2>Recommendations</h2>\n<ul>\n");
    for recommendation in &report.recommendations {
        html.push_str(&format!("<li>{}</li>\n", escape_html(recommendation)));
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    html
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn render_difference(number: usize, diff: &Difference) -> String {
    let mut out = format!(
        "<div class=\"difference severity-{}\">\n<h3>Difference #{} - {}</h3>\n\
         <p><strong>Type:</strong> {}</p>\n",
        diff.severity.as_str(),
        number,
        title_case(diff.classification.as_str()),
        title_case(diff.kind.as_str()),
    );

    out.push_str(&format!(
        "<p><strong>Position:</strong> Doc1: {}, Doc2: {}</p>\n",
        diff.position1
            .map_or_else(|| "N/A".to_string(), |p| p.to_string()),
        diff.position2
            .map_or_else(|| "N/A".to_string(), |p| p.to_string()),
    ));
    out.push_str(&format!(
        "<p><strong>Similarity:</strong> {:.1}%</p>\n",
        diff.similarity * 100.0
    ));

    if let Some(text1) = &diff.text1 {
        out.push_str(&format!(
            "<p><strong>Document 1:</strong> {}</p>\n",
            escape_html(text1)
        ));
    }
    if let Some(text2) = &diff.text2 {
        out.push_str(&format!(
            "<p><strong>Document 2:</strong> {}</p>\n",
            escape_html(text2)
        ));
    }

    // Inline word diff only makes sense when both sides are present.
    if diff.kind == DifferenceKind::Mismatch {
        if let (Some(text1), Some(text2)) = (&diff.text1, &diff.text2) {
            out.push_str(&format!(
                "<p><strong>Changes:</strong> {}</p>\n",
                render_inline_diff(text1, text2)
            ));
        }
    }

    if !diff.suggestions.is_empty() {
        out.push_str("<p><strong>Suggestions:</strong></p>\n<ul>\n");
        for suggestion in &diff.suggestions {
            out.push_str(&format!("<li>{}</li>\n", escape_html(suggestion)));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</div>\n");
    out
}

fn render_inline_diff(text1: &str, text2: &str) -> String {
    word_diff(text1, text2)
        .iter()
        .map(|group| {
            let left = escape_html(&group.left.join(" "));
            let right = escape_html(&group.right.join(" "));
            match group.kind {
                WordDiffKind::Equal => left,
                WordDiffKind::Deleted => format!("<del>{}</del>", left),
                WordDiffKind::Inserted => format!("<ins>{}</ins>", right),
                WordDiffKind::Substituted => {
                    format!("<del>{}</del> <ins>{}</ins>", left, right)
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `missing_in_doc1` -> `Missing In Doc1`.
fn title_case(value: &str) -> String {
    value
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::{CompareConfig, Sentence};
    use dm_match::{MatchResult, SentenceMatch};

    use crate::report::build_report;

    fn small_report() -> Report {
        let text1 = "The borrower shall repay the loan";
        let text2 = "The borrower shall return the loan";
        let m = SentenceMatch {
            sentence1: Sentence::new(0, text1, 0, text1.len(), false),
            sentence2: Sentence::new(0, text2, 0, text2.len(), false),
            similarity: 0.9,
            index1: 0,
            index2: 0,
            exact_match: false,
            normalized_match: false,
        };
        let s1 = vec![m.sentence1.clone()];
        let s2 = vec![m.sentence2.clone()];
        let result = MatchResult {
            matches: vec![m],
            only_in_doc1: vec![],
            only_in_doc2: vec![],
            match_score: 1.0,
        };
        build_report(
            &result,
            &s1,
            &s2,
            dm_segment::profile_document("a", &s1),
            dm_segment::profile_document("b", &s2),
            &CompareConfig::default(),
            3,
        )
    }

    #[test]
    fn renders_verdict_and_file_names() {
        let html = render_html(&small_report(), "base.pdf", "scan.pdf");
        assert!(html.contains("base.pdf"));
        assert!(html.contains("scan.pdf"));
        assert!(html.contains("Documents are virtually identical"));
        assert!(html.contains("Overall Match: 100%"));
    }

    #[test]
    fn mismatch_renders_severity_class_and_inline_diff() {
        let html = render_html(&small_report(), "a", "b");
        assert!(html.contains("severity-medium"));
        assert!(html.contains("<del>repay</del> <ins>return</ins>"));
    }

    #[test]
    fn recommendations_are_listed() {
        let report = small_report();
        assert!(!report.recommendations.is_empty());
        let html = render_html(&report, "a", "b");
        for recommendation in &report.recommendations {
            assert!(html.contains(&escape_html(recommendation)));
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_html(&small_report(), "<script>alert(1)</script>", "b");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn title_case_helper() {
        assert_eq!(title_case("missing_in_doc1"), "Missing In Doc1");
        assert_eq!(title_case("mismatch"), "Mismatch");
    }

    #[test]
    fn escape_html_covers_special_chars() {
        assert_eq!(escape_html("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
    }
}
