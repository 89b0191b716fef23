//! Turns raw detector hits into a [`ScanResult`]

use std::collections::BTreeSet;

use shared_types::{BiasType, DetectionMethod, Issue, ScanResult, Severity, SeverityLabel};

use crate::config::IntersectionalPolicy;
use crate::heatmap::build_heatmap;

/// Marker word for the aggregated intersectional issue
pub const INTERSECTIONAL_WORD: &str = "(multiple biases detected)";

/// Byte spans of sentences. A span ends just past its `.`, `!`, `?` or
/// newline, so every byte belongs to exactly one span.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            spans.push((start, i + 1));
            start = i + 1;
        }
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

fn distinct_types<'a>(issues: impl Iterator<Item = &'a Issue>) -> BTreeSet<BiasType> {
    issues
        .map(|i| i.bias_type)
        .filter(|t| *t != BiasType::Intersectional)
        .collect()
}

fn intersectional_issue(types: &BTreeSet<BiasType>, position: usize) -> Issue {
    let mut names: Vec<&str> = types.iter().map(BiasType::as_str).collect();
    names.sort_unstable();

    Issue {
        word: INTERSECTIONAL_WORD.to_string(),
        bias_type: BiasType::Intersectional,
        severity: Severity::High,
        explanation: format!(
            "Intersectional bias detected: {}. Multiple bias types compound discrimination.",
            names.join(" + ")
        ),
        position,
    }
}

/// At most one intersectional issue for co-occurring bias types
pub fn detect_intersectional(
    text: &str,
    issues: &[Issue],
    policy: IntersectionalPolicy,
) -> Option<Issue> {
    match policy {
        IntersectionalPolicy::Global => {
            let types = distinct_types(issues.iter());
            (types.len() >= 2).then(|| intersectional_issue(&types, 0))
        }
        IntersectionalPolicy::SentenceScoped => {
            sentence_spans(text).into_iter().find_map(|(start, end)| {
                let types = distinct_types(
                    issues
                        .iter()
                        .filter(|i| i.position >= start && i.position < end),
                );
                if types.len() < 2 {
                    return None;
                }
                let sentence = &text[start..end];
                let lead = sentence.len() - sentence.trim_start().len();
                Some(intersectional_issue(&types, start + lead))
            })
        }
    }
}

/// Sum of severity weights, capped at 100
pub fn score(issues: &[Issue]) -> u32 {
    issues
        .iter()
        .map(|i| i.severity.weight())
        .sum::<u32>()
        .min(100)
}

/// Add the intersectional issue, score, label and heatmap
pub fn aggregate(
    text: &str,
    mut issues: Vec<Issue>,
    method: DetectionMethod,
    policy: IntersectionalPolicy,
) -> ScanResult {
    if let Some(issue) = detect_intersectional(text, &issues, policy) {
        issues.push(issue);
    }

    let score = score(&issues);
    let heatmap = build_heatmap(text, &issues);

    ScanResult {
        score,
        severity: SeverityLabel::from_score(score),
        issue_count: issues.len(),
        issues,
        heatmap,
        detection_method: method,
    }
}

/// Result for text that skipped detection: nothing flagged, every token clean
pub fn exempt_result(text: &str) -> ScanResult {
    ScanResult {
        score: 0,
        severity: SeverityLabel::None,
        issues: Vec::new(),
        issue_count: 0,
        heatmap: build_heatmap(text, &[]),
        detection_method: DetectionMethod::EeoWhitelisted,
    }
}
