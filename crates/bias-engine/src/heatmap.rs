//! Word-level heatmap

use std::collections::BTreeSet;

use shared_types::{Issue, SeverityLabel, WordCell};

/// One cell per whitespace-separated token, in order. A token is biased when
/// an issue starts inside its byte span.
pub fn build_heatmap(text: &str, issues: &[Issue]) -> Vec<WordCell> {
    let mut cells = Vec::new();
    let mut cursor = 0;

    for token in text.split_whitespace() {
        let start = cursor + text[cursor..].find(token).unwrap_or(0);
        let end = start + token.len();
        cursor = end;

        let hits: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.position >= start && i.position < end)
            .collect();

        let Some(severity) = hits.iter().map(|i| i.severity).max() else {
            cells.push(WordCell::unbiased(token));
            continue;
        };

        cells.push(WordCell {
            word: token.to_string(),
            biased: true,
            severity: SeverityLabel::from(severity),
            bias_types: hits.iter().map(|i| i.bias_type).collect::<BTreeSet<_>>(),
        });
    }

    cells
}
