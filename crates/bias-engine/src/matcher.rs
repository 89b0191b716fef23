//! Phrase matching against a lowercased view of the scanned text
//!
//! Positions are byte offsets. Callers lowercase with
//! [`str::to_ascii_lowercase`], which never changes byte length, so every
//! offset found here is valid in the original text as well.

use serde::{Deserialize, Serialize};

/// How a phrase is located in text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Phrase must not touch a word character on either outer edge
    #[default]
    WordBoundary,
    /// Phrase may appear anywhere, including inside quotes or other words
    Substring,
}

/// Word characters for boundary purposes: alphanumerics and underscore
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True if `text[start..end]` is not adjacent to a word character
pub(crate) fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

/// All non-overlapping occurrences of `phrase`, left to right.
///
/// `phrase` must already be lowercase. An empty phrase never matches.
pub fn find_all(text_lower: &str, phrase: &str, mode: MatchMode) -> Vec<usize> {
    let mut positions = Vec::new();
    if phrase.is_empty() {
        return positions;
    }

    let mut from = 0;
    while from <= text_lower.len() {
        let Some(offset) = text_lower[from..].find(phrase) else {
            break;
        };
        let start = from + offset;
        let end = start + phrase.len();

        if mode == MatchMode::Substring || is_bounded(text_lower, start, end) {
            positions.push(start);
            from = end;
        } else {
            // Step past the first char of the rejected candidate
            let step = text_lower[start..].chars().next().map_or(1, char::len_utf8);
            from = start + step;
        }
    }

    positions
}

/// First occurrence of `phrase`, if any
pub fn find_first(text_lower: &str, phrase: &str, mode: MatchMode) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(offset) = text_lower[from..].find(phrase) {
        let start = from + offset;
        if mode == MatchMode::Substring || is_bounded(text_lower, start, start + phrase.len()) {
            return Some(start);
        }
        from = start + text_lower[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Convenience: does `phrase` occur at all?
pub fn contains(text_lower: &str, phrase: &str, mode: MatchMode) -> bool {
    find_first(text_lower, phrase, mode).is_some()
}
