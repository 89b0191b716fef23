//! Dictionary profanity check over whitespace tokens
//!
//! Runs after the tone lexicon and the censored patterns and catches what
//! fixed word lists miss: repeated letters, leetspeak and spaced-out
//! spellings, via `rustrict`.

use std::collections::HashSet;

use rustrict::{CensorStr, Type};
use shared_types::{BiasType, Issue, Severity};

use crate::matcher::is_word_char;

fn is_profane(word: &str) -> bool {
    word.is(Type::PROFANE & Type::MODERATE_OR_HIGHER)
}

/// Check each token, then its punctuation-stripped form, skipping and then
/// claiming positions in `claimed`.
pub fn detect_profane_tokens(
    text: &str,
    text_lower: &str,
    claimed: &mut HashSet<usize>,
) -> Vec<Issue> {
    detect_tokens_with(text, text_lower, claimed, is_profane)
}

fn detect_tokens_with<F>(
    text: &str,
    text_lower: &str,
    claimed: &mut HashSet<usize>,
    profane: F,
) -> Vec<Issue>
where
    F: Fn(&str) -> bool,
{
    let mut issues = Vec::new();
    let mut cursor = 0;

    for token in text_lower.split_whitespace() {
        let Some(offset) = text_lower[cursor..].find(token) else {
            continue;
        };
        let start = cursor + offset;
        cursor = start + token.len();

        let (position, word) = if profane(token) {
            (start, text[start..cursor].to_string())
        } else {
            let clean: String = token.chars().filter(|c| is_word_char(*c)).collect();
            if clean.is_empty() || !profane(&clean) {
                continue;
            }
            // Contiguous inside the token ("damn!") or scattered ("d.a.m.n")
            match token.find(clean.as_str()) {
                Some(inner) => {
                    let position = start + inner;
                    (position, text[position..position + clean.len()].to_string())
                }
                None => (start, clean),
            }
        };

        if !claimed.insert(position) {
            continue;
        }
        issues.push(Issue {
            explanation: format!("Contains profanity: '{}'", word),
            word,
            bias_type: BiasType::LanguageTone,
            severity: Severity::Medium,
            position,
        });
    }

    issues
}
