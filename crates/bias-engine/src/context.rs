//! Context windows and the rules that confirm or suppress a candidate match

use serde::{Deserialize, Serialize};

use crate::matcher::{find_all, is_bounded, is_word_char, MatchMode};

/// Compensation and technical vocabulary. Personality adjectives such as
/// "competitive" or "aggressive" describe a pay package or a plan, not a
/// person, when these appear nearby.
pub const COMPENSATION_TERMS: &[&str] = &[
    "salary",
    "salaries",
    "compensation",
    "pay",
    "wage",
    "wages",
    "benefits",
    "package",
    "packages",
    "bonus",
    "bonuses",
    "equity",
    "pricing",
    "price",
    "rates",
    "pension",
    "401k",
    "engineering",
    "technical",
    "technology",
    "software",
    "algorithm",
    "strategy",
    "timeline",
    "schedule",
    "investment",
    "portfolio",
    "market",
];

/// Hiring vocabulary required before a youth-coded term is flagged
pub const HIRING_TERMS: &[&str] = &[
    "candidate",
    "candidates",
    "applicant",
    "applicants",
    "looking for",
    "seeking",
    "hiring",
    "hire",
    "hired",
    "recruit",
    "join our",
    "join us",
    "ideal",
    "must be",
    "we want",
    "we need",
    "job",
    "jobs",
    "position",
    "vacancy",
    "employee",
    "employees",
];

/// Neutral uses of youth-coded terms; these win over hiring context
pub const YOUTH_NEUTRAL_TERMS: &[&str] = &[
    "startup",
    "startups",
    "start-up",
    "company",
    "companies",
    "business",
    "businesses",
    "brand",
    "industry",
    "organization",
    "organisation",
    "kids",
    "children",
    "child",
    "infant",
    "toddler",
    "students",
    "audience",
    "readers",
    "plants",
    "trees",
    "wine",
    "universe",
];

/// Nouns that turn "developing" into a statement about places
pub const GEOGRAPHIC_NOUNS: &[&str] = &[
    "countries",
    "country",
    "nations",
    "nation",
    "regions",
    "region",
    "world",
    "markets",
    "economies",
    "areas",
];

/// Context rule attached to a lexicon group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ContextRule {
    /// Drop the match if any term appears in the window
    SuppressNear { terms: Vec<String> },
    /// Keep the match only if a required term appears in the window and no
    /// neutral term does. Neutral terms take precedence.
    RequireNear {
        required: Vec<String>,
        neutral: Vec<String>,
    },
    /// Keep the match only if the next word is one of `nouns`
    RequireFollowedBy { nouns: Vec<String> },
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_ascii_lowercase()).collect()
}

impl ContextRule {
    pub fn suppress_near(terms: &[&str]) -> Self {
        ContextRule::SuppressNear {
            terms: owned(terms),
        }
    }

    pub fn require_near(required: &[&str], neutral: &[&str]) -> Self {
        ContextRule::RequireNear {
            required: owned(required),
            neutral: owned(neutral),
        }
    }

    pub fn require_followed_by(nouns: &[&str]) -> Self {
        ContextRule::RequireFollowedBy {
            nouns: owned(nouns),
        }
    }

    /// Decide whether the match `text[start..end]` should be reported
    pub fn allows(&self, text: &str, start: usize, end: usize, radius: usize) -> bool {
        match self {
            ContextRule::SuppressNear { terms } => !is_suppressed(text, start, radius, terms),
            ContextRule::RequireNear { required, neutral } => {
                !is_suppressed(text, start, radius, neutral)
                    && requires_context(text, start, radius, required)
            }
            ContextRule::RequireFollowedBy { nouns } => followed_by(text, end, nouns),
        }
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn window_bounds(text: &str, position: usize, radius: usize) -> (usize, usize) {
    let start = floor_char_boundary(text, position.saturating_sub(radius));
    let end = ceil_char_boundary(text, position.saturating_add(radius));
    (start, end)
}

/// Lowercased slice of `radius` bytes on each side of `position`, clamped to
/// the text and to char boundaries.
pub fn context_window(text: &str, position: usize, radius: usize) -> String {
    let (start, end) = window_bounds(text, position, radius);
    text[start..end].to_ascii_lowercase()
}

/// True if any of `terms` occurs as a whole word inside the window around
/// `position`. A word cut by the window edge only counts if it is whole in
/// the full text.
pub fn is_suppressed<S: AsRef<str>>(text: &str, position: usize, radius: usize, terms: &[S]) -> bool {
    let (start, end) = window_bounds(text, position, radius);
    let window = text[start..end].to_ascii_lowercase();

    terms.iter().any(|term| {
        let term = term.as_ref();
        find_all(&window, term, MatchMode::WordBoundary)
            .into_iter()
            .any(|offset| is_bounded(text, start + offset, start + offset + term.len()))
    })
}

/// True if at least one of `required` occurs inside the window
pub fn requires_context<S: AsRef<str>>(
    text: &str,
    position: usize,
    radius: usize,
    required: &[S],
) -> bool {
    is_suppressed(text, position, radius, required)
}

/// One-word lookahead: is the word following byte offset `end` in `nouns`?
pub fn followed_by<S: AsRef<str>>(text: &str, end: usize, nouns: &[S]) -> bool {
    let end = ceil_char_boundary(text, end);
    let next_word: String = text[end..]
        .trim_start()
        .chars()
        .take_while(|c| is_word_char(*c))
        .collect::<String>()
        .to_ascii_lowercase();

    !next_word.is_empty() && nouns.iter().any(|n| n.as_ref() == next_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_clamps_to_text_bounds() {
        assert_eq!(context_window("Short", 2, 100), "short");
        assert_eq!(context_window("", 0, 10), "");
        assert_eq!(context_window("abc", 50, 10), "");
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        // 'é' is two bytes; a radius landing inside it must not panic
        let text = "résumé review";
        let window = context_window(text, 3, 2);
        assert!(window.starts_with('r') || window.starts_with('é'));
    }

    #[test]
    fn test_compensation_context_suppresses() {
        let text = "Competitive salary and benefits.";
        assert!(is_suppressed(text, 0, 50, COMPENSATION_TERMS));

        let text = "She is too competitive with her coworkers.";
        assert!(!is_suppressed(text, 11, 50, COMPENSATION_TERMS));
    }

    #[test]
    fn test_terms_match_whole_words_only() {
        // "rates" inside "operates", "pay" inside "repay"
        let text = "He is aggressive and operates alone.";
        assert!(!is_suppressed(text, 6, 50, COMPENSATION_TERMS));
        assert!(!is_suppressed("Aggressive about the repayment.", 0, 50, COMPENSATION_TERMS));
        assert!(is_suppressed("Aggressive pay rates.", 0, 50, COMPENSATION_TERMS));

        // "child" inside "childcare" is not a neutral youth term
        let rule = ContextRule::require_near(HIRING_TERMS, YOUTH_NEUTRAL_TERMS);
        let text = "Hiring a young nanny for childcare.";
        let pos = text.find("young").unwrap();
        assert!(rule.allows(text, pos, pos + 5, 50));
    }

    #[test]
    fn test_word_cut_by_window_edge_does_not_count() {
        // The window starts inside "generates"; its tail "rates" is not a term
        let text = "It generates aggressive";
        let pos = text.find("aggressive").unwrap();
        assert_eq!(context_window(text, pos, 6), "rates aggres");
        assert!(!is_suppressed(text, pos, 6, COMPENSATION_TERMS));
    }

    #[test]
    fn test_hiring_rule_neutral_takes_precedence() {
        let rule = ContextRule::require_near(HIRING_TERMS, YOUTH_NEUTRAL_TERMS);

        let hiring = "We're looking for a young, energetic guy.";
        let pos = hiring.find("young").unwrap();
        assert!(rule.allows(hiring, pos, pos + 5, 50));

        let both = "We're looking for a young startup founder.";
        let pos = both.find("young").unwrap();
        assert!(!rule.allows(both, pos, pos + 5, 50));

        let neither = "The young river cut a new channel.";
        let pos = neither.find("young").unwrap();
        assert!(!rule.allows(neither, pos, pos + 5, 50));
    }

    #[test]
    fn test_followed_by_is_directional() {
        let rule = ContextRule::require_followed_by(GEOGRAPHIC_NOUNS);

        let text = "Many developing countries struggle.";
        let pos = text.find("developing").unwrap();
        assert!(rule.allows(text, pos, pos + "developing".len(), 50));

        let text = "Countries are developing a new model.";
        let pos = text.find("developing").unwrap();
        assert!(!rule.allows(text, pos, pos + "developing".len(), 50));

        let text = "Still developing";
        let pos = text.find("developing").unwrap();
        assert!(!followed_by(text, pos + "developing".len(), GEOGRAPHIC_NOUNS));
    }

    #[test]
    fn test_followed_by_checks_whole_word() {
        assert!(!followed_by("developing worldviews", 10, GEOGRAPHIC_NOUNS));
        assert!(followed_by("developing World!", 10, GEOGRAPHIC_NOUNS));
    }
}
