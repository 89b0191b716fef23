//! Structural stereotype patterns
//!
//! Two shapes that word lists miss:
//! - sweeping generalizations, "all <group> are ..."
//! - essentialist claims, "<group> (are) naturally|inherently|always ..."

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{BiasType, Issue, Severity};

use super::censored::{compile_censored, CensoredPattern};

const GENERALIZATION_PATTERNS: &[&str] = &[
    r"\ball (muslims?|christians?|jews?|hindus?|buddhists?|atheists?)\b",
    r"\ball (asians?|blacks?|whites?|latinos?|hispanics?|arabs?)\b",
    r"\ball (men|women|males?|females?)\b",
    r"\ball (gay|lesbian|transgender|lgbtq)\b",
    r"\ball (poor|rich|wealthy) (people|person)\b",
    r"\ball (young|old|elderly) (people|person)\b",
    r"\ball (disabled|handicapped) (people|person)\b",
];

const ESSENTIALIST_PATTERNS: &[&str] = &[
    r"\b(asians?|blacks?|whites?|latinos?|hispanics?) (are )?(naturally|inherently|always)\b",
    r"\b(men|women|males?|females?) (are )?naturally\b",
    r"\b(poor|rich) (people )?(are )?naturally\b",
];

/// The copula that must follow a generalization for it to count
const VERB_PATTERN: &str = r"^(are|is)\b";

/// How far past a generalization the copula is looked for
const VERB_LOOKAHEAD: usize = 100;

lazy_static! {
    static ref DEFAULT_PATTERNS: StructuralPatterns =
        StructuralPatterns::compile().unwrap();
}

/// Compiled stereotype and censored-spelling regexes
#[derive(Debug, Clone)]
pub struct StructuralPatterns {
    generalizations: Vec<Regex>,
    essentialist: Vec<Regex>,
    verb: Regex,
    censored: Vec<CensoredPattern>,
}

impl StructuralPatterns {
    /// Compile the built-in pattern set
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            generalizations: compile_all(GENERALIZATION_PATTERNS)?,
            essentialist: compile_all(ESSENTIALIST_PATTERNS)?,
            verb: Regex::new(VERB_PATTERN)?,
            censored: compile_censored()?,
        })
    }

    /// Masked profanity patterns, used by the language tone detector
    pub fn censored(&self) -> &[CensoredPattern] {
        &self.censored
    }

    /// Shared, already-compiled copy of the built-in set
    pub fn default_patterns() -> Self {
        DEFAULT_PATTERNS.clone()
    }

    /// Scan lowercased text. Every match is high severity.
    pub fn detect(&self, text_lower: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        for regex in &self.generalizations {
            for m in regex.find_iter(text_lower) {
                if !self.followed_by_verb(text_lower, m.end()) {
                    continue;
                }
                issues.push(Issue {
                    word: m.as_str().to_string(),
                    bias_type: BiasType::PatternStereotype,
                    severity: Severity::High,
                    explanation: format!(
                        "Stereotype pattern detected: '{}' - sweeping generalization about a group",
                        m.as_str()
                    ),
                    position: m.start(),
                });
            }
        }

        for regex in &self.essentialist {
            for m in regex.find_iter(text_lower) {
                issues.push(Issue {
                    word: m.as_str().to_string(),
                    bias_type: BiasType::PatternStereotype,
                    severity: Severity::High,
                    explanation: format!(
                        "Essentialist stereotype detected: '{}' - attributes inherent characteristics to a group",
                        m.as_str()
                    ),
                    position: m.start(),
                });
            }
        }

        issues
    }

    fn followed_by_verb(&self, text_lower: &str, end: usize) -> bool {
        let rest = &text_lower[end..];
        let mut limit = rest.len().min(VERB_LOOKAHEAD);
        while !rest.is_char_boundary(limit) {
            limit -= 1;
        }
        self.verb.is_match(rest[..limit].trim_start())
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}
