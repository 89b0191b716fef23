//! Masked profanity such as "f**k", "sh*t" or "b-tch"

use std::collections::HashSet;

use regex::Regex;
use shared_types::{BiasType, Issue, Severity};

use crate::lexicon::PhraseGroup;

/// Masks are runs of '*', '-' or '_', paired with the plain word they hide.
/// Order matters: the longer "f**king" form claims its position before the
/// bare "f**" form.
const CENSORED_ROOTS: &[(&str, &str)] = &[
    (r"\bf[*\-_]{2,}k(?:ing)?", "fuck"),
    (r"\bf[*\-_]{2,}(?:ing)?", "fuck"),
    (r"\bsh[*\-_]+t", "shit"),
    (r"\bd[*\-_]+n", "damn"),
    (r"\bass[*\-_]+", "ass"),
    (r"\bb[*\-_]+t?ch", "bitch"),
    (r"\bc[*\-_]+t", "cunt"),
    (r"\bh[*\-_]+l", "hell"),
    (r"\bd[*\-_]+k", "dick"),
];

/// One masked spelling and the root word it stands for
#[derive(Debug, Clone)]
pub struct CensoredPattern {
    regex: Regex,
    root: &'static str,
}

impl CensoredPattern {
    pub fn root(&self) -> &'static str {
        self.root
    }
}

pub(crate) fn compile_censored() -> Result<Vec<CensoredPattern>, regex::Error> {
    CENSORED_ROOTS
        .iter()
        .map(|&(re, root)| {
            Ok(CensoredPattern {
                regex: Regex::new(re)?,
                root,
            })
        })
        .collect()
}

/// Severity and label of the plain root, taken from the tone groups.
/// Roots missing from the lexicon count as medium profanity.
fn root_tier(groups: &[PhraseGroup], root: &str) -> (Severity, &'static str) {
    groups
        .iter()
        .find(|g| g.phrases.iter().any(|p| p == root))
        .map(|g| {
            let label = if g.subcategory == "slurs" { "slur" } else { "profanity" };
            (g.severity, label)
        })
        .unwrap_or((Severity::Medium, "profanity"))
}

/// Scan lowercased text for censored spellings, skipping and then claiming
/// positions in `claimed`.
pub fn detect_censored(
    patterns: &[CensoredPattern],
    groups: &[PhraseGroup],
    text_lower: &str,
    claimed: &mut HashSet<usize>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for censored in patterns {
        let (severity, label) = root_tier(groups, censored.root);
        for m in censored.regex.find_iter(text_lower) {
            if !claimed.insert(m.start()) {
                continue;
            }
            issues.push(Issue {
                word: m.as_str().to_string(),
                bias_type: BiasType::LanguageTone,
                severity,
                explanation: format!("Contains censored {}: '{}'", label, m.as_str()),
                position: m.start(),
            });
        }
    }

    issues
}
