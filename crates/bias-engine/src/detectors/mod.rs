//! Category detectors
//!
//! Every lexicon category runs through [`detect_category`]. Language tone
//! adds position deduplication, censored spellings and a dictionary
//! profanity check. Stereotype patterns are regex based and live outside
//! the lexicon.

pub mod censored;
pub mod language_tone;
pub mod profanity;
pub mod stereotype;

use std::collections::BTreeSet;

use shared_types::{BiasType, Issue};
use tracing::debug;

use crate::config::{EngineConfig, PolicyProfile};
use crate::lexicon::{Lexicon, PhraseGroup};
use crate::matcher::find_all;

pub use stereotype::StructuralPatterns;

/// Per-scan view of the input shared by all detectors
#[derive(Debug, Clone)]
pub struct ScanContext<'a> {
    pub text: &'a str,
    /// ASCII-lowercased copy; byte offsets match `text`
    pub text_lower: String,
    pub profile: PolicyProfile,
    pub context_window: usize,
}

impl<'a> ScanContext<'a> {
    pub fn new(text: &'a str, config: &EngineConfig) -> Self {
        Self {
            text,
            text_lower: text.to_ascii_lowercase(),
            profile: config.profile,
            context_window: config.context_window,
        }
    }

    /// Issue for `group`'s phrase at `position`, unless a context rule vetoes it
    fn issue_at(
        &self,
        category: BiasType,
        group: &PhraseGroup,
        position: usize,
        len: usize,
    ) -> Option<Issue> {
        let end = position + len;

        if self.profile == PolicyProfile::ContextAware {
            if let Some(rule) = &group.context {
                if !rule.allows(self.text, position, end, self.context_window) {
                    debug!(
                        category = %category,
                        subcategory = %group.subcategory,
                        position,
                        "Match suppressed by context"
                    );
                    return None;
                }
            }
        }

        let word = &self.text[position..end];
        Some(Issue {
            word: word.to_string(),
            bias_type: category,
            severity: group.severity,
            explanation: group.explain(word),
            position,
        })
    }
}

/// Which detectors a scan runs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetectorSelection {
    #[default]
    All,
    Set(BTreeSet<BiasType>),
}

impl DetectorSelection {
    /// Parse user-supplied bias type names. Unknown names are ignored; if
    /// none is recognised every detector runs.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for name in names {
            match name.as_ref().parse::<BiasType>() {
                Ok(BiasType::Intersectional) => {
                    debug!("Intersectional is not a selectable detector, ignoring");
                }
                Ok(bias_type) => {
                    selected.insert(bias_type);
                }
                Err(e) => debug!(error = %e, "Ignoring unrecognised bias type"),
            }
        }

        if selected.is_empty() {
            DetectorSelection::All
        } else {
            DetectorSelection::Set(selected)
        }
    }

    pub fn includes(&self, bias_type: BiasType) -> bool {
        match self {
            DetectorSelection::All => true,
            DetectorSelection::Set(set) => set.contains(&bias_type),
        }
    }

    /// Whether the stereotype pattern detector runs
    pub fn includes_patterns(&self) -> bool {
        self.includes(BiasType::PatternStereotype)
    }
}

/// Run one lexicon category: one issue per un-suppressed occurrence of every
/// active phrase.
pub fn detect_category(ctx: &ScanContext<'_>, category: BiasType, groups: &[PhraseGroup]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for group in groups.iter().filter(|g| g.is_active(ctx.profile)) {
        for phrase in &group.phrases {
            for position in find_all(&ctx.text_lower, phrase, group.mode) {
                if let Some(issue) = ctx.issue_at(category, group, position, phrase.len()) {
                    issues.push(issue);
                }
            }
        }
    }

    issues.sort_by_key(|i| i.position);
    issues
}

/// Run every selected detector, category by category
pub fn run_detectors(
    ctx: &ScanContext<'_>,
    lexicon: &Lexicon,
    patterns: &StructuralPatterns,
    selection: &DetectorSelection,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for category in BiasType::DETECTABLE {
        if !selection.includes(category) {
            continue;
        }

        match category {
            BiasType::PatternStereotype => {
                issues.extend(patterns.detect(&ctx.text_lower));
            }
            BiasType::LanguageTone => {
                issues.extend(language_tone::detect_language_tone(
                    ctx,
                    lexicon.groups(category),
                    patterns,
                ));
            }
            _ => issues.extend(detect_category(ctx, category, lexicon.groups(category))),
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextRule;
    use shared_types::Severity;

    fn synthetic_lexicon() -> Lexicon {
        Lexicon::new()
            .with_group(
                BiasType::Age,
                PhraseGroup::new(
                    "test_group",
                    Severity::Low,
                    "'{word}' is on the {subcategory} list",
                    &["widget", "blue sky"],
                ),
            )
            .with_group(
                BiasType::Age,
                PhraseGroup::new("gated", Severity::High, "{word}", &["gizmo"])
                    .with_context(ContextRule::suppress_near(&["harmless"])),
            )
            .with_group(
                BiasType::Age,
                PhraseGroup::new("strict_tier", Severity::Medium, "{word}", &["thing"])
                    .strict_only(),
            )
    }

    #[test]
    fn test_synthetic_lexicon_drives_detector() {
        let lexicon = synthetic_lexicon();
        let config = EngineConfig::default();
        let ctx = ScanContext::new("A Widget under a blue sky, another widget.", &config);

        let issues = detect_category(&ctx, BiasType::Age, lexicon.groups(BiasType::Age));
        let found: Vec<(&str, usize)> = issues.iter().map(|i| (i.word.as_str(), i.position)).collect();
        assert_eq!(found, vec![("Widget", 2), ("blue sky", 17), ("widget", 35)]);
        assert_eq!(issues[0].explanation, "'Widget' is on the test group list");
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_context_rule_only_applies_in_context_aware_profile() {
        let lexicon = synthetic_lexicon();
        let text = "A harmless gizmo and a thing.";

        let aware = EngineConfig::default();
        let ctx = ScanContext::new(text, &aware);
        assert!(detect_category(&ctx, BiasType::Age, lexicon.groups(BiasType::Age)).is_empty());

        let strict = EngineConfig::default().with_profile(PolicyProfile::Strict);
        let ctx = ScanContext::new(text, &strict);
        let words: Vec<String> = detect_category(&ctx, BiasType::Age, lexicon.groups(BiasType::Age))
            .into_iter()
            .map(|i| i.word)
            .collect();
        assert_eq!(words, vec!["gizmo", "thing"]);
    }

    #[test]
    fn test_selection_from_names() {
        let selection = DetectorSelection::from_names(["Gender", "LGBTQ+", "bogus"]);
        assert!(selection.includes(BiasType::Gender));
        assert!(selection.includes(BiasType::Lgbtq));
        assert!(!selection.includes(BiasType::Race));
        assert!(!selection.includes_patterns());

        assert_eq!(
            DetectorSelection::from_names(["nonsense", "intersectional"]),
            DetectorSelection::All
        );
        assert_eq!(DetectorSelection::from_names(Vec::<String>::new()), DetectorSelection::All);
    }

    #[test]
    fn test_run_detectors_respects_selection() {
        let config = EngineConfig::default();
        let ctx = ScanContext::new("The chairman called him a thug.", &config);
        let patterns = StructuralPatterns::default_patterns();

        let all = run_detectors(&ctx, &crate::DEFAULT_LEXICON, &patterns, &DetectorSelection::All);
        assert!(all.iter().any(|i| i.bias_type == BiasType::Gender));
        assert!(all.iter().any(|i| i.bias_type == BiasType::Race));

        let race_only = DetectorSelection::from_names(["race"]);
        let issues = run_detectors(&ctx, &crate::DEFAULT_LEXICON, &patterns, &race_only);
        assert!(issues.iter().all(|i| i.bias_type == BiasType::Race));
        assert!(!issues.is_empty());
    }
}
