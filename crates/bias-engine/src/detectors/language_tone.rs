//! Profanity, slurs, hate speech and unprofessional tone

use std::collections::HashSet;

use shared_types::{BiasType, Issue};

use super::{censored, profanity, ScanContext, StructuralPatterns};
use crate::lexicon::PhraseGroup;
use crate::matcher::find_all;

/// Lexicon groups first, in order, then censored spellings, then the
/// dictionary profanity check. A position claimed by an earlier match is
/// never reported twice.
pub fn detect_language_tone(
    ctx: &ScanContext<'_>,
    groups: &[PhraseGroup],
    patterns: &StructuralPatterns,
) -> Vec<Issue> {
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut issues = Vec::new();

    for group in groups.iter().filter(|g| g.is_active(ctx.profile)) {
        for phrase in &group.phrases {
            for position in find_all(&ctx.text_lower, phrase, group.mode) {
                if claimed.contains(&position) {
                    continue;
                }
                if let Some(issue) = ctx.issue_at(BiasType::LanguageTone, group, position, phrase.len()) {
                    claimed.insert(position);
                    issues.push(issue);
                }
            }
        }
    }

    issues.extend(censored::detect_censored(
        patterns.censored(),
        groups,
        &ctx.text_lower,
        &mut claimed,
    ));
    issues.extend(profanity::detect_profane_tokens(
        ctx.text,
        &ctx.text_lower,
        &mut claimed,
    ));
    issues.sort_by_key(|i| i.position);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::DEFAULT_LEXICON;
    use shared_types::Severity;

    fn scan(text: &str) -> Vec<Issue> {
        let config = EngineConfig::default();
        let ctx = ScanContext::new(text, &config);
        detect_language_tone(
            &ctx,
            DEFAULT_LEXICON.groups(BiasType::LanguageTone),
            &StructuralPatterns::default_patterns(),
        )
    }

    #[test]
    fn test_plain_and_censored_profanity_match() {
        let plain = scan("fuck this");
        let censored = scan("f**k this");

        assert_eq!(plain.len(), 1);
        assert_eq!(censored.len(), 1);
        assert_eq!(plain[0].severity, Severity::Medium);
        assert_eq!(censored[0].severity, plain[0].severity);
        assert_eq!(censored[0].bias_type, BiasType::LanguageTone);
        assert_eq!(censored[0].word, "f**k");
    }

    #[test]
    fn test_severity_tiers() {
        let issues = scan("What a bitch. This sucks.");
        let by_word: Vec<(&str, Severity)> =
            issues.iter().map(|i| (i.word.as_str(), i.severity)).collect();
        assert_eq!(by_word, vec![("bitch", Severity::High), ("sucks", Severity::Low)]);
        assert!(issues[0].explanation.starts_with("Contains prohibited slur"));
    }

    #[test]
    fn test_shared_position_is_reported_once() {
        let groups = vec![
            PhraseGroup::new("slurs", Severity::High, "slur '{word}'", &["jerk"]),
            PhraseGroup::new("unprofessional", Severity::Low, "tone '{word}'", &["jerk face"]),
        ];
        let config = EngineConfig::default();
        let ctx = ScanContext::new("jerk face", &config);

        let issues = detect_language_tone(&ctx, &groups, &StructuralPatterns::default_patterns());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].word, "jerk");
    }

    #[test]
    fn test_hate_speech_phrase_and_inner_profanity() {
        let issues = scan("Go to hell");
        let words: Vec<&str> = issues.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, vec!["Go to hell", "hell"]);
    }

    #[test]
    fn test_masked_slur_matches_plain_severity() {
        let plain = scan("what a bitch");
        for masked in ["what a b*tch", "what a b-tch", "what a b**ch"] {
            let issues = scan(masked);
            assert_eq!(issues.len(), 1, "{masked}");
            assert_eq!(issues[0].severity, plain[0].severity);
            assert_eq!(issues[0].position, 7);
        }
        assert_eq!(plain[0].severity, Severity::High);
    }

    #[test]
    fn test_clean_text_has_no_tone_issues() {
        assert!(scan("Hello world, the shell script passed.").is_empty());
    }
}
