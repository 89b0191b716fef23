//! Equal-opportunity boilerplate gate
//!
//! Statements like "without regard to race, religion or sex" name protected
//! classes on purpose. Texts containing them are exempt from scanning.

/// Fixed equal-opportunity phrases, lowercase. Only full boilerplate
/// phrases: fragments like "equal opportunity" or "without regard to" occur
/// in ordinary prose.
pub const EEO_PHRASES: &[&str] = &[
    "equal opportunity employer",
    "equal employment opportunity",
    "we do not discriminate",
    "does not discriminate",
    "without regard to race",
    "without regard to sex",
    "without regard to age",
    "without regard to religion",
    "protected veteran status",
    "affirmative action employer",
    "all qualified applicants will receive consideration",
    "regardless of race",
];

/// True if the text contains any equal-opportunity phrase, anywhere
pub fn is_exempt(text: &str) -> bool {
    matched_phrase(text).is_some()
}

/// The first equal-opportunity phrase found in `text`, for logging
pub fn matched_phrase(text: &str) -> Option<&'static str> {
    let text_lower = text.to_ascii_lowercase();
    EEO_PHRASES
        .iter()
        .copied()
        .find(|phrase| text_lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_statements() {
        assert!(is_exempt(
            "Acme is an Equal Opportunity Employer. All qualified applicants will receive \
             consideration without regard to race, religion, sex or age."
        ));
        assert!(is_exempt("We do not discriminate on the basis of gender."));
        assert!(is_exempt("Hiring decisions are made regardless of race or creed."));
    }

    #[test]
    fn test_gate_is_substring_based() {
        // Anywhere in the text, including mid-word punctuation
        assert!(is_exempt("...(EQUAL OPPORTUNITY EMPLOYER)..."));
        assert_eq!(
            matched_phrase("A proud equal opportunity employer"),
            Some("equal opportunity employer")
        );
    }

    #[test]
    fn test_ordinary_text_is_not_exempt() {
        assert!(!is_exempt("We're looking for a young, energetic guy."));
        assert!(!is_exempt("Opportunity knocks for equal partners."));
        assert!(!is_exempt("The chairman called him a thug, without regard to the facts."));
        assert!(!is_exempt("Every citizen deserves equal opportunity in court."));
        assert!(!is_exempt(""));
    }
}
