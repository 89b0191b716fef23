//! External (AI) validation seam
//!
//! A [`BiasValidator`] returns free-form findings for a text. The engine
//! locates them in the text and merges them with its own issues. Transport
//! lives with the caller; this module only defines the contract, the prompt
//! and the response parsing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{BiasType, Issue, Severity};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Errors from an external validator
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("AI validation is not configured")]
    NotConfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validator returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed validator response: {0}")]
    MalformedResponse(String),

    #[error("Validation timed out after {0} ms")]
    Timeout(u64),
}

/// One finding as reported by a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFinding {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub bias_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
struct FindingsEnvelope {
    #[serde(default)]
    biases: Vec<ExternalFinding>,
}

/// Source of additional findings for a text
#[async_trait]
pub trait BiasValidator: Send + Sync {
    async fn validate(&self, text: &str) -> Result<Vec<ExternalFinding>, ValidationError>;
}

/// Prompt asking a chat model for `{"biases": [...]}` JSON
pub fn validation_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following text for bias across these dimensions:
1. Gender bias
2. Racial/ethnic bias
3. Age bias
4. Disability bias (ableism)
5. Cultural bias
6. Political bias
7. Religious bias
8. LGBTQ+ bias
9. Socioeconomic bias
10. Truth-seeking (misinformation, unsubstantiated claims)
11. Ideological neutrality
12. Language & tone (hate speech, profanity)

Text to analyze:
"{text}"

Return ONLY biased phrases/words found. For each bias found, respond in JSON format:
{{
  "biases": [
    {{
      "word": "exact phrase",
      "bias_type": "gender|race|age|disability|culture|political|religion|lgbtq|socioeconomic|truth_seeking|ideological_neutrality|language_tone",
      "severity": "low|medium|high",
      "explanation": "brief explanation"
    }}
  ]
}}

If no bias detected, return {{"biases": []}}"#
    )
}

/// Parse a validator's JSON reply
pub fn parse_findings(raw: &str) -> Result<Vec<ExternalFinding>, ValidationError> {
    let envelope: FindingsEnvelope = serde_json::from_str(raw.trim())
        .map_err(|e| ValidationError::MalformedResponse(e.to_string()))?;
    Ok(envelope.biases)
}

/// Map a validator's category label onto a bias type. Accepts the wire
/// names plus labels like "Gender bias" or "Racial/ethnic".
fn resolve_bias_type(label: &str) -> Option<BiasType> {
    let label = label.trim();
    let candidates = [
        label.to_string(),
        label
            .to_ascii_lowercase()
            .trim_end_matches("bias")
            .trim_end_matches(|c: char| c == '_' || c == '-' || c == ' ')
            .to_string(),
        label.split('/').next().unwrap_or_default().to_string(),
    ];

    candidates
        .iter()
        .filter_map(|c| c.parse::<BiasType>().ok())
        .find(|t| *t != BiasType::Intersectional)
}

/// Turn findings into issues.
///
/// Each finding is placed at the first case-insensitive occurrence of its
/// word, or at 0 when absent. Findings whose word matches an existing
/// issue's word, or whose category is unknown, are dropped. Unknown
/// severities become medium.
pub fn locate_findings(text: &str, existing: &[Issue], findings: Vec<ExternalFinding>) -> Vec<Issue> {
    let text_lower = text.to_ascii_lowercase();
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|i| i.word.to_ascii_lowercase())
        .collect();

    let mut issues = Vec::new();
    for finding in findings {
        let word_lower = finding.word.trim().to_ascii_lowercase();
        if seen.contains(&word_lower) {
            continue;
        }

        let Some(bias_type) = resolve_bias_type(&finding.bias_type) else {
            debug!(bias_type = %finding.bias_type, "Dropping finding with unknown bias type");
            continue;
        };

        let position = if word_lower.is_empty() {
            0
        } else {
            text_lower.find(&word_lower).unwrap_or(0)
        };

        seen.insert(word_lower);
        issues.push(Issue {
            word: finding.word.trim().to_string(),
            bias_type,
            severity: Severity::parse_lenient(&finding.severity).unwrap_or(Severity::Medium),
            explanation: finding.explanation,
            position,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finding(word: &str, bias_type: &str, severity: &str) -> ExternalFinding {
        ExternalFinding {
            word: word.to_string(),
            bias_type: bias_type.to_string(),
            severity: severity.to_string(),
            explanation: "because".to_string(),
        }
    }

    #[test]
    fn test_parse_findings() {
        let raw = r#"{"biases": [{"word": "Rockstar", "bias_type": "age", "severity": "low", "explanation": "coded"}]}"#;
        let findings = parse_findings(raw).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].word, "Rockstar");

        assert!(parse_findings("{}").unwrap().is_empty());
        assert!(matches!(
            parse_findings("not json"),
            Err(ValidationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_locate_places_findings_case_insensitively() {
        let text = "Our team wants a Rockstar ninja.";
        let issues = locate_findings(
            text,
            &[],
            vec![
                finding("rockstar", "age", "low"),
                finding("unicorn", "Gender bias", "severe"),
            ],
        );

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].position, 17);
        assert_eq!(issues[0].severity, Severity::Low);
        assert_eq!(issues[1].position, 0);
        assert_eq!(issues[1].bias_type, BiasType::Gender);
        assert_eq!(issues[1].severity, Severity::High);
    }

    #[test]
    fn test_locate_drops_duplicates_and_unknown_types() {
        let existing = vec![Issue {
            word: "Chairman".to_string(),
            bias_type: BiasType::Gender,
            severity: Severity::High,
            explanation: String::new(),
            position: 4,
        }];
        let issues = locate_findings(
            "The chairman is a ninja",
            &existing,
            vec![
                finding("chairman", "gender", "high"),
                finding("ninja", "astrology", "high"),
                finding("ninja", "culture", "whatever"),
                finding("NINJA", "culture", "low"),
            ],
        );

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].bias_type, BiasType::Culture);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_resolve_bias_type_labels() {
        assert_eq!(resolve_bias_type("Racial/ethnic"), Some(BiasType::Race));
        assert_eq!(resolve_bias_type("LGBTQ+ bias"), Some(BiasType::Lgbtq));
        assert_eq!(resolve_bias_type("truth_seeking"), Some(BiasType::TruthSeeking));
        assert_eq!(resolve_bias_type("intersectional"), None);
        assert_eq!(resolve_bias_type(""), None);
    }

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = validation_prompt("hello there");
        assert!(prompt.contains("\"hello there\""));
        assert!(prompt.contains("{\"biases\": []}"));
    }
}
