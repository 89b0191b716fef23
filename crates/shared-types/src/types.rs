use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category a detected issue belongs to.
///
/// Declaration order is the canonical reporting order; `Intersectional` is
/// only ever produced by the aggregator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BiasType {
    Gender,
    Race,
    Age,
    Disability,
    Culture,
    Political,
    Religion,
    Lgbtq,
    Socioeconomic,
    TruthSeeking,
    IdeologicalNeutrality,
    LanguageTone,
    PatternStereotype,
    Intersectional,
}

impl BiasType {
    /// Every bias type a detector can produce (excludes `Intersectional`).
    pub const DETECTABLE: [BiasType; 13] = [
        BiasType::Gender,
        BiasType::Race,
        BiasType::Age,
        BiasType::Disability,
        BiasType::Culture,
        BiasType::Political,
        BiasType::Religion,
        BiasType::Lgbtq,
        BiasType::Socioeconomic,
        BiasType::TruthSeeking,
        BiasType::IdeologicalNeutrality,
        BiasType::LanguageTone,
        BiasType::PatternStereotype,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasType::Gender => "gender",
            BiasType::Race => "race",
            BiasType::Age => "age",
            BiasType::Disability => "disability",
            BiasType::Culture => "culture",
            BiasType::Political => "political",
            BiasType::Religion => "religion",
            BiasType::Lgbtq => "lgbtq",
            BiasType::Socioeconomic => "socioeconomic",
            BiasType::TruthSeeking => "truth_seeking",
            BiasType::IdeologicalNeutrality => "ideological_neutrality",
            BiasType::LanguageTone => "language_tone",
            BiasType::PatternStereotype => "pattern_stereotype",
            BiasType::Intersectional => "intersectional",
        }
    }
}

impl fmt::Display for BiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a bias type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bias type: '{0}'")]
pub struct UnknownBiasType(pub String);

impl FromStr for BiasType {
    type Err = UnknownBiasType;

    /// Case-insensitive; accepts `-`, space or `_` as separators and a few
    /// common aliases ("lgbtq+", "racial", "cultural", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "gender" => Ok(BiasType::Gender),
            "race" | "racial" | "ethnicity" => Ok(BiasType::Race),
            "age" => Ok(BiasType::Age),
            "disability" | "ableism" => Ok(BiasType::Disability),
            "culture" | "cultural" => Ok(BiasType::Culture),
            "political" | "politics" => Ok(BiasType::Political),
            "religion" | "religious" => Ok(BiasType::Religion),
            "lgbtq" | "lgbtq+" | "lgbt" => Ok(BiasType::Lgbtq),
            "socioeconomic" | "class" => Ok(BiasType::Socioeconomic),
            "truth_seeking" | "truth" => Ok(BiasType::TruthSeeking),
            "ideological_neutrality" | "ideological" => Ok(BiasType::IdeologicalNeutrality),
            "language_tone" | "language" | "tone" => Ok(BiasType::LanguageTone),
            "pattern_stereotype" | "stereotype" | "patterns" => Ok(BiasType::PatternStereotype),
            "intersectional" => Ok(BiasType::Intersectional),
            _ => Err(UnknownBiasType(s.to_string())),
        }
    }
}

/// Per-issue severity. Ordering is `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Contribution of one issue to the aggregate score
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Low => 5,
            Severity::Medium => 10,
            Severity::High => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Lenient parse used for externally supplied severities.
    pub fn parse_lenient(s: &str) -> Option<Severity> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" | "moderate" => Some(Severity::Medium),
            "high" | "critical" | "severe" => Some(Severity::High),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate label for a score, also used for unbiased heatmap cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    None,
    Low,
    Medium,
    High,
}

impl SeverityLabel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => SeverityLabel::None,
            1..=29 => SeverityLabel::Low,
            30..=59 => SeverityLabel::Medium,
            _ => SeverityLabel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::None => "none",
            SeverityLabel::Low => "low",
            SeverityLabel::Medium => "medium",
            SeverityLabel::High => "high",
        }
    }
}

impl From<Severity> for SeverityLabel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => SeverityLabel::Low,
            Severity::Medium => SeverityLabel::Medium,
            Severity::High => SeverityLabel::High,
        }
    }
}

/// One detected occurrence of a biased phrase or pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub word: String,
    pub bias_type: BiasType,
    pub severity: Severity,
    pub explanation: String,
    /// Byte offset into the scanned text
    pub position: usize,
}

/// Heatmap annotation for a single whitespace-delimited token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCell {
    pub word: String,
    pub biased: bool,
    pub severity: SeverityLabel,
    pub bias_types: BTreeSet<BiasType>,
}

impl WordCell {
    pub fn unbiased(word: &str) -> Self {
        Self {
            word: word.to_string(),
            biased: false,
            severity: SeverityLabel::None,
            bias_types: BTreeSet::new(),
        }
    }
}

/// How a scan result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Lexicon detectors only
    Manual,
    /// Lexicon detectors plus the structural pattern detectors
    ManualWithPatterns,
    /// Rule-based detection merged with external AI validation
    Hybrid,
    /// Text matched the EEO whitelist; no detector ran
    EeoWhitelisted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub score: u32,
    pub severity: SeverityLabel,
    pub issues: Vec<Issue>,
    pub issue_count: usize,
    pub heatmap: Vec<WordCell>,
    pub detection_method: DetectionMethod,
}

impl ScanResult {
    /// Human-readable one-line summary, counting issues per bias type in
    /// first-seen order.
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return "No significant biases detected. Great job!".to_string();
        }

        let mut counts: Vec<(BiasType, usize)> = Vec::new();
        for issue in &self.issues {
            match counts.iter_mut().find(|(t, _)| *t == issue.bias_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((issue.bias_type, 1)),
            }
        }

        let parts: Vec<String> = counts
            .iter()
            .map(|(bias_type, count)| format!("{} {}", count, bias_type))
            .collect();

        format!(
            "Found {} potential bias issue(s): {}",
            self.issues.len(),
            parts.join(", ")
        )
    }

    /// Distinct bias types among the issues, in canonical order
    pub fn bias_types(&self) -> BTreeSet<BiasType> {
        self.issues.iter().map(|i| i.bias_type).collect()
    }
}
