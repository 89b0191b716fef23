pub mod aggregator;
pub mod config;
pub mod context;
pub mod detectors;
pub mod eeo;
pub mod error;
pub mod heatmap;
pub mod lexicon;
pub mod matcher;
pub mod validation;


use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use shared_types::{DetectionMethod, Issue, ScanResult};
use tracing::{debug, info, warn};

pub use config::{EngineConfig, IntersectionalPolicy, PolicyProfile};
pub use detectors::{DetectorSelection, ScanContext, StructuralPatterns};
pub use error::{EngineError, LexiconError};
pub use lexicon::{Lexicon, PhraseGroup, TriggerEntry, DEFAULT_LEXICON};
pub use validation::{BiasValidator, ExternalFinding, ValidationError};

/// Per-call scan options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub selection: DetectorSelection,
}

impl ScanOptions {
    /// Restrict the scan to the named bias types (see [`DetectorSelection::from_names`])
    pub fn with_bias_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            selection: DetectorSelection::from_names(names),
        }
    }
}

/// BiasEngine entry point
///
/// Cheap to clone; the lexicon and compiled patterns are shared.
#[derive(Debug, Clone)]
pub struct BiasEngine {
    lexicon: Arc<Lexicon>,
    patterns: Arc<StructuralPatterns>,
    config: EngineConfig,
}

impl BiasEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Built-in lexicon and patterns with custom options
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            lexicon: Arc::clone(&DEFAULT_LEXICON),
            patterns: Arc::new(StructuralPatterns::default_patterns()),
            config,
        }
    }

    /// Engine over a caller-supplied lexicon, validated up front
    pub fn with_lexicon(lexicon: Lexicon, config: EngineConfig) -> Result<Self, EngineError> {
        lexicon.validate()?;
        let patterns = StructuralPatterns::compile()?;

        Ok(Self {
            lexicon: Arc::new(lexicon),
            patterns: Arc::new(patterns),
            config,
        })
    }

    /// Built-in lexicon with options loaded from a TOML file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let config = EngineConfig::from_file(path)?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Raw detector hits, before the intersectional pass and scoring.
    /// Ignores the EEO gate.
    pub fn detect(&self, text: &str, selection: &DetectorSelection) -> Vec<Issue> {
        if text.is_empty() {
            return Vec::new();
        }
        let ctx = ScanContext::new(text, &self.config);
        detectors::run_detectors(&ctx, &self.lexicon, &self.patterns, selection)
    }

    /// Scan with every detector
    pub fn scan(&self, text: &str) -> ScanResult {
        self.scan_with(text, &ScanOptions::default())
    }

    /// Rule-based scan
    pub fn scan_with(&self, text: &str, options: &ScanOptions) -> ScanResult {
        if let Some(result) = self.eeo_exemption(text) {
            return result;
        }

        let issues = self.detect(text, &options.selection);
        debug!(issues = issues.len(), "Rule-based detection complete");

        aggregator::aggregate(
            text,
            issues,
            base_method(&options.selection),
            self.config.intersectional,
        )
    }

    /// Rule-based scan merged with an external validator's findings.
    ///
    /// Rule detection runs on the blocking pool while the validator is
    /// awaited. Validator errors and timeouts are logged and the scan falls
    /// back to the rule-based result.
    pub async fn scan_hybrid(
        &self,
        text: &str,
        options: &ScanOptions,
        validator: &dyn BiasValidator,
    ) -> ScanResult {
        if let Some(result) = self.eeo_exemption(text) {
            return result;
        }

        let engine = self.clone();
        let owned_text = text.to_string();
        let selection = options.selection.clone();
        let detection =
            tokio::task::spawn_blocking(move || engine.detect(&owned_text, &selection));

        let limit = self.config.validation_timeout_ms;
        let validation = tokio::time::timeout(Duration::from_millis(limit), validator.validate(text));

        let (detected, validated) = tokio::join!(detection, validation);
        let mut issues = match detected {
            Ok(issues) => issues,
            Err(e) => {
                warn!(error = %e, "Detection task failed, scanning inline");
                self.detect(text, &options.selection)
            }
        };
        let mut method = base_method(&options.selection);

        match validated {
            Ok(Ok(findings)) => {
                let extra: Vec<Issue> = validation::locate_findings(text, &issues, findings)
                    .into_iter()
                    .filter(|i| options.selection.includes(i.bias_type))
                    .collect();
                debug!(findings = extra.len(), "Merged AI findings");
                issues.extend(extra);
                method = DetectionMethod::Hybrid;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "AI validation failed, using rule-based result");
            }
            Err(_) => {
                let e = ValidationError::Timeout(limit);
                warn!(error = %e, "AI validation failed, using rule-based result");
            }
        }

        aggregator::aggregate(text, issues, method, self.config.intersectional)
    }

    fn eeo_exemption(&self, text: &str) -> Option<ScanResult> {
        if !self.config.eeo_gate {
            return None;
        }
        let phrase = eeo::matched_phrase(text)?;
        info!(phrase, "Text matched equal-opportunity statement, skipping detection");
        Some(aggregator::exempt_result(text))
    }
}

impl Default for BiasEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn base_method(selection: &DetectorSelection) -> DetectionMethod {
    if selection.includes_patterns() {
        DetectionMethod::ManualWithPatterns
    } else {
        DetectionMethod::Manual
    }
}
