//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::EngineError;

/// Which vocabulary tier is scanned and whether context rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyProfile {
    /// Every phrase, every occurrence, no context rules
    Strict,
    /// Unambiguous phrases only, filtered through context rules
    #[default]
    ContextAware,
}

impl PolicyProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyProfile::Strict => "strict",
            PolicyProfile::ContextAware => "context_aware",
        }
    }
}

impl fmt::Display for PolicyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyProfile {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(PolicyProfile::Strict),
            "context_aware" | "contextaware" | "enterprise" => Ok(PolicyProfile::ContextAware),
            other => Err(EngineError::Config(format!("unknown policy profile '{other}'"))),
        }
    }
}

/// How co-occurring bias types are turned into an intersectional issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionalPolicy {
    /// Two or more types within one sentence
    #[default]
    SentenceScoped,
    /// Two or more types anywhere in the text
    Global,
}

fn default_eeo_gate() -> bool {
    true
}

fn default_context_window() -> usize {
    50
}

fn default_validation_timeout_ms() -> u64 {
    8000
}

/// Runtime options for [`BiasEngine`](crate::BiasEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub profile: PolicyProfile,
    /// Skip detection entirely for equal-opportunity boilerplate
    #[serde(default = "default_eeo_gate")]
    pub eeo_gate: bool,
    #[serde(default)]
    pub intersectional: IntersectionalPolicy,
    /// Context rule radius in bytes on each side of a match
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    /// Upper bound on a single AI validation call
    #[serde(default = "default_validation_timeout_ms")]
    pub validation_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile: PolicyProfile::default(),
            eeo_gate: default_eeo_gate(),
            intersectional: IntersectionalPolicy::default(),
            context_window: default_context_window(),
            validation_timeout_ms: default_validation_timeout_ms(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are not a
    /// valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn with_profile(mut self, profile: PolicyProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_intersectional(mut self, policy: IntersectionalPolicy) -> Self {
        self.intersectional = policy;
        self
    }

    pub fn with_eeo_gate(mut self, enabled: bool) -> Self {
        self.eeo_gate = enabled;
        self
    }
}
