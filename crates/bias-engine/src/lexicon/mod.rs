//! Trigger phrase lexicon
//!
//! Phrases are grouped per bias category into subcategories. Each group
//! carries its own severity, explanation template, match mode and optional
//! context rule, so the detectors never need category-specific tables.

mod tables;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use shared_types::{BiasType, Severity};

use crate::config::PolicyProfile;
use crate::context::ContextRule;
use crate::error::LexiconError;
use crate::matcher::MatchMode;

lazy_static! {
    /// Built-in lexicon, shared by every engine created without a custom one
    pub static ref DEFAULT_LEXICON: Arc<Lexicon> = Arc::new(tables::build());
}

/// A set of phrases sharing severity, explanation and matching behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseGroup {
    pub subcategory: String,
    pub severity: Severity,
    /// Explanation template; `{word}` and `{subcategory}` are substituted
    pub explanation: String,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextRule>,
    /// Only scanned under the strict profile
    #[serde(default)]
    pub strict_only: bool,
    pub phrases: Vec<String>,
}

impl PhraseGroup {
    pub fn new(subcategory: &str, severity: Severity, explanation: &str, phrases: &[&str]) -> Self {
        Self {
            subcategory: subcategory.to_string(),
            severity,
            explanation: explanation.to_string(),
            mode: MatchMode::WordBoundary,
            context: None,
            strict_only: false,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn substring(mut self) -> Self {
        self.mode = MatchMode::Substring;
        self
    }

    pub fn with_context(mut self, rule: ContextRule) -> Self {
        self.context = Some(rule);
        self
    }

    pub fn strict_only(mut self) -> Self {
        self.strict_only = true;
        self
    }

    /// Whether this group is scanned under `profile`
    pub fn is_active(&self, profile: PolicyProfile) -> bool {
        !self.strict_only || profile == PolicyProfile::Strict
    }

    /// Render the explanation for a matched phrase
    pub fn explain(&self, word: &str) -> String {
        self.explanation
            .replace("{word}", word)
            .replace("{subcategory}", &self.subcategory.replace('_', " "))
    }
}

/// Flat view of one lexicon phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntry<'a> {
    pub phrase: &'a str,
    pub category: BiasType,
    pub group: &'a PhraseGroup,
}

/// Phrase groups keyed by bias category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    categories: BTreeMap<BiasType, Vec<PhraseGroup>>,
}

impl Lexicon {
    /// Empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the built-in lexicon, for callers who want to extend it
    pub fn builtin() -> Self {
        DEFAULT_LEXICON.as_ref().clone()
    }

    /// Append a group. Phrases are trimmed and lowercased on the way in.
    pub fn add_group(&mut self, category: BiasType, mut group: PhraseGroup) -> &mut Self {
        for phrase in &mut group.phrases {
            *phrase = phrase.trim().to_ascii_lowercase();
        }
        self.categories.entry(category).or_default().push(group);
        self
    }

    pub fn with_group(mut self, category: BiasType, group: PhraseGroup) -> Self {
        self.add_group(category, group);
        self
    }

    /// Groups for a category, in insertion order
    pub fn groups(&self, category: BiasType) -> &[PhraseGroup] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories that have at least one group
    pub fn categories(&self) -> impl Iterator<Item = BiasType> + '_ {
        self.categories.keys().copied()
    }

    /// Every phrase with the group it belongs to
    pub fn entries(&self) -> impl Iterator<Item = TriggerEntry<'_>> {
        self.categories.iter().flat_map(|(category, groups)| {
            groups.iter().flat_map(move |group| {
                group.phrases.iter().map(move |phrase| TriggerEntry {
                    phrase,
                    category: *category,
                    group,
                })
            })
        })
    }

    /// Number of phrases scanned for `category` under `profile`
    pub fn phrase_count(&self, category: BiasType, profile: PolicyProfile) -> usize {
        self.groups(category)
            .iter()
            .filter(|g| g.is_active(profile))
            .map(|g| g.phrases.len())
            .sum()
    }

    /// Check integrity: no empty phrases, no phrase listed twice in one
    /// category, nothing filed under the aggregator-only category.
    pub fn validate(&self) -> Result<(), LexiconError> {
        for (category, groups) in &self.categories {
            if *category == BiasType::Intersectional {
                return Err(LexiconError::ReservedCategory(*category));
            }

            let mut seen: HashMap<&str, &str> = HashMap::new();
            for group in groups {
                for phrase in &group.phrases {
                    if phrase.is_empty() {
                        return Err(LexiconError::EmptyPhrase {
                            category: *category,
                            subcategory: group.subcategory.clone(),
                        });
                    }
                    if let Some(first) = seen.insert(phrase, &group.subcategory) {
                        return Err(LexiconError::DuplicatePhrase {
                            phrase: phrase.clone(),
                            category: *category,
                            first: first.to_string(),
                            second: group.subcategory.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
