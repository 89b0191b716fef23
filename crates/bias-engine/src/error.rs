//! Error types for the bias engine

use shared_types::BiasType;
use thiserror::Error;

/// Lexicon integrity problems, detected when a lexicon is validated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    #[error("duplicate phrase '{phrase}' in category {category} (subcategories '{first}' and '{second}')")]
    DuplicatePhrase {
        phrase: String,
        category: BiasType,
        first: String,
        second: String,
    },

    #[error("empty phrase in {category}/{subcategory}")]
    EmptyPhrase {
        category: BiasType,
        subcategory: String,
    },

    #[error("{0} is produced by the aggregator and cannot carry lexicon entries")]
    ReservedCategory(BiasType),
}

/// Configuration and startup errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Invalid structural pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
