//! Error types raised while loading keyword datasets.

use thiserror::Error;

/// Errors surfaced when a keyword dataset cannot be decoded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeywordError {
    /// The dataset is not valid JSON of the expected shape.
    #[error("malformed keyword dataset: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A language entry names a category the grammar does not define.
    #[error("undefined keyword category '{0}'")]
    UnknownCategory(String),
    /// The configured default language has no entry in the dataset.
    #[error("default language '{0}' is missing from the keyword dataset")]
    MissingDefault(String),
    /// A synonym list contains an empty entry.
    #[error("language '{language}' has an empty synonym in category '{category}'")]
    EmptySynonym {
        /// Language code of the offending entry.
        language: String,
        /// Dataset key of the offending category.
        category: String,
    },
    /// The embedded dataset asset could not be found.
    #[error("embedded keyword dataset '{0}' is missing")]
    MissingAsset(&'static str),
}
