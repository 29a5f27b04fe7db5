//! Keyword datasets keyed by language code.
//!
//! The builtin dataset is shipped as `i18n/gherkin-languages.json`, embedded
//! at compile time and decoded once per process. External datasets in the
//! same shape can be loaded with [`KeywordDataset::from_json`].

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use rust_embed::RustEmbed;
use tracing::warn;

use crate::errors::KeywordError;
use crate::table::KeywordTable;

/// Language used when a requested language is unknown.
pub const DEFAULT_LANGUAGE: &str = "en";

const DATASET_FILE: &str = "gherkin-languages.json";

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Languages;

static BUILTIN: LazyLock<KeywordDataset> = LazyLock::new(|| {
    load_builtin()
        .unwrap_or_else(|error| panic!("failed to load builtin keyword dataset: {error}"))
});

fn load_builtin() -> Result<KeywordDataset, KeywordError> {
    let file = Languages::get(DATASET_FILE).ok_or(KeywordError::MissingAsset(DATASET_FILE))?;
    let text = std::str::from_utf8(&file.data).map_err(|_| KeywordError::MissingAsset(DATASET_FILE))?;
    KeywordDataset::from_json(text, DEFAULT_LANGUAGE)
}

/// Source of keyword tables consumed by the lexer.
pub trait Keywords: Send + Sync {
    /// Return the table for `language`, falling back to the default language.
    fn resolve(&self, language: &str) -> Arc<KeywordTable>;

    /// Return `true` when `language` has its own table.
    fn contains(&self, language: &str) -> bool;

    /// Code of the language used as a fallback.
    fn default_language(&self) -> &str;
}

/// Immutable collection of keyword tables.
#[derive(Debug, Clone)]
pub struct KeywordDataset {
    tables: BTreeMap<String, Arc<KeywordTable>>,
    default: Arc<KeywordTable>,
}

impl KeywordDataset {
    /// Return the dataset embedded in the crate.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded asset is corrupt, which indicates
    /// a packaging error rather than a runtime condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree_keywords::{KeywordCategory, KeywordDataset, Keywords};
    ///
    /// let fr = KeywordDataset::builtin().resolve("fr");
    /// assert!(fr.has_keyword(KeywordCategory::Feature, "Fonctionnalité"));
    /// ```
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Decode a dataset of the form `{"<code>": {"<key>": "a|b", ...}}`.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::Malformed`] when the JSON does not match that
    /// shape, any error raised by [`KeywordTable::from_entries`], and
    /// [`KeywordError::MissingDefault`] when `default_language` has no entry.
    pub fn from_json(json: &str, default_language: &str) -> Result<Self, KeywordError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        let tables = raw
            .iter()
            .map(|(code, entries)| {
                KeywordTable::from_entries(
                    code,
                    entries.iter().map(|(key, value)| (key.as_str(), value.as_str())),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tables(tables, default_language)
    }

    /// Build a dataset from prepared tables.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::MissingDefault`] when no table carries the
    /// `default_language` code.
    pub fn from_tables<I>(tables: I, default_language: &str) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = KeywordTable>,
    {
        let tables: BTreeMap<String, Arc<KeywordTable>> = tables
            .into_iter()
            .map(|table| (table.language().to_string(), Arc::new(table)))
            .collect();
        let default = tables
            .get(default_language)
            .cloned()
            .ok_or_else(|| KeywordError::MissingDefault(default_language.to_string()))?;
        Ok(Self { tables, default })
    }

    /// Return a copy of the dataset using another default language.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::MissingDefault`] when `language` is unknown.
    pub fn with_default_language(&self, language: &str) -> Result<Self, KeywordError> {
        let default = self
            .get(language)
            .ok_or_else(|| KeywordError::MissingDefault(language.to_string()))?;
        Ok(Self {
            tables: self.tables.clone(),
            default,
        })
    }

    /// Look up a table without falling back.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<Arc<KeywordTable>> {
        self.tables.get(language).cloned()
    }

    /// Language codes present in the dataset, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of languages in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Return `true` when the dataset holds no languages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Keywords for KeywordDataset {
    fn resolve(&self, language: &str) -> Arc<KeywordTable> {
        self.get(language).unwrap_or_else(|| {
            warn!(
                language,
                fallback = self.default.language(),
                "unknown Gherkin language, using default keywords"
            );
            Arc::clone(&self.default)
        })
    }

    fn contains(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    fn default_language(&self) -> &str {
        self.default.language()
    }
}
