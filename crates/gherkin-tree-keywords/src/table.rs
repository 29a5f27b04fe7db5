//! Per-language keyword table.
//!
//! A table maps every [`KeywordCategory`] to the ordered synonyms accepted for
//! it in one language. Synonyms arrive pipe-delimited (`*|Given|Fact that`);
//! `*` stands for "no literal keyword word" and a trailing `<` marks a
//! keyword that is glued to the following text without a space.

use std::collections::BTreeMap;

use crate::category::KeywordCategory;
use crate::errors::KeywordError;

/// One accepted spelling of a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synonym {
    text: String,
    spaced: bool,
}

impl Synonym {
    /// Parse a single dataset entry.
    ///
    /// Returns `None` for entries that are empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree_keywords::Synonym;
    ///
    /// let joined = Synonym::parse("前提<").unwrap();
    /// assert_eq!(joined.text(), "前提");
    /// assert!(!joined.is_spaced());
    /// assert!(Synonym::parse("*").unwrap().is_wildcard());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (text, spaced) = trimmed
            .strip_suffix('<')
            .map_or((trimmed, true), |stripped| (stripped.trim_end(), false));
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            spaced,
        })
    }

    /// Literal keyword text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the keyword must be followed by whitespace.
    #[must_use]
    pub const fn is_spaced(&self) -> bool {
        self.spaced
    }

    /// Whether this is the `*` wildcard step keyword.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.text == "*"
    }
}

/// Immutable keyword synonyms for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    language: String,
    name: String,
    native: String,
    synonyms: BTreeMap<KeywordCategory, Vec<Synonym>>,
}

impl KeywordTable {
    /// Build a table from `(key, pipe-delimited value)` pairs.
    ///
    /// The `name` and `native` keys carry the language's English and native
    /// names; every other key must name a [`KeywordCategory`]. Categories
    /// absent from `entries` accept no keywords.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::UnknownCategory`] for an undefined key and
    /// [`KeywordError::EmptySynonym`] when a value contains an empty entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree_keywords::{KeywordCategory, KeywordTable};
    ///
    /// let table = KeywordTable::from_entries(
    ///     "en",
    ///     [("feature", "Feature|Ability"), ("given", "*|Given")],
    /// )
    /// .unwrap();
    /// assert_eq!(table.pipe_delimited(KeywordCategory::Given), "*|Given");
    /// assert!(table.synonyms(KeywordCategory::Rule).is_empty());
    /// ```
    pub fn from_entries<'a, I>(language: &str, entries: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self {
            language: language.to_string(),
            name: language.to_string(),
            native: language.to_string(),
            synonyms: BTreeMap::new(),
        };
        for (key, value) in entries {
            match key {
                "name" => value.trim().clone_into(&mut table.name),
                "native" => value.trim().clone_into(&mut table.native),
                other => {
                    let category: KeywordCategory = other.parse()?;
                    let synonyms = parse_synonyms(language, category, value)?;
                    table.synonyms.insert(category, synonyms);
                }
            }
        }
        Ok(table)
    }

    /// Language code, for example `en` or `pt`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// English name of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native name of the language.
    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }

    /// Synonyms accepted for `category`, in dataset order.
    #[must_use]
    pub fn synonyms(&self, category: KeywordCategory) -> &[Synonym] {
        self.synonyms.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Literal keyword texts accepted for `category`.
    pub fn keywords(&self, category: KeywordCategory) -> impl Iterator<Item = &str> {
        self.synonyms(category).iter().map(Synonym::text)
    }

    /// Render the synonyms of `category` back into dataset form.
    #[must_use]
    pub fn pipe_delimited(&self, category: KeywordCategory) -> String {
        self.synonyms(category)
            .iter()
            .map(|synonym| {
                if synonym.is_spaced() {
                    synonym.text().to_string()
                } else {
                    format!("{}<", synonym.text())
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Return `true` if `keyword` is a synonym of `category`.
    #[must_use]
    pub fn has_keyword(&self, category: KeywordCategory, keyword: &str) -> bool {
        self.keywords(category).any(|candidate| candidate == keyword)
    }
}

fn parse_synonyms(
    language: &str,
    category: KeywordCategory,
    value: &str,
) -> Result<Vec<Synonym>, KeywordError> {
    value
        .split('|')
        .map(|raw| {
            Synonym::parse(raw).ok_or_else(|| KeywordError::EmptySynonym {
                language: language.to_string(),
                category: category.as_str().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests assert successful construction")]
mod tests {
    use super::*;

    #[test]
    fn keeps_dataset_order() {
        let table = KeywordTable::from_entries("en", [("given", "*|Given|Fact that")])
            .expect("table should build");
        let keywords: Vec<_> = table.keywords(KeywordCategory::Given).collect();
        assert_eq!(keywords, vec!["*", "Given", "Fact that"]);
    }

    #[test]
    fn reads_language_names() {
        let table = KeywordTable::from_entries(
            "fr",
            [("name", "French"), ("native", "français"), ("rule", "Règle")],
        )
        .expect("table should build");
        assert_eq!(table.language(), "fr");
        assert_eq!(table.name(), "French");
        assert_eq!(table.native(), "français");
        assert!(table.has_keyword(KeywordCategory::Rule, "Règle"));
    }

    #[test]
    fn rejects_empty_synonyms() {
        let err = KeywordTable::from_entries("en", [("when", "When||")])
            .expect_err("empty synonym should fail");
        assert!(matches!(err, KeywordError::EmptySynonym { .. }));
    }

    #[test]
    fn rejects_undefined_category() {
        let err = KeywordTable::from_entries("en", [("step", "Given")])
            .expect_err("unknown key should fail");
        assert!(matches!(err, KeywordError::UnknownCategory(key) if key == "step"));
    }

    #[test]
    fn preserves_joined_marker_when_rendering() {
        let table = KeywordTable::from_entries("ja", [("given", "*|前提<")])
            .expect("table should build");
        assert_eq!(table.pipe_delimited(KeywordCategory::Given), "*|前提<");
        let joined = table
            .synonyms(KeywordCategory::Given)
            .get(1)
            .expect("second synonym");
        assert!(!joined.is_spaced());
    }
}
