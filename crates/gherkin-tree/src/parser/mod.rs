//! Gherkin parser producing [`FeatureNode`] trees.
//!
//! Parsing is two-phase: the [`Lexer`] classifies lines into tokens and a
//! single-pass state machine assembles the tree. Either phase fails the
//! whole resource; there is no partial recovery.

use gherkin_tree_keywords::{KeywordDataset, KeywordError, Keywords};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::Error;
use crate::lexer::{Lexer, Token};
use crate::node::FeatureNode;

mod builder;

use builder::TreeBuilder;

/// Parses feature text with a configurable keyword source.
///
/// # Examples
///
/// ```
/// use gherkin_tree::{KeywordDataset, Parser, TaggedNode};
///
/// let parser = Parser::new(KeywordDataset::builtin()).with_default_language("fr");
/// let feature = parser
///     .parse("@smoke\nFonctionnalité: Connexion\n", None)
///     .unwrap();
/// assert_eq!(feature.language(), "fr");
/// assert!(feature.has_tag("smoke"));
/// ```
pub struct Parser<'k> {
    keywords: &'k dyn Keywords,
    default_language: String,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(KeywordDataset::builtin())
    }
}

impl Parser<'static> {
    /// Create a parser over the builtin keywords using the configured
    /// default language.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Keyword`] when the configured language is not part
    /// of the builtin dataset.
    pub fn from_config(config: &ParserConfig) -> Result<Self, Error> {
        let keywords = KeywordDataset::builtin();
        if !keywords.contains(&config.default_language) {
            return Err(KeywordError::MissingDefault(config.default_language.clone()).into());
        }
        Ok(Self::new(keywords).with_default_language(config.default_language.clone()))
    }
}

impl<'k> Parser<'k> {
    /// Create a parser starting in the keyword source's default language.
    #[must_use]
    pub fn new(keywords: &'k dyn Keywords) -> Self {
        Self {
            default_language: keywords.default_language().to_string(),
            keywords,
        }
    }

    /// Use `language` for input without a `# language:` pragma.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Language applied to input without a pragma.
    ///
    /// Falls back to the keyword source's default when the configured
    /// language is unknown to it.
    #[must_use]
    pub fn language(&self) -> &str {
        if self.keywords.contains(&self.default_language) {
            &self.default_language
        } else {
            self.keywords.default_language()
        }
    }

    /// Parse `text` into a feature.
    ///
    /// `file`, when given, must be absolute; it is recorded on the feature
    /// and on any error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lex`] or [`Error::Parse`] for malformed input and
    /// [`Error::Node`] when `file` is relative.
    pub fn parse(&self, text: &str, file: Option<&str>) -> Result<FeatureNode, Error> {
        let tokens = Lexer::new(self.keywords, self.language())
            .tokenize(text)
            .map_err(|source| {
                debug!(file = file.unwrap_or_default(), error = %source, "failed to lex feature");
                Error::Lex {
                    file: file.map(str::to_string),
                    source,
                }
            })?;
        self.parse_tokens(&tokens, file)
    }

    /// Build a feature from tokens produced by a [`Lexer`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the tokens violate the grammar and
    /// [`Error::Node`] when `file` is relative.
    pub fn parse_tokens(&self, tokens: &[Token], file: Option<&str>) -> Result<FeatureNode, Error> {
        let feature = TreeBuilder::new(tokens)
            .feature(self.language())
            .map_err(|source| {
                debug!(
                    file = file.unwrap_or_default(),
                    line = ?source.line(),
                    error = %source,
                    "failed to parse feature"
                );
                Error::Parse {
                    file: file.map(str::to_string),
                    source,
                }
            })?;
        Ok(feature.with_file(file.map(str::to_string))?)
    }
}

#[cfg(test)]
mod tests;
