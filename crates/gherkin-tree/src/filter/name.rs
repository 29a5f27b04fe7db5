//! Title filter.

use regex::{Regex, RegexBuilder};

use super::FeatureFilter;
use crate::error::FilterError;
use crate::node::{FeatureNode, ScenarioDefinition, ScenarioLike};

#[derive(Debug, Clone)]
enum Matcher {
    Substring(String),
    Regex(Regex),
}

/// Filters by feature or scenario title.
///
/// A pattern written as `/body/flags` is a regular expression, where
/// `flags` may combine `i`, `m`, `s` and `x`. Anything else matches as a
/// case-sensitive substring. A node without a title is matched as an
/// empty string.
///
/// # Examples
///
/// ```
/// use gherkin_tree::{FeatureFilter, NameFilter, parse};
///
/// let feature = parse(concat!(
///     "Feature: Accounts\n",
///     "  Scenario: Sign in\n    Given a user\n",
///     "  Scenario: Sign out\n    Given a session\n",
/// ))
/// .unwrap();
/// let filtered = NameFilter::new("/sign\\s+in/i")
///     .unwrap()
///     .filter_feature(&feature);
/// assert_eq!(filtered.scenarios().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    matcher: Matcher,
}

impl NameFilter {
    /// Create a filter from a substring or a `/regex/` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] when a `/regex/` pattern does
    /// not compile.
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let matcher = split_regex(pattern)
            .map(|(body, flags)| compile(body, flags))
            .transpose()
            .map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })?
            .map_or_else(|| Matcher::Substring(pattern.to_owned()), Matcher::Regex);
        Ok(Self {
            pattern: pattern.to_owned(),
            matcher,
        })
    }

    /// The pattern as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Return `true` when the pattern is a regular expression.
    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }

    fn is_title_match(&self, title: Option<&str>) -> bool {
        let title = title.unwrap_or_default();
        match &self.matcher {
            Matcher::Substring(needle) => title.contains(needle.as_str()),
            Matcher::Regex(regex) => regex.is_match(title),
        }
    }
}

/// Body and flags of a `/body/flags` pattern.
fn split_regex(pattern: &str) -> Option<(&str, &str)> {
    let (body, flags) = pattern.strip_prefix('/')?.rsplit_once('/')?;
    flags
        .chars()
        .all(|flag| matches!(flag, 'i' | 'm' | 's' | 'x'))
        .then_some((body, flags))
}

fn compile(body: &str, flags: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(body)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .ignore_whitespace(flags.contains('x'))
        .build()
}

impl FeatureFilter for NameFilter {
    fn is_feature_match(&self, feature: &FeatureNode) -> bool {
        self.is_title_match(feature.title())
    }

    fn is_scenario_match(&self, _feature: &FeatureNode, scenario: &ScenarioDefinition) -> bool {
        self.is_title_match(scenario.title())
    }
}
