//! Step keyword type and conjunction resolution.
//!
//! [`StepKeyword`] is the language-independent classification of a step
//! line. The lexer emits `And`/`But` unresolved and the parser replaces them
//! with the keyword of the preceding concrete step via
//! [`resolve`](StepKeyword::resolve).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::KeywordCategory;

/// Semantic type of a step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree_keywords::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Return `true` for `And` and `But`.
    #[must_use]
    pub const fn is_conjunction(&self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Resolve conjunctions to the semantic keyword of the previous step.
    ///
    /// When the current keyword is `And` or `But`, returns the value stored in
    /// `prev`, or `Given` when no concrete step precedes it. For primary
    /// keywords (`Given`/`When`/`Then`), updates `prev` and returns the
    /// keyword unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree_keywords::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::Given);
    /// assert_eq!(StepKeyword::When.resolve(&mut prev), StepKeyword::When);
    /// assert_eq!(StepKeyword::But.resolve(&mut prev), StepKeyword::When);
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        if self.is_conjunction() {
            prev.as_ref().copied().unwrap_or(Self::Given)
        } else {
            *prev = Some(self);
            self
        }
    }

    /// Map a step keyword category onto its keyword type.
    ///
    /// Returns `None` for header categories such as `Feature`.
    #[must_use]
    pub const fn from_category(category: KeywordCategory) -> Option<Self> {
        match category {
            KeywordCategory::Given => Some(Self::Given),
            KeywordCategory::When => Some(Self::When),
            KeywordCategory::Then => Some(Self::Then),
            KeywordCategory::And => Some(Self::And),
            KeywordCategory::But => Some(Self::But),
            KeywordCategory::Feature
            | KeywordCategory::Background
            | KeywordCategory::Scenario
            | KeywordCategory::ScenarioOutline
            | KeywordCategory::Examples
            | KeywordCategory::Rule => None,
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step keyword: {}", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Ok(Self::Given)
        } else if trimmed.eq_ignore_ascii_case("when") {
            Ok(Self::When)
        } else if trimmed.eq_ignore_ascii_case("then") {
            Ok(Self::Then)
        } else if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("but") {
            Ok(Self::But)
        } else {
            Err(StepKeywordParseError(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
    fn parse_kw(input: &str) -> StepKeyword {
        input
            .parse()
            .expect("test input should parse to a valid keyword")
    }

    #[rstest]
    #[case("Given", StepKeyword::Given)]
    #[case("given", StepKeyword::Given)]
    #[case(" WhEn ", StepKeyword::When)]
    #[case("THEN", StepKeyword::Then)]
    #[case("AND", StepKeyword::And)]
    #[case(" but ", StepKeyword::But)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: StepKeyword) {
        assert_eq!(parse_kw(input), expected);
    }

    #[test]
    fn rejects_invalid_keyword() {
        let Err(err) = "invalid".parse::<StepKeyword>() else {
            panic!("expected parse error for invalid keyword");
        };
        assert_eq!(err.0, "invalid");
        assert_eq!(err.to_string(), "invalid step keyword: invalid");
    }

    #[test]
    fn resolve_returns_previous_for_conjunctions() {
        let mut prev = Some(StepKeyword::When);
        assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::When);
        assert_eq!(StepKeyword::But.resolve(&mut prev), StepKeyword::When);
        assert_eq!(prev, Some(StepKeyword::When));
    }

    #[test]
    fn resolve_defaults_to_given_when_unseeded() {
        let mut prev = None;
        assert_eq!(StepKeyword::But.resolve(&mut prev), StepKeyword::Given);
        assert_eq!(prev, None);
    }

    #[test]
    fn resolves_mixed_sequence() {
        let mut prev = None;
        let resolved: Vec<_> = [
            StepKeyword::Given,
            StepKeyword::And,
            StepKeyword::When,
            StepKeyword::But,
        ]
        .into_iter()
        .map(|kw| kw.resolve(&mut prev))
        .collect();
        assert_eq!(
            resolved,
            vec![
                StepKeyword::Given,
                StepKeyword::Given,
                StepKeyword::When,
                StepKeyword::When,
            ]
        );
    }

    #[rstest]
    #[case(KeywordCategory::Given, Some(StepKeyword::Given))]
    #[case(KeywordCategory::But, Some(StepKeyword::But))]
    #[case(KeywordCategory::Examples, None)]
    fn maps_categories(#[case] category: KeywordCategory, #[case] expected: Option<StepKeyword>) {
        assert_eq!(StepKeyword::from_category(category), expected);
    }
}
