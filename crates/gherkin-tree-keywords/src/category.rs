//! Grammar categories a keyword synonym can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::KeywordError;

/// Grammar construct category keyed in the keyword dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeywordCategory {
    /// `Feature:` header.
    Feature,
    /// `Background:` header.
    Background,
    /// `Scenario:` header.
    Scenario,
    /// `Scenario Outline:` header.
    ScenarioOutline,
    /// `Examples:` header of an outline table.
    Examples,
    /// `Rule:` header.
    Rule,
    /// `Given` step.
    Given,
    /// `When` step.
    When,
    /// `Then` step.
    Then,
    /// `And` step.
    And,
    /// `But` step.
    But,
}

impl KeywordCategory {
    /// Every category, headers first.
    pub const ALL: [Self; 11] = [
        Self::Feature,
        Self::Background,
        Self::Scenario,
        Self::ScenarioOutline,
        Self::Examples,
        Self::Rule,
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::But,
    ];

    /// Header categories in the order used to break ties between equally long
    /// keyword matches.
    pub const HEADER_PRIORITY: [Self; 6] = [
        Self::Feature,
        Self::Rule,
        Self::Background,
        Self::ScenarioOutline,
        Self::Scenario,
        Self::Examples,
    ];

    /// Step categories in tie-break order.
    pub const STEPS: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the dataset key for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Background => "background",
            Self::Scenario => "scenario",
            Self::ScenarioOutline => "scenario_outline",
            Self::Examples => "examples",
            Self::Rule => "rule",
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::And => "and",
            Self::But => "but",
        }
    }

    /// Return `true` for step categories.
    #[must_use]
    pub const fn is_step(&self) -> bool {
        matches!(
            self,
            Self::Given | Self::When | Self::Then | Self::And | Self::But
        )
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordCategory {
    type Err = KeywordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| KeywordError::UnknownCategory(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_dataset_keys() {
        for category in KeywordCategory::ALL {
            assert_eq!(category.as_str().parse::<KeywordCategory>().ok(), Some(category));
        }
    }

    #[test]
    fn rejects_undefined_category() {
        let Err(err) = "scenario_template".parse::<KeywordCategory>() else {
            panic!("expected unknown category error");
        };
        assert_eq!(
            err.to_string(),
            "undefined keyword category 'scenario_template'"
        );
    }

    #[test]
    fn step_categories_are_flagged() {
        assert!(KeywordCategory::And.is_step());
        assert!(!KeywordCategory::Rule.is_step());
        assert!(KeywordCategory::STEPS.iter().all(KeywordCategory::is_step));
    }
}
