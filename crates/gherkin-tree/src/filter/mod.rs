//! Feature filters applied after parsing.
//!
//! Filters never mutate a tree; [`FeatureFilter::filter_feature`] returns a
//! copy that keeps only the matching scenarios.

mod name;
mod tag;

pub use name::NameFilter;
pub use tag::TagExpression;

use crate::node::{FeatureNode, ScenarioDefinition, TaggedNode, Tags};

/// Selects features and scenarios.
pub trait FeatureFilter: Send + Sync {
    /// Return `true` when the feature as a whole matches.
    fn is_feature_match(&self, feature: &FeatureNode) -> bool;

    /// Return `true` when `scenario`, read in the context of `feature`,
    /// matches.
    fn is_scenario_match(&self, feature: &FeatureNode, scenario: &ScenarioDefinition) -> bool;

    /// Copy of `feature` keeping only matching scenarios.
    ///
    /// A feature that matches as a whole is returned unchanged.
    fn filter_feature(&self, feature: &FeatureNode) -> FeatureNode {
        if self.is_feature_match(feature) {
            return feature.clone();
        }
        let scenarios = feature
            .scenarios()
            .iter()
            .filter(|scenario| self.is_scenario_match(feature, scenario))
            .cloned()
            .collect();
        feature.clone().with_scenarios(scenarios)
    }
}

/// Filters by [`TagExpression`].
///
/// Scenarios are matched on the feature's tags together with their own.
/// Every example table of an outline is matched separately, on the feature,
/// outline and table tags; the outline matches when any table does, and
/// [`filter_feature`](FeatureFilter::filter_feature) keeps only those tables.
///
/// # Examples
///
/// ```
/// use gherkin_tree::{FeatureFilter, TagFilter, parse};
///
/// let feature = parse(concat!(
///     "Feature: F\n",
///     "  @fast\n  Scenario: A\n    Given a\n",
///     "  Scenario: B\n    Given b\n",
/// ))
/// .unwrap();
/// let filtered = TagFilter::new("@fast").filter_feature(&feature);
/// assert_eq!(filtered.scenarios().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    expression: TagExpression,
}

impl TagFilter {
    /// Create a filter from a tag expression.
    #[must_use]
    pub fn new(expression: &str) -> Self {
        Self {
            expression: TagExpression::parse(expression),
        }
    }

    /// The parsed expression.
    #[must_use]
    pub const fn expression(&self) -> &TagExpression {
        &self.expression
    }

    fn is_tags_match(&self, tags: &Tags) -> bool {
        self.expression.matches(tags.iter().map(String::as_str))
    }

    /// Example tables of `scenario` that match, or `None` for a scenario
    /// without tables.
    fn matching_tables(
        &self,
        feature: &FeatureNode,
        scenario: &ScenarioDefinition,
    ) -> Option<Vec<usize>> {
        let outline = scenario.as_outline().filter(|outline| outline.has_examples())?;
        let inherited = feature.tags().union(outline.tags());
        Some(
            outline
                .example_tables()
                .iter()
                .enumerate()
                .filter(|(_, table)| self.is_tags_match(&inherited.union(table.tags())))
                .map(|(index, _)| index)
                .collect(),
        )
    }
}

impl FeatureFilter for TagFilter {
    fn is_feature_match(&self, feature: &FeatureNode) -> bool {
        self.is_tags_match(feature.tags())
    }

    fn is_scenario_match(&self, feature: &FeatureNode, scenario: &ScenarioDefinition) -> bool {
        match self.matching_tables(feature, scenario) {
            Some(tables) => !tables.is_empty(),
            None => self.is_tags_match(&feature.tags().union(scenario.tags())),
        }
    }

    fn filter_feature(&self, feature: &FeatureNode) -> FeatureNode {
        let scenarios = feature
            .scenarios()
            .iter()
            .filter_map(|scenario| match self.matching_tables(feature, scenario) {
                None => self
                    .is_tags_match(&feature.tags().union(scenario.tags()))
                    .then(|| scenario.clone()),
                Some(indices) if indices.is_empty() => None,
                Some(indices) => {
                    let outline = scenario.as_outline()?;
                    if indices.len() == outline.example_tables().len() {
                        return Some(scenario.clone());
                    }
                    let tables = indices
                        .iter()
                        .filter_map(|index| outline.example_tables().get(*index).cloned())
                        .collect();
                    Some(outline.clone().with_example_tables(tables).into())
                }
            })
            .collect();
        feature.clone().with_scenarios(scenarios)
    }
}
