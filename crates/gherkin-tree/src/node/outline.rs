//! Scenario outlines.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::{
    ExampleNode, ExampleTableNode, KeywordNode, NodeType, ScenarioLike, StepNode, TaggedNode, Tags,
};
use crate::error::NodeError;
use crate::expand::expand_outline;

/// A scenario template expanded once per example row.
///
/// The concrete [`ExampleNode`]s are derived on first access to
/// [`examples`](Self::examples) and cached. Expansion is pure, so every
/// reader observes a value-equal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineNode {
    title: Option<String>,
    tags: Tags,
    steps: Vec<StepNode>,
    tables: Vec<ExampleTableNode>,
    keyword: String,
    line: usize,
    #[serde(skip)]
    examples: OnceLock<Vec<ExampleNode>>,
}

impl OutlineNode {
    /// Create an empty outline introduced by `keyword` at `line`.
    #[must_use]
    pub fn new(keyword: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            tags: Tags::new(),
            steps: Vec::new(),
            tables: Vec::new(),
            keyword: keyword.into(),
            line,
            examples: OnceLock::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self.examples = OnceLock::new();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self.examples = OnceLock::new();
        self
    }

    /// Set the template steps.
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StepNode>) -> Self {
        self.steps = steps;
        self.examples = OnceLock::new();
        self
    }

    /// Set the example tables.
    #[must_use]
    pub fn with_example_tables(mut self, tables: Vec<ExampleTableNode>) -> Self {
        self.tables = tables;
        self.examples = OnceLock::new();
        self
    }

    /// Return `true` when at least one example table is attached.
    #[must_use]
    pub fn has_examples(&self) -> bool {
        !self.tables.is_empty()
    }

    /// Example tables in declaration order.
    #[must_use]
    pub fn example_tables(&self) -> &[ExampleTableNode] {
        &self.tables
    }

    /// Concrete scenarios, one per data row across all tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree::{ScenarioLike, parse};
    ///
    /// let feature = parse(
    ///     "Feature: F\n  Scenario Outline: O\n    Given I am <name>\n    Examples:\n      | name |\n      | everzet |\n",
    /// )
    /// .unwrap();
    /// let outline = feature.scenarios()[0].as_outline().unwrap();
    /// assert_eq!(outline.examples()[0].steps()[0].text(), "I am everzet");
    /// ```
    pub fn examples(&self) -> &[ExampleNode] {
        self.examples.get_or_init(|| {
            expand_outline(self.title.as_deref(), &self.tags, &self.steps, &self.tables)
        })
    }

    /// Merge every example table into one, keeping the first table's
    /// keyword and dropping table tags.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::NoExampleTables`] for an outline without tables
    /// and [`NodeError::IncompatibleTables`] when headers differ.
    pub fn merged_example_table(&self) -> Result<ExampleTableNode, NodeError> {
        let (first, rest) = self.tables.split_first().ok_or(NodeError::NoExampleTables)?;
        let merged = rest
            .iter()
            .try_fold(first.table().clone(), |acc, table| acc.merged_with(table.table()))?;
        Ok(ExampleTableNode::new(merged, first.keyword()).with_line(first.line()))
    }
}

impl PartialEq for OutlineNode {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.tags == other.tags
            && self.steps == other.steps
            && self.tables == other.tables
            && self.keyword == other.keyword
            && self.line == other.line
    }
}

impl Eq for OutlineNode {}

impl KeywordNode for OutlineNode {
    fn node_type(&self) -> NodeType {
        NodeType::Outline
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl TaggedNode for OutlineNode {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl ScenarioLike for OutlineNode {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn steps(&self) -> &[StepNode] {
        &self.steps
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests build fixed outlines")]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use gherkin_tree_keywords::StepKeyword;

    use super::*;
    use crate::node::TableNode;

    fn table(rows: &[(usize, &[&str])]) -> TableNode {
        TableNode::new(rows.iter().map(|(line, cells)| {
            (*line, cells.iter().map(|cell| (*cell).to_string()).collect())
        }))
        .expect("table should build")
    }

    fn outline() -> OutlineNode {
        OutlineNode::new("Scenario Outline", 1)
            .with_title(Some("Login as <name>".to_string()))
            .with_steps(vec![StepNode::new("Given", StepKeyword::Given, "I am <name>", 2)])
            .with_example_tables(vec![
                ExampleTableNode::new(table(&[(4, &["name"]), (5, &["a"]), (6, &["b"])]), "Examples"),
                ExampleTableNode::new(table(&[(8, &["name"]), (9, &["c"])]), "Examples"),
            ])
    }

    #[test]
    fn examples_are_memoised_and_counted() {
        let outline = outline();
        let first = outline.examples().to_vec();
        let second = outline.examples();
        assert_eq!(first.as_slice(), second);
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn concurrent_first_access_is_consistent() {
        let outline = Arc::new(outline());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let outline = Arc::clone(&outline);
                thread::spawn(move || outline.examples().to_vec())
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread should finish"))
            .collect();
        assert!(results.windows(2).all(|pair| pair.first() == pair.get(1)));
    }

    #[test]
    fn merges_tables_with_same_header() {
        let merged = outline().merged_example_table().expect("tables merge");
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.keyword(), "Examples");
    }

    #[test]
    fn merging_without_tables_fails() {
        let outline = OutlineNode::new("Scenario Outline", 1);
        assert!(!outline.has_examples());
        assert_eq!(outline.merged_example_table(), Err(NodeError::NoExampleTables));
    }

    #[test]
    fn equality_ignores_cached_examples() {
        let expanded = outline();
        let _ = expanded.examples();
        assert_eq!(expanded, outline());
    }
}
