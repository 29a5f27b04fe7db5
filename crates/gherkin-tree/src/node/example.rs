//! Concrete scenarios produced by outline expansion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{KeywordNode, NodeType, ScenarioLike, StepNode, TaggedNode, Tags};
use crate::expand::substitute;

/// One example row of an outline, with placeholders substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleNode {
    text: String,
    tags: Tags,
    steps: Vec<StepNode>,
    tokens: IndexMap<String, String>,
    keyword: String,
    line: usize,
    outline_title: Option<String>,
    index: usize,
}

impl ExampleNode {
    /// Create an example from already substituted steps.
    ///
    /// `text` is the rendered example row, `tokens` maps header cells to row
    /// cells and `index` is the 1-based position of the row within its
    /// outline.
    #[expect(clippy::too_many_arguments, reason = "mirrors the example row fields")]
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        tags: Tags,
        steps: Vec<StepNode>,
        tokens: IndexMap<String, String>,
        keyword: impl Into<String>,
        line: usize,
        outline_title: Option<String>,
        index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            tags,
            steps,
            tokens,
            keyword: keyword.into(),
            line,
            outline_title,
            index,
        }
    }

    /// The example row rendered as `| a | b |`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Header cell to row cell mapping used for substitution.
    #[must_use]
    pub const fn tokens(&self) -> &IndexMap<String, String> {
        &self.tokens
    }

    /// Title of the owning outline, placeholders untouched.
    #[must_use]
    pub fn outline_title(&self) -> Option<&str> {
        self.outline_title.as_deref()
    }

    /// 1-based position of the row within its outline.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Outline title with placeholders substituted, followed by ` #<index>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree::{ExampleNode, Tags};
    ///
    /// let tokens = [("name".to_string(), "everzet".to_string())].into_iter().collect();
    /// let example = ExampleNode::new(
    ///     "| everzet |",
    ///     Tags::new(),
    ///     Vec::new(),
    ///     tokens,
    ///     "Examples",
    ///     6,
    ///     Some("Login as <name>".to_string()),
    ///     2,
    /// );
    /// assert_eq!(example.name(), "Login as everzet #2");
    /// ```
    #[must_use]
    pub fn name(&self) -> String {
        let title = self.outline_title.as_deref().unwrap_or_default();
        format!("{} #{}", substitute(title, &self.tokens), self.index)
    }
}

impl KeywordNode for ExampleNode {
    fn node_type(&self) -> NodeType {
        NodeType::Example
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl TaggedNode for ExampleNode {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl ScenarioLike for ExampleNode {
    fn title(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn steps(&self) -> &[StepNode] {
        &self.steps
    }
}
