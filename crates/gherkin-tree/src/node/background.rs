//! Background blocks.

use serde::{Deserialize, Serialize};

use super::{KeywordNode, NodeType, StepNode};

/// Steps shared by every scenario of a feature.
///
/// The grammar does not allow tagging a Background, so it carries no tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundNode {
    title: Option<String>,
    steps: Vec<StepNode>,
    keyword: String,
    line: usize,
}

impl BackgroundNode {
    /// Create an empty background introduced by `keyword` at `line`.
    #[must_use]
    pub fn new(keyword: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            steps: Vec::new(),
            keyword: keyword.into(),
            line,
        }
    }

    /// Set the title written after the keyword.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the steps.
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StepNode>) -> Self {
        self.steps = steps;
        self
    }

    /// Title written after the keyword.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Steps in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[StepNode] {
        &self.steps
    }

    /// Return `true` when the background has steps.
    #[must_use]
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}

impl KeywordNode for BackgroundNode {
    fn node_type(&self) -> NodeType {
        NodeType::Background
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}
