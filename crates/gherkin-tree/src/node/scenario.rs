//! Plain scenarios and the scenario list element of a feature.

use derive_more::From;
use serde::{Deserialize, Serialize};

use super::{KeywordNode, NodeType, OutlineNode, ScenarioLike, StepNode, TaggedNode, Tags};

/// A concrete scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioNode {
    title: Option<String>,
    tags: Tags,
    steps: Vec<StepNode>,
    keyword: String,
    line: usize,
}

impl ScenarioNode {
    /// Create an empty scenario introduced by `keyword` at `line`.
    #[must_use]
    pub fn new(keyword: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            tags: Tags::new(),
            steps: Vec::new(),
            keyword: keyword.into(),
            line,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the steps.
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StepNode>) -> Self {
        self.steps = steps;
        self
    }
}

impl KeywordNode for ScenarioNode {
    fn node_type(&self) -> NodeType {
        NodeType::Scenario
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl TaggedNode for ScenarioNode {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl ScenarioLike for ScenarioNode {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn steps(&self) -> &[StepNode] {
        &self.steps
    }
}

/// Element of a feature's scenario list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From)]
pub enum ScenarioDefinition {
    /// A plain scenario.
    Scenario(ScenarioNode),
    /// A scenario outline with example tables.
    Outline(OutlineNode),
}

impl ScenarioDefinition {
    /// Borrow the plain scenario, if this is one.
    #[must_use]
    pub const fn as_scenario(&self) -> Option<&ScenarioNode> {
        match self {
            Self::Scenario(scenario) => Some(scenario),
            Self::Outline(_) => None,
        }
    }

    /// Borrow the outline, if this is one.
    #[must_use]
    pub const fn as_outline(&self) -> Option<&OutlineNode> {
        match self {
            Self::Outline(outline) => Some(outline),
            Self::Scenario(_) => None,
        }
    }

    /// Copy with `tags` merged in front of the definition's own tags and
    /// `steps` prepended to its steps.
    pub(crate) fn with_inherited(self, tags: &Tags, steps: &[StepNode]) -> Self {
        match self {
            Self::Scenario(scenario) => {
                let merged = tags.union(scenario.tags());
                let all_steps = steps.iter().chain(scenario.steps()).cloned().collect();
                Self::Scenario(scenario.with_tags(merged).with_steps(all_steps))
            }
            Self::Outline(outline) => {
                let merged = tags.union(outline.tags());
                let all_steps = steps.iter().chain(outline.steps()).cloned().collect();
                Self::Outline(outline.with_tags(merged).with_steps(all_steps))
            }
        }
    }

    fn inner(&self) -> &dyn ScenarioLike {
        match self {
            Self::Scenario(scenario) => scenario,
            Self::Outline(outline) => outline,
        }
    }
}

impl KeywordNode for ScenarioDefinition {
    fn node_type(&self) -> NodeType {
        self.inner().node_type()
    }

    fn keyword(&self) -> &str {
        self.inner().keyword()
    }

    fn line(&self) -> usize {
        self.inner().line()
    }
}

impl TaggedNode for ScenarioDefinition {
    fn tags(&self) -> &Tags {
        self.inner().tags()
    }
}

impl ScenarioLike for ScenarioDefinition {
    fn title(&self) -> Option<&str> {
        self.inner().title()
    }

    fn steps(&self) -> &[StepNode] {
        self.inner().steps()
    }
}
