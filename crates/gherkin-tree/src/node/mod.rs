//! Immutable feature tree.
//!
//! Nodes are built once by the parser (or by outline expansion) and never
//! mutated afterwards. Behaviour shared by several node kinds lives in the
//! [`KeywordNode`], [`TaggedNode`] and [`ScenarioLike`] traits.

use std::fmt;

use serde::{Deserialize, Serialize};

mod background;
mod docstring;
mod example;
mod feature;
mod outline;
mod scenario;
mod step;
mod table;
mod tags;

pub use background::BackgroundNode;
pub use docstring::DocStringNode;
pub use example::ExampleNode;
pub use feature::FeatureNode;
pub use outline::OutlineNode;
pub use scenario::{ScenarioDefinition, ScenarioNode};
pub use step::{StepArgument, StepNode};
pub use table::{ExampleTableNode, TableNode};
pub use tags::Tags;

/// Kind of a node in the feature tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// [`FeatureNode`].
    Feature,
    /// [`BackgroundNode`].
    Background,
    /// [`ScenarioNode`].
    Scenario,
    /// [`OutlineNode`].
    Outline,
    /// [`ExampleNode`].
    Example,
    /// [`StepNode`].
    Step,
    /// [`TableNode`].
    Table,
    /// [`ExampleTableNode`].
    ExampleTable,
    /// [`DocStringNode`].
    DocString,
}

impl NodeType {
    /// Name of the node kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Background => "Background",
            Self::Scenario => "Scenario",
            Self::Outline => "Outline",
            Self::Example => "Example",
            Self::Step => "Step",
            Self::Table => "Table",
            Self::ExampleTable => "ExampleTable",
            Self::DocString => "DocString",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node introduced by a keyword on a source line.
pub trait KeywordNode {
    /// Kind of the node.
    fn node_type(&self) -> NodeType;

    /// Keyword text as written in the source; empty for arguments.
    fn keyword(&self) -> &str;

    /// 1-based source line.
    fn line(&self) -> usize;
}

/// A node carrying tags.
pub trait TaggedNode {
    /// Tags without the leading `@`.
    fn tags(&self) -> &Tags;

    /// Return `true` when `tag` is present.
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(tag)
    }

    /// Return `true` when any tag is present.
    fn has_tags(&self) -> bool {
        !self.tags().is_empty()
    }
}

/// A scenario, outline or expanded example.
pub trait ScenarioLike: KeywordNode + TaggedNode {
    /// Title written after the keyword.
    fn title(&self) -> Option<&str>;

    /// Steps in declaration order.
    fn steps(&self) -> &[StepNode];

    /// Return `true` when the scenario has steps.
    fn has_steps(&self) -> bool {
        !self.steps().is_empty()
    }
}
