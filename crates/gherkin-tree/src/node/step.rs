//! Step nodes and their optional argument.

use derive_more::From;
use gherkin_tree_keywords::StepKeyword;
use serde::{Deserialize, Serialize};

use super::{DocStringNode, KeywordNode, NodeType, TableNode};

/// Multi-line argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From)]
pub enum StepArgument {
    /// A `| cell |` table.
    Table(TableNode),
    /// A delimited doc string.
    DocString(DocStringNode),
}

impl StepArgument {
    /// Borrow the table, if this argument is one.
    #[must_use]
    pub const fn as_table(&self) -> Option<&TableNode> {
        match self {
            Self::Table(table) => Some(table),
            Self::DocString(_) => None,
        }
    }

    /// Borrow the doc string, if this argument is one.
    #[must_use]
    pub const fn as_doc_string(&self) -> Option<&DocStringNode> {
        match self {
            Self::DocString(doc) => Some(doc),
            Self::Table(_) => None,
        }
    }
}

/// A single Given/When/Then/And/But line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNode {
    keyword: String,
    keyword_type: StepKeyword,
    text: String,
    argument: Option<StepArgument>,
    line: usize,
}

impl StepNode {
    /// Create a step without an argument.
    ///
    /// `keyword` is the literal keyword text as written (for example `Soit`
    /// or `*`); `keyword_type` is its resolved meaning.
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        keyword_type: StepKeyword,
        text: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            keyword_type,
            text: text.into(),
            argument: None,
            line,
        }
    }

    /// Attach a table or doc string argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<StepArgument>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    /// Resolved keyword type.
    #[must_use]
    pub const fn keyword_type(&self) -> StepKeyword {
        self.keyword_type
    }

    /// Step text following the keyword.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Arguments of the step; never more than one.
    #[must_use]
    pub fn arguments(&self) -> &[StepArgument] {
        self.argument.as_slice()
    }

    /// The argument of the step, if any.
    #[must_use]
    pub const fn argument(&self) -> Option<&StepArgument> {
        self.argument.as_ref()
    }

    /// Return `true` when the step carries an argument.
    #[must_use]
    pub const fn has_arguments(&self) -> bool {
        self.argument.is_some()
    }

    /// Copy of this step with its text and argument rewritten by `map`.
    pub(crate) fn map_text(&self, mut map: impl FnMut(&str) -> String) -> Self {
        let argument = self.argument.as_ref().map(|argument| match argument {
            StepArgument::Table(table) => StepArgument::Table(table.map_cells(&mut map)),
            StepArgument::DocString(doc) => {
                StepArgument::DocString(doc.map_lines(|line| map(line)))
            }
        });
        Self {
            keyword: self.keyword.clone(),
            keyword_type: self.keyword_type,
            text: map(&self.text),
            argument,
            line: self.line,
        }
    }
}

impl KeywordNode for StepNode {
    fn node_type(&self) -> NodeType {
        NodeType::Step
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}
