//! Doc string step arguments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{KeywordNode, NodeType};

/// Delimited multi-line text argument of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocStringNode {
    lines: Vec<String>,
    line: usize,
    media_type: Option<String>,
}

impl DocStringNode {
    /// Create a doc string from its content lines and opening line.
    #[must_use]
    pub fn new<I, S>(lines: I, line: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            line,
            media_type: None,
        }
    }

    /// Attach the media type written after the opening delimiter.
    #[must_use]
    pub fn with_media_type(mut self, media_type: Option<String>) -> Self {
        self.media_type = media_type.filter(|value| !value.is_empty());
        self
    }

    /// Content lines without the delimiters.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Media type such as `json`, if one was given.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// Content lines joined with `\n`.
    #[must_use]
    pub fn raw(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn map_lines(&self, map: impl FnMut(&String) -> String) -> Self {
        Self {
            lines: self.lines.iter().map(map).collect(),
            line: self.line,
            media_type: self.media_type.clone(),
        }
    }
}

impl fmt::Display for DocStringNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw())
    }
}

impl KeywordNode for DocStringNode {
    fn node_type(&self) -> NodeType {
        NodeType::DocString
    }

    fn keyword(&self) -> &str {
        ""
    }

    fn line(&self) -> usize {
        self.line
    }
}
