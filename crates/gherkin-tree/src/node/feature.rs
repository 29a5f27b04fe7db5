//! Feature root node.

use serde::{Deserialize, Serialize};

use super::{BackgroundNode, KeywordNode, NodeType, ScenarioDefinition, TaggedNode, Tags};
use crate::error::NodeError;

/// Root of a parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureNode {
    title: Option<String>,
    description: Option<String>,
    tags: Tags,
    background: Option<BackgroundNode>,
    scenarios: Vec<ScenarioDefinition>,
    keyword: String,
    language: String,
    file: Option<String>,
    line: usize,
}

impl FeatureNode {
    /// Create an empty feature written in `language`.
    #[must_use]
    pub fn new(keyword: impl Into<String>, language: impl Into<String>, line: usize) -> Self {
        Self {
            title: None,
            description: None,
            tags: Tags::new(),
            background: None,
            scenarios: Vec::new(),
            keyword: keyword.into(),
            language: language.into(),
            file: None,
            line,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the background.
    #[must_use]
    pub fn with_background(mut self, background: Option<BackgroundNode>) -> Self {
        self.background = background;
        self
    }

    /// Set the scenario list.
    #[must_use]
    pub fn with_scenarios(mut self, scenarios: Vec<ScenarioDefinition>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Record the file the feature was read from.
    ///
    /// An empty path is treated as no path.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RelativeFeaturePath`] unless the path is rooted
    /// (`/…` or `\…`), drive-letter rooted (`C:\…`) or carries a URI scheme
    /// (`file://…`).
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree::FeatureNode;
    ///
    /// let feature = FeatureNode::new("Feature", "en", 1);
    /// assert!(feature.clone().with_file(Some("/abs/path".into())).is_ok());
    /// assert!(feature.clone().with_file(Some("C:\\abs\\path".into())).is_ok());
    /// assert!(feature.clone().with_file(Some("file:///abs/path".into())).is_ok());
    /// assert!(feature.with_file(Some("relative/path.feature".into())).is_err());
    /// ```
    pub fn with_file(mut self, file: Option<String>) -> Result<Self, NodeError> {
        let file = file.filter(|path| !path.is_empty());
        if let Some(path) = &file {
            if !is_absolute_path(path) {
                return Err(NodeError::RelativeFeaturePath(path.clone()));
            }
        }
        self.file = file;
        Ok(self)
    }

    /// Title written after the keyword.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Return `true` when a non-empty description is present.
    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Free-text description between the header and the first block.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Return `true` when a background is present.
    #[must_use]
    pub const fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// The background, if any.
    #[must_use]
    pub const fn background(&self) -> Option<&BackgroundNode> {
        self.background.as_ref()
    }

    /// Return `true` when the feature has scenarios or outlines.
    #[must_use]
    pub fn has_scenarios(&self) -> bool {
        !self.scenarios.is_empty()
    }

    /// Scenarios and outlines in declaration order.
    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// Code of the language the feature was parsed with.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Absolute path of the source file, if known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

impl KeywordNode for FeatureNode {
    fn node_type(&self) -> NodeType {
        NodeType::Feature
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl TaggedNode for FeatureNode {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

fn is_absolute_path(path: &str) -> bool {
    let mut chars = path.chars();
    let first = chars.next();
    if first.is_some_and(is_separator) {
        return true;
    }
    let drive_rooted = path.chars().count() > 3
        && first.is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next() == Some(':')
        && chars.next().is_some_and(is_separator);
    drive_rooted || has_uri_scheme(path)
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// `scheme:` with an alphabetic first character and at least two characters,
/// so that `C:` is never mistaken for a scheme.
fn has_uri_scheme(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.len() >= 2
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/abs/path")]
    #[case("\\server\\share")]
    #[case("C:\\abs\\path")]
    #[case("c:/abs/path")]
    #[case("file:///abs/path")]
    #[case("vfs://root/login.feature")]
    fn accepts_absolute_paths(#[case] path: &str) {
        assert!(is_absolute_path(path), "{path} should be absolute");
    }

    #[rstest]
    #[case("relative/path.feature")]
    #[case("login.feature")]
    #[case("C:relative")]
    #[case("C:/")]
    #[case("1x:/odd")]
    fn rejects_relative_paths(#[case] path: &str) {
        assert!(!is_absolute_path(path), "{path} should be relative");
    }

    #[test]
    fn empty_path_means_no_file() {
        let Ok(feature) = FeatureNode::new("Feature", "en", 1).with_file(Some(String::new())) else {
            panic!("empty path should be accepted");
        };
        assert_eq!(feature.file(), None);
    }

    #[test]
    fn relative_path_is_rejected_with_path() {
        let Err(err) =
            FeatureNode::new("Feature", "en", 1).with_file(Some("relative/path.feature".into()))
        else {
            panic!("relative path should fail");
        };
        assert_eq!(err, NodeError::RelativeFeaturePath("relative/path.feature".into()));
    }
}
