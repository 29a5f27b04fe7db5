//! Error types for lexing, parsing, node construction, filtering and caching.
//!
//! Each concern owns a focused enum; [`Error`] aggregates them so callers of
//! the high-level entry points can match on a single type. Lex and parse
//! failures are wrapped together with the source file, when one is known.

use std::path::PathBuf;

use gherkin_tree_keywords::KeywordError;
use thiserror::Error;

/// Line-level problems detected while tokenising feature text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LexError {
    /// A doc string was opened and never closed.
    #[error("line {line}: doc string is never closed")]
    UnterminatedDocString {
        /// Line of the opening delimiter.
        line: usize,
    },
    /// Something other than tags, comments or blank lines precedes the
    /// Feature header.
    #[error("line {line}: unexpected content before the Feature header")]
    ContentBeforeFeature {
        /// Offending line.
        line: usize,
    },
}

impl LexError {
    /// Line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedDocString { line } | Self::ContentBeforeFeature { line } => *line,
        }
    }
}

/// Grammar violations detected while building the feature tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The token stream contains no Feature header.
    #[error("no Feature header found")]
    MissingFeature,
    /// A Background follows a Scenario in the same container.
    #[error("line {line}: Background must precede every Scenario")]
    BackgroundAfterScenario {
        /// Line of the Background header.
        line: usize,
    },
    /// A second Background appears in the same container.
    #[error("line {line}: only one Background is allowed")]
    DuplicateBackground {
        /// Line of the second Background header.
        line: usize,
    },
    /// Tags precede a Background.
    #[error("line {line}: Background cannot be tagged")]
    TaggedBackground {
        /// Line of the Background header.
        line: usize,
    },
    /// Tags are not followed by a taggable construct.
    #[error("line {line}: tags must be followed by a Scenario, Scenario Outline, Examples or Rule")]
    DanglingTags {
        /// Line of the first dangling tag.
        line: usize,
    },
    /// An Examples block follows something other than a Scenario Outline.
    #[error("line {line}: Examples may only follow a Scenario Outline")]
    ExamplesWithoutOutline {
        /// Line of the Examples header.
        line: usize,
    },
    /// A Scenario Outline has no Examples block.
    #[error("line {line}: Scenario Outline has no Examples")]
    OutlineWithoutExamples {
        /// Line of the Scenario Outline header.
        line: usize,
    },
    /// An Examples block has no table.
    #[error("line {line}: Examples block has no table")]
    ExamplesWithoutTable {
        /// Line of the Examples header.
        line: usize,
    },
    /// A step already carries a table or doc string.
    #[error("line {line}: a step accepts a single table or doc string")]
    MultipleArguments {
        /// Line where the second argument starts.
        line: usize,
    },
    /// A table or doc string is not preceded by a step.
    #[error("line {line}: {argument} is not attached to a step")]
    OrphanArgument {
        /// Line where the argument starts.
        line: usize,
        /// Kind of argument, `table` or `doc string`.
        argument: &'static str,
    },
    /// A token appears where the grammar does not allow it.
    #[error("line {line}: unexpected {found}")]
    Unexpected {
        /// Offending line.
        line: usize,
        /// Description of the offending construct.
        found: String,
    },
    /// A node rejected its contents during construction.
    #[error("line {line}: {source}")]
    InvalidNode {
        /// Offending line reported by the node, otherwise the first line
        /// of the construct being built.
        line: usize,
        /// Underlying construction error.
        #[source]
        source: NodeError,
    },
}

impl ParseError {
    /// Line number the error refers to, when one is known.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MissingFeature => None,
            Self::BackgroundAfterScenario { line }
            | Self::DuplicateBackground { line }
            | Self::TaggedBackground { line }
            | Self::DanglingTags { line }
            | Self::ExamplesWithoutOutline { line }
            | Self::OutlineWithoutExamples { line }
            | Self::ExamplesWithoutTable { line }
            | Self::MultipleArguments { line }
            | Self::OrphanArgument { line, .. }
            | Self::Unexpected { line, .. }
            | Self::InvalidNode { line, .. } => Some(*line),
        }
    }
}

/// Invariant violations raised while constructing nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NodeError {
    /// A table row has a different column count from the first row.
    #[error("table row at line {line} is expected to have {expected} columns, got {found}")]
    RaggedTable {
        /// Line of the offending row.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },
    /// A row index is past the end of the table.
    #[error("row #{0} does not exist in table")]
    RowOutOfRange(usize),
    /// A column index is past the end of the table.
    #[error("column #{0} does not exist in table")]
    ColumnOutOfRange(usize),
    /// Two tables with different header rows cannot be merged.
    #[error("tables have different headers and cannot be merged")]
    IncompatibleTables,
    /// An outline without example tables has nothing to merge.
    #[error("outline has no example tables")]
    NoExampleTables,
    /// A feature file path is not absolute.
    #[error("feature file '{0}' should be an absolute path")]
    RelativeFeaturePath(String),
}

impl NodeError {
    /// Source line the error points at, when the node knows it.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::RaggedTable { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Failures of the feature cache collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The cache directory cannot be created or written.
    #[error("cache path '{}' is not writable: {source}", .path.display())]
    NotWritable {
        /// Cache directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A cache entry does not hold a feature of the current schema.
    #[error("cache entry '{}' is corrupted: {reason}", .path.display())]
    Corrupted {
        /// Cache entry file.
        path: PathBuf,
        /// What was wrong with the payload.
        reason: String,
    },
    /// No entry exists for the requested feature.
    #[error("no cached feature for '{0}'")]
    Missing(String),
    /// Reading or writing a cache entry failed.
    #[error("cache I/O failed for '{}': {source}", .path.display())]
    Io {
        /// Cache entry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Filters that cannot be built from their definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// A `/regex/` name pattern does not compile.
    #[error("invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as given.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Crate-level error returned by the parsing and loading entry points.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Tokenisation failed.
    #[error("{}: {source}", display_file(.file.as_deref()))]
    Lex {
        /// Source file, when known.
        file: Option<String>,
        /// Underlying lex error.
        #[source]
        source: LexError,
    },
    /// The grammar was violated.
    #[error("{}: {source}", display_file(.file.as_deref()))]
    Parse {
        /// Source file, when known.
        file: Option<String>,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
    /// A node could not be constructed.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// The feature cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// The keyword dataset is unusable.
    #[error(transparent)]
    Keyword(#[from] KeywordError),
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A filter definition is invalid.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// A feature resource could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// Resource path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Source file the error refers to, when known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Lex { file, .. } | Self::Parse { file, .. } => file.as_deref(),
            _ => None,
        }
    }

    /// Line number the error refers to, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Lex { source, .. } => Some(source.line()),
            Self::Parse { source, .. } => source.line(),
            _ => None,
        }
    }
}

fn display_file(file: Option<&str>) -> &str {
    file.unwrap_or("<input>")
}
