//! Gherkin lexer and parser producing an immutable feature tree.
//!
//! Feature text is tokenised line by line against a multi-language keyword
//! table, then built into a [`FeatureNode`] tree. Scenario outlines expand
//! into concrete [`ExampleNode`]s on demand.
//!
//! # Overview
//!
//! - [`Lexer`] classifies lines into [`Token`]s, honouring the
//!   `# language:` pragma.
//! - [`Parser`] turns tokens into the tree, flattening `Rule` blocks.
//! - [`TagFilter`] selects scenarios and example tables by tag expression;
//!   [`NameFilter`] selects them by title.
//! - [`Gherkin`] loads files and directories through [`Loader`]s, optionally
//!   backed by a [`FeatureCache`].
//!
//! # Configuration
//!
//! [`ParserConfig::from_env`] reads:
//!
//! - `GHERKIN_TREE_LANGUAGE`: language used when a file has no pragma
//! - `GHERKIN_TREE_CACHE_DIR`: root directory of the on-disk feature cache
//! - `GHERKIN_TREE_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error)
//!
//! # Example
//!
//! ```
//! use gherkin_tree::{ScenarioLike, parse};
//!
//! let feature = parse(concat!(
//!     "Feature: Login\n",
//!     "  Scenario Outline: Sign in as <user>\n",
//!     "    Given I am <user>\n",
//!     "    Examples:\n",
//!     "      | user  |\n",
//!     "      | alice |\n",
//!     "      | bob   |\n",
//! ))?;
//! let outline = feature.scenarios()[0].as_outline().unwrap();
//! let names: Vec<_> = outline.examples().iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["Sign in as alice #1", "Sign in as bob #2"]);
//! assert_eq!(outline.examples()[1].steps()[0].text(), "I am bob");
//! # Ok::<(), gherkin_tree::Error>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod expand;
pub mod filter;
pub mod gherkin;
pub mod lexer;
pub mod loader;
#[cfg(feature = "logging")]
pub mod logging;
pub mod node;
pub mod parser;

pub use cache::{FeatureCache, FileCache, MemoryCache};
pub use config::{LogLevel, ParserConfig};
pub use error::{CacheError, ConfigError, Error, FilterError, LexError, NodeError, ParseError};
pub use expand::{expand_outline, substitute};
pub use filter::{FeatureFilter, NameFilter, TagExpression, TagFilter};
pub use gherkin::{Gherkin, LoadFailure, LoadReport};
pub use gherkin_tree_keywords::{
    DEFAULT_LANGUAGE, KeywordCategory, KeywordDataset, KeywordError, KeywordTable, Keywords,
    StepKeyword, Synonym,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use loader::{GherkinFileLoader, Loader};
#[cfg(feature = "logging")]
pub use logging::init_logging;
pub use node::{
    BackgroundNode, DocStringNode, ExampleNode, ExampleTableNode, FeatureNode, KeywordNode,
    NodeType, OutlineNode, ScenarioDefinition, ScenarioLike, ScenarioNode, StepArgument,
    StepNode, TableNode, TaggedNode, Tags,
};
pub use parser::Parser;

/// Parse `text` with the built-in keyword dataset and English as the
/// default language.
///
/// # Errors
///
/// Returns [`Error::Lex`] or [`Error::Parse`] when the text is not a valid
/// feature.
pub fn parse(text: &str) -> Result<FeatureNode, Error> {
    Parser::default().parse(text, None)
}
