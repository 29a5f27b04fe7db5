//! Multi-language Gherkin keyword tables.
//!
//! The crate ships the keyword synonyms of more than seventy natural
//! languages and exposes them as immutable [`KeywordTable`] values. The lexer
//! in `gherkin-tree` consumes them through the [`Keywords`] trait so that
//! callers can substitute their own dataset.

mod category;
mod dataset;
mod errors;
mod step;
mod table;

pub use category::KeywordCategory;
pub use dataset::{DEFAULT_LANGUAGE, KeywordDataset, Keywords};
pub use errors::KeywordError;
pub use step::{StepKeyword, StepKeywordParseError};
pub use table::{KeywordTable, Synonym};
