//! Tokens emitted by the lexer.

use gherkin_tree_keywords::{KeywordCategory, StepKeyword};

/// Classification of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `# language: xx`; the token text is the effective language code.
    LanguagePragma,
    /// `@a @b` tag line, names without the `@`.
    Tag(Vec<String>),
    /// Any other `#` line.
    Comment,
    /// Header line; candidate categories at the longest matched keyword,
    /// highest priority first.
    Header(Vec<KeywordCategory>),
    /// Step line; `And`/`But` are left unresolved.
    Step(StepKeyword),
    /// `| a | b |` with unescaped cells.
    TableRow(Vec<String>),
    /// Opening or closing doc string delimiter.
    DocStringBoundary {
        /// Media type written after the opening delimiter.
        media_type: Option<String>,
    },
    /// Line captured inside a doc string, indentation stripped.
    DocStringContent,
    /// Free text, typically a description line.
    Text,
    /// Empty or whitespace-only line.
    Blank,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Short human-readable name used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::LanguagePragma => "language pragma".to_string(),
            Self::Tag(_) => "tags".to_string(),
            Self::Comment => "comment".to_string(),
            Self::Header(kinds) => kinds
                .first()
                .map_or_else(|| "header".to_string(), |kind| format!("{kind} header")),
            Self::Step(_) => "step".to_string(),
            Self::TableRow(_) => "table row".to_string(),
            Self::DocStringBoundary { .. } | Self::DocStringContent => "doc string".to_string(),
            Self::Text => "text".to_string(),
            Self::Blank => "blank line".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the line is.
    pub kind: TokenKind,
    /// Keyword as written, for headers and steps.
    pub keyword: Option<String>,
    /// Payload: header title, step text, doc string content or free text.
    pub text: String,
    /// The trimmed source line.
    pub raw: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, line: usize, raw: &str) -> Self {
        Self {
            kind,
            keyword: None,
            text: String::new(),
            raw: raw.to_string(),
            line,
        }
    }

    #[must_use]
    pub(crate) fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self
    }

    #[must_use]
    pub(crate) fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Keyword as written, or an empty string.
    #[must_use]
    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or_default()
    }

    /// Payload text, `None` when empty.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        Some(self.text.clone()).filter(|text| !text.is_empty())
    }

    /// Return `true` for blank and comment lines.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Blank | TokenKind::Comment)
    }
}
