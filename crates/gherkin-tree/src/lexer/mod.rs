//! Line-oriented Gherkin lexer.
//!
//! [`Lexer::tokenize`] classifies each source line against the active
//! keyword table and returns the whole token stream, terminated by
//! [`TokenKind::Eof`]. The active language may be switched once by a
//! `# language:` pragma that precedes every other meaningful line.

use std::sync::LazyLock;

use gherkin_tree_keywords::{KeywordCategory, Keywords};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::LexError;

mod docstring;
mod matcher;
mod table;
mod token;

use docstring::OpenDocString;
use matcher::KeywordMatcher;
pub use token::{Token, TokenKind};

static LANGUAGE_PRAGMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*([\w\-]+)\s*$")
        .unwrap_or_else(|_| unreachable!("language pragma regex is valid"))
});

/// Turns feature text into [`Token`]s.
///
/// # Examples
///
/// ```
/// use gherkin_tree::{KeywordDataset, Lexer, TokenKind};
///
/// let lexer = Lexer::new(KeywordDataset::builtin(), "en");
/// let tokens = lexer.tokenize("Feature: Login\n  Scenario: Ok\n").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[2].kind, TokenKind::Eof);
/// ```
pub struct Lexer<'k> {
    keywords: &'k dyn Keywords,
    language: String,
}

impl<'k> Lexer<'k> {
    /// Create a lexer starting in `language`.
    #[must_use]
    pub fn new(keywords: &'k dyn Keywords, language: impl Into<String>) -> Self {
        Self {
            keywords,
            language: language.into(),
        }
    }

    /// Classify every line of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::ContentBeforeFeature`] when anything other than
    /// blank lines, comments, the language pragma or tags precedes the
    /// Feature header, and [`LexError::UnterminatedDocString`] when a doc
    /// string is still open at the end of input.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut state = LexState {
            matcher: KeywordMatcher::new(&self.keywords.resolve(&self.language)),
            pragma_allowed: true,
            seen_feature: false,
            doc_string: None,
        };
        let mut tokens = Vec::new();
        let mut last_line = 0;
        for (index, source) in text.lines().enumerate() {
            let line = index + 1;
            last_line = line;
            tokens.push(self.classify(&mut state, source, line)?);
        }
        if let Some(open) = state.doc_string {
            return Err(LexError::UnterminatedDocString { line: open.line });
        }
        tokens.push(Token::new(TokenKind::Eof, last_line + 1, ""));
        Ok(tokens)
    }

    fn classify(&self, state: &mut LexState, source: &str, line: usize) -> Result<Token, LexError> {
        let trimmed = source.trim();
        if let Some(open) = &state.doc_string {
            if open.is_closed_by(source) {
                state.doc_string = None;
                return Ok(Token::new(
                    TokenKind::DocStringBoundary { media_type: None },
                    line,
                    trimmed,
                ));
            }
            let content = open.content(source);
            return Ok(Token::new(TokenKind::DocStringContent, line, trimmed).with_text(content));
        }
        if trimmed.is_empty() {
            return Ok(Token::new(TokenKind::Blank, line, trimmed));
        }
        if trimmed.starts_with('#') {
            return Ok(self.comment(state, trimmed, line));
        }
        state.pragma_allowed = false;
        if trimmed.starts_with('@') {
            return Ok(Token::new(TokenKind::Tag(split_tags(trimmed)), line, trimmed));
        }
        if let Some(header) = state.matcher.header(trimmed) {
            if !state.seen_feature && !header.kinds.contains(&KeywordCategory::Feature) {
                return Err(LexError::ContentBeforeFeature { line });
            }
            state.seen_feature = true;
            return Ok(Token::new(TokenKind::Header(header.kinds), line, trimmed)
                .with_keyword(header.keyword)
                .with_text(header.title));
        }
        if !state.seen_feature {
            return Err(LexError::ContentBeforeFeature { line });
        }
        if let Some((open, media_type)) = OpenDocString::open(source, line) {
            state.doc_string = Some(open);
            return Ok(Token::new(
                TokenKind::DocStringBoundary { media_type },
                line,
                trimmed,
            ));
        }
        if let Some(step) = state.matcher.step(trimmed) {
            return Ok(Token::new(TokenKind::Step(step.keyword_type), line, trimmed)
                .with_keyword(step.keyword)
                .with_text(step.text));
        }
        if let Some(cells) = table::split_row(trimmed) {
            return Ok(Token::new(TokenKind::TableRow(cells), line, trimmed));
        }
        Ok(Token::new(TokenKind::Text, line, trimmed).with_text(trimmed))
    }

    fn comment(&self, state: &mut LexState, trimmed: &str, line: usize) -> Token {
        let requested = state
            .pragma_allowed
            .then(|| LANGUAGE_PRAGMA_RE.captures(trimmed))
            .flatten()
            .and_then(|caps| caps.get(1))
            .map(|code| code.as_str());
        let Some(requested) = requested else {
            return Token::new(TokenKind::Comment, line, trimmed).with_text(trimmed);
        };
        state.pragma_allowed = false;
        let effective = if self.keywords.contains(requested) {
            requested
        } else {
            warn!(
                language = requested,
                fallback = %self.language,
                line,
                "unknown language in pragma, keeping current keywords"
            );
            self.language.as_str()
        };
        debug!(language = effective, line, "switching keyword language");
        state.matcher = KeywordMatcher::new(&self.keywords.resolve(effective));
        Token::new(TokenKind::LanguagePragma, line, trimmed).with_text(effective)
    }
}

struct LexState {
    matcher: KeywordMatcher,
    pragma_allowed: bool,
    seen_feature: bool,
    doc_string: Option<OpenDocString>,
}

/// Split a tag line into names without `@`; a ` #` starts a comment.
fn split_tags(trimmed: &str) -> Vec<String> {
    let content = trimmed
        .find(" #")
        .and_then(|end| trimmed.get(..end))
        .unwrap_or(trimmed);
    content
        .split('@')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
