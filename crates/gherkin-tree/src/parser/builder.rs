//! Token-stream state machine building the feature tree.
//!
//! The builder walks the tokens once, left to right. Blank lines and
//! comments are skipped wherever they appear; tags accumulate until the
//! construct they precede consumes them.

use gherkin_tree_keywords::{KeywordCategory, StepKeyword};

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::node::{
    BackgroundNode, DocStringNode, ExampleTableNode, FeatureNode, OutlineNode, ScenarioDefinition,
    ScenarioNode, StepArgument, StepNode, TableNode, Tags,
};

/// Headers expected inside a Feature or Rule body, in preference order.
const BODY: [KeywordCategory; 4] = [
    KeywordCategory::Background,
    KeywordCategory::ScenarioOutline,
    KeywordCategory::Scenario,
    KeywordCategory::Rule,
];

/// Headers expected after the steps of an outline. A keyword shared with a
/// [`BODY`] header only opens an example table when table rows follow it.
const OUTLINE_TAIL: [KeywordCategory; 1] = [KeywordCategory::Examples];

/// Background and scenarios of a Feature or Rule.
#[derive(Default)]
struct Body {
    background: Option<BackgroundNode>,
    scenarios: Vec<ScenarioDefinition>,
}

pub(super) struct TreeBuilder<'t> {
    tokens: &'t [Token],
    pos: usize,
    pending: Option<(usize, Tags)>,
}

impl<'t> TreeBuilder<'t> {
    pub(super) const fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            pending: None,
        }
    }

    /// Build the feature; `language` is used unless a pragma overrides it.
    pub(super) fn feature(mut self, language: &str) -> Result<FeatureNode, ParseError> {
        let mut language = language.to_string();
        let header = loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::MissingFeature);
            };
            match &token.kind {
                TokenKind::LanguagePragma => language.clone_from(&token.text),
                TokenKind::Tag(names) => self.push_tags(token.line, names),
                TokenKind::Header(kinds) if kinds.contains(&KeywordCategory::Feature) => {
                    break token;
                }
                other => return Err(unexpected(token.line, other)),
            }
            self.advance();
        };
        self.advance();
        let tags = self.take_tags();
        let description = self.feature_description();
        let body = self.body(false)?;
        Ok(FeatureNode::new(header.keyword(), language, header.line)
            .with_title(header.title())
            .with_description(description)
            .with_tags(tags)
            .with_background(body.background)
            .with_scenarios(body.scenarios))
    }

    fn body(&mut self, nested: bool) -> Result<Body, ParseError> {
        let mut body = Body::default();
        while let Some(token) = self.peek() {
            let TokenKind::Header(kinds) = &token.kind else {
                if let TokenKind::Tag(names) = &token.kind {
                    self.push_tags(token.line, names);
                    self.advance();
                    continue;
                }
                return Err(unexpected(token.line, &token.kind));
            };
            match choose(kinds, &BODY) {
                KeywordCategory::Background => {
                    if self.pending.is_some() {
                        return Err(ParseError::TaggedBackground { line: token.line });
                    }
                    if !body.scenarios.is_empty() {
                        return Err(ParseError::BackgroundAfterScenario { line: token.line });
                    }
                    if body.background.is_some() {
                        return Err(ParseError::DuplicateBackground { line: token.line });
                    }
                    body.background = Some(self.background(token)?);
                }
                KeywordCategory::Scenario => {
                    let scenario = self.scenario(token)?;
                    body.scenarios.push(scenario.into());
                }
                KeywordCategory::ScenarioOutline => {
                    let outline = self.outline(token)?;
                    body.scenarios.push(outline.into());
                }
                KeywordCategory::Rule if nested => return Ok(body),
                KeywordCategory::Rule => {
                    let scenarios = self.rule(token)?;
                    body.scenarios.extend(scenarios);
                }
                KeywordCategory::Examples => {
                    return Err(ParseError::ExamplesWithoutOutline { line: token.line });
                }
                _ => return Err(unexpected(token.line, &token.kind)),
            }
        }
        match &self.pending {
            Some((line, _)) => Err(ParseError::DanglingTags { line: *line }),
            None => Ok(body),
        }
    }

    /// A Rule is flattened: its tags and background steps are folded into
    /// every scenario it contains.
    fn rule(&mut self, header: &Token) -> Result<Vec<ScenarioDefinition>, ParseError> {
        self.advance();
        let tags = self.take_tags();
        self.skip_description();
        let body = self.body(true)?;
        let steps = body
            .background
            .as_ref()
            .map(BackgroundNode::steps)
            .unwrap_or_default();
        tracing::trace!(line = header.line, scenarios = body.scenarios.len(), "flattening rule");
        Ok(body
            .scenarios
            .into_iter()
            .map(|scenario| scenario.with_inherited(&tags, steps))
            .collect())
    }

    fn background(&mut self, header: &Token) -> Result<BackgroundNode, ParseError> {
        self.advance();
        self.skip_description();
        let steps = self.steps()?;
        Ok(BackgroundNode::new(header.keyword(), header.line)
            .with_title(header.title())
            .with_steps(steps))
    }

    fn scenario(&mut self, header: &Token) -> Result<ScenarioNode, ParseError> {
        self.advance();
        let tags = self.take_tags();
        self.skip_description();
        let steps = self.steps()?;
        Ok(ScenarioNode::new(header.keyword(), header.line)
            .with_title(header.title())
            .with_tags(tags)
            .with_steps(steps))
    }

    fn outline(&mut self, header: &Token) -> Result<OutlineNode, ParseError> {
        self.advance();
        let tags = self.take_tags();
        self.skip_description();
        let steps = self.steps()?;
        let mut tables = Vec::new();
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Tag(names) => {
                    self.push_tags(token.line, names);
                    self.advance();
                }
                TokenKind::Header(kinds) if self.opens_examples(kinds) => {
                    tables.push(self.examples(token)?);
                }
                _ => break,
            }
        }
        if tables.is_empty() {
            return Err(ParseError::OutlineWithoutExamples { line: header.line });
        }
        Ok(OutlineNode::new(header.keyword(), header.line)
            .with_title(header.title())
            .with_tags(tags)
            .with_steps(steps)
            .with_example_tables(tables))
    }

    fn examples(&mut self, header: &Token) -> Result<ExampleTableNode, ParseError> {
        self.advance();
        let tags = self.take_tags();
        self.skip_description();
        let table = self
            .table()?
            .ok_or(ParseError::ExamplesWithoutTable { line: header.line })?;
        if let Some(token) = self.peek() {
            if matches!(token.kind, TokenKind::DocStringBoundary { .. }) {
                return Err(unexpected(token.line, &token.kind));
            }
        }
        Ok(ExampleTableNode::new(table, header.keyword())
            .with_tags(tags)
            .with_line(header.line))
    }

    /// Whether the header at the cursor starts an example table.
    fn opens_examples(&self, kinds: &[KeywordCategory]) -> bool {
        if choose(kinds, &OUTLINE_TAIL) != KeywordCategory::Examples {
            return false;
        }
        !kinds.iter().any(|kind| BODY.contains(kind)) || self.header_opens_table()
    }

    /// Whether table rows follow the header at the cursor, past its
    /// description.
    fn header_opens_table(&self) -> bool {
        self.tokens
            .iter()
            .skip(self.pos + 1)
            .find(|token| !token.is_trivia() && token.kind != TokenKind::Text)
            .is_some_and(|token| matches!(token.kind, TokenKind::TableRow(_)))
    }

    fn steps(&mut self) -> Result<Vec<StepNode>, ParseError> {
        let mut steps = Vec::new();
        let mut previous = None;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Step(kind) => {
                    self.advance();
                    steps.push(self.step(token, kind.resolve(&mut previous))?);
                }
                TokenKind::TableRow(_) => {
                    return Err(ParseError::OrphanArgument {
                        line: token.line,
                        argument: "table",
                    });
                }
                TokenKind::DocStringBoundary { .. } => {
                    return Err(ParseError::OrphanArgument {
                        line: token.line,
                        argument: "doc string",
                    });
                }
                TokenKind::Text => return Err(unexpected(token.line, &token.kind)),
                _ => break,
            }
        }
        Ok(steps)
    }

    fn step(&mut self, token: &Token, keyword_type: StepKeyword) -> Result<StepNode, ParseError> {
        let step = StepNode::new(token.keyword(), keyword_type, token.text.as_str(), token.line);
        let Some(argument) = self.argument()? else {
            return Ok(step);
        };
        if let Some(next) = self.peek() {
            if matches!(next.kind, TokenKind::TableRow(_) | TokenKind::DocStringBoundary { .. }) {
                return Err(ParseError::MultipleArguments { line: next.line });
            }
        }
        Ok(step.with_argument(argument))
    }

    fn argument(&mut self) -> Result<Option<StepArgument>, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        match &token.kind {
            TokenKind::TableRow(_) => Ok(self.table()?.map(StepArgument::from)),
            TokenKind::DocStringBoundary { media_type } => {
                self.advance();
                let mut lines = Vec::new();
                while let Some(content) = self.tokens.get(self.pos) {
                    self.advance();
                    if content.kind != TokenKind::DocStringContent {
                        break;
                    }
                    lines.push(content.text.clone());
                }
                let doc = DocStringNode::new(lines, token.line).with_media_type(media_type.clone());
                Ok(Some(doc.into()))
            }
            _ => Ok(None),
        }
    }

    fn table(&mut self) -> Result<Option<TableNode>, ParseError> {
        let mut rows = Vec::new();
        while let Some(token) = self.peek() {
            let TokenKind::TableRow(cells) = &token.kind else {
                break;
            };
            rows.push((token.line, cells.clone()));
            self.advance();
        }
        let Some(&(first, _)) = rows.first() else {
            return Ok(None);
        };
        TableNode::new(rows)
            .map(Some)
            .map_err(|source| ParseError::InvalidNode {
                line: source.line().unwrap_or(first),
                source,
            })
    }

    /// Free text under the Feature header; step-like and row-like lines are
    /// kept as written.
    fn feature_description(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        while let Some(token) = self.peek() {
            if !matches!(
                token.kind,
                TokenKind::Text | TokenKind::Step(_) | TokenKind::TableRow(_)
            ) {
                break;
            }
            lines.push(token.raw.as_str());
            self.advance();
        }
        Some(lines.join("\n")).filter(|text| !text.is_empty())
    }

    fn skip_description(&mut self) {
        while self.peek().is_some_and(|token| token.kind == TokenKind::Text) {
            self.advance();
        }
    }

    /// Next meaningful token; `None` at end of input.
    fn peek(&mut self) -> Option<&'t Token> {
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind == TokenKind::Eof {
                return None;
            }
            if !token.is_trivia() {
                return Some(token);
            }
            self.pos += 1;
        }
        None
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn push_tags(&mut self, line: usize, names: &[String]) {
        let (_, tags) = self.pending.get_or_insert_with(|| (line, Tags::new()));
        tags.extend(names.iter().cloned());
    }

    fn take_tags(&mut self) -> Tags {
        self.pending.take().map(|(_, tags)| tags).unwrap_or_default()
    }
}

/// First candidate the current state expects, otherwise the first candidate.
fn choose(kinds: &[KeywordCategory], expected: &[KeywordCategory]) -> KeywordCategory {
    kinds
        .iter()
        .find(|kind| expected.contains(kind))
        .or_else(|| kinds.first())
        .copied()
        .unwrap_or(KeywordCategory::Feature)
}

fn unexpected(line: usize, kind: &TokenKind) -> ParseError {
    ParseError::Unexpected {
        line,
        found: kind.describe(),
    }
}
