//! Unit tests for the parser.

#![expect(clippy::expect_used, reason = "tests parse fixed inputs")]

use gherkin_tree_keywords::{KeywordDataset, StepKeyword};
use rstest::rstest;

use super::*;
use crate::error::ParseError;
use crate::node::{KeywordNode, ScenarioLike, StepArgument, StepNode, TaggedNode};

fn parse(text: &str) -> FeatureNode {
    Parser::default().parse(text, None).expect("input should parse")
}

fn parse_error(text: &str) -> ParseError {
    match Parser::default().parse(text, None) {
        Err(Error::Parse { source, .. }) => source,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

const LOGIN: &str = "\
@auth
Feature: Login
  In order to use the site
  As a user

  Background:
    Given a registered user

  @smoke
  Scenario: Successful login
    Given I am on the login page
    When I submit:
      | username | password |
      | everzet  | qwerty   |
    Then I see the dashboard

  Scenario Outline: Bad login <name>
    Given I am <name>
    Then I see <message>

    @en
    Examples: English
      | name  | message |
      | alice | denied  |

    Examples:
      | name | message |
      | bob  | locked  |
";

#[test]
fn builds_outlines_with_scoped_example_tables() {
    let feature = parse(LOGIN);
    let outline = feature
        .scenarios()
        .get(1)
        .and_then(|s| s.as_outline())
        .expect("outline");
    let tables = outline.example_tables();
    assert_eq!(tables.len(), 2);
    let first = tables.first().expect("first table");
    assert_eq!(first.keyword(), "Examples");
    assert_eq!(first.tags().as_slice(), ["en"]);
    assert!(tables.get(1).is_some_and(|table| !table.has_tags()));

    let examples = outline.examples();
    assert_eq!(examples.len(), 2);
    let texts: Vec<_> = examples
        .iter()
        .flat_map(|example| example.steps().iter().map(StepNode::text))
        .collect();
    assert_eq!(
        texts,
        vec!["I am alice", "I see denied", "I am bob", "I see locked"]
    );
    assert_eq!(
        examples.first().map(crate::node::ExampleNode::name),
        Some("Bad login alice #1".to_string())
    );
}

#[test]
fn resolves_conjunctions_to_previous_keyword() {
    let feature = parse(
        "Feature: F\n  Scenario: S\n    Given a\n    And b\n    When c\n    But d\n    * e\n",
    );
    let steps = feature.scenarios().first().expect("scenario").steps();
    let types: Vec<_> = steps.iter().map(StepNode::keyword_type).collect();
    assert_eq!(
        types,
        vec![
            StepKeyword::Given,
            StepKeyword::Given,
            StepKeyword::When,
            StepKeyword::When,
            StepKeyword::When,
        ]
    );
    let keywords: Vec<_> = steps.iter().map(KeywordNode::keyword).collect();
    assert_eq!(keywords, vec!["Given", "And", "When", "But", "*"]);
}

#[test]
fn leading_conjunction_defaults_to_given() {
    let feature = parse("Feature: F\n  Scenario: S\n    And a\n    Then b\n");
    let steps = feature.scenarios().first().expect("scenario").steps();
    assert_eq!(steps.first().map(StepNode::keyword_type), Some(StepKeyword::Given));
}

#[test]
fn conjunction_resolution_restarts_per_block() {
    let feature = parse(
        "Feature: F\n  Background:\n    When x\n  Scenario: S\n    But y\n",
    );
    let steps = feature.scenarios().first().expect("scenario").steps();
    assert_eq!(steps.first().map(StepNode::keyword_type), Some(StepKeyword::Given));
}

#[test]
fn doc_strings_keep_content_verbatim() {
    let feature = parse(concat!(
        "Feature: F\n",
        "  Scenario: S\n",
        "    Given a page:\n",
        "      \"\"\"html\n",
        "      <h1>Title</h1>\n",
        "\n",
        "      | not | a table |\n",
        "      Then not a step\n",
        "      \"\"\"\n",
        "    Then it renders\n",
    ));
    let steps = feature.scenarios().first().expect("scenario").steps();
    assert_eq!(steps.len(), 2);
    let doc = steps
        .first()
        .and_then(StepNode::argument)
        .and_then(StepArgument::as_doc_string)
        .expect("doc string");
    assert_eq!(doc.raw(), "<h1>Title</h1>\n\n| not | a table |\nThen not a step");
    assert_eq!(doc.media_type(), Some("html"));
    assert_eq!(doc.line(), 4);
}

#[test]
fn flattens_rules() {
    let feature = parse(concat!(
        "Feature: F\n",
        "  Background:\n",
        "    Given feature setup\n",
        "  @billing\n",
        "  Rule: Invoices\n",
        "    Background:\n",
        "      Given rule setup\n",
        "    @slow\n",
        "    Scenario: A\n",
        "      Then a\n",
        "  Rule: Other\n",
        "    Scenario: B\n",
        "      Then b\n",
    ));
    assert_eq!(
        feature.background().map(|background| background.steps().len()),
        Some(1)
    );
    let scenarios = feature.scenarios();
    assert_eq!(scenarios.len(), 2);
    let first = scenarios.first().expect("first");
    assert_eq!(first.tags().as_slice(), ["billing", "slow"]);
    let texts: Vec<_> = first.steps().iter().map(StepNode::text).collect();
    assert_eq!(texts, vec!["rule setup", "a"]);
    let second = scenarios.get(1).expect("second");
    assert!(!second.has_tags());
    assert_eq!(second.steps().len(), 1);
}

#[test]
fn tolerates_comments_and_blank_lines_between_constructs() {
    let feature = parse(concat!(
        "# language: en\n",
        "# leading comment\n",
        "Feature: F\n",
        "\n",
        "  # between\n",
        "  Scenario: S\n",
        "    Given a\n",
        "    # inside table\n",
        "      | a |\n",
        "\n",
        "      | b |\n",
    ));
    let table = feature
        .scenarios()
        .first()
        .and_then(|s| s.steps().first())
        .and_then(StepNode::argument)
        .and_then(StepArgument::as_table)
        .expect("table");
    assert_eq!(table.len(), 2);
}

#[test]
fn picks_header_category_from_parser_state() {
    let feature = Parser::default()
        .with_default_language("de")
        .parse(
            concat!(
                "Funktionalität: F\n",
                "  Szenariogrundriss: O\n",
                "    Angenommen <x>\n",
                "    Beispiele:\n",
                "      | x |\n",
                "      | 1 |\n",
                "  Szenario: S\n",
                "    Dann y\n",
            ),
            None,
        )
        .expect("german should parse");
    assert_eq!(feature.language(), "de");
    assert!(feature.scenarios().get(1).and_then(|s| s.as_scenario()).is_some());
}

const SHARED_KEYWORD: &str = r#"{
    "xx": {
        "name": "Shared", "native": "Shared", "feature": "Feature",
        "scenario_outline": "Outline", "scenario": "Case", "examples": "Case",
        "given": "*|Given"
    }
}"#;

#[test]
fn shared_examples_keyword_opens_a_table_only_before_rows() {
    let dataset = KeywordDataset::from_json(SHARED_KEYWORD, "xx").expect("dataset loads");
    let feature = Parser::new(&dataset)
        .parse(
            concat!(
                "Feature: F\n",
                "  Outline: O\n",
                "    Given <x>\n",
                "  Case:\n",
                "    | x |\n",
                "    | 1 |\n",
                "  Case: S\n",
                "    Given y\n",
            ),
            None,
        )
        .expect("shared keyword should parse");
    let outline = feature
        .scenarios()
        .first()
        .and_then(|s| s.as_outline())
        .expect("outline");
    assert_eq!(outline.example_tables().len(), 1);
    let scenario = feature
        .scenarios()
        .get(1)
        .and_then(|s| s.as_scenario())
        .expect("scenario after outline");
    assert_eq!(scenario.title(), Some("S"));
}

#[test]
fn records_absolute_file() {
    let feature = Parser::default()
        .parse("Feature: F\n", Some("/features/f.feature"))
        .expect("absolute file");
    assert_eq!(feature.file(), Some("/features/f.feature"));
    assert!(!feature.has_scenarios());
}

#[test]
fn rejects_relative_file() {
    let err = Parser::default()
        .parse("Feature: F\n", Some("features/f.feature"))
        .expect_err("relative file should fail");
    assert!(matches!(err, Error::Node(_)));
}

#[test]
fn parse_errors_carry_file_and_line() {
    let err = Parser::default()
        .parse(
            "Feature: F\n  Scenario: S\n    Given a\n  Background:\n",
            Some("/f.feature"),
        )
        .expect_err("background after scenario");
    assert_eq!(err.file(), Some("/f.feature"));
    assert_eq!(err.line(), Some(4));
}

#[rstest]
#[case("", ParseError::MissingFeature)]
#[case("@only @tags\n# and a comment\n", ParseError::MissingFeature)]
#[case(
    "Feature: F\n  Scenario: S\n    Given a\n  Background:\n    Given b\n",
    ParseError::BackgroundAfterScenario { line: 4 }
)]
#[case(
    "Feature: F\n  Background:\n  Background:\n",
    ParseError::DuplicateBackground { line: 3 }
)]
#[case(
    "Feature: F\n  @tag\n  Background:\n",
    ParseError::TaggedBackground { line: 3 }
)]
#[case(
    "Feature: F\n  Scenario: S\n    Given a\n  @dangling\n",
    ParseError::DanglingTags { line: 4 }
)]
#[case(
    "Feature: F\n  Scenario: S\n    Given a\n  Examples:\n    | a |\n",
    ParseError::ExamplesWithoutOutline { line: 4 }
)]
#[case(
    "Feature: F\n  Scenario Outline: O\n    Given <a>\n",
    ParseError::OutlineWithoutExamples { line: 2 }
)]
#[case(
    "Feature: F\n  Scenario Outline: O\n    Given <a>\n  Examples:\n  Scenario: S\n",
    ParseError::ExamplesWithoutTable { line: 4 }
)]
#[case(
    "Feature: F\n  Scenario: S\n    Given a\n      | a |\n      \"\"\"\n      x\n      \"\"\"\n",
    ParseError::MultipleArguments { line: 5 }
)]
#[case(
    "Feature: F\n  Scenario: S\n    | a |\n",
    ParseError::OrphanArgument { line: 3, argument: "table" }
)]
#[case(
    "Feature: F\n  Feature: G\n",
    ParseError::Unexpected { line: 2, found: "feature header".to_string() }
)]
#[case(
    "Feature: F\n  Scenario: S\n    Given a\n    free text\n",
    ParseError::Unexpected { line: 4, found: "text".to_string() }
)]
fn rejects_grammar_violations(#[case] text: &str, #[case] expected: ParseError) {
    assert_eq!(parse_error(text), expected);
}

#[test]
fn rejects_ragged_tables_at_the_offending_row() {
    let err = Parser::default()
        .parse(
            "Feature: F\n  Scenario: S\n    Given a\n      | a | b |\n      | 1 | 2 |\n      | 3 |\n",
            None,
        )
        .expect_err("ragged table");
    assert_eq!(err.line(), Some(6));
    assert!(matches!(
        err,
        Error::Parse {
            source: ParseError::InvalidNode { line: 6, .. },
            ..
        }
    ));
}

#[test]
fn lex_errors_are_wrapped() {
    let err = Parser::default()
        .parse("Just text\nFeature: F\n", None)
        .expect_err("content before feature");
    assert!(matches!(err, Error::Lex { .. }));
    assert_eq!(err.line(), Some(1));
}

#[test]
fn unknown_default_language_falls_back() {
    let parser = Parser::default().with_default_language("xx");
    assert_eq!(parser.language(), "en");
    assert_eq!(parser.parse("Feature: F\n", None).expect("parse").language(), "en");
}
