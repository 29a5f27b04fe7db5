//! Behavioural tests for parsing whole feature files.
#![expect(
    clippy::expect_used,
    reason = "tests fail loudly when a fixture does not parse"
)]

use gherkin_tree::{
    Error, KeywordDataset, KeywordNode, ParseError, Parser, ScenarioDefinition, ScenarioLike,
    StepArgument, StepKeyword, StepNode, TaggedNode, parse,
};
use rstest::rstest;

const SHOPPING: &str = r#"# a leading comment
@checkout @smoke
Feature: Shopping basket
  In order to buy things
  As a customer

  Background:
    Given an empty basket

  Scenario: Adding an item
    Given the catalogue:
      | sku | price |
      | A1  | 10    |
    And I am signed in
    When I add "A1"
    But I do not check out
    Then the basket total is 10

  @slow
  Scenario: Gift message
    When I write a gift message:
      """
      Dear friend,

      | not | a | table |
      Given not a step
      """
    Then the message is saved
"#;

fn step_types(steps: &[StepNode]) -> Vec<StepKeyword> {
    steps.iter().map(StepNode::keyword_type).collect()
}

#[test]
fn builds_the_feature_tree() {
    let feature = parse(SHOPPING).expect("feature parses");
    assert_eq!(feature.title(), Some("Shopping basket"));
    assert_eq!(feature.description(), Some("In order to buy things\nAs a customer"));
    assert_eq!(feature.line(), 3);
    assert_eq!(feature.language(), "en");
    assert!(feature.has_tag("checkout") && feature.has_tag("smoke"));
    assert_eq!(
        feature.background().map(|background| background.steps().len()),
        Some(1)
    );

    let titles: Vec<_> = feature.scenarios().iter().map(ScenarioLike::title).collect();
    assert_eq!(titles, vec![Some("Adding an item"), Some("Gift message")]);

    let first = feature.scenarios().first().expect("first scenario");
    let table = first
        .steps()
        .first()
        .and_then(StepNode::argument)
        .and_then(StepArgument::as_table)
        .expect("catalogue table");
    let rows = table.columns_hash();
    assert_eq!(
        rows.first().and_then(|row| row.get("price")).map(String::as_str),
        Some("10")
    );
    assert_eq!(table.line(), Some(12));
}

#[test]
fn parsing_is_deterministic() {
    let first = parse(SHOPPING).expect("first parse");
    let second = parse(SHOPPING).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn conjunctions_inherit_the_previous_keyword_type() {
    let feature = parse(concat!(
        "Feature: F\n",
        "  Scenario: S\n",
        "    Given a\n",
        "    And b\n",
        "    When c\n",
        "    But d\n",
    ))
    .expect("feature parses");
    let scenario = feature.scenarios().first().expect("scenario");
    assert_eq!(
        step_types(scenario.steps()),
        vec![
            StepKeyword::Given,
            StepKeyword::Given,
            StepKeyword::When,
            StepKeyword::When
        ]
    );
    let keywords: Vec<_> = scenario.steps().iter().map(KeywordNode::keyword).collect();
    assert_eq!(keywords, vec!["Given", "And", "When", "But"]);
}

#[test]
fn doc_strings_are_captured_verbatim() {
    let feature = parse(SHOPPING).expect("feature parses");
    let gift = feature.scenarios().get(1).expect("second scenario");
    assert!(gift.has_tag("slow"));
    let doc = gift
        .steps()
        .first()
        .and_then(StepNode::argument)
        .and_then(StepArgument::as_doc_string)
        .expect("doc string");
    assert_eq!(
        doc.lines(),
        ["Dear friend,", "", "| not | a | table |", "Given not a step"]
    );
    assert_eq!(gift.steps().len(), 2);
}

#[rstest]
#[case::french(
    "# language: fr\nFonctionnalité: Panier\n  Scénario: Ajout\n    Soit un panier\n    Et un article\n    Alors il y a un article\n",
    "fr",
    &[StepKeyword::Given, StepKeyword::Given, StepKeyword::Then]
)]
#[case::russian(
    "# language: ru\nФункция: Корзина\n  Сценарий: Добавление\n    Дано пустая корзина\n    Когда я добавляю товар\n    То в корзине один товар\n",
    "ru",
    &[StepKeyword::Given, StepKeyword::When, StepKeyword::Then]
)]
#[case::japanese(
    "# language: ja\nフィーチャ: 計算\n  シナリオ: 足し算\n    前提1を入力\n    かつ2を入力\n    ならば3を表示\n",
    "ja",
    &[StepKeyword::Given, StepKeyword::Given, StepKeyword::Then]
)]
fn honours_the_language_pragma(
    #[case] text: &str,
    #[case] language: &str,
    #[case] expected: &[StepKeyword],
) {
    let feature = parse(text).expect("feature parses");
    assert_eq!(feature.language(), language);
    let scenario = feature.scenarios().first().expect("scenario");
    assert_eq!(step_types(scenario.steps()), expected);
}

#[test]
fn default_language_applies_without_pragma() {
    let parser = Parser::new(KeywordDataset::builtin()).with_default_language("es");
    let feature = parser
        .parse(
            "Característica: Cesta\n  Escenario: Vacía\n    Dado una cesta\n    Entonces está vacía\n",
            None,
        )
        .expect("feature parses");
    assert_eq!(feature.language(), "es");
    assert_eq!(feature.scenarios().len(), 1);
}

#[test]
fn rules_are_flattened_into_the_feature() {
    let feature = parse(concat!(
        "Feature: F\n",
        "  @billing\n",
        "  Rule: Invoices\n",
        "    Background:\n",
        "      Given an account\n",
        "    Scenario: Issue\n",
        "      When I issue an invoice\n",
    ))
    .expect("feature parses");
    let scenario = feature.scenarios().first().expect("scenario");
    assert!(matches!(scenario, ScenarioDefinition::Scenario(_)));
    assert!(scenario.has_tag("billing"));
    let texts: Vec<_> = scenario.steps().iter().map(StepNode::text).collect();
    assert_eq!(texts, vec!["an account", "I issue an invoice"]);
}

#[rstest]
#[case::empty("", None)]
#[case::background_after_scenario(
    "Feature: F\n  Scenario: S\n    Given a\n  Background:\n    Given b\n",
    Some(4)
)]
#[case::outline_without_examples("Feature: F\n  Scenario Outline: O\n    Given <a>\n", Some(2))]
#[case::second_feature("Feature: F\nFeature: G\n", Some(2))]
#[case::ragged_table(
    "Feature: F\n  Scenario: S\n    Given a\n      | a | b |\n      | 1 |\n",
    Some(5)
)]
fn grammar_errors_carry_line_and_file(#[case] text: &str, #[case] line: Option<usize>) {
    let err = Parser::default()
        .parse(text, Some("/features/broken.feature"))
        .expect_err("invalid feature");
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(err.line(), line);
    assert_eq!(err.file(), Some("/features/broken.feature"));
    assert!(err.to_string().starts_with("/features/broken.feature: "));
}

#[test]
fn unterminated_doc_strings_are_lex_errors() {
    let err = parse("Feature: F\n  Scenario: S\n    Given a\n      \"\"\"\n      text\n")
        .expect_err("unterminated doc string");
    assert!(matches!(err, Error::Lex { .. }));
    assert_eq!(err.line(), Some(4));
}

#[test]
fn missing_feature_is_reported() {
    let err = parse("# just a comment\n@tag\n").expect_err("no feature");
    assert!(matches!(
        err,
        Error::Parse {
            source: ParseError::MissingFeature,
            ..
        }
    ));
}
