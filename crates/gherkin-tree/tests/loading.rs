//! Behavioural tests for loading feature files from disk.
#![expect(
    clippy::expect_used,
    reason = "tests fail loudly when temporary files cannot be prepared"
)]

use std::fs;
use std::path::Path;

use gherkin_tree::{
    Error, FeatureFilter, FeatureNode, Gherkin, GherkinFileLoader, Loader, NameFilter,
    ParserConfig, TagFilter,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, text).expect("write feature");
}

#[fixture]
fn features() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "accounts/login.feature",
        "Feature: Login\n  @smoke\n  Scenario: Sign in\n    Given a user\n",
    );
    write(
        dir.path(),
        "accounts/logout.feature",
        "@wip\nFeature: Logout\n  Scenario: Sign out\n    Given a session\n",
    );
    write(
        dir.path(),
        "billing/broken.feature",
        "Feature: Broken\n  Scenario: S\n    Given a\n  Background:\n    Given b\n",
    );
    write(
        dir.path(),
        "billing/fr.feature",
        "# language: fr\nFonctionnalité: Facture\n  Scénario: Émettre\n    Soit une facture\n",
    );
    write(dir.path(), "notes.md", "not a feature\n");
    dir
}

fn titles(features: &[FeatureNode]) -> Vec<&str> {
    features.iter().filter_map(FeatureNode::title).collect()
}

#[rstest]
fn loads_every_file_and_reports_failures(features: TempDir) {
    let gherkin = Gherkin::from_config(&ParserConfig::default()).expect("manager");
    let report = gherkin.load(&features.path().to_string_lossy());

    assert_eq!(titles(&report.features), vec!["Login", "Logout", "Facture"]);
    assert_eq!(report.failures.len(), 1);
    let failure = report.failures.first().expect("failure");
    assert!(failure.resource.ends_with("broken.feature"));
    assert!(matches!(failure.error, Error::Parse { .. }));
    assert_eq!(failure.error.line(), Some(4));
    assert!(
        report
            .features
            .iter()
            .all(|feature| feature.file().is_some_and(|file| Path::new(file).is_absolute()))
    );
}

#[rstest]
fn relative_resources_use_the_base_path(features: TempDir) {
    let mut gherkin = Gherkin::from_config(&ParserConfig::default()).expect("manager");
    gherkin.set_base_path(features.path());
    let report = gherkin.load("accounts");
    assert!(report.is_success());
    assert_eq!(titles(&report.features), vec!["Login", "Logout"]);

    let report = gherkin.load("billing/fr.feature");
    let feature = report.features.first().expect("french feature");
    assert_eq!(feature.language(), "fr");
}

#[rstest]
fn filters_drop_unmatched_features(features: TempDir) {
    let mut gherkin = Gherkin::from_config(&ParserConfig::default()).expect("manager");
    gherkin.set_base_path(features.path());
    gherkin.add_filter(TagFilter::new("@smoke"));
    let report = gherkin.load("accounts");
    assert_eq!(titles(&report.features), vec!["Login"]);

    let wip = TagFilter::new("@wip");
    let filters: [&dyn FeatureFilter; 1] = [&wip];
    gherkin.set_filters(Vec::new());
    let report = gherkin.load_with_filters("accounts", &filters);
    assert_eq!(titles(&report.features), vec!["Logout"]);
}

#[rstest]
fn name_filters_select_features_and_scenarios(features: TempDir) {
    let mut gherkin = Gherkin::from_config(&ParserConfig::default()).expect("manager");
    gherkin.set_base_path(features.path());
    gherkin.add_filter(NameFilter::new("/^Log(in|out)$/").expect("pattern"));
    let report = gherkin.load("accounts");
    assert_eq!(titles(&report.features), vec!["Login", "Logout"]);

    let sign_out: Box<dyn FeatureFilter> = Box::new(NameFilter::new("Sign out").expect("pattern"));
    gherkin.set_filters(vec![sign_out]);
    let report = gherkin.load("accounts");
    assert_eq!(titles(&report.features), vec!["Logout"]);
}

#[rstest]
fn unsupported_resources_are_ignored(features: TempDir) {
    let mut gherkin = Gherkin::from_config(&ParserConfig::default()).expect("manager");
    gherkin.set_base_path(features.path());
    let report = gherkin.load("notes.md");
    assert!(report.features.is_empty());
    assert!(report.is_success());
}

#[rstest]
fn file_cache_serves_unchanged_features(features: TempDir) {
    let cache_root = TempDir::new().expect("cache dir");
    let config = ParserConfig::default().with_cache_dir(cache_root.path());
    let mut gherkin = Gherkin::from_config(&config).expect("manager");
    gherkin.set_base_path(features.path());

    let first = gherkin.load("accounts/login.feature");
    let entries = fs::read_dir(cache_root.path())
        .expect("cache root")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .flat_map(|partition| fs::read_dir(partition.path()).expect("partition"))
        .filter_map(Result::ok)
        .count();
    assert_eq!(entries, 1);

    let second = gherkin.load("accounts/login.feature");
    assert_eq!(first.features, second.features);
}

#[test]
fn unknown_default_language_is_rejected() {
    let config = ParserConfig::default().with_default_language("xx-unknown");
    assert!(matches!(
        Gherkin::from_config(&config),
        Err(Error::Keyword(_))
    ));
}

#[test]
fn unwritable_cache_directory_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let blocker = dir.path().join("file");
    fs::write(&blocker, "").expect("blocker file");
    let config = ParserConfig::default().with_cache_dir(&blocker);
    assert!(matches!(Gherkin::from_config(&config), Err(Error::Cache(_))));
}

#[rstest]
fn loader_splits_directories(features: TempDir) {
    let loader = GherkinFileLoader::new(gherkin_tree::Parser::default())
        .with_base_path(features.path());
    let units = loader.resources("billing").expect("enumerate");
    let names: Vec<_> = units
        .iter()
        .filter_map(|unit| Path::new(unit).file_name())
        .filter_map(|name| name.to_str())
        .collect();
    assert_eq!(names, vec!["broken.feature", "fr.feature"]);
}
