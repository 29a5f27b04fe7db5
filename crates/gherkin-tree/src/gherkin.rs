//! Batch loading of features through registered loaders and filters.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::FileCache;
use crate::config::ParserConfig;
use crate::error::Error;
use crate::filter::FeatureFilter;
use crate::loader::{GherkinFileLoader, Loader};
use crate::node::FeatureNode;
use crate::parser::Parser;

/// A resource unit that failed to load.
#[derive(Debug)]
pub struct LoadFailure {
    /// The unit that failed, as produced by [`Loader::resources`].
    pub resource: String,
    /// Why it failed.
    pub error: Error,
}

/// Outcome of [`Gherkin::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Features that loaded and survived filtering, in load order.
    pub features: Vec<FeatureNode>,
    /// Units that could not be loaded.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Return `true` when every unit loaded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads features from resources, applying every registered filter.
///
/// Each resource is split into units by the first loader that supports it.
/// A unit that fails to load is recorded in the report and the remaining
/// units are still loaded.
///
/// # Examples
///
/// ```no_run
/// use gherkin_tree::{Gherkin, ParserConfig, TagFilter};
///
/// let mut gherkin = Gherkin::from_config(&ParserConfig::default())?;
/// gherkin.add_filter(TagFilter::new("~@wip"));
/// let report = gherkin.load("tests/features");
/// for failure in &report.failures {
///     eprintln!("{}: {}", failure.resource, failure.error);
/// }
/// # Ok::<(), gherkin_tree::Error>(())
/// ```
#[derive(Default)]
pub struct Gherkin<'k> {
    loaders: Vec<Box<dyn Loader + 'k>>,
    filters: Vec<Box<dyn FeatureFilter>>,
    base_path: Option<PathBuf>,
}

impl Gherkin<'static> {
    /// Create a manager with a [`GherkinFileLoader`] configured from
    /// `config`, caching parsed features on disk when a cache directory is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the default language is unknown or the
    /// cache directory is not writable.
    pub fn from_config(config: &ParserConfig) -> Result<Self, Error> {
        let mut loader = GherkinFileLoader::new(Parser::from_config(config)?);
        if let Some(dir) = &config.cache_dir {
            loader = loader.with_cache(FileCache::new(dir)?);
        }
        let mut gherkin = Self::new();
        gherkin.add_loader(loader);
        Ok(gherkin)
    }
}

impl<'k> Gherkin<'k> {
    /// Create a manager with no loaders or filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader. Earlier loaders take precedence.
    pub fn add_loader(&mut self, loader: impl Loader + 'k) {
        let mut loader = Box::new(loader);
        if let Some(path) = &self.base_path {
            loader.set_base_path(path);
        }
        self.loaders.push(loader);
    }

    /// Register a filter applied to every loaded feature.
    pub fn add_filter(&mut self, filter: impl FeatureFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Replace every registered filter.
    pub fn set_filters(&mut self, filters: Vec<Box<dyn FeatureFilter>>) {
        self.filters = filters;
    }

    /// Resolve relative resources against `path` in every loader.
    pub fn set_base_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        for loader in &mut self.loaders {
            loader.set_base_path(path);
        }
        self.base_path = Some(path.to_path_buf());
    }

    /// Load `resource` and apply the registered filters.
    #[must_use]
    pub fn load(&self, resource: &str) -> LoadReport {
        self.load_with_filters(resource, &[])
    }

    /// Load `resource` and apply the registered filters followed by
    /// `extra`.
    ///
    /// A feature left without scenarios is dropped unless every filter
    /// matches it as a whole. A resource no loader supports yields an empty
    /// report.
    #[must_use]
    pub fn load_with_filters(&self, resource: &str, extra: &[&dyn FeatureFilter]) -> LoadReport {
        let mut report = LoadReport::default();
        let Some(loader) = self.loaders.iter().find(|loader| loader.supports(resource)) else {
            debug!(resource, "no loader supports resource");
            return report;
        };

        let units = match loader.resources(resource) {
            Ok(units) => units,
            Err(error) => {
                warn!(resource, error = %error, "failed to enumerate resource");
                report.failures.push(LoadFailure {
                    resource: resource.to_string(),
                    error,
                });
                return report;
            }
        };

        let mut filters: Vec<&dyn FeatureFilter> = self
            .filters
            .iter()
            .map(|filter| &**filter as &dyn FeatureFilter)
            .collect();
        filters.extend_from_slice(extra);

        for unit in units {
            match loader.load(&unit) {
                Ok(features) => report
                    .features
                    .extend(features.into_iter().filter_map(|feature| apply(&filters, feature))),
                Err(error) => {
                    warn!(resource = %unit, error = %error, "skipping feature resource");
                    report.failures.push(LoadFailure {
                        resource: unit,
                        error,
                    });
                }
            }
        }

        debug!(
            resource,
            features = report.features.len(),
            failures = report.failures.len(),
            "loaded resource"
        );
        report
    }
}

fn apply(filters: &[&dyn FeatureFilter], feature: FeatureNode) -> Option<FeatureNode> {
    let filtered = filters
        .iter()
        .fold(feature, |feature, filter| filter.filter_feature(&feature));
    let keep = filtered.has_scenarios()
        || filters
            .iter()
            .all(|filter| filter.is_feature_match(&filtered));
    keep.then_some(filtered)
}

impl std::fmt::Debug for Gherkin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gherkin")
            .field("loaders", &self.loaders.len())
            .field("filters", &self.filters.len())
            .field("base_path", &self.base_path)
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests inspect load reports")]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::error::ParseError;
    use crate::filter::TagFilter;
    use crate::node::{ScenarioDefinition, ScenarioNode, TaggedNode, Tags};

    struct StubLoader;

    fn feature(title: &str, tags: &[&str], scenarios: usize) -> FeatureNode {
        let scenarios: Vec<ScenarioDefinition> = (0..scenarios)
            .map(|index| ScenarioNode::new("Scenario", index + 2).into())
            .collect();
        FeatureNode::new("Feature", "en", 1)
            .with_title(Some(title.to_string()))
            .with_tags(tags.iter().copied().collect::<Tags>())
            .with_scenarios(scenarios)
    }

    impl Loader for StubLoader {
        fn supports(&self, resource: &str) -> bool {
            resource.starts_with("stub:")
        }

        fn load(&self, resource: &str) -> Result<Vec<FeatureNode>, Error> {
            match resource {
                "stub:bad" => Err(Error::Parse {
                    file: Some(resource.to_string()),
                    source: ParseError::MissingFeature,
                }),
                "stub:empty-wip" => Ok(vec![feature("empty wip", &["wip"], 0)]),
                "stub:empty" => Ok(vec![feature("empty", &[], 0)]),
                other => Ok(vec![feature(other, &[], 1)]),
            }
        }

        fn resources(&self, resource: &str) -> Result<Vec<String>, Error> {
            match resource {
                "stub:all" => Ok(["stub:a", "stub:bad", "stub:b"]
                    .into_iter()
                    .map(str::to_string)
                    .collect()),
                "stub:unlistable" => Err(Error::Io {
                    path: PathBuf::from(resource),
                    source: std::io::Error::other("denied"),
                }),
                other => Ok(vec![other.to_string()]),
            }
        }
    }

    fn titles(report: &LoadReport) -> Vec<&str> {
        report.features.iter().filter_map(FeatureNode::title).collect()
    }

    #[test]
    fn collects_and_continues_past_failures() {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        let report = gherkin.load("stub:all");
        assert_eq!(titles(&report), vec!["stub:a", "stub:b"]);
        assert!(!report.is_success());
        let failure = report.failures.first().expect("one failure");
        assert_eq!(failure.resource, "stub:bad");
        assert_eq!(failure.error.file(), Some("stub:bad"));
    }

    #[test]
    fn enumeration_failures_are_reported() {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        let report = gherkin.load("stub:unlistable");
        assert!(report.features.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn unsupported_resources_yield_nothing() {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        let report = gherkin.load("elsewhere");
        assert!(report.features.is_empty());
        assert!(report.is_success());
    }

    #[rstest]
    #[case("stub:empty", &["wip"], 0)]
    #[case("stub:empty-wip", &["wip"], 1)]
    #[case("stub:empty", &[], 1)]
    fn features_without_scenarios_need_a_feature_match(
        #[case] resource: &str,
        #[case] filter: &[&str],
        #[case] expected: usize,
    ) {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        for expression in filter {
            gherkin.add_filter(TagFilter::new(&format!("@{expression}")));
        }
        assert_eq!(gherkin.load(resource).features.len(), expected);
    }

    #[test]
    fn set_filters_replaces_registered_filters() {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        gherkin.add_filter(TagFilter::new("@wip"));
        assert!(gherkin.load("stub:a").features.is_empty());
        gherkin.set_filters(Vec::new());
        assert_eq!(gherkin.load("stub:a").features.len(), 1);
    }

    #[test]
    fn extra_filters_apply_after_registered_ones() {
        let mut gherkin = Gherkin::new();
        gherkin.add_loader(StubLoader);
        let wip = TagFilter::new("@wip");
        let report = gherkin.load_with_filters("stub:a", &[&wip]);
        assert!(report.features.is_empty());
        let report = gherkin.load_with_filters("stub:empty-wip", &[&wip]);
        assert!(report.features.iter().all(|feature| feature.has_tag("wip")));
        assert_eq!(report.features.len(), 1);
    }

    struct Recorder<'a>(&'a Mutex<Vec<PathBuf>>);

    impl Loader for Recorder<'_> {
        fn supports(&self, _resource: &str) -> bool {
            false
        }

        fn load(&self, _resource: &str) -> Result<Vec<FeatureNode>, Error> {
            Ok(Vec::new())
        }

        fn set_base_path(&mut self, path: &Path) {
            self.0.lock().expect("lock").push(path.to_path_buf());
        }
    }

    #[test]
    fn base_path_reaches_every_loader() {
        let seen = Mutex::new(Vec::new());
        {
            let mut gherkin = Gherkin::new();
            gherkin.add_loader(Recorder(&seen));
            gherkin.set_base_path("/base/path");
            gherkin.add_loader(Recorder(&seen));
        }
        let seen = seen.into_inner().expect("lock");
        assert_eq!(
            seen,
            vec![PathBuf::from("/base/path"), PathBuf::from("/base/path")]
        );
    }
}
