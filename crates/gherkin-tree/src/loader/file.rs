//! Loader for `.feature` files and directories of them.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Loader;
use super::discovery::{collect_feature_files, is_feature_file};
use crate::cache::FeatureCache;
use crate::error::Error;
use crate::node::FeatureNode;
use crate::parser::Parser;

/// Loads Gherkin feature files from disk.
///
/// Resources are paths to a `.feature` file or to a directory, which is
/// walked recursively. Relative paths are resolved against the base path
/// when one is set. Parsed features carry their canonical absolute path.
///
/// When a [`FeatureCache`] is attached, a file whose cache entry is newer
/// than the file itself is read from the cache instead of being parsed.
pub struct GherkinFileLoader<'k> {
    parser: Parser<'k>,
    base_path: Option<PathBuf>,
    cache: Option<Box<dyn FeatureCache>>,
}

impl<'k> GherkinFileLoader<'k> {
    /// Create a loader parsing with `parser`.
    #[must_use]
    pub fn new(parser: Parser<'k>) -> Self {
        Self {
            parser,
            base_path: None,
            cache: None,
        }
    }

    /// Attach a cache of parsed features.
    #[must_use]
    pub fn with_cache(mut self, cache: impl FeatureCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Resolve relative resources against `path`.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// The attached cache, if any.
    #[must_use]
    pub fn cache(&self) -> Option<&dyn FeatureCache> {
        self.cache.as_deref()
    }

    /// Directory relative resources are resolved against.
    #[must_use]
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    fn resolve(&self, resource: &str) -> PathBuf {
        let path = Path::new(resource);
        let joined = match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        };
        joined.canonicalize().unwrap_or(joined)
    }

    fn load_file(&self, path: &Path) -> Result<FeatureNode, Error> {
        let key = path.to_string_lossy();
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let modified = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(io_error)?;

        if let Some(cache) = &self.cache {
            if cache.is_fresh(&key, modified) {
                match cache.read(&key) {
                    Ok(feature) => {
                        debug!(path = %key, "loaded feature from cache");
                        return Ok(feature);
                    }
                    Err(err) => warn!(path = %key, error = %err, "ignoring unreadable cache entry"),
                }
            }
        }

        let text = fs::read_to_string(path).map_err(io_error)?;
        let feature = self.parser.parse(&text, Some(key.as_ref()))?;

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.write(&key, &feature) {
                warn!(path = %key, error = %err, "failed to cache feature");
            }
        }
        Ok(feature)
    }
}

impl std::fmt::Debug for GherkinFileLoader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GherkinFileLoader")
            .field("language", &self.parser.language())
            .field("base_path", &self.base_path)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl Loader for GherkinFileLoader<'_> {
    fn supports(&self, resource: &str) -> bool {
        let path = self.resolve(resource);
        path.is_dir() || (path.is_file() && is_feature_file(&path))
    }

    fn load(&self, resource: &str) -> Result<Vec<FeatureNode>, Error> {
        let path = self.resolve(resource);
        if !path.is_dir() {
            return Ok(vec![self.load_file(&path)?]);
        }
        self.files(&path)?
            .iter()
            .map(|file| self.load_file(file))
            .collect()
    }

    fn set_base_path(&mut self, path: &Path) {
        self.base_path = Some(path.to_path_buf());
    }

    fn resources(&self, resource: &str) -> Result<Vec<String>, Error> {
        let path = self.resolve(resource);
        if !path.is_dir() {
            return Ok(vec![path.to_string_lossy().into_owned()]);
        }
        Ok(self
            .files(&path)?
            .iter()
            .map(|file| file.to_string_lossy().into_owned())
            .collect())
    }
}

impl GherkinFileLoader<'_> {
    fn files(&self, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let files = collect_feature_files(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!(dir = %dir.display(), count = files.len(), "discovered feature files");
        Ok(files)
    }
}
