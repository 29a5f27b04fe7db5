//! On-disk feature cache.
//!
//! Entries live under `<root>/<partition>/<hash>.feature.cache`, where the
//! partition is derived from the crate version and the encoding schema, so
//! trees written by an incompatible build are never read back. Each entry is
//! a JSON envelope recording both values alongside the feature.

use std::fs;
use std::hash::Hasher;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FeatureCache;
use crate::error::CacheError;
use crate::node::FeatureNode;

/// Version of the serialized tree layout.
const SCHEMA: u32 = 1;
const VERSION: &str = env!("CARGO_PKG_VERSION");
const ENTRY_SUFFIX: &str = ".feature.cache";
const WRITE_CHECK_FILE: &str = ".write-check";

#[derive(Serialize, Deserialize)]
struct Envelope<F> {
    schema: u32,
    version: String,
    feature: F,
}

/// Stores one serialized feature per source path.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (creating if needed) the cache partition under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotWritable`] when the partition directory
    /// cannot be created or written to.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = root.as_ref().join(partition());
        let not_writable = |source| CacheError::NotWritable {
            path: dir.clone(),
            source,
        };
        fs::create_dir_all(&dir).map_err(not_writable)?;
        let marker = dir.join(WRITE_CHECK_FILE);
        fs::write(&marker, b"").map_err(not_writable)?;
        fs::remove_file(&marker).map_err(not_writable)?;
        Ok(Self { dir })
    }

    /// Directory holding the entries of this build.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, path: &str) -> PathBuf {
        self.dir.join(format!("{}{ENTRY_SUFFIX}", hash_hex(path)))
    }
}

impl FeatureCache for FileCache {
    fn is_fresh(&self, path: &str, timestamp: SystemTime) -> bool {
        fs::metadata(self.entry_path(path))
            .and_then(|metadata| metadata.modified())
            .is_ok_and(|modified| modified > timestamp)
    }

    fn read(&self, path: &str) -> Result<FeatureNode, CacheError> {
        let entry = self.entry_path(path);
        let text = fs::read_to_string(&entry).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CacheError::Missing(path.to_string())
            } else {
                CacheError::Io {
                    path: entry.clone(),
                    source,
                }
            }
        })?;
        let envelope: Envelope<FeatureNode> =
            serde_json::from_str(&text).map_err(|err| CacheError::Corrupted {
                path: entry.clone(),
                reason: err.to_string(),
            })?;
        if envelope.schema != SCHEMA || envelope.version != VERSION {
            return Err(CacheError::Corrupted {
                path: entry,
                reason: format!(
                    "written by schema {} version {}, expected schema {SCHEMA} version {VERSION}",
                    envelope.schema, envelope.version
                ),
            });
        }
        Ok(envelope.feature)
    }

    fn write(&self, path: &str, feature: &FeatureNode) -> Result<(), CacheError> {
        let entry = self.entry_path(path);
        let envelope = Envelope {
            schema: SCHEMA,
            version: VERSION.to_string(),
            feature,
        };
        let text = serde_json::to_string(&envelope).map_err(|err| CacheError::Corrupted {
            path: entry.clone(),
            reason: err.to_string(),
        })?;
        fs::write(&entry, text).map_err(|source| CacheError::Io {
            path: entry.clone(),
            source,
        })?;
        debug!(path, entry = %entry.display(), "cached feature");
        Ok(())
    }
}

fn partition() -> String {
    hash_hex(&format!("{VERSION}:{SCHEMA}"))
}

fn hash_hex(value: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(value.as_bytes());
    format!("{:016x}", hasher.finish())
}
