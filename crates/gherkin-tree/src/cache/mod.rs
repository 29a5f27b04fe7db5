//! Caches of parsed features keyed by source path.
//!
//! A loader asks [`FeatureCache::is_fresh`] with the source's modification
//! time and reads the cached tree instead of parsing when the entry is
//! newer.

use std::time::SystemTime;

use crate::error::CacheError;
use crate::node::FeatureNode;

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

/// Storage for parsed features.
pub trait FeatureCache: Send + Sync {
    /// Return `true` when an entry for `path` was written after `timestamp`.
    fn is_fresh(&self, path: &str, timestamp: SystemTime) -> bool;

    /// Read the cached feature for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Missing`] when there is no entry and other
    /// [`CacheError`] variants when the entry cannot be read or decoded.
    fn read(&self, path: &str) -> Result<FeatureNode, CacheError>;

    /// Store `feature` as the entry for `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] when the entry cannot be written.
    fn write(&self, path: &str, feature: &FeatureNode) -> Result<(), CacheError>;
}
