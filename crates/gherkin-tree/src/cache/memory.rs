//! Process-local feature cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use super::FeatureCache;
use crate::error::CacheError;
use crate::node::FeatureNode;

/// Keeps parsed features in memory together with the time they were
/// stored.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (FeatureNode, SystemTime)>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeatureCache for MemoryCache {
    fn is_fresh(&self, path: &str, timestamp: SystemTime) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .is_some_and(|(_, stored)| *stored > timestamp)
    }

    fn read(&self, path: &str) -> Result<FeatureNode, CacheError> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|(feature, _)| feature.clone())
            .ok_or_else(|| CacheError::Missing(path.to_string()))
    }

    fn write(&self, path: &str, feature: &FeatureNode) -> Result<(), CacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), (feature.clone(), SystemTime::now()));
        Ok(())
    }
}
