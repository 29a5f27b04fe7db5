//! Ordered, de-duplicated tag sets shared by every taggable node.

use std::collections::HashSet;

use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

/// Tags attached to a node, stored without the leading `@`.
///
/// Insertion order is preserved and repeated tags are dropped, so merging
/// the tags of a feature, an outline and an example table stays
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, IntoIterator)]
#[serde(transparent)]
#[into_iterator(owned, ref)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Create an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `tag` unless it is already present. A leading `@` is removed.
    pub fn insert(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let name = tag.strip_prefix('@').unwrap_or(tag.as_str()).trim();
        if !name.is_empty() && !self.contains(name) {
            self.0.push(name.to_string());
        }
    }

    /// Return `true` when `tag` (with or without `@`) is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let name = tag.strip_prefix('@').unwrap_or(tag);
        self.0.iter().any(|existing| existing == name)
    }

    /// Return a new set holding `self` followed by the tags of `other` that
    /// are not already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree::Tags;
    ///
    /// let outline: Tags = ["wip", "slow"].into_iter().collect();
    /// let table: Tags = ["slow", "etag1"].into_iter().collect();
    /// let merged = outline.union(&table);
    /// assert_eq!(merged.as_slice(), ["wip", "slow", "etag1"]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(other.0.iter().cloned());
        merged
    }

    /// Borrow the tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Borrow the tags as a set of string slices.
    #[must_use]
    pub fn as_set(&self) -> HashSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl<S: Into<String>> Extend<S> for Tags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        tags.extend(iter);
        tags
    }
}
