//! Loaders turn resources into parsed features.
//!
//! A resource is a string naming something a loader understands, such as a
//! feature file or a directory of them. [`crate::Gherkin`] asks every
//! registered loader whether it [`supports`](Loader::supports) a resource
//! and loads it through the first that does.

use std::path::Path;

use crate::error::Error;
use crate::node::FeatureNode;

mod discovery;
mod file;

pub use file::GherkinFileLoader;

/// Source of features.
pub trait Loader: Send + Sync {
    /// Return `true` when this loader can load `resource`.
    fn supports(&self, resource: &str) -> bool;

    /// Load every feature named by `resource`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error`] met while reading or parsing.
    fn load(&self, resource: &str) -> Result<Vec<FeatureNode>, Error>;

    /// Set the directory relative resources are resolved against.
    fn set_base_path(&mut self, _path: &Path) {}

    /// Split `resource` into units that can be loaded independently, so a
    /// failure in one does not prevent loading the others.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the units cannot be enumerated.
    fn resources(&self, resource: &str) -> Result<Vec<String>, Error> {
        Ok(vec![resource.to_string()])
    }
}
