//! Built-in reference data
//!
//! The default plexus graph, muscle table and lesion catalog, embedded in
//! the binary at compile time so the engine works without any data files.

use std::sync::Arc;

use super::catalog::Catalog;
use super::loader::{CatalogLoader, DataSources, LoadResult, LoaderOptions};
use crate::error::DataError;

/// Source name reported for the embedded data.
pub const BUILTIN_SOURCE: &str = "builtin";

/// Embedded `plexus.yaml`.
pub const BUILTIN_GRAPH: &str = include_str!("../../data/plexus.yaml");

/// Embedded `muscles.yaml`.
pub const BUILTIN_MUSCLES: &str = include_str!("../../data/muscles.yaml");

/// Embedded `lesions.yaml`.
pub const BUILTIN_LESIONS: &str = include_str!("../../data/lesions.yaml");

/// The embedded documents as loader input.
#[must_use]
pub const fn builtin_sources() -> DataSources<'static> {
    DataSources {
        source_name: BUILTIN_SOURCE,
        graph: BUILTIN_GRAPH,
        muscles: BUILTIN_MUSCLES,
        lesions: BUILTIN_LESIONS,
    }
}

impl CatalogLoader {
    /// Loads the embedded reference data.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded data is defective.
    pub fn load_builtin(&self) -> Result<LoadResult, DataError> {
        self.load_sources(&builtin_sources())
    }
}

impl Catalog {
    /// Loads the embedded reference data with default options.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded data is defective.
    pub fn builtin() -> Result<Arc<Self>, DataError> {
        CatalogLoader::new(LoaderOptions::default())
            .load_builtin()
            .map(|r| r.catalog)
    }
}
