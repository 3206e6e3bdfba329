//! Anatomical reference data
//!
//! The brachial plexus graph, the muscle table and the lesion catalog:
//! YAML schema, validation, loading and the resolved, immutable
//! [`Catalog`] the engine works from.

pub mod builtin;
pub mod catalog;
pub mod ids;
pub mod loader;
pub mod schema;
pub mod validation;

pub use builtin::{BUILTIN_GRAPH, BUILTIN_LESIONS, BUILTIN_MUSCLES};
pub use catalog::{
    AnatomicalGraph, Catalog, LesionCatalog, LesionPattern, LesionSummary, Muscle, MuscleIndex,
    Node, RegionScope, Segment,
};
pub use ids::{LesionId, MuscleId, NodeId, SegmentId, SegmentTag};
pub use loader::{CatalogLoader, DataSources, LoadResult, LoaderOptions};
pub use schema::{Category, NodeKind, Point, Region};
pub use validation::{ValidationResult, Validator};
