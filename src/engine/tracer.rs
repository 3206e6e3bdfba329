//! Nerve pathway tracing.

use std::sync::Arc;

use super::highlight::HighlightSet;
use crate::anatomy::Catalog;
use crate::observability::metrics;

/// Computes the highlight set for a single terminal nerve.
#[derive(Debug, Clone)]
pub struct PathwayTracer {
    catalog: Arc<Catalog>,
}

impl PathwayTracer {
    /// Creates a tracer over `catalog`.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Traces `nerve` back to its roots.
    ///
    /// Roots are the nerve's declared root set, segments are every segment
    /// carrying the nerve. An unknown id, or a node that is not a terminal
    /// nerve, yields an empty set.
    #[must_use]
    pub fn trace(&self, nerve: &str) -> HighlightSet {
        metrics::record_trace();

        let graph = self.catalog.graph();
        let Some(node) = graph.terminal_nerve(nerve) else {
            tracing::debug!(nerve, "trace of unknown nerve");
            return HighlightSet::default();
        };

        let highlight = HighlightSet {
            roots: node.roots.iter().cloned().collect(),
            segments: graph
                .segments_carrying(nerve)
                .into_iter()
                .map(|s| s.id.clone())
                .collect(),
            nerves: std::iter::once(node.id.clone()).collect(),
        };
        tracing::debug!(
            nerve,
            roots = highlight.roots.len(),
            segments = highlight.segments.len(),
            "traced nerve"
        );
        highlight
    }
}
