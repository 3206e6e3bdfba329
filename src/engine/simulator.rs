//! Lesion simulation.
//!
//! Three paths, picked from what the lesion's data supports:
//!
//! - **Precise**: a segment is highlighted iff its structural tag is on the
//!   lesion's list; nerves are the lesion's affected nerves.
//! - **Positional**: a segment is highlighted iff it carries one of the
//!   lesion's pathway nerves and reaches at least `marker.x - margin`.
//!   Nerves are the pathway nerves. Approximate by construction.
//! - **Diffuse**: nothing is highlighted.
//!
//! In every path a root is highlighted iff a highlighted segment starts at it.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::highlight::{HighlightSet, Simulation};
use crate::anatomy::{Catalog, LesionPattern, NodeId, NodeKind, Point, Segment};
use crate::config::EngineConfig;
use crate::observability::metrics;

/// Computes highlight sets for named lesions.
#[derive(Debug, Clone)]
pub struct LesionSimulator {
    catalog: Arc<Catalog>,
    positional_margin: f64,
}

impl LesionSimulator {
    /// Creates a simulator using the default positional margin.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, &EngineConfig::default())
    }

    /// Creates a simulator using `config.positional_margin`.
    #[must_use]
    pub const fn with_config(catalog: Arc<Catalog>, config: &EngineConfig) -> Self {
        Self {
            catalog,
            positional_margin: config.positional_margin,
        }
    }

    /// Margin applied behind the injury marker in positional mode.
    #[must_use]
    pub const fn positional_margin(&self) -> f64 {
        self.positional_margin
    }

    /// Simulates `lesion`. An unknown name yields an empty result.
    #[must_use]
    pub fn simulate(&self, lesion: &str) -> Simulation {
        let Some(pattern) = self.catalog.lesion(lesion) else {
            tracing::debug!(lesion, "simulation of unknown lesion");
            return Simulation::unknown();
        };

        let mode = pattern.simulation_mode();
        metrics::record_simulation(mode);

        let highlight = match (&pattern.segments, pattern.marker) {
            (Some(_), _) => self.precise(pattern),
            (None, Some(marker)) => self.positional(pattern, marker),
            (None, None) => HighlightSet::default(),
        };
        tracing::debug!(
            lesion,
            %mode,
            segments = highlight.segments.len(),
            nerves = highlight.nerves.len(),
            "simulated lesion"
        );

        Simulation {
            lesion: Some(pattern.id.clone()),
            highlight,
            mode,
            injury_marker: pattern.marker,
        }
    }

    fn precise(&self, pattern: &LesionPattern) -> HighlightSet {
        let tags: BTreeSet<&str> = pattern
            .segments
            .iter()
            .flatten()
            .map(|t| t.as_str())
            .collect();
        let segments = self
            .catalog
            .graph()
            .segments()
            .filter(|s| tags.contains(s.tag.as_str()));

        self.collect(segments, pattern.nerves.iter().cloned().collect())
    }

    fn positional(&self, pattern: &LesionPattern, marker: Point) -> HighlightSet {
        let threshold = marker.x - self.positional_margin;
        let segments = self.catalog.graph().segments().filter(|s| {
            pattern.pathway.iter().any(|n| s.carries.contains(n)) && s.max_x() >= threshold
        });

        self.collect(segments, pattern.pathway.iter().cloned().collect())
    }

    fn collect<'a>(
        &self,
        segments: impl Iterator<Item = &'a Segment>,
        nerves: BTreeSet<NodeId>,
    ) -> HighlightSet {
        let graph = self.catalog.graph();
        let mut highlight = HighlightSet {
            nerves,
            ..HighlightSet::default()
        };
        for segment in segments {
            highlight.segments.insert(segment.id.clone());
            if graph
                .node(segment.from.as_str())
                .is_some_and(|n| n.kind == NodeKind::Root)
            {
                highlight.roots.insert(segment.from.clone());
            }
        }
        highlight
    }
}
