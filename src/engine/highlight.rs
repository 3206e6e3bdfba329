//! Highlight sets and simulation results.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::anatomy::{LesionId, NodeId, Point, SegmentId};

/// Roots, segments and terminal nerves to draw as affected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightSet {
    /// Highlighted root nodes.
    pub roots: BTreeSet<NodeId>,
    /// Highlighted segments.
    pub segments: BTreeSet<SegmentId>,
    /// Highlighted terminal nerves.
    pub nerves: BTreeSet<NodeId>,
}

impl HighlightSet {
    /// Returns `true` if nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.segments.is_empty() && self.nerves.is_empty()
    }
}

/// Which data a simulation was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Authored structural segment tags.
    Precise,
    /// Injury marker position and pathway nerves. Approximate.
    Positional,
    /// No site data; nothing is drawn.
    Diffuse,
}

impl SimulationMode {
    /// Lowercase name, also used as a metrics label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Precise => "precise",
            Self::Positional => "positional",
            Self::Diffuse => "diffuse",
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of simulating one lesion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    /// Simulated lesion; `None` when the name was unknown.
    pub lesion: Option<LesionId>,
    /// What to draw.
    pub highlight: HighlightSet,
    /// Path that produced the highlight.
    pub mode: SimulationMode,
    /// Injury marker to draw, if the lesion has one.
    pub injury_marker: Option<Point>,
}

impl Simulation {
    /// Empty result for an unknown lesion.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            lesion: None,
            highlight: HighlightSet::default(),
            mode: SimulationMode::Diffuse,
            injury_marker: None,
        }
    }
}
