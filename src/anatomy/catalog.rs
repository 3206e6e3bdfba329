//! Resolved reference catalog
//!
//! [`AnatomicalGraph`], [`MuscleIndex`] and [`LesionCatalog`] are the
//! immutable tables the engine works from. They are built once by the
//! loader; every cross reference inside them is a typed id that is known to
//! resolve. Lookups take `&str` and return `None` or an empty collection for
//! unknown names.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::ids::{LesionId, MuscleId, NodeId, SegmentId, SegmentTag};
use super::schema::{Category, NodeKind, Point, Region};
use crate::engine::SimulationMode;

/// Maximum Damerau-Levenshtein distance for a name suggestion.
const SUGGESTION_DISTANCE: usize = 3;

// ============================================================================
// Region Filter
// ============================================================================

/// Region filter for lesion listing and case generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionScope {
    /// One region only.
    Only(Region),
    /// Both regions.
    Mixed,
}

impl RegionScope {
    /// Returns `true` if `region` passes the filter.
    #[must_use]
    pub fn matches(self, region: Region) -> bool {
        match self {
            Self::Only(r) => r == region,
            Self::Mixed => true,
        }
    }
}

impl From<Region> for RegionScope {
    fn from(region: Region) -> Self {
        Self::Only(region)
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Only(r) => write!(f, "{r}"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// A graph node.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Node id.
    pub id: NodeId,
    /// Node kind.
    pub kind: NodeKind,
    /// Display label.
    pub label: String,
    /// Diagram position.
    pub position: Point,
    /// Contributing roots, in order. Empty for everything but terminal nerves.
    pub roots: Vec<NodeId>,
}

/// A graph edge.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    /// Segment id.
    pub id: SegmentId,
    /// Structural tag shared with the other segments of the same structure.
    pub tag: SegmentTag,
    /// Proximal node.
    pub from: NodeId,
    /// Distal node, if the segment ends at one.
    pub to: Option<NodeId>,
    /// Proximal endpoint.
    pub start: Point,
    /// Distal endpoint.
    pub end: Point,
    /// Terminal nerves whose fibres run through the segment. Never empty.
    pub carries: BTreeSet<NodeId>,
}

impl Segment {
    /// Returns `true` if the segment carries fibres of `nerve`.
    #[must_use]
    pub fn carries(&self, nerve: &str) -> bool {
        self.carries.contains(nerve)
    }

    /// Rightmost x coordinate of the two endpoints.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }
}

/// The brachial plexus as a layered graph.
#[derive(Debug, Clone, Default)]
pub struct AnatomicalGraph {
    nodes: IndexMap<NodeId, Node>,
    segments: IndexMap<SegmentId, Segment>,
}

impl AnatomicalGraph {
    pub(crate) const fn new(
        nodes: IndexMap<NodeId, Node>,
        segments: IndexMap<SegmentId, Segment>,
    ) -> Self {
        Self { nodes, segments }
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Looks up a terminal nerve by id.
    #[must_use]
    pub fn terminal_nerve(&self, id: &str) -> Option<&Node> {
        self.node(id).filter(|n| n.kind == NodeKind::TerminalNerve)
    }

    /// All terminal nerves in declaration order.
    pub fn terminal_nerves(&self) -> impl Iterator<Item = &Node> {
        self.nodes_of_kind(NodeKind::TerminalNerve)
    }

    /// All nodes of one kind in declaration order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind == kind)
    }

    /// Looks up a segment by id.
    #[must_use]
    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// All segments in declaration order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Segments carrying fibres of `nerve`. Empty for unknown nerves.
    #[must_use]
    pub fn segments_carrying(&self, nerve: &str) -> Vec<&Segment> {
        self.segments.values().filter(|s| s.carries(nerve)).collect()
    }

    /// Segments with the given structural tag.
    #[must_use]
    pub fn segments_tagged(&self, tag: &str) -> Vec<&Segment> {
        self.segments.values().filter(|s| s.tag == tag).collect()
    }

    /// Every structural tag used by at least one segment.
    #[must_use]
    pub fn tags(&self) -> BTreeSet<&SegmentTag> {
        self.segments.values().map(|s| &s.tag).collect()
    }

    /// Terminal nerves reachable through the segments carrying any of `tags`.
    #[must_use]
    pub fn nerves_under<'a, I>(&self, tags: I) -> BTreeSet<&NodeId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags: BTreeSet<&str> = tags.into_iter().collect();
        self.segments
            .values()
            .filter(|s| tags.contains(s.tag.as_str()))
            .flat_map(|s| s.carries.iter())
            .collect()
    }

    /// Closest terminal-nerve id to `input`, for typo hints.
    #[must_use]
    pub fn suggest_nerve(&self, input: &str) -> Option<String> {
        suggest(input, self.terminal_nerves().map(|n| n.id.as_str()))
    }
}

// ============================================================================
// Muscles
// ============================================================================

/// A muscle and its innervation.
#[derive(Debug, Clone, Serialize)]
pub struct Muscle {
    /// Muscle name.
    pub id: MuscleId,
    /// Innervating peripheral nerve.
    pub nerve: String,
    /// Contributing spinal roots, in order.
    pub roots: Vec<String>,
    /// Cord or trunk of origin; `None` for lower-extremity muscles.
    pub cord: Option<String>,
    /// Body region.
    pub region: Region,
    /// What the muscle does.
    pub action: String,
}

/// Muscle lookup, indexed by name and by region.
#[derive(Debug, Clone, Default)]
pub struct MuscleIndex {
    muscles: IndexMap<MuscleId, Muscle>,
}

impl MuscleIndex {
    pub(crate) const fn new(muscles: IndexMap<MuscleId, Muscle>) -> Self {
        Self { muscles }
    }

    /// Looks up a muscle by name.
    #[must_use]
    pub fn muscle(&self, name: &str) -> Option<&Muscle> {
        self.muscles.get(name)
    }

    /// All muscles in declaration order.
    pub fn muscles(&self) -> impl Iterator<Item = &Muscle> {
        self.muscles.values()
    }

    /// Muscles of one region in declaration order.
    #[must_use]
    pub fn muscles_by_region(&self, region: Region) -> Vec<&Muscle> {
        self.muscles
            .values()
            .filter(|m| m.region == region)
            .collect()
    }

    /// Number of muscles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.muscles.len()
    }

    /// Returns `true` if the index holds no muscles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.muscles.is_empty()
    }

    /// Closest muscle name to `input`, for typo hints.
    #[must_use]
    pub fn suggest_muscle(&self, input: &str) -> Option<String> {
        suggest(input, self.muscles.keys().map(MuscleId::as_str))
    }
}

// ============================================================================
// Lesions
// ============================================================================

/// A named lesion pattern.
#[derive(Debug, Clone, Serialize)]
pub struct LesionPattern {
    /// Lesion name.
    pub id: LesionId,
    /// Category.
    pub category: Category,
    /// Body region.
    pub region: Region,
    /// Structural tags involved, when authored.
    pub segments: Option<Vec<SegmentTag>>,
    /// Injury marker on the diagram.
    pub marker: Option<Point>,
    /// Nerves running downstream of the lesion site.
    pub pathway: Vec<NodeId>,
    /// Clinically affected terminal nerves.
    pub nerves: Vec<NodeId>,
    /// Muscles expected to be abnormal.
    pub muscles: Vec<MuscleId>,
    /// Clinical and electrodiagnostic profile.
    pub description: String,
}

impl LesionPattern {
    /// Which simulation path this lesion's data supports.
    #[must_use]
    pub const fn simulation_mode(&self) -> SimulationMode {
        match (&self.segments, &self.marker) {
            (Some(_), _) => SimulationMode::Precise,
            (None, Some(_)) => SimulationMode::Positional,
            (None, None) => SimulationMode::Diffuse,
        }
    }

    /// Returns `true` if `muscle` is on this lesion's list.
    #[must_use]
    pub fn involves(&self, muscle: &str) -> bool {
        self.muscles.iter().any(|m| m == muscle)
    }
}

/// Listing entry for a lesion.
#[derive(Debug, Clone, Serialize)]
pub struct LesionSummary {
    /// Lesion name.
    pub id: LesionId,
    /// Category.
    pub category: Category,
    /// Body region.
    pub region: Region,
    /// Simulation path available for the lesion.
    pub mode: SimulationMode,
    /// Number of muscles on the lesion's list.
    pub muscle_count: usize,
}

/// Named lesion patterns.
#[derive(Debug, Clone, Default)]
pub struct LesionCatalog {
    lesions: IndexMap<LesionId, LesionPattern>,
}

impl LesionCatalog {
    pub(crate) const fn new(lesions: IndexMap<LesionId, LesionPattern>) -> Self {
        Self { lesions }
    }

    /// Looks up a lesion by name.
    #[must_use]
    pub fn lesion(&self, name: &str) -> Option<&LesionPattern> {
        self.lesions.get(name)
    }

    /// All lesions in declaration order.
    pub fn lesions(&self) -> impl Iterator<Item = &LesionPattern> {
        self.lesions.values()
    }

    /// Lesions whose category is enabled and whose region passes `scope`.
    pub fn filtered<'a>(
        &'a self,
        categories: &'a [Category],
        scope: RegionScope,
    ) -> impl Iterator<Item = &'a LesionPattern> + 'a {
        self.lesions
            .values()
            .filter(move |l| categories.contains(&l.category) && scope.matches(l.region))
    }

    /// Summaries of the lesions passing the filters, in declaration order.
    #[must_use]
    pub fn list(&self, categories: &[Category], scope: RegionScope) -> Vec<LesionSummary> {
        self.filtered(categories, scope)
            .map(|l| LesionSummary {
                id: l.id.clone(),
                category: l.category,
                region: l.region,
                mode: l.simulation_mode(),
                muscle_count: l.muscles.len(),
            })
            .collect()
    }

    /// Number of lesions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lesions.len()
    }

    /// Returns `true` if the catalog holds no lesions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lesions.is_empty()
    }

    /// Closest lesion name to `input`, for typo hints.
    #[must_use]
    pub fn suggest_lesion(&self, input: &str) -> Option<String> {
        suggest(input, self.lesions.keys().map(LesionId::as_str))
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// All reference tables together.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    graph: AnatomicalGraph,
    muscles: MuscleIndex,
    lesions: LesionCatalog,
}

impl Catalog {
    pub(crate) const fn new(
        graph: AnatomicalGraph,
        muscles: MuscleIndex,
        lesions: LesionCatalog,
    ) -> Self {
        Self {
            graph,
            muscles,
            lesions,
        }
    }

    /// The pathway graph.
    #[must_use]
    pub const fn graph(&self) -> &AnatomicalGraph {
        &self.graph
    }

    /// The muscle index.
    #[must_use]
    pub const fn muscles(&self) -> &MuscleIndex {
        &self.muscles
    }

    /// The lesion catalog.
    #[must_use]
    pub const fn lesions(&self) -> &LesionCatalog {
        &self.lesions
    }

    /// Shorthand for [`MuscleIndex::muscles_by_region`].
    #[must_use]
    pub fn muscles_by_region(&self, region: Region) -> Vec<&Muscle> {
        self.muscles.muscles_by_region(region)
    }

    /// Shorthand for [`LesionCatalog::lesion`].
    #[must_use]
    pub fn lesion(&self, name: &str) -> Option<&LesionPattern> {
        self.lesions.lesion(name)
    }

    /// Shorthand for [`AnatomicalGraph::segments_carrying`].
    #[must_use]
    pub fn segments_carrying(&self, nerve: &str) -> Vec<&Segment> {
        self.graph.segments_carrying(nerve)
    }

    /// Shorthand for [`LesionCatalog::list`].
    #[must_use]
    pub fn list_lesions(&self, categories: &[Category], scope: RegionScope) -> Vec<LesionSummary> {
        self.lesions.list(categories, scope)
    }
}

/// Returns the candidate closest to `input` (case-insensitive) if its
/// Damerau-Levenshtein distance is within [`SUGGESTION_DISTANCE`].
fn suggest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let needle = input.to_lowercase();
    candidates
        .map(|c| (c, strsim::damerau_levenshtein(&needle, &c.to_lowercase())))
        .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name.to_string())
}
