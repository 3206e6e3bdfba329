//! Reference data schema
//!
//! Raw document types deserialized from the YAML reference data. These hold
//! plain strings; [`crate::anatomy::loader`] resolves them into the typed
//! [`Catalog`](crate::anatomy::Catalog) after validation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Shared Enums
// ============================================================================

/// Body region. Partitions the muscle and lesion universe in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Upper extremity.
    #[serde(rename = "UE")]
    Upper,
    /// Lower extremity.
    #[serde(rename = "LE")]
    Lower,
}

impl Region {
    /// Short clinical code (`UE` / `LE`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Upper => "UE",
            Self::Lower => "LE",
        }
    }

    /// Returns both regions in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Upper, Self::Lower]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lesion category used for quiz filtering and distractor selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Spinal nerve root (radiculopathy).
    Root,
    /// Brachial or lumbosacral plexus.
    Plexus,
    /// Named peripheral nerve.
    Peripheral,
}

impl Category {
    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Root, Self::Plexus, Self::Peripheral]
    }

    /// Human-readable title-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Plexus => "Plexus",
            Self::Peripheral => "Peripheral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Plexus => write!(f, "plexus"),
            Self::Peripheral => write!(f, "peripheral"),
        }
    }
}

/// Kind of a graph node. Roots and terminal nerves are the leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Spinal nerve root (C5-T1).
    Root,
    /// Upper, middle or lower trunk.
    Trunk,
    /// Anterior or posterior division of a trunk.
    Division,
    /// Lateral, posterior or medial cord.
    Cord,
    /// Named peripheral nerve leaving the plexus.
    TerminalNerve,
}

impl NodeKind {
    /// Returns `true` for roots and terminal nerves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Root | Self::TerminalNerve)
    }
}

/// A point in diagram coordinates, written `[x, y]` in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal coordinate; grows from the roots towards the periphery.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

// ============================================================================
// plexus.yaml
// ============================================================================

/// Graph document: nodes and segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    /// Graph nodes.
    #[serde(default)]
    pub nodes: Vec<NodeDef>,

    /// Graph edges.
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

/// A node as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    /// Unique node id (e.g. `C5`, `upper-trunk`, `median`).
    pub id: String,

    /// Node kind.
    pub kind: NodeKind,

    /// Display label.
    pub label: String,

    /// Diagram position.
    pub position: Point,

    /// Contributing roots; terminal nerves only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<String>,
}

/// A segment as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentDef {
    /// Unique segment id.
    pub id: String,

    /// Structural tag used for lesion matching (e.g. `trunk-upper`).
    pub tag: String,

    /// Proximal node.
    pub from: String,

    /// Distal node, when the segment ends at one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Overrides the proximal endpoint (defaults to `from`'s position).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Point>,

    /// Distal endpoint for segments that do not end at a node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Point>,

    /// Terminal nerves whose fibres run through this segment.
    #[serde(default)]
    pub carries: Vec<String>,
}

// ============================================================================
// muscles.yaml
// ============================================================================

/// Muscle document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuscleDocument {
    /// Muscles in declaration order.
    #[serde(default)]
    pub muscles: Vec<MuscleDef>,
}

/// A muscle as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuscleDef {
    /// Unique muscle name.
    pub name: String,

    /// Innervating peripheral nerve.
    pub nerve: String,

    /// Contributing spinal roots, in order.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Cord or trunk of origin; absent for lower-extremity muscles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cord: Option<String>,

    /// Body region.
    pub region: Region,

    /// What the muscle does.
    pub action: String,
}

// ============================================================================
// lesions.yaml
// ============================================================================

/// Lesion document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LesionDocument {
    /// Lesion patterns in declaration order.
    #[serde(default)]
    pub lesions: Vec<LesionDef>,
}

/// A lesion pattern as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LesionDef {
    /// Unique lesion name.
    pub name: String,

    /// Lesion category.
    pub category: Category,

    /// Body region.
    pub region: Region,

    /// Structural segment tags the lesion involves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,

    /// Injury marker on the diagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Point>,

    /// Nerves running downstream of the lesion site.
    #[serde(default)]
    pub pathway: Vec<String>,

    /// Terminal nerves that are clinically affected.
    #[serde(default)]
    pub nerves: Vec<String>,

    /// Muscles expected to be abnormal on needle examination.
    #[serde(default)]
    pub muscles: Vec<String>,

    /// Clinical and electrodiagnostic profile.
    #[serde(default)]
    pub description: String,
}
