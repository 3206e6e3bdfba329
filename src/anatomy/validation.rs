//! Reference data validation
//!
//! Structural and semantic checks over the raw documents, run before any
//! typed id is minted. Validation collects ALL issues instead of stopping at
//! the first so an author sees every defect in one pass.
//!
//! The central integrity rule: when a lesion declares affected segments, every
//! nerve it lists as clinically affected must be carried by one of those
//! segments. A violation is an authoring defect and fails the load.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::schema::{GraphDocument, LesionDef, LesionDocument, MuscleDocument, NodeKind, Region};
use crate::error::{Severity, ValidationIssue};

/// Minimum lesions a region needs to fill a full answer set.
pub const MIN_LESIONS_PER_REGION: usize = 4;

// ============================================================================
// Public API
// ============================================================================

/// Result of reference data validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reference data validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the three documents together and returns every issue.
    pub fn validate(
        &mut self,
        graph: &GraphDocument,
        muscles: &MuscleDocument,
        lesions: &LesionDocument,
    ) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        let kinds = self.validate_nodes(graph);
        let carried_by_tag = self.validate_segments(graph, &kinds);
        let regions = self.validate_muscles(muscles);
        self.validate_lesions(lesions, &kinds, &carried_by_tag, &regions);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Graph
    // ========================================================================

    /// Checks node ids and terminal-nerve root sets. Returns id → kind.
    fn validate_nodes<'a>(&mut self, graph: &'a GraphDocument) -> HashMap<&'a str, NodeKind> {
        let mut kinds = HashMap::new();

        if graph.nodes.is_empty() {
            self.add_error("nodes", "Graph declares no nodes");
        }

        for (i, node) in graph.nodes.iter().enumerate() {
            let path = format!("nodes[{i}]");
            if node.id.trim().is_empty() {
                self.add_error(&format!("{path}.id"), "Node id cannot be empty");
                continue;
            }
            if kinds.insert(node.id.as_str(), node.kind).is_some() {
                self.add_error(
                    &format!("{path}.id"),
                    &format!("Duplicate node id '{}'", node.id),
                );
            }
        }

        for (i, node) in graph.nodes.iter().enumerate() {
            let path = format!("nodes[{i}]");
            match node.kind {
                NodeKind::TerminalNerve if node.roots.is_empty() => {
                    self.add_error(
                        &format!("{path}.roots"),
                        &format!("Terminal nerve '{}' declares no roots", node.id),
                    );
                }
                NodeKind::TerminalNerve => {}
                _ if !node.roots.is_empty() => {
                    self.add_warning(
                        &format!("{path}.roots"),
                        &format!("Only terminal nerves carry roots; ignored on '{}'", node.id),
                    );
                }
                _ => {}
            }
            for (j, root) in node.roots.iter().enumerate() {
                if kinds.get(root.as_str()) != Some(&NodeKind::Root) {
                    self.add_error(
                        &format!("{path}.roots[{j}]"),
                        &format!("'{root}' is not a root node"),
                    );
                }
            }
        }

        kinds
    }

    /// Checks segment references. Returns tag → carried nerves.
    fn validate_segments<'a>(
        &mut self,
        graph: &'a GraphDocument,
        kinds: &HashMap<&str, NodeKind>,
    ) -> HashMap<&'a str, BTreeSet<&'a str>> {
        let mut seen = HashSet::new();
        let mut carried_by_tag: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        let mut carried_anywhere = HashSet::new();

        for (i, seg) in graph.segments.iter().enumerate() {
            let path = format!("segments[{i}]");
            if !seen.insert(seg.id.as_str()) {
                self.add_error(
                    &format!("{path}.id"),
                    &format!("Duplicate segment id '{}'", seg.id),
                );
            }
            if seg.tag.trim().is_empty() {
                self.add_error(&format!("{path}.tag"), "Structural tag cannot be empty");
            }
            if !kinds.contains_key(seg.from.as_str()) {
                self.add_error(
                    &format!("{path}.from"),
                    &format!("Unknown node '{}'", seg.from),
                );
            }
            match (&seg.to, &seg.end) {
                (Some(to), _) if !kinds.contains_key(to.as_str()) => {
                    self.add_error(&format!("{path}.to"), &format!("Unknown node '{to}'"));
                }
                (Some(_), Some(_)) => {
                    self.add_warning(
                        &format!("{path}.end"),
                        "Both 'to' and 'end' given; 'end' overrides the node position",
                    );
                }
                (None, None) => {
                    self.add_error(&path, "Segment needs either 'to' or 'end'");
                }
                _ => {}
            }

            if seg.carries.is_empty() {
                self.add_error(
                    &format!("{path}.carries"),
                    &format!("Segment '{}' carries no nerves", seg.id),
                );
            }
            let entry = carried_by_tag.entry(seg.tag.as_str()).or_default();
            for (j, nerve) in seg.carries.iter().enumerate() {
                if kinds.get(nerve.as_str()) == Some(&NodeKind::TerminalNerve) {
                    entry.insert(nerve.as_str());
                    carried_anywhere.insert(nerve.as_str());
                } else {
                    self.add_error(
                        &format!("{path}.carries[{j}]"),
                        &format!("'{nerve}' is not a terminal nerve"),
                    );
                }
            }
        }

        self.validate_carried_reachable(graph, kinds);

        for node in &graph.nodes {
            if node.kind == NodeKind::TerminalNerve && !carried_anywhere.contains(node.id.as_str()) {
                self.add_warning(
                    "segments",
                    &format!("Terminal nerve '{}' is carried by no segment", node.id),
                );
            }
        }

        carried_by_tag
    }

    /// A segment may only carry terminal nerves that lie downstream of it:
    /// reachable from its `to` node, or from `from` for a free-running course.
    fn validate_carried_reachable(
        &mut self,
        graph: &GraphDocument,
        kinds: &HashMap<&str, NodeKind>,
    ) {
        let mut downstream: HashMap<&str, Vec<&str>> = HashMap::new();
        for seg in &graph.segments {
            if let Some(to) = &seg.to {
                downstream.entry(seg.from.as_str()).or_default().push(to.as_str());
            }
        }

        for (i, seg) in graph.segments.iter().enumerate() {
            let start = seg.to.as_deref().unwrap_or(seg.from.as_str());
            if !kinds.contains_key(start) {
                continue;
            }
            let reachable = reachable_terminals(start, &downstream, kinds);
            for (j, nerve) in seg.carries.iter().enumerate() {
                let is_terminal = kinds.get(nerve.as_str()) == Some(&NodeKind::TerminalNerve);
                if is_terminal && !reachable.contains(nerve.as_str()) {
                    self.add_error(
                        &format!("segments[{i}].carries[{j}]"),
                        &format!("'{nerve}' is not reachable through segment '{}'", seg.id),
                    );
                }
            }
        }
    }

    // ========================================================================
    // Muscles
    // ========================================================================

    /// Checks muscle entries. Returns name → region.
    fn validate_muscles<'a>(&mut self, doc: &'a MuscleDocument) -> HashMap<&'a str, Region> {
        let mut regions = HashMap::new();

        for (i, muscle) in doc.muscles.iter().enumerate() {
            let path = format!("muscles[{i}]");
            if muscle.name.trim().is_empty() {
                self.add_error(&format!("{path}.name"), "Muscle name cannot be empty");
                continue;
            }
            if regions.insert(muscle.name.as_str(), muscle.region).is_some() {
                self.add_error(
                    &format!("{path}.name"),
                    &format!("Duplicate muscle '{}'", muscle.name),
                );
            }
            if muscle.roots.is_empty() {
                self.add_error(
                    &format!("{path}.roots"),
                    &format!("Muscle '{}' declares no roots", muscle.name),
                );
            }
            match (muscle.region, &muscle.cord) {
                (Region::Upper, None) => self.add_warning(
                    &format!("{path}.cord"),
                    &format!("Upper-extremity muscle '{}' has no cord or trunk", muscle.name),
                ),
                (Region::Lower, Some(_)) => self.add_warning(
                    &format!("{path}.cord"),
                    &format!(
                        "Lower-extremity muscle '{}' names a brachial plexus cord",
                        muscle.name
                    ),
                ),
                _ => {}
            }
        }

        regions
    }

    // ========================================================================
    // Lesions
    // ========================================================================

    fn validate_lesions(
        &mut self,
        doc: &LesionDocument,
        kinds: &HashMap<&str, NodeKind>,
        carried_by_tag: &HashMap<&str, BTreeSet<&str>>,
        regions: &HashMap<&str, Region>,
    ) {
        let mut seen = HashSet::new();
        let mut per_region: HashMap<Region, usize> = HashMap::new();

        for (i, lesion) in doc.lesions.iter().enumerate() {
            let path = format!("lesions[{i}]");
            if lesion.name.trim().is_empty() {
                self.add_error(&format!("{path}.name"), "Lesion name cannot be empty");
            } else if !seen.insert(lesion.name.as_str()) {
                self.add_error(
                    &format!("{path}.name"),
                    &format!("Duplicate lesion '{}'", lesion.name),
                );
            }
            *per_region.entry(lesion.region).or_default() += 1;

            self.validate_lesion_muscles(&path, lesion, regions);
            self.validate_lesion_nerves(&path, "pathway", &lesion.pathway, kinds);
            self.validate_lesion_nerves(&path, "nerves", &lesion.nerves, kinds);
            self.validate_lesion_footprint(&path, lesion, carried_by_tag);
        }

        for region in Region::all() {
            let count = per_region.get(region).copied().unwrap_or(0);
            if count > 0 && count < MIN_LESIONS_PER_REGION {
                self.add_error(
                    "lesions",
                    &format!(
                        "Region {region} has {count} lesion(s); at least {MIN_LESIONS_PER_REGION} are needed to build answer options"
                    ),
                );
            }
        }
    }

    fn validate_lesion_muscles(
        &mut self,
        path: &str,
        lesion: &LesionDef,
        regions: &HashMap<&str, Region>,
    ) {
        if lesion.muscles.is_empty() {
            self.add_error(
                &format!("{path}.muscles"),
                &format!("Lesion '{}' lists no muscles", lesion.name),
            );
        }
        let mut listed = HashSet::new();
        for (j, muscle) in lesion.muscles.iter().enumerate() {
            let at = format!("{path}.muscles[{j}]");
            match regions.get(muscle.as_str()) {
                None => self.add_error(&at, &format!("Unknown muscle '{muscle}'")),
                Some(region) if *region != lesion.region => self.add_error(
                    &at,
                    &format!(
                        "Muscle '{muscle}' is {region} but lesion '{}' is {}",
                        lesion.name, lesion.region
                    ),
                ),
                Some(_) => {}
            }
            if !listed.insert(muscle.as_str()) {
                self.add_error(
                    &at,
                    &format!("Muscle '{muscle}' listed twice in '{}'", lesion.name),
                );
            }
        }
    }

    fn validate_lesion_nerves(
        &mut self,
        path: &str,
        field: &str,
        nerves: &[String],
        kinds: &HashMap<&str, NodeKind>,
    ) {
        for (j, nerve) in nerves.iter().enumerate() {
            if kinds.get(nerve.as_str()) != Some(&NodeKind::TerminalNerve) {
                self.add_error(
                    &format!("{path}.{field}[{j}]"),
                    &format!("'{nerve}' is not a terminal nerve"),
                );
            }
        }
    }

    /// Checks segment tags, the affected-nerve integrity rule, and whether
    /// the lesion can be simulated at all.
    fn validate_lesion_footprint(
        &mut self,
        path: &str,
        lesion: &LesionDef,
        carried_by_tag: &HashMap<&str, BTreeSet<&str>>,
    ) {
        if let Some(tags) = &lesion.segments {
            if tags.is_empty() {
                self.add_error(
                    &format!("{path}.segments"),
                    "Segment list is present but empty; omit it instead",
                );
            }
            let mut reachable = BTreeSet::new();
            for (j, tag) in tags.iter().enumerate() {
                match carried_by_tag.get(tag.as_str()) {
                    Some(nerves) => reachable.extend(nerves.iter().copied()),
                    None => self.add_error(
                        &format!("{path}.segments[{j}]"),
                        &format!("Unknown structural tag '{tag}'"),
                    ),
                }
            }
            for (j, nerve) in lesion.nerves.iter().enumerate() {
                if !reachable.contains(nerve.as_str()) {
                    self.add_error(
                        &format!("{path}.nerves[{j}]"),
                        &format!(
                            "Nerve '{nerve}' is not carried by any affected segment of '{}'",
                            lesion.name
                        ),
                    );
                }
            }
            if lesion.marker.is_some() {
                self.add_warning(
                    &format!("{path}.marker"),
                    "Marker is display-only when segments are given",
                );
            }
        } else if lesion.marker.is_some() {
            if lesion.pathway.is_empty() {
                self.add_error(
                    &format!("{path}.pathway"),
                    "Positional lesion needs at least one pathway nerve",
                );
            }
        } else if !lesion.pathway.is_empty() {
            self.add_warning(
                path,
                &format!(
                    "Lesion '{}' has pathway nerves but neither segments nor marker; nothing will be highlighted",
                    lesion.name
                ),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

/// Terminal nerves at or below `start` along `from -> to` edges.
fn reachable_terminals<'a>(
    start: &'a str,
    downstream: &HashMap<&'a str, Vec<&'a str>>,
    kinds: &HashMap<&str, NodeKind>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for next in downstream.get(node).into_iter().flatten() {
            if seen.insert(*next) {
                stack.push(*next);
            }
        }
    }
    seen.retain(|n| kinds.get(n) == Some(&NodeKind::TerminalNerve));
    seen
}
