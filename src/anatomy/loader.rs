//! Reference data loader
//!
//! Loading pipeline:
//! 1. Size check (files only)
//! 2. YAML parsing of the three documents
//! 3. Validation (all issues collected)
//! 4. Resolution into typed ids and endpoint coordinates
//! 5. Freeze with `Arc`

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::catalog::{
    AnatomicalGraph, Catalog, LesionCatalog, LesionPattern, Muscle, MuscleIndex, Node, Segment,
};
use super::ids::{LesionId, MuscleId, NodeId, SegmentId, SegmentTag};
use super::schema::{GraphDocument, LesionDocument, MuscleDocument, Point};
use super::validation::Validator;
use crate::error::{DataError, Severity, ValidationIssue};

/// File name of the graph document inside a data directory.
pub const GRAPH_FILE: &str = "plexus.yaml";

/// File name of the muscle document inside a data directory.
pub const MUSCLES_FILE: &str = "muscles.yaml";

/// File name of the lesion document inside a data directory.
pub const LESIONS_FILE: &str = "lesions.yaml";

// ============================================================================
// Public API
// ============================================================================

/// Options for the reference data loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum size of one data file in bytes.
    pub max_data_file_size: u64,

    /// Treat validation warnings as errors.
    pub strict: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_data_file_size: env_or("PLEXUS_MAX_DATA_FILE_SIZE", 4 * 1024 * 1024),
            strict: false,
        }
    }
}

/// Result of loading reference data.
#[derive(Debug)]
pub struct LoadResult {
    /// The validated, frozen catalog.
    pub catalog: Arc<Catalog>,

    /// Warnings encountered during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Raw text of the three documents plus a name for error messages.
#[derive(Debug, Clone, Copy)]
pub struct DataSources<'a> {
    /// Where the text came from (directory path or `builtin`).
    pub source_name: &'a str,
    /// `plexus.yaml` text.
    pub graph: &'a str,
    /// `muscles.yaml` text.
    pub muscles: &'a str,
    /// `lesions.yaml` text.
    pub lesions: &'a str,
}

/// Reference data loader.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    options: LoaderOptions,
}

impl CatalogLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads the three data files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or too large, fails to parse,
    /// or the data fails validation.
    pub fn load_dir(&self, dir: &Path) -> Result<LoadResult, DataError> {
        let graph = self.read_file(&dir.join(GRAPH_FILE))?;
        let muscles = self.read_file(&dir.join(MUSCLES_FILE))?;
        let lesions = self.read_file(&dir.join(LESIONS_FILE))?;
        let source_name = dir.display().to_string();

        self.load_sources(&DataSources {
            source_name: &source_name,
            graph: &graph,
            muscles: &muscles,
            lesions: &lesions,
        })
    }

    /// Parses, validates and resolves in-memory documents.
    ///
    /// # Errors
    ///
    /// Returns an error if a document fails to parse or the data fails
    /// validation.
    pub fn load_sources(&self, sources: &DataSources<'_>) -> Result<LoadResult, DataError> {
        let graph: GraphDocument =
            parse_document(sources.graph, &qualified(sources.source_name, GRAPH_FILE))?;
        let muscles: MuscleDocument =
            parse_document(sources.muscles, &qualified(sources.source_name, MUSCLES_FILE))?;
        let lesions: LesionDocument =
            parse_document(sources.lesions, &qualified(sources.source_name, LESIONS_FILE))?;

        let result = Validator::new().validate(&graph, &muscles, &lesions);

        let mut issues = result.errors;
        let mut warnings = result.warnings;
        if self.options.strict {
            issues.extend(warnings.drain(..).map(|w| ValidationIssue {
                severity: Severity::Error,
                ..w
            }));
        }
        if !issues.is_empty() {
            return Err(DataError::Validation {
                source_name: sources.source_name.to_string(),
                issues,
            });
        }

        for warning in &warnings {
            tracing::warn!(source = sources.source_name, "{warning}");
        }

        let catalog = resolve(graph, muscles, lesions);
        tracing::info!(
            source = sources.source_name,
            nodes = catalog.graph().nodes().count(),
            segments = catalog.graph().segments().count(),
            muscles = catalog.muscles().len(),
            lesions = catalog.lesions().len(),
            "reference data loaded"
        );

        Ok(LoadResult {
            catalog: Arc::new(catalog),
            warnings,
        })
    }

    fn read_file(&self, path: &Path) -> Result<String, DataError> {
        let metadata = std::fs::metadata(path).map_err(|_| DataError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if metadata.len() > self.options.max_data_file_size {
            return Err(DataError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.options.max_data_file_size,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| DataError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if content.starts_with('\u{feff}') {
            return Ok(content['\u{feff}'.len_utf8()..].to_string());
        }
        Ok(content)
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn parse_document<T: DeserializeOwned>(text: &str, source_name: &str) -> Result<T, DataError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| DataError::Parse {
        source_name: source_name.to_string(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })?;

    if value.is_null() {
        return Err(DataError::Parse {
            source_name: source_name.to_string(),
            line: None,
            message: "document is empty".to_string(),
        });
    }

    serde_yaml::from_value(value).map_err(|e| DataError::Parse {
        source_name: source_name.to_string(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

fn qualified(source_name: &str, file: &str) -> String {
    PathBuf::from(source_name).join(file).display().to_string()
}

// ============================================================================
// Resolution
// ============================================================================

/// Builds the typed catalog. Only called on validated documents, so every
/// reference resolves; entries that somehow do not are skipped.
fn resolve(graph: GraphDocument, muscles: MuscleDocument, lesions: LesionDocument) -> Catalog {
    let positions: HashMap<&str, Point> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.position))
        .collect();

    let segments: IndexMap<SegmentId, Segment> = graph
        .segments
        .iter()
        .filter_map(|def| {
            let origin = positions.get(def.from.as_str()).copied()?;
            let destination = def
                .end
                .or_else(|| def.to.as_deref().and_then(|to| positions.get(to).copied()))?;
            let segment = Segment {
                id: SegmentId::new(&def.id),
                tag: SegmentTag::new(&def.tag),
                from: NodeId::new(&def.from),
                to: def.to.as_deref().map(NodeId::new),
                start: def.start.unwrap_or(origin),
                end: destination,
                carries: def.carries.iter().map(|c| NodeId::new(c)).collect(),
            };
            Some((segment.id.clone(), segment))
        })
        .collect();

    let nodes: IndexMap<NodeId, Node> = graph
        .nodes
        .into_iter()
        .map(|def| {
            let node = Node {
                id: NodeId::new(&def.id),
                kind: def.kind,
                label: def.label,
                position: def.position,
                roots: def.roots.iter().map(|r| NodeId::new(r)).collect(),
            };
            (node.id.clone(), node)
        })
        .collect();

    let muscles: IndexMap<MuscleId, Muscle> = muscles
        .muscles
        .into_iter()
        .map(|def| {
            let muscle = Muscle {
                id: MuscleId::new(&def.name),
                nerve: def.nerve,
                roots: def.roots,
                cord: def.cord,
                region: def.region,
                action: def.action,
            };
            (muscle.id.clone(), muscle)
        })
        .collect();

    let lesions: IndexMap<LesionId, LesionPattern> = lesions
        .lesions
        .into_iter()
        .map(|def| {
            let lesion = LesionPattern {
                id: LesionId::new(&def.name),
                category: def.category,
                region: def.region,
                segments: def
                    .segments
                    .map(|tags| tags.iter().map(|t| SegmentTag::new(t)).collect()),
                marker: def.marker,
                pathway: def.pathway.iter().map(|n| NodeId::new(n)).collect(),
                nerves: def.nerves.iter().map(|n| NodeId::new(n)).collect(),
                muscles: def.muscles.iter().map(|m| MuscleId::new(m)).collect(),
                description: def.description,
            };
            (lesion.id.clone(), lesion)
        })
        .collect();

    Catalog::new(
        AnatomicalGraph::new(nodes, segments),
        MuscleIndex::new(muscles),
        LesionCatalog::new(lesions),
    )
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
