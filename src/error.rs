//! Error types for `plexus`
//!
//! Each layer has its own error enum; [`PlexusError`] aggregates them for
//! the command-line front end and maps every variant to a process exit code.
//! Unknown nerve, lesion or muscle names are never errors inside the engine:
//! lookups return empty or absent results instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::anatomy::{Category, RegionScope};
use crate::quiz::SessionState;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `plexus` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Reference data or configuration error (invalid YAML, integrity failure)
    pub const DATA_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Unknown nerve, lesion or muscle name given on the command line
    pub const NOT_FOUND: i32 = 4;

    /// Quiz error (no lesion matches the filters, invalid answer)
    pub const QUIZ_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `plexus` operations.
#[derive(Debug, Error)]
pub enum PlexusError {
    /// Reference data loading or validation error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Engine configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Case generation error
    #[error(transparent)]
    Case(#[from] CaseError),

    /// Quiz session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A name given by the user matched nothing in the catalog
    #[error("unknown {kind} '{name}'{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean '{s}'?)")))]
    NotFound {
        /// What was looked up (`nerve`, `lesion`, `muscle`)
        kind: &'static str,
        /// The name as given
        name: String,
        /// Closest known name, if any is close enough
        suggestion: Option<String>,
    },

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PlexusError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Data(_) | Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::DATA_ERROR,
            Self::Case(_) | Self::Session(_) => ExitCode::QUIZ_ERROR,
            Self::NotFound { .. } => ExitCode::NOT_FOUND,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Reference Data Errors
// ============================================================================

/// Reference data loading and integrity errors.
///
/// Integrity problems in the static tables are authoring defects; the loader
/// reports all of them at once and refuses to build a catalog.
#[derive(Debug, Error)]
pub enum DataError {
    /// YAML parsing failed
    #[error("parse error in {source_name}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    Parse {
        /// File path or embedded document name
        source_name: String,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced data file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Data file exceeds the configured size limit
    #[error("{path} is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Path to the file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Integrity validation failed
    #[error("reference data failed validation ({} issue(s)): {}", issues.len(), summarize(issues))]
    Validation {
        /// Where the data came from
        source_name: String,
        /// Every issue found
        issues: Vec<ValidationIssue>,
    },
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .take(3)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single issue found while validating reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic entry (e.g. `lesions[4].nerves[1]`)
    pub path: String,
    /// Description of the issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Data cannot be used
    Error,
    /// Suspicious but usable
    Warning,
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Engine configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be parsed
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Quiz Errors
// ============================================================================

/// Case generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    /// The filters exclude every lesion. Recoverable: ask for other filters.
    #[error("no lesion matches categories [{}] in region {scope}", categories.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    NoLesionAvailable {
        /// Enabled categories
        categories: Vec<Category>,
        /// Region filter
        scope: RegionScope,
    },
}

/// Quiz session errors. State and score are untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Answer is not one of the current options, or nothing was selected
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Operation is not allowed in the current state
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// Operation attempted
        action: &'static str,
        /// State the session was in
        state: SessionState,
    },

    /// A new case could not be generated
    #[error(transparent)]
    Case(#[from] CaseError),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `plexus` operations.
pub type Result<T> = std::result::Result<T, PlexusError>;

// ============================================================================
// Tests
// ============================================================================
