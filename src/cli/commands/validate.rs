//! `plexus validate`

use std::path::Path;

use serde_json::json;

use crate::anatomy::{CatalogLoader, LoaderOptions};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::error::{DataError, PlexusError, Severity, ValidationIssue};

/// Validates the reference data in `data` (built-in when `None`).
///
/// Every issue is printed before the error is returned.
///
/// # Errors
///
/// Returns `PlexusError::Data` if the data cannot be loaded or fails
/// validation.
pub fn run(args: &ValidateArgs, data: Option<&Path>) -> Result<(), PlexusError> {
    let loader = CatalogLoader::new(LoaderOptions {
        strict: args.strict,
        ..LoaderOptions::default()
    });
    let source = data.map_or_else(|| "builtin".to_string(), |d| d.display().to_string());
    tracing::info!(source = %source, strict = args.strict, "validating reference data");

    let result = match data {
        Some(dir) => loader.load_dir(dir),
        None => loader.load_builtin(),
    };

    match (&result, args.format) {
        (Ok(loaded), OutputFormat::Json) => {
            let catalog = &loaded.catalog;
            super::print_json(&json!({
                "source": source,
                "valid": true,
                "nodes": catalog.graph().nodes().count(),
                "segments": catalog.graph().segments().count(),
                "muscles": catalog.muscles().len(),
                "lesions": catalog.lesions().len(),
                "issues": issues_json(&loaded.warnings),
            }))?;
        }
        (Ok(loaded), OutputFormat::Human) => {
            for warning in &loaded.warnings {
                println!("  {warning}");
            }
            println!(
                "{source}: valid ({} muscles, {} lesions, {} warning(s))",
                loaded.catalog.muscles().len(),
                loaded.catalog.lesions().len(),
                loaded.warnings.len()
            );
        }
        (Err(DataError::Validation { issues, .. }), OutputFormat::Json) => {
            super::print_json(&json!({
                "source": source,
                "valid": false,
                "issues": issues_json(issues),
            }))?;
        }
        (Err(DataError::Validation { issues, .. }), OutputFormat::Human) => {
            for issue in issues {
                println!("  {issue}");
            }
            println!("{source}: {} issue(s)", issues.len());
        }
        (Err(_), _) => {}
    }

    result.map(|_| ()).map_err(PlexusError::from)
}

fn issues_json(issues: &[ValidationIssue]) -> serde_json::Value {
    issues
        .iter()
        .map(|i| {
            json!({
                "path": i.path,
                "message": i.message,
                "severity": match i.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                },
            })
        })
        .collect()
}
