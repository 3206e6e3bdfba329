//! `plexus trace <nerve>`

use serde::Serialize;

use super::{Context, join, print_json};
use crate::anatomy::NodeId;
use crate::cli::args::{OutputFormat, TraceArgs};
use crate::engine::{HighlightSet, PathwayTracer};
use crate::error::PlexusError;

#[derive(Serialize)]
struct TraceOutput<'a> {
    nerve: &'a NodeId,
    label: &'a str,
    highlight: HighlightSet,
}

/// Prints the roots and segments a terminal nerve runs through.
///
/// # Errors
///
/// Returns `PlexusError::NotFound` if `args.nerve` is not a terminal nerve.
pub fn run(args: &TraceArgs, ctx: &Context) -> Result<(), PlexusError> {
    let graph = ctx.catalog.graph();
    let node = graph
        .terminal_nerve(&args.nerve)
        .ok_or_else(|| PlexusError::NotFound {
            kind: "nerve",
            name: args.nerve.clone(),
            suggestion: graph.suggest_nerve(&args.nerve),
        })?;

    let highlight = PathwayTracer::new(ctx.catalog.clone()).trace(&args.nerve);

    match args.format {
        OutputFormat::Json => print_json(&TraceOutput {
            nerve: &node.id,
            label: &node.label,
            highlight,
        })?,
        OutputFormat::Human => {
            println!("{} ({})", node.label, node.id);
            println!("  roots:    {}", join(&highlight.roots));
            println!("  segments: {}", join(&highlight.segments));
        }
    }
    Ok(())
}
