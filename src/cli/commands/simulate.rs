//! `plexus simulate <lesion>`

use super::{Context, join, print_json};
use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::config::EngineConfig;
use crate::engine::{LesionSimulator, SimulationMode};
use crate::error::PlexusError;

/// Prints what a lesion highlights.
///
/// # Errors
///
/// Returns `PlexusError::NotFound` for an unknown lesion and
/// `PlexusError::Config` for an invalid `--margin`.
pub fn run(args: &SimulateArgs, ctx: &Context) -> Result<(), PlexusError> {
    let lesion = ctx
        .catalog
        .lesion(&args.lesion)
        .ok_or_else(|| PlexusError::NotFound {
            kind: "lesion",
            name: args.lesion.clone(),
            suggestion: ctx.catalog.lesions().suggest_lesion(&args.lesion),
        })?;

    let config = EngineConfig {
        positional_margin: args.margin.unwrap_or(ctx.config.positional_margin),
        ..ctx.config.clone()
    };
    config.validate()?;

    let simulation = LesionSimulator::with_config(ctx.catalog.clone(), &config).simulate(&args.lesion);

    match args.format {
        OutputFormat::Json => print_json(&simulation)?,
        OutputFormat::Human => {
            println!("{} [{} / {}]", lesion.id, lesion.category, lesion.region);
            match simulation.mode {
                SimulationMode::Precise => println!("  mode:     precise"),
                SimulationMode::Positional => println!(
                    "  mode:     positional (approximate, margin {})",
                    config.positional_margin
                ),
                SimulationMode::Diffuse => println!("  mode:     diffuse (no focal site)"),
            }
            if let Some(marker) = simulation.injury_marker {
                println!("  marker:   ({}, {})", marker.x, marker.y);
            }
            println!("  roots:    {}", join(&simulation.highlight.roots));
            println!("  segments: {}", join(&simulation.highlight.segments));
            println!("  nerves:   {}", join(&simulation.highlight.nerves));
            println!("  muscles:  {}", join(&lesion.muscles));
            if !lesion.description.is_empty() {
                println!();
                println!("{}", lesion.description);
            }
        }
    }
    Ok(())
}
