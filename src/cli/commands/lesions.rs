//! `plexus lesions`

use super::{Context, print_json};
use crate::anatomy::{Category, RegionScope};
use crate::cli::args::{LesionsArgs, OutputFormat};
use crate::error::PlexusError;

/// Lists lesions grouped by category.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &LesionsArgs, ctx: &Context) -> Result<(), PlexusError> {
    let scope = RegionScope::from(args.filter.region);
    let summaries = ctx.catalog.list_lesions(&args.filter.categories(), scope);

    match args.format {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Human => {
            if summaries.is_empty() {
                println!("No lesions match the given filters.");
                return Ok(());
            }

            println!("Lesion patterns ({} in region {scope})\n", summaries.len());
            for cat in Category::all() {
                let in_cat: Vec<_> = summaries.iter().filter(|s| s.category == *cat).collect();
                if in_cat.is_empty() {
                    continue;
                }

                println!("  {}", cat.label());
                for s in in_cat {
                    println!(
                        "    {:<44}{:<4}{:<12}{} muscles",
                        s.id.as_str(),
                        s.region.code(),
                        s.mode.as_str(),
                        s.muscle_count
                    );
                }
                println!();
            }

            println!("Simulate one: plexus simulate \"<name>\"");
        }
    }
    Ok(())
}
