//! `plexus muscles`

use super::{Context, join, print_json};
use crate::anatomy::{Muscle, Region, RegionScope};
use crate::cli::args::{MusclesArgs, OutputFormat};
use crate::error::PlexusError;

/// Lists muscles with nerve, roots and cord.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &MusclesArgs, ctx: &Context) -> Result<(), PlexusError> {
    let scope = RegionScope::from(args.region);
    let muscles: Vec<&Muscle> = Region::all()
        .iter()
        .filter(|r| scope.matches(**r))
        .flat_map(|r| ctx.catalog.muscles_by_region(*r))
        .collect();

    match args.format {
        OutputFormat::Json => print_json(&muscles)?,
        OutputFormat::Human => {
            for region in Region::all().iter().filter(|r| scope.matches(**r)) {
                println!("  {region}");
                for m in muscles.iter().filter(|m| m.region == *region) {
                    println!(
                        "    {:<44}{:<28}{:<20}{}",
                        m.id.as_str(),
                        m.nerve,
                        join(&m.roots),
                        m.cord.as_deref().unwrap_or("-")
                    );
                }
                println!();
            }
        }
    }
    Ok(())
}
