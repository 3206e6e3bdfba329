//! `plexus case`

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::{Context, join, print_json};
use crate::anatomy::{LesionId, MuscleId, Region, RegionScope};
use crate::cli::args::{CaseArgs, OutputFormat};
use crate::error::PlexusError;
use crate::quiz::{Case, CaseFilter, CaseGenerator};

/// A case as printed; the answer is only present when revealed.
#[derive(Serialize)]
struct CaseView<'a> {
    seed: u64,
    region: Region,
    abnormal_muscles: &'a [MuscleId],
    normal_muscles: &'a [MuscleId],
    options: &'a [LesionId],
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'a LesionId>,
}

/// Prints one generated case.
///
/// # Errors
///
/// Returns `PlexusError::Case` if no lesion matches the filters.
pub fn run(args: &CaseArgs, ctx: &Context) -> Result<(), PlexusError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "generating case");

    let filter = CaseFilter::new(
        args.filter.categories(),
        RegionScope::from(args.filter.region),
    );
    let generator = CaseGenerator::new(ctx.catalog.clone(), &ctx.config);
    let case = generator.generate_case(&filter, &mut StdRng::seed_from_u64(seed))?;

    match args.format {
        OutputFormat::Json => print_json(&CaseView {
            seed,
            region: case.region,
            abnormal_muscles: &case.abnormal_muscles,
            normal_muscles: &case.normal_muscles,
            options: &case.options,
            answer: args.reveal.then_some(&case.correct_lesion),
        })?,
        OutputFormat::Human => {
            print!("{}", render_case(&case));
            if args.reveal {
                println!("Answer: {}", case.correct_lesion);
            } else {
                println!("Reproduce with --seed {seed} --reveal to see the answer.");
            }
        }
    }
    Ok(())
}

/// Human-readable case body, shared with the interactive quiz.
pub(crate) fn render_case(case: &Case) -> String {
    let mut out = format!("Needle EMG, region {}\n", case.region);
    out.push_str(&format!("  abnormal: {}\n", join(&case.abnormal_muscles)));
    out.push_str(&format!("  normal:   {}\n", join(&case.normal_muscles)));
    out.push_str("Where is the lesion?\n");
    for (i, option) in case.options.iter().enumerate() {
        out.push_str(&format!("  {}. {option}\n", i + 1));
    }
    out
}
