//! `plexus quiz`
//!
//! Line-oriented quiz loop. Each case is answered by option number or by
//! lesion name; `q` or end of input stops the run.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{BufRead, Write};

use super::Context;
use super::case::render_case;
use crate::anatomy::RegionScope;
use crate::cli::args::QuizArgs;
use crate::error::{PlexusError, SessionError};
use crate::quiz::{CaseFilter, CaseGenerator, QuizSession};

/// Runs the quiz, reading answers from `input` and writing to `output`.
///
/// # Errors
///
/// Returns `PlexusError::Case` if no lesion matches the filters and
/// `PlexusError::Io` if reading or writing fails.
pub fn run(
    args: &QuizArgs,
    ctx: &Context,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), PlexusError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let filter = CaseFilter::new(
        args.filter.categories(),
        RegionScope::from(args.filter.region),
    );
    let generator = CaseGenerator::new(ctx.catalog.clone(), &ctx.config);
    let mut session = QuizSession::new(generator, filter, StdRng::seed_from_u64(seed));
    tracing::info!(seed, "quiz seed");

    let mut case_text = render_case(session.start()?);
    let mut round = 1_u32;

    'rounds: loop {
        writeln!(output, "\nCase {round}")?;
        write!(output, "{case_text}")?;

        loop {
            write!(output, "Answer (1-4, q to quit): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break 'rounds;
            }
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                break 'rounds;
            }

            let choice = resolve_choice(&session, answer);
            match session.select_answer(&choice) {
                Ok(()) => break,
                Err(SessionError::InvalidSelection(msg)) => writeln!(output, "{msg}")?,
                Err(e) => return Err(e.into()),
            }
        }

        let outcome = session.submit()?;
        if outcome.correct {
            writeln!(output, "Correct. Score {}", outcome.score)?;
        } else {
            writeln!(
                output,
                "Incorrect: it was {}. Score {}",
                outcome.correct_answer, outcome.score
            )?;
        }
        if !outcome.description.is_empty() {
            writeln!(output, "{}", outcome.description)?;
        }

        if args.rounds.is_some_and(|limit| round >= limit) {
            break;
        }
        round += 1;
        case_text = render_case(session.next_case()?);
    }

    let score = session.stop();
    writeln!(
        output,
        "\nFinal score {score} ({:.0}%)",
        score.accuracy() * 100.0
    )?;
    Ok(())
}

/// Maps an option number to the lesion name; anything else is passed
/// through as a name.
fn resolve_choice<R: rand::Rng>(session: &QuizSession<R>, answer: &str) -> String {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.current_case()?.options.get(i))
        .map_or_else(|| answer.to_string(), ToString::to_string)
}
