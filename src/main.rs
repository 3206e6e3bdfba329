//! `plexus` - brachial plexus explorer and EMG localization quiz

use clap::Parser;

use plexus::cli::args::Cli;
use plexus::cli::commands;
use plexus::error::ExitCode;
use plexus::observability::{describe_metrics, init_logging};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format, cli.verbose, cli.quiet, cli.color);
    describe_metrics();

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
