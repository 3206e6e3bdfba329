//! `plexus completions <shell>`

use clap::CommandFactory;
use std::io::Write;

use crate::cli::args::{Cli, CompletionsArgs};

/// Writes the completion script for `args.shell` to `out`.
pub fn write_completions(args: &CompletionsArgs, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, out);
}

/// Prints the completion script to stdout.
pub fn run(args: &CompletionsArgs) {
    write_completions(args, &mut std::io::stdout());
}
