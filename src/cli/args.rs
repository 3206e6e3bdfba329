//! CLI argument definitions
//!
//! All Clap derive structs for `plexus` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::anatomy::{Category, Region, RegionScope};
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Brachial plexus pathway explorer, lesion simulator and EMG localization quiz.
#[derive(Parser, Debug)]
#[command(name = "plexus", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PLEXUS_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "PLEXUS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Directory holding plexus.yaml, muscles.yaml and lesions.yaml.
    /// The built-in data is used when absent.
    #[arg(long, global = true, env = "PLEXUS_DATA")]
    pub data: Option<PathBuf>,

    /// Engine configuration file (YAML).
    #[arg(long, global = true, env = "PLEXUS_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the roots and segments a terminal nerve runs through.
    Trace(TraceArgs),

    /// Show what a lesion highlights on the plexus.
    Simulate(SimulateArgs),

    /// List lesion patterns.
    Lesions(LesionsArgs),

    /// List muscles and their innervation.
    Muscles(MusclesArgs),

    /// Print one randomly generated localization case.
    Case(CaseArgs),

    /// Run an interactive localization quiz on stdin.
    Quiz(QuizArgs),

    /// Validate reference data.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

/// Arguments for `trace`.
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Terminal nerve id (e.g. `median`).
    pub nerve: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Lesion name (e.g. "Posterior cord").
    pub lesion: String,

    /// Margin behind the injury marker for positional simulation.
    #[arg(long, env = "PLEXUS_POSITIONAL_MARGIN")]
    pub margin: Option<f64>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Lesion filters shared by `lesions`, `case` and `quiz`.
#[derive(Args, Debug, Clone)]
pub struct LesionFilterArgs {
    /// Lesion categories to include (repeatable); all when absent.
    #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Region to draw from.
    #[arg(short, long, default_value = "mixed")]
    pub region: RegionArg,
}

impl LesionFilterArgs {
    /// Enabled categories; every category when none was given.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            Category::all().to_vec()
        } else {
            self.categories.clone()
        }
    }
}

/// Arguments for `lesions`.
#[derive(Args, Debug)]
pub struct LesionsArgs {
    /// Filters.
    #[command(flatten)]
    pub filter: LesionFilterArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `muscles`.
#[derive(Args, Debug)]
pub struct MusclesArgs {
    /// Region to list.
    #[arg(short, long, default_value = "mixed")]
    pub region: RegionArg,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `case`.
#[derive(Args, Debug)]
pub struct CaseArgs {
    /// Filters.
    #[command(flatten)]
    pub filter: LesionFilterArgs,

    /// Seed for a reproducible case.
    #[arg(long, env = "PLEXUS_SEED")]
    pub seed: Option<u64>,

    /// Include the answer in the output.
    #[arg(long)]
    pub reveal: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `quiz`.
#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Filters.
    #[command(flatten)]
    pub filter: LesionFilterArgs,

    /// Seed for a reproducible run.
    #[arg(long, env = "PLEXUS_SEED")]
    pub seed: Option<u64>,

    /// Stop after this many cases; runs until end of input when absent.
    #[arg(long)]
    pub rounds: Option<u32>,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Region filter as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RegionArg {
    /// Upper extremity.
    Ue,
    /// Lower extremity.
    Le,
    /// Both regions.
    #[default]
    Mixed,
}

impl From<RegionArg> for RegionScope {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Ue => Self::Only(Region::Upper),
            RegionArg::Le => Self::Only(Region::Lower),
            RegionArg::Mixed => Self::Mixed,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
