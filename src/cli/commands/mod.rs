//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler and builds
//! the shared [`Context`] (reference catalog plus engine configuration) the
//! data-driven commands work from.

pub mod case;
pub mod completions;
pub mod lesions;
pub mod muscles;
pub mod quiz;
pub mod simulate;
pub mod trace;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use crate::anatomy::{Catalog, CatalogLoader};
use crate::cli::args::{Cli, Commands};
use crate::config::EngineConfig;
use crate::error::PlexusError;

/// Reference data and configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// The loaded catalog.
    pub catalog: Arc<Catalog>,
    /// Engine tunables.
    pub config: EngineConfig,
}

impl Context {
    /// Loads the catalog from `data` (built-in when `None`) and the engine
    /// config from `config` (defaults when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the data or config cannot be loaded.
    pub fn load(data: Option<&Path>, config: Option<&Path>) -> Result<Self, PlexusError> {
        let loader = CatalogLoader::with_defaults();
        let result = match data {
            Some(dir) => {
                tracing::info!(data = %dir.display(), "loading reference data");
                loader.load_dir(dir)?
            }
            None => loader.load_builtin()?,
        };
        let config = config
            .map(EngineConfig::load)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            catalog: result.catalog,
            config,
        })
    }
}

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), PlexusError> {
    let data = cli.data.as_deref();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Validate(args) => validate::run(&args, data),
        Commands::Trace(args) => trace::run(&args, &Context::load(data, config)?),
        Commands::Simulate(args) => simulate::run(&args, &Context::load(data, config)?),
        Commands::Lesions(args) => lesions::run(&args, &Context::load(data, config)?),
        Commands::Muscles(args) => muscles::run(&args, &Context::load(data, config)?),
        Commands::Case(args) => case::run(&args, &Context::load(data, config)?),
        Commands::Quiz(args) => {
            let ctx = Context::load(data, config)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            quiz::run(&args, &ctx, &mut stdin.lock(), &mut stdout.lock())
        }
    }
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PlexusError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Joins ids for human output, `-` when empty.
pub(crate) fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
