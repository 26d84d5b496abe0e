//! Command-line interface for the Enclave neighborhood finder.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::sync::Arc;
use thiserror::Error;

use enclave_core::{CatalogError, PipelineError, WeightError};
use enclave_data::CounterBuildError;

mod rank;

pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_PRESET: &str = "preset";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_ENDPOINT: &str = "endpoint";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_TOP: &str = "top";

/// Run the Enclave CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging, or
/// the ranking pipeline fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "enclave",
    about = "Score and rank candidate neighborhoods against a preference profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch amenity counts, normalize, and print the ranked catalog.
    Rank(rank::RankArgs),
}

/// Errors emitted by the Enclave CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// An option value could not be interpreted.
    #[error("invalid --{field}: {message}")]
    InvalidArgument {
        /// Name of the offending option.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },
    /// Both a preset and an explicit weight vector were supplied.
    #[error("--preset and --weights are mutually exclusive")]
    ConflictingProfile,
    /// A weight value failed validation.
    #[error(transparent)]
    Weights(#[from] WeightError),
    /// The built-in catalog failed validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The Overpass counter could not be constructed.
    #[error(transparent)]
    CounterBuild(#[from] CounterBuildError),
    /// The load pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[cfg(test)]
mod tests;
