//! Rank command implementation for the Enclave CLI.

use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use enclave_core::{
    Catalog, NormalizeStrategy, Preset, RankedArea, WeightProfile, pipeline, rank_contributions,
};
use enclave_data::{HttpAmenityCounter, OverpassConfig};

use crate::{
    ARG_ENDPOINT, ARG_PRESET, ARG_STRATEGY, ARG_TIMEOUT_SECS, ARG_TOP, ARG_WEIGHTS, CliError,
};

const DEFAULT_TIMEOUT_SECS: u64 = 25;
const DEFAULT_TOP: usize = 3;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the built-in catalog, fetch amenity counts from an \
                 Overpass endpoint, normalize them with the selected \
                 strategy, and print the catalog ranked against a preference \
                 profile. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Rank the catalog against a preference profile"
)]
#[ortho_config(prefix = "ENCLAVE")]
pub(crate) struct RankArgs {
    /// Normalization strategy: min-max, per-capita, or critical-mass.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Named preset profile (e.g. "nightlife-culture").
    #[arg(long = ARG_PRESET, value_name = "name")]
    #[serde(default)]
    pub(crate) preset: Option<String>,
    /// Custom weight vector: seven comma-separated integers in 0-10,
    /// ordered safety,luxury,nature,nightlife,mobility,quiet,cost.
    #[arg(long = ARG_WEIGHTS, value_name = "list")]
    #[serde(default)]
    pub(crate) weights: Option<String>,
    /// Overpass interpreter endpoint.
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Number of areas to explain in the top-picks section.
    #[arg(long = ARG_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

impl RankArgs {
    fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) strategy: NormalizeStrategy,
    pub(crate) profile: WeightProfile,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
    pub(crate) top: usize,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let strategy = args
            .strategy
            .as_deref()
            .map(NormalizeStrategy::from_str)
            .transpose()
            .map_err(|message| CliError::InvalidArgument {
                field: ARG_STRATEGY,
                message,
            })?
            .unwrap_or_default();

        let profile = resolve_profile(args.preset.as_deref(), args.weights.as_deref())?;

        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_TIMEOUT_SECS,
                message: "timeout must be positive".to_owned(),
            });
        }

        Ok(Self {
            strategy,
            profile,
            endpoint: args
                .endpoint
                .unwrap_or_else(|| enclave_data::DEFAULT_ENDPOINT.to_owned()),
            timeout: Duration::from_secs(timeout_secs),
            top: args.top.unwrap_or(DEFAULT_TOP),
        })
    }
}

fn resolve_profile(
    preset: Option<&str>,
    weights: Option<&str>,
) -> Result<WeightProfile, CliError> {
    match (preset, weights) {
        (Some(_), Some(_)) => Err(CliError::ConflictingProfile),
        (Some(name), None) => {
            let preset =
                Preset::from_str(name).map_err(|message| CliError::InvalidArgument {
                    field: ARG_PRESET,
                    message,
                })?;
            Ok(preset.weights())
        }
        (None, Some(list)) => parse_weights(list),
        (None, None) => Ok(WeightProfile::balanced()),
    }
}

pub(crate) fn parse_weights(list: &str) -> Result<WeightProfile, CliError> {
    let values: Vec<u8> = list
        .split(',')
        .map(|raw| {
            raw.trim()
                .parse::<u8>()
                .map_err(|err| CliError::InvalidArgument {
                    field: ARG_WEIGHTS,
                    message: format!("'{raw}' is not a weight: {err}"),
                })
        })
        .collect::<Result<_, _>>()?;
    let values: [u8; 7] = values
        .try_into()
        .map_err(|values: Vec<u8>| CliError::InvalidArgument {
            field: ARG_WEIGHTS,
            message: format!("expected 7 comma-separated values, got {}", values.len()),
        })?;
    Ok(WeightProfile::from_values(values)?)
}

pub(crate) fn run(args: RankArgs) -> Result<(), CliError> {
    let config = args.into_config()?;

    let catalog = Catalog::los_angeles()?;
    let counter = HttpAmenityCounter::with_config(
        OverpassConfig::new(config.endpoint.clone()).with_timeout(config.timeout),
    )?;
    let areas = pipeline::load(catalog, &counter, config.strategy)?;
    let ranked = enclave_core::rank(&areas, &config.profile);

    print!("{}", render(&ranked, &config));
    Ok(())
}

/// Render the ranking as a table plus a top-picks section.
pub(crate) fn render(ranked: &[RankedArea<'_>], config: &RankConfig) -> String {
    let mut out = String::new();
    let width = ranked
        .iter()
        .map(|entry| entry.area.name.len())
        .max()
        .unwrap_or(4);

    out.push_str(&format!(
        "Ranking ({strategy} normalization)\n\n",
        strategy = config.strategy
    ));
    out.push_str(&format!("  #   {:<width$}  Match\n", "Area"));
    for (position, entry) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "  {:<3} {:<width$}  {:>5.1}%\n",
            position + 1,
            entry.area.name,
            entry.match_percentage,
        ));
    }

    if config.top > 0 {
        out.push_str("\nTop picks:\n");
        for entry in ranked.iter().take(config.top) {
            let reasons = rank_contributions(entry.area, &config.profile).describe();
            out.push_str(&format!(
                "  {name}: {percentage:.1}% ({reasons})\n",
                name = entry.area.name,
                percentage = entry.match_percentage,
            ));
        }
    }
    out
}
