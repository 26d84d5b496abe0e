//! Normalization of raw amenity counts onto the common 0-10 scale.
//!
//! Three interchangeable strategies, selected by configuration:
//!
//! - [`NormalizeStrategy::MinMax`] rescales each count column relative to
//!   the batch. It is purely relative: an area's score moves when other
//!   areas in the batch change, even if its own count does not.
//! - [`NormalizeStrategy::PerCapita`] scores each area against a fixed
//!   per-10k-residents target, independent of the rest of the batch. It
//!   rewards tiny populations with trivial absolute counts.
//! - [`NormalizeStrategy::CriticalMass`] refines per-capita with a minimum
//!   absolute count: below it, the achievable score is capped at 4.0. This
//!   is the canonical strategy; the other two are retained as documented
//!   alternatives.
//!
//! Normalization is a batch operation. The fetch phase must complete for
//! every area before it runs, because min-max needs the full column.

use thiserror::Error;

use crate::area::Area;
use crate::dimension::AmenityClass;

/// Top of the common comparability scale.
pub const SCALE_MAX: f64 = 10.0;

/// Score assigned by min-max when a column has no variance.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Ceiling on the score of an area below critical mass.
pub const CRITICAL_MASS_CEILING: f64 = 4.0;

/// Resident basis for per-capita ratios.
const RATIO_BASIS: f64 = 10_000.0;

/// Strategy used to turn raw counts into 0-10 scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NormalizeStrategy {
    /// Batch-relative rescaling between the column minimum and maximum.
    MinMax,
    /// Fixed-target ratio per 10 000 residents.
    PerCapita,
    /// Per-capita with a minimum absolute-count gate.
    #[default]
    CriticalMass,
}

impl NormalizeStrategy {
    /// All strategies, in order of their evolution.
    pub const ALL: [Self; 3] = [Self::MinMax, Self::PerCapita, Self::CriticalMass];

    /// Return the strategy name as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinMax => "min-max",
            Self::PerCapita => "per-capita",
            Self::CriticalMass => "critical-mass",
        }
    }

    /// Whether the strategy divides by population.
    #[must_use]
    pub const fn needs_population(self) -> bool {
        matches!(self, Self::PerCapita | Self::CriticalMass)
    }
}

impl std::fmt::Display for NormalizeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NormalizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min-max" => Ok(Self::MinMax),
            "per-capita" => Ok(Self::PerCapita),
            "critical-mass" => Ok(Self::CriticalMass),
            _ => Err(format!("unknown normalization strategy '{s}'")),
        }
    }
}

/// Errors from [`normalize_batch`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The batch was empty.
    #[error("cannot normalize an empty batch")]
    EmptyBatch,
    /// A population-based strategy met an area without a usable population.
    ///
    /// The guard runs before any division; a zero or missing estimate never
    /// reaches the per-capita formula.
    #[error("strategy '{strategy}' requires a positive population for '{area}'")]
    MissingPopulation {
        /// Name of the offending area.
        area: String,
        /// Strategy that needed the population.
        strategy: NormalizeStrategy,
    },
}

/// Normalize every area's counts into its [`crate::AmenityScores`].
///
/// All outputs land in `[0.0, 10.0]`. The whole batch is validated before
/// any score is written, so a failed call leaves the areas untouched.
///
/// # Errors
/// Returns [`NormalizeError::EmptyBatch`] for an empty slice and
/// [`NormalizeError::MissingPopulation`] when a population-based strategy
/// meets an area without a positive population estimate.
pub fn normalize_batch(
    areas: &mut [Area],
    strategy: NormalizeStrategy,
) -> Result<(), NormalizeError> {
    if areas.is_empty() {
        return Err(NormalizeError::EmptyBatch);
    }
    if strategy.needs_population() {
        for area in areas.iter() {
            usable_population(area, strategy)?;
        }
    }

    match strategy {
        NormalizeStrategy::MinMax => {
            for class in AmenityClass::ALL {
                let column: Vec<u32> = areas.iter().map(|area| area.counts.get(class)).collect();
                let lo = column.iter().copied().min().unwrap_or(0);
                let hi = column.iter().copied().max().unwrap_or(0);
                for area in areas.iter_mut() {
                    let score = min_max(area.counts.get(class), lo, hi);
                    area.scores.set(class, score);
                }
            }
        }
        NormalizeStrategy::PerCapita | NormalizeStrategy::CriticalMass => {
            for area in areas.iter_mut() {
                let population = usable_population(area, strategy)?;
                for class in AmenityClass::ALL {
                    let count = area.counts.get(class);
                    let score = if strategy == NormalizeStrategy::CriticalMass {
                        critical_mass(count, population, class)
                    } else {
                        per_capita(count, population, class)
                    };
                    area.scores.set(class, score);
                }
            }
        }
    }
    Ok(())
}

fn usable_population(area: &Area, strategy: NormalizeStrategy) -> Result<u32, NormalizeError> {
    match area.population {
        Some(population) if population > 0 => Ok(population),
        _ => Err(NormalizeError::MissingPopulation {
            area: area.name.clone(),
            strategy,
        }),
    }
}

/// Rescale `value` between the column extremes; no variance yields the
/// neutral midpoint.
#[expect(
    clippy::float_arithmetic,
    reason = "min-max rescaling is a ratio of count deltas"
)]
fn min_max(value: u32, lo: u32, hi: u32) -> f64 {
    if hi == lo {
        return NEUTRAL_SCORE;
    }
    let score = f64::from(value - lo) / f64::from(hi - lo) * SCALE_MAX;
    score.clamp(0.0, SCALE_MAX)
}

/// Score `count` against the class target per 10 000 residents, capped at
/// the scale maximum.
#[expect(
    clippy::float_arithmetic,
    reason = "per-capita scoring divides counts by population"
)]
fn per_capita(count: u32, population: u32, class: AmenityClass) -> f64 {
    let ratio = f64::from(count) / f64::from(population) * RATIO_BASIS;
    let score = ratio / class.target_per_10k() * SCALE_MAX;
    score.clamp(0.0, SCALE_MAX)
}

/// Per-capita score gated by a minimum absolute count.
///
/// Below the gate the score grows linearly to the 4.0 ceiling, so a
/// near-empty, tiny-population area cannot score high on ratio alone. At
/// the gate the per-capita formula takes over.
#[expect(
    clippy::float_arithmetic,
    reason = "the sub-critical ramp is a ratio of counts"
)]
fn critical_mass(count: u32, population: u32, class: AmenityClass) -> f64 {
    if count < class.critical_mass() {
        let ramp = f64::from(count) / f64::from(class.critical_mass()) * CRITICAL_MASS_CEILING;
        return ramp.clamp(0.0, CRITICAL_MASS_CEILING);
    }
    per_capita(count, population, class)
}
