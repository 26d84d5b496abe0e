//! Weighted affinity scoring and ranking.
//!
//! The match score is a pure function of an enriched [`Area`] and a
//! [`WeightProfile`]: the weighted average of the seven dimension values,
//! on the 0-10 scale. Re-scoring after a weight change touches nothing but
//! this module and the justification engine; enrichment and normalization
//! never re-run.

use crate::area::Area;
use crate::dimension::Dimension;
use crate::profile::WeightProfile;

/// An area's position in a ranking, with its affinity figures.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedArea<'a> {
    /// The scored area.
    pub area: &'a Area,
    /// Weighted affinity on the 0-10 scale.
    pub match_score: f64,
    /// Affinity as a percentage, `match_score * 10`.
    pub match_percentage: f64,
}

/// Weighted average of the area's attributes under the given weights.
///
/// A zero total weight yields 0 by definition (not an error and not NaN),
/// which sinks the area to the bottom of any ranking. Scaling every weight
/// by the same positive factor leaves the result unchanged.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use enclave_core::{match_score, Area, Dimension, StaticAttributes, WeightProfile};
///
/// # fn main() -> Result<(), enclave_core::AreaError> {
/// let statics = StaticAttributes::new(8, 2, 4, 6)?;
/// let area = Area::new("Eagle Rock", Coord { x: -118.21, y: 34.14 }, 1500, None, statics)?;
/// let profile = WeightProfile::zero().with_weight(Dimension::Safety, 10);
/// assert_eq!(match_score(&area, &profile), 8.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the affinity score is a weighted average of attribute values"
)]
pub fn match_score(area: &Area, profile: &WeightProfile) -> f64 {
    let total = profile.total();
    if total == 0 {
        return 0.0;
    }
    let weighted: f64 = Dimension::ALL
        .into_iter()
        .map(|dimension| area.attribute(dimension) * f64::from(profile.weight(dimension)))
        .sum();
    weighted / f64::from(total)
}

/// Convert a 0-10 match score to a 0-100 percentage.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentage is a fixed rescaling of the match score"
)]
pub fn match_percentage(score: f64) -> f64 {
    score / 10.0 * 100.0
}

/// Score every area and sort descending by match percentage.
///
/// The sort is stable, so ties keep catalog order; with an all-zero weight
/// vector the ranking therefore reproduces the catalog exactly.
#[must_use]
pub fn rank<'a>(areas: &'a [Area], profile: &WeightProfile) -> Vec<RankedArea<'a>> {
    let mut ranked: Vec<RankedArea<'a>> = areas
        .iter()
        .map(|area| {
            let score = match_score(area, profile);
            RankedArea {
                area,
                match_score: score,
                match_percentage: match_percentage(score),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    ranked
}
