//! Human-readable justification for a ranked area.
//!
//! Two entry points produce an [`Explanation`]:
//!
//! - [`rank_contributions`] (the default path) ranks `value × weight` per
//!   dimension and names the top contributors, so the reasons reflect what
//!   actually drove the score.
//! - [`threshold_reasons`] is the retained alternative: independent checks
//!   that an attribute clears a fixed bar while its weight clears another.
//!
//! Either way, an area with nothing to say about it gets the neutral
//! [`Explanation::Balanced`].

use crate::area::Area;
use crate::dimension::{AmenityClass, Dimension};
use crate::profile::WeightProfile;

/// Static attributes must exceed this value to qualify as a threshold
/// reason; dynamic attributes use the batch mean instead.
pub const STATIC_REASON_BAR: f64 = 7.0;

/// Weights must exceed this value for a dimension to qualify as a
/// threshold reason.
pub const WEIGHT_REASON_BAR: u8 = 4;

/// At most this many contribution-ranked reasons are reported.
pub const MAX_REASONS: usize = 2;

/// Why an area ranks where it does.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Explanation {
    /// Dimensions that drove the score, strongest first.
    Drivers(Vec<Dimension>),
    /// Nothing stood out; the area is a balanced option.
    Balanced,
}

impl Explanation {
    /// Short human-readable phrase for a driving dimension.
    #[must_use]
    pub const fn reason_label(dimension: Dimension) -> &'static str {
        match dimension {
            Dimension::Safety => "high safety",
            Dimension::Luxury => "exclusive and private",
            Dimension::Nature => "green and outdoorsy",
            Dimension::Nightlife => "lively nightlife",
            Dimension::Mobility => "well connected",
            Dimension::Quiet => "quiet with solid connectivity",
            Dimension::Cost => "affordable",
        }
    }

    /// Render the explanation as a single sentence fragment.
    ///
    /// # Examples
    /// ```
    /// use enclave_core::{Dimension, Explanation};
    ///
    /// let explanation = Explanation::Drivers(vec![Dimension::Safety, Dimension::Cost]);
    /// assert_eq!(explanation.describe(), "high safety, affordable");
    /// assert_eq!(Explanation::Balanced.describe(), "balanced option");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Drivers(dimensions) => dimensions
                .iter()
                .map(|&dimension| Self::reason_label(dimension))
                .collect::<Vec<_>>()
                .join(", "),
            Self::Balanced => "balanced option".to_owned(),
        }
    }
}

/// Name the dimensions that contributed most to the area's score.
///
/// Contributions are `value × weight`; only strictly positive ones count,
/// and at most [`MAX_REASONS`] are reported, strongest first. Ties keep
/// canonical dimension order.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "contributions multiply attribute values by weights"
)]
pub fn rank_contributions(area: &Area, profile: &WeightProfile) -> Explanation {
    let mut contributions: Vec<(Dimension, f64)> = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let contribution = area.attribute(dimension) * f64::from(profile.weight(dimension));
            (dimension, contribution)
        })
        .filter(|&(_, contribution)| contribution > 0.0)
        .collect();
    if contributions.is_empty() {
        return Explanation::Balanced;
    }
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1));
    Explanation::Drivers(
        contributions
            .into_iter()
            .take(MAX_REASONS)
            .map(|(dimension, _)| dimension)
            .collect(),
    )
}

/// Mean normalized score per amenity class across the batch.
///
/// Used as the qualification bar for dynamic attributes in
/// [`threshold_reasons`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchMeans {
    /// Mean normalized nightlife score.
    pub nightlife: f64,
    /// Mean normalized nature score.
    pub nature: f64,
    /// Mean normalized mobility score.
    pub mobility: f64,
}

impl BatchMeans {
    /// Compute means over a batch of enriched areas.
    ///
    /// An empty batch yields all-zero means, which makes every dynamic
    /// attribute qualify trivially; callers ranking a real batch never see
    /// that case because the pipeline rejects empty catalogs.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "means sum normalized scores and divide by the bounded batch size"
    )]
    pub fn of(areas: &[Area]) -> Self {
        if areas.is_empty() {
            return Self::default();
        }
        let len = areas.len() as f64;
        let mut sums = Self::default();
        for area in areas {
            sums.nightlife += area.scores.nightlife;
            sums.nature += area.scores.nature;
            sums.mobility += area.scores.mobility;
        }
        Self {
            nightlife: sums.nightlife / len,
            nature: sums.nature / len,
            mobility: sums.mobility / len,
        }
    }

    const fn get(self, class: AmenityClass) -> f64 {
        match class {
            AmenityClass::Nightlife => self.nightlife,
            AmenityClass::Nature => self.nature,
            AmenityClass::Mobility => self.mobility,
        }
    }
}

/// Independent threshold checks, the earlier justification variant.
///
/// A dimension qualifies when its value clears the bar (a fixed 7.0 for
/// static attributes, the batch mean for dynamic ones) and its weight
/// exceeds [`WEIGHT_REASON_BAR`]. Quiet never qualified in this variant
/// and is skipped; [`rank_contributions`] covers all seven dimensions.
#[must_use]
pub fn threshold_reasons(area: &Area, profile: &WeightProfile, means: BatchMeans) -> Explanation {
    let qualifying: Vec<Dimension> = Dimension::ALL
        .into_iter()
        .filter(|&dimension| dimension != Dimension::Quiet)
        .filter(|&dimension| {
            let bar = dimension
                .amenity_class()
                .map_or(STATIC_REASON_BAR, |class| means.get(class));
            area.attribute(dimension) > bar && profile.weight(dimension) > WEIGHT_REASON_BAR
        })
        .collect();
    if qualifying.is_empty() {
        Explanation::Balanced
    } else {
        Explanation::Drivers(qualifying)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{AmenityScores, StaticAttributes};
    use geo::Coord;

    fn area(safety: u8, cost: u8, nightlife_score: f64) -> Area {
        let statics = StaticAttributes::new(safety, 2, 3, cost).expect("valid statics");
        let mut built = Area::new(
            "somewhere",
            Coord { x: -118.25, y: 34.05 },
            1500,
            Some(10_000),
            statics,
        )
        .expect("valid area");
        built.scores = AmenityScores {
            nightlife: nightlife_score,
            nature: 0.0,
            mobility: 0.0,
        };
        built
    }

    #[test]
    fn contributions_name_the_strongest_drivers() {
        let subject = area(9, 4, 8.0);
        let profile = WeightProfile::zero()
            .with_weight(Dimension::Safety, 10)
            .with_weight(Dimension::Nightlife, 10)
            .with_weight(Dimension::Cost, 1);
        // safety 90 > nightlife 80 > cost 4; only the top two are reported.
        assert_eq!(
            rank_contributions(&subject, &profile),
            Explanation::Drivers(vec![Dimension::Safety, Dimension::Nightlife])
        );
    }

    #[test]
    fn zero_weights_yield_balanced() {
        let subject = area(9, 9, 9.0);
        assert_eq!(
            rank_contributions(&subject, &WeightProfile::zero()),
            Explanation::Balanced
        );
    }

    #[test]
    fn zero_valued_attributes_do_not_qualify() {
        let subject = area(0, 0, 0.0);
        let profile = WeightProfile::balanced();
        let explanation = rank_contributions(&subject, &profile);
        // Luxury and quiet still contribute through their static values.
        assert_eq!(
            explanation,
            Explanation::Drivers(vec![Dimension::Quiet, Dimension::Luxury])
        );
    }

    #[test]
    fn threshold_variant_requires_value_and_weight() {
        let subject = area(8, 2, 9.0);
        let means = BatchMeans {
            nightlife: 5.0,
            nature: 5.0,
            mobility: 5.0,
        };
        // Safety clears 7.0 with weight 10; nightlife clears the mean with
        // weight 5; cost clears neither bar.
        let profile = WeightProfile::zero()
            .with_weight(Dimension::Safety, 10)
            .with_weight(Dimension::Nightlife, 5)
            .with_weight(Dimension::Cost, 10);
        assert_eq!(
            threshold_reasons(&subject, &profile, means),
            Explanation::Drivers(vec![Dimension::Safety, Dimension::Nightlife])
        );
    }

    #[test]
    fn threshold_variant_falls_back_to_balanced() {
        let subject = area(5, 5, 0.0);
        let means = BatchMeans::of(std::slice::from_ref(&subject));
        assert_eq!(
            threshold_reasons(&subject, &WeightProfile::balanced(), means),
            Explanation::Balanced
        );
    }

    #[test]
    fn batch_means_average_dynamic_scores() {
        let mut a = area(5, 5, 2.0);
        a.scores.mobility = 4.0;
        let mut b = area(5, 5, 6.0);
        b.scores.mobility = 8.0;
        let means = BatchMeans::of(&[a, b]);
        assert_eq!(means.nightlife, 4.0);
        assert_eq!(means.mobility, 6.0);
        assert_eq!(means.nature, 0.0);
    }
}
