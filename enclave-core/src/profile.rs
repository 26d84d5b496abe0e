//! Weight profiles: per-dimension preference weights in `0..=10`.
//!
//! A [`WeightProfile`] is the only configuration the scorer consumes. It is
//! an explicit value object; nothing in the core reads weights from ambient
//! state. [`Preset`] supplies the named convenience defaults, and arbitrary
//! custom vectors are accepted on equal terms.

use thiserror::Error;

use crate::dimension::Dimension;

/// Largest accepted weight.
pub const MAX_WEIGHT: u8 = 10;

/// Errors returned by the validating profile constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
    /// A weight exceeded [`MAX_WEIGHT`].
    #[error("weight {value} for '{dimension}' exceeds the 0-10 scale")]
    OutOfRange {
        /// Dimension the weight was supplied for.
        dimension: Dimension,
        /// Rejected value.
        value: u8,
    },
}

/// User preference weighting across the seven dimensions.
///
/// # Examples
/// ```
/// use enclave_core::{Dimension, WeightProfile};
///
/// let profile = WeightProfile::zero()
///     .with_weight(Dimension::Nightlife, 10)
///     .with_weight(Dimension::Mobility, 8);
/// assert_eq!(profile.weight(Dimension::Nightlife), 10);
/// assert_eq!(profile.total(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightProfile {
    safety: u8,
    luxury: u8,
    nature: u8,
    nightlife: u8,
    mobility: u8,
    quiet: u8,
    cost: u8,
}

impl WeightProfile {
    /// The balanced profile: every dimension weighted 5.
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            safety: 5,
            luxury: 5,
            nature: 5,
            nightlife: 5,
            mobility: 5,
            quiet: 5,
            cost: 5,
        }
    }

    /// The empty profile: every dimension weighted 0.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            safety: 0,
            luxury: 0,
            nature: 0,
            nightlife: 0,
            mobility: 0,
            quiet: 0,
            cost: 0,
        }
    }

    /// Validate and construct a profile from values in canonical
    /// [`Dimension::ALL`] order.
    ///
    /// # Errors
    /// Returns [`WeightError::OutOfRange`] when any value exceeds 10.
    pub fn from_values(values: [u8; 7]) -> Result<Self, WeightError> {
        let mut profile = Self::zero();
        for (dimension, value) in Dimension::ALL.into_iter().zip(values) {
            profile.try_set_weight(dimension, value)?;
        }
        Ok(profile)
    }

    /// Return the weight for a dimension.
    #[must_use]
    pub const fn weight(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Safety => self.safety,
            Dimension::Luxury => self.luxury,
            Dimension::Nature => self.nature,
            Dimension::Nightlife => self.nightlife,
            Dimension::Mobility => self.mobility,
            Dimension::Quiet => self.quiet,
            Dimension::Cost => self.cost,
        }
    }

    /// Insert or update a weight, clamping into `0..=10`.
    pub const fn set_weight(&mut self, dimension: Dimension, weight: u8) {
        let clamped = if weight > MAX_WEIGHT {
            MAX_WEIGHT
        } else {
            weight
        };
        *self.slot_mut(dimension) = clamped;
    }

    /// Insert or update a weight, rejecting values above 10.
    ///
    /// # Errors
    /// Returns [`WeightError::OutOfRange`] and leaves the profile unchanged
    /// when `weight` exceeds 10.
    pub const fn try_set_weight(
        &mut self,
        dimension: Dimension,
        weight: u8,
    ) -> Result<(), WeightError> {
        if weight > MAX_WEIGHT {
            return Err(WeightError::OutOfRange {
                dimension,
                value: weight,
            });
        }
        *self.slot_mut(dimension) = weight;
        Ok(())
    }

    /// Set a weight while returning `self` for chaining.
    #[must_use]
    pub const fn with_weight(mut self, dimension: Dimension, weight: u8) -> Self {
        self.set_weight(dimension, weight);
        self
    }

    /// Sum of all weights.
    ///
    /// A zero total is legal; the scorer defines the resulting match score
    /// as 0 rather than dividing by it.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.safety as u32
            + self.luxury as u32
            + self.nature as u32
            + self.nightlife as u32
            + self.mobility as u32
            + self.quiet as u32
            + self.cost as u32
    }

    const fn slot_mut(&mut self, dimension: Dimension) -> &mut u8 {
        match dimension {
            Dimension::Safety => &mut self.safety,
            Dimension::Luxury => &mut self.luxury,
            Dimension::Nature => &mut self.nature,
            Dimension::Nightlife => &mut self.nightlife,
            Dimension::Mobility => &mut self.mobility,
            Dimension::Quiet => &mut self.quiet,
            Dimension::Cost => &mut self.cost,
        }
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Named preset profiles offered as convenience defaults.
///
/// Each preset is a fixed weight vector; the core accepts custom vectors
/// through [`WeightProfile`] on equal terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// Safety and exclusivity above all.
    LuxurySafety,
    /// Green space and affordability.
    NatureCommunity,
    /// Bars, culture, and getting around late.
    NightlifeCulture,
    /// Home-office calm with good connectivity.
    QuietTech,
    /// Transit-first living.
    MobilityAnonymity,
}

impl Preset {
    /// All presets, in menu order.
    pub const ALL: [Self; 5] = [
        Self::LuxurySafety,
        Self::NatureCommunity,
        Self::NightlifeCulture,
        Self::QuietTech,
        Self::MobilityAnonymity,
    ];

    /// Return the preset name as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LuxurySafety => "luxury-safety",
            Self::NatureCommunity => "nature-community",
            Self::NightlifeCulture => "nightlife-culture",
            Self::QuietTech => "quiet-tech",
            Self::MobilityAnonymity => "mobility-anonymity",
        }
    }

    /// The weight vector this preset stands for.
    #[must_use]
    pub const fn weights(self) -> WeightProfile {
        match self {
            Self::LuxurySafety => WeightProfile {
                safety: 10,
                luxury: 10,
                nature: 2,
                nightlife: 4,
                mobility: 0,
                quiet: 5,
                cost: 0,
            },
            Self::NatureCommunity => WeightProfile {
                safety: 6,
                luxury: 1,
                nature: 10,
                nightlife: 3,
                mobility: 4,
                quiet: 2,
                cost: 8,
            },
            Self::NightlifeCulture => WeightProfile {
                safety: 4,
                luxury: 6,
                nature: 2,
                nightlife: 10,
                mobility: 8,
                quiet: 5,
                cost: 5,
            },
            Self::QuietTech => WeightProfile {
                safety: 8,
                luxury: 7,
                nature: 5,
                nightlife: 0,
                mobility: 2,
                quiet: 10,
                cost: 2,
            },
            Self::MobilityAnonymity => WeightProfile {
                safety: 5,
                luxury: 3,
                nature: 4,
                nightlife: 7,
                mobility: 10,
                quiet: 6,
                cost: 6,
            },
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "luxury-safety" => Ok(Self::LuxurySafety),
            "nature-community" => Ok(Self::NatureCommunity),
            "nightlife-culture" => Ok(Self::NightlifeCulture),
            "quiet-tech" => Ok(Self::QuietTech),
            "mobility-anonymity" => Ok(Self::MobilityAnonymity),
            _ => Err(format!("unknown preset '{s}'")),
        }
    }
}
