//! Preference dimensions and amenity classes.
//!
//! [`Dimension`] enumerates the seven axes a weight profile can express a
//! preference on. [`AmenityClass`] enumerates the three dimensions whose
//! values are fetched from a spatial-data service and normalized, rather
//! than hand-assigned in the catalog. The enums offer compile-time safety
//! for attribute lookups.
//!
//! # Examples
//! ```
//! use enclave_core::{AmenityClass, Dimension};
//!
//! assert_eq!(Dimension::Nightlife.as_str(), "nightlife");
//! assert_eq!(AmenityClass::Nature.dimension(), Dimension::Nature);
//! ```

/// A single axis of the preference space.
///
/// The declaration order is canonical: weight vectors, contribution
/// rankings, and tie-breaks all follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Dimension {
    /// Personal safety (inverse of crime).
    Safety,
    /// Luxury and privacy.
    Luxury,
    /// Parks and outdoor space.
    Nature,
    /// Bars, pubs, and nightclubs.
    Nightlife,
    /// Public transport and walkability.
    Mobility,
    /// Quiet surroundings with good connectivity (home-office suitability).
    Quiet,
    /// Cost of living (higher means cheaper).
    Cost,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Safety,
        Self::Luxury,
        Self::Nature,
        Self::Nightlife,
        Self::Mobility,
        Self::Quiet,
        Self::Cost,
    ];

    /// Return the dimension as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use enclave_core::Dimension;
    ///
    /// assert_eq!(Dimension::Quiet.as_str(), "quiet");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Luxury => "luxury",
            Self::Nature => "nature",
            Self::Nightlife => "nightlife",
            Self::Mobility => "mobility",
            Self::Quiet => "quiet",
            Self::Cost => "cost",
        }
    }

    /// Return the amenity class backing this dimension, when one exists.
    ///
    /// Only nature, nightlife, and mobility are fed by fetched counts; the
    /// remaining dimensions read the catalog's static attributes.
    #[must_use]
    pub const fn amenity_class(self) -> Option<AmenityClass> {
        match self {
            Self::Nature => Some(AmenityClass::Nature),
            Self::Nightlife => Some(AmenityClass::Nightlife),
            Self::Mobility => Some(AmenityClass::Mobility),
            Self::Safety | Self::Luxury | Self::Quiet | Self::Cost => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safety" => Ok(Self::Safety),
            "luxury" => Ok(Self::Luxury),
            "nature" => Ok(Self::Nature),
            "nightlife" => Ok(Self::Nightlife),
            "mobility" => Ok(Self::Mobility),
            "quiet" => Ok(Self::Quiet),
            "cost" => Ok(Self::Cost),
            _ => Err(format!("unknown dimension '{s}'")),
        }
    }
}

/// An amenity class counted by the external spatial-data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AmenityClass {
    /// Bars, pubs, and nightclubs.
    Nightlife,
    /// Parks and recreation grounds.
    Nature,
    /// Bus stops, subway entrances, and stations.
    Mobility,
}

impl AmenityClass {
    /// All amenity classes in query order.
    ///
    /// The order matters: the counting service returns one count block per
    /// class, correlated to the request by position alone.
    pub const ALL: [Self; 3] = [Self::Nightlife, Self::Nature, Self::Mobility];

    /// Return the class as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nightlife => "nightlife",
            Self::Nature => "nature",
            Self::Mobility => "mobility",
        }
    }

    /// The preference dimension this class feeds.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Nightlife => Dimension::Nightlife,
            Self::Nature => Dimension::Nature,
            Self::Mobility => Dimension::Mobility,
        }
    }

    /// Count per 10 000 residents that earns a perfect per-capita score.
    ///
    /// Calibrated so saturation does not produce runaway scores.
    #[must_use]
    pub const fn target_per_10k(self) -> f64 {
        match self {
            Self::Nightlife => 15.0,
            Self::Nature => 3.0,
            Self::Mobility => 20.0,
        }
    }

    /// Minimum absolute count below which the hybrid strategy penalizes an
    /// area regardless of its per-capita ratio.
    #[must_use]
    pub const fn critical_mass(self) -> u32 {
        match self {
            Self::Nightlife => 10,
            Self::Nature => 4,
            Self::Mobility => 15,
        }
    }
}

impl std::fmt::Display for AmenityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Dimension::Cost.to_string(), Dimension::Cost.as_str());
        assert_eq!(
            AmenityClass::Mobility.to_string(),
            AmenityClass::Mobility.as_str()
        );
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Dimension::from_str("vibes").unwrap_err();
        assert!(err.contains("unknown dimension"));
    }

    #[test]
    fn every_class_maps_to_a_dynamic_dimension() {
        for class in AmenityClass::ALL {
            assert_eq!(class.dimension().amenity_class(), Some(class));
        }
    }

    #[test]
    fn static_dimensions_have_no_class() {
        assert!(Dimension::Safety.amenity_class().is_none());
        assert!(Dimension::Quiet.amenity_class().is_none());
    }
}
