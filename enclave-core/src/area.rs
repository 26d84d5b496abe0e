//! Candidate neighborhoods and their attributes.
//!
//! An [`Area`] starts life as a catalog seed: a name, a WGS84 position, a
//! search radius, an optional population estimate, and the hand-assigned
//! [`StaticAttributes`]. The load pipeline enriches it in place with raw
//! [`AmenityCounts`] and the normalized [`AmenityScores`]; scoring then
//! reads the enriched record without mutating it.
//!
//! Constructors validate their input and return `Result` to surface
//! misconfiguration early.

use geo::Coord;
use thiserror::Error;

use crate::dimension::{AmenityClass, Dimension};

/// Search radius in meters for areas that do not tune their own.
pub const DEFAULT_RADIUS_M: u32 = 1500;

/// Upper bound of the common attribute scale.
pub const ATTRIBUTE_MAX: u8 = 10;

/// Errors returned by [`Area::new`] and [`StaticAttributes::new`].
#[derive(Debug, Error, PartialEq)]
pub enum AreaError {
    /// The area name was empty or whitespace.
    #[error("area name must not be empty")]
    EmptyName,
    /// The search radius was zero.
    #[error("search radius for '{name}' must be positive")]
    ZeroRadius {
        /// Name of the offending area.
        name: String,
    },
    /// A declared population was zero.
    ///
    /// Per-capita normalization divides by population; a zero estimate must
    /// never reach that division.
    #[error("population for '{name}' must be positive when present")]
    ZeroPopulation {
        /// Name of the offending area.
        name: String,
    },
    /// The position was outside WGS84 bounds.
    #[error("coordinates ({lat}, {lon}) are outside WGS84 bounds")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// A static attribute exceeded the 0-10 scale.
    #[error("attribute '{attribute}' value {value} exceeds the 0-10 scale")]
    AttributeOutOfRange {
        /// Name of the offending attribute.
        attribute: &'static str,
        /// Rejected value.
        value: u8,
    },
}

/// Hand-assigned 0-10 scores that do not come from the counting service.
///
/// Higher is better on every axis; `cost` follows the same convention, so a
/// high value means a cheap area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticAttributes {
    /// Personal safety (inverse of crime).
    pub safety: u8,
    /// Luxury and privacy.
    pub luxury: u8,
    /// Quiet surroundings with good connectivity.
    pub quiet: u8,
    /// Cost of living (higher means cheaper).
    pub cost: u8,
}

impl StaticAttributes {
    /// Validate and construct a set of static attributes.
    ///
    /// # Errors
    /// Returns [`AreaError::AttributeOutOfRange`] when any value exceeds 10.
    pub const fn new(safety: u8, luxury: u8, quiet: u8, cost: u8) -> Result<Self, AreaError> {
        if safety > ATTRIBUTE_MAX {
            return Err(AreaError::AttributeOutOfRange {
                attribute: "safety",
                value: safety,
            });
        }
        if luxury > ATTRIBUTE_MAX {
            return Err(AreaError::AttributeOutOfRange {
                attribute: "luxury",
                value: luxury,
            });
        }
        if quiet > ATTRIBUTE_MAX {
            return Err(AreaError::AttributeOutOfRange {
                attribute: "quiet",
                value: quiet,
            });
        }
        if cost > ATTRIBUTE_MAX {
            return Err(AreaError::AttributeOutOfRange {
                attribute: "cost",
                value: cost,
            });
        }
        Ok(Self {
            safety,
            luxury,
            quiet,
            cost,
        })
    }
}

/// Raw amenity counts fetched for an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmenityCounts {
    /// Bars, pubs, and nightclubs within the search radius.
    pub nightlife: u32,
    /// Parks and recreation grounds within the search radius.
    pub parks: u32,
    /// Transit stops within the search radius.
    pub transit: u32,
}

impl AmenityCounts {
    /// The degraded all-zero signal substituted when a fetch fails.
    pub const ZERO: Self = Self {
        nightlife: 0,
        parks: 0,
        transit: 0,
    };

    /// Construct counts in query order.
    #[must_use]
    pub const fn new(nightlife: u32, parks: u32, transit: u32) -> Self {
        Self {
            nightlife,
            parks,
            transit,
        }
    }

    /// Return the raw count for an amenity class.
    #[must_use]
    pub const fn get(&self, class: AmenityClass) -> u32 {
        match class {
            AmenityClass::Nightlife => self.nightlife,
            AmenityClass::Nature => self.parks,
            AmenityClass::Mobility => self.transit,
        }
    }
}

/// Normalized 0-10 scores derived from raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmenityScores {
    /// Normalized nightlife score.
    pub nightlife: f64,
    /// Normalized nature score.
    pub nature: f64,
    /// Normalized mobility score.
    pub mobility: f64,
}

impl AmenityScores {
    /// Return the normalized score for an amenity class.
    #[must_use]
    pub const fn get(&self, class: AmenityClass) -> f64 {
        match class {
            AmenityClass::Nightlife => self.nightlife,
            AmenityClass::Nature => self.nature,
            AmenityClass::Mobility => self.mobility,
        }
    }

    /// Set the normalized score for an amenity class.
    pub const fn set(&mut self, class: AmenityClass, score: f64) {
        match class {
            AmenityClass::Nightlife => self.nightlife = score,
            AmenityClass::Nature => self.nature = score,
            AmenityClass::Mobility => self.mobility = score,
        }
    }
}

/// One candidate neighborhood.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
/// the axis convention of the `geo` crate.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use enclave_core::{Area, StaticAttributes};
///
/// # fn main() -> Result<(), enclave_core::AreaError> {
/// let statics = StaticAttributes::new(8, 7, 6, 3)?;
/// let area = Area::new(
///     "Highland Park",
///     Coord { x: -118.19, y: 34.11 },
///     1500,
///     Some(58_000),
///     statics,
/// )?;
/// assert_eq!(area.counts.nightlife, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    /// Unique, stable name within the catalog.
    pub name: String,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Search radius in meters.
    pub radius_m: u32,
    /// Estimated population, when known.
    pub population: Option<u32>,
    /// Hand-assigned static attributes.
    pub statics: StaticAttributes,
    /// Raw amenity counts; zero until enrichment.
    pub counts: AmenityCounts,
    /// Normalized amenity scores; zero until normalization.
    pub scores: AmenityScores,
}

impl Area {
    /// Validate and construct an area seed with zeroed counts and scores.
    ///
    /// # Errors
    /// Returns [`AreaError`] when the name is empty, the radius is zero, a
    /// declared population is zero, or the position is outside WGS84 bounds.
    pub fn new(
        name: impl Into<String>,
        location: Coord<f64>,
        radius_m: u32,
        population: Option<u32>,
        statics: StaticAttributes,
    ) -> Result<Self, AreaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AreaError::EmptyName);
        }
        if radius_m == 0 {
            return Err(AreaError::ZeroRadius { name });
        }
        if population == Some(0) {
            return Err(AreaError::ZeroPopulation { name });
        }
        if !(-90.0..=90.0).contains(&location.y) || !(-180.0..=180.0).contains(&location.x) {
            return Err(AreaError::InvalidCoordinate {
                lat: location.y,
                lon: location.x,
            });
        }
        Ok(Self {
            name,
            location,
            radius_m,
            population,
            statics,
            counts: AmenityCounts::ZERO,
            scores: AmenityScores::default(),
        })
    }

    /// Return the 0-10 value the scorer reads for a dimension.
    ///
    /// Dynamic dimensions read the normalized amenity scores; the rest read
    /// the static attributes.
    #[must_use]
    pub fn attribute(&self, dimension: Dimension) -> f64 {
        dimension.amenity_class().map_or_else(
            || {
                let value = match dimension {
                    Dimension::Safety => self.statics.safety,
                    Dimension::Luxury => self.statics.luxury,
                    Dimension::Quiet => self.statics.quiet,
                    Dimension::Cost => self.statics.cost,
                    Dimension::Nature | Dimension::Nightlife | Dimension::Mobility => 0,
                };
                f64::from(value)
            },
            |class| self.scores.get(class),
        )
    }
}
