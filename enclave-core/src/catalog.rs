//! The static registry of candidate areas.
//!
//! A [`Catalog`] is pure data: the fixed sequence of area seed records the
//! pipeline enriches and scores. Construction validates exhaustively:
//! every seed must carry a complete, in-range attribute set and a unique
//! name. A bad seed is a configuration defect and fails loudly; nothing is
//! silently defaulted.

use geo::Coord;
use thiserror::Error;

use crate::area::{Area, AreaError, DEFAULT_RADIUS_M, StaticAttributes};

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The catalog held no areas.
    #[error("catalog must contain at least one area")]
    Empty,
    /// Two areas shared a name.
    #[error("duplicate area name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// A seed record failed area validation.
    #[error("invalid seed for '{name}'")]
    Seed {
        /// Name of the offending seed.
        name: String,
        /// Underlying validation failure.
        #[source]
        source: AreaError,
    },
}

/// A validated, ordered collection of candidate areas.
///
/// Catalog order is stable and meaningful: the ranking's tie-break follows
/// it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    areas: Vec<Area>,
}

impl Catalog {
    /// Validate and construct a catalog from pre-built areas.
    ///
    /// # Errors
    /// Returns [`CatalogError::Empty`] for an empty collection and
    /// [`CatalogError::DuplicateName`] when two areas share a name.
    pub fn from_areas(areas: Vec<Area>) -> Result<Self, CatalogError> {
        if areas.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for area in &areas {
            if !seen.insert(area.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: area.name.clone(),
                });
            }
        }
        Ok(Self { areas })
    }

    /// The built-in Los Angeles catalog: ten candidate neighborhoods.
    ///
    /// Radii vary with area character: larger for sparse hillside areas,
    /// smaller for dense, compact ones. Populations are rough estimates,
    /// present for every entry so population-based normalization works out
    /// of the box.
    ///
    /// # Errors
    /// Returns [`CatalogError::Seed`] if a seed fails validation; with the
    /// shipped table this indicates a programming defect, not a runtime
    /// condition.
    pub fn los_angeles() -> Result<Self, CatalogError> {
        let areas = LOS_ANGELES_SEEDS
            .iter()
            .map(Seed::build)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_areas(areas)
    }

    /// The areas, in catalog order.
    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Consume the catalog and return its areas for enrichment.
    #[must_use]
    pub fn into_areas(self) -> Vec<Area> {
        self.areas
    }

    /// Number of areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the catalog is empty. Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

struct Seed {
    name: &'static str,
    lat: f64,
    lon: f64,
    radius_m: u32,
    population: u32,
    safety: u8,
    luxury: u8,
    quiet: u8,
    cost: u8,
}

impl Seed {
    fn build(&self) -> Result<Area, CatalogError> {
        let statics = StaticAttributes::new(self.safety, self.luxury, self.quiet, self.cost)
            .map_err(|source| CatalogError::Seed {
                name: self.name.to_owned(),
                source,
            })?;
        Area::new(
            self.name,
            Coord {
                x: self.lon,
                y: self.lat,
            },
            self.radius_m,
            Some(self.population),
            statics,
        )
        .map_err(|source| CatalogError::Seed {
            name: self.name.to_owned(),
            source,
        })
    }
}

#[rustfmt::skip]
const LOS_ANGELES_SEEDS: [Seed; 10] = [
    Seed { name: "Beverly Hills",  lat: 34.0736, lon: -118.4004, radius_m: 2000, population: 32_000,  safety: 10, luxury: 10, quiet: 7, cost: 1 },
    Seed { name: "Downtown LA",    lat: 34.0407, lon: -118.2468, radius_m: 1200, population: 85_000,  safety: 3,  luxury: 4,  quiet: 2, cost: 5 },
    Seed { name: "Silver Lake",    lat: 34.0869, lon: -118.2702, radius_m: DEFAULT_RADIUS_M, population: 45_000,  safety: 6,  luxury: 5,  quiet: 6, cost: 4 },
    Seed { name: "Santa Monica",   lat: 34.0195, lon: -118.4912, radius_m: 2000, population: 93_000,  safety: 7,  luxury: 8,  quiet: 5, cost: 2 },
    Seed { name: "Compton",        lat: 33.8958, lon: -118.2201, radius_m: 2000, population: 95_000,  safety: 2,  luxury: 1,  quiet: 3, cost: 9 },
    Seed { name: "Pasadena",       lat: 34.1478, lon: -118.1445, radius_m: 2500, population: 138_000, safety: 8,  luxury: 7,  quiet: 8, cost: 5 },
    Seed { name: "West Hollywood", lat: 34.0900, lon: -118.3617, radius_m: 1200, population: 35_000,  safety: 7,  luxury: 8,  quiet: 4, cost: 3 },
    Seed { name: "Venice Beach",   lat: 33.9850, lon: -118.4695, radius_m: DEFAULT_RADIUS_M, population: 40_000,  safety: 5,  luxury: 6,  quiet: 4, cost: 2 },
    Seed { name: "Koreatown",      lat: 34.0618, lon: -118.3004, radius_m: 1200, population: 120_000, safety: 4,  luxury: 3,  quiet: 3, cost: 6 },
    Seed { name: "Bel Air",        lat: 34.1002, lon: -118.4595, radius_m: 3000, population: 8_000,   safety: 10, luxury: 10, quiet: 9, cost: 1 },
];
