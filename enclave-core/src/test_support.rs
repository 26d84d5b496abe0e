//! Test doubles shared by unit, behaviour, and property tests.

use std::collections::HashMap;

use geo::Coord;

use crate::area::AmenityCounts;
use crate::counter::{AmenityCounter, AmenityQuery, CountError};

/// Counter that serves pre-seeded counts keyed by position.
///
/// Unknown positions fail with a network error, so tests can exercise the
/// pipeline's degradation path by simply not seeding an area.
#[derive(Debug, Default)]
pub struct FixedCounter {
    counts: HashMap<String, AmenityCounts>,
}

impl FixedCounter {
    /// Construct an empty counter; every query fails until seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counts served for a position.
    pub fn insert(&mut self, location: Coord<f64>, counts: AmenityCounts) {
        self.counts.insert(Self::key(location), counts);
    }

    fn key(location: Coord<f64>) -> String {
        format!("{lat:.6}:{lon:.6}", lat = location.y, lon = location.x)
    }
}

impl AmenityCounter for FixedCounter {
    fn count_amenities(&self, query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
        self.counts
            .get(&Self::key(query.location))
            .copied()
            .ok_or_else(|| CountError::Network {
                url: "fixed-counter".to_owned(),
                message: "no counts seeded for this position".to_owned(),
            })
    }
}

/// Counter whose every call fails, for exercising degradation paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCounter;

impl AmenityCounter for FailingCounter {
    fn count_amenities(&self, _query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
        Err(CountError::Network {
            url: "failing-counter".to_owned(),
            message: "simulated transport failure".to_owned(),
        })
    }
}
