//! Amenity counting trait and its error vocabulary.
//!
//! Implementations query a spatial-data service for the raw amenity counts
//! around a position. The trait is synchronous to keep the core embeddable
//! in synchronous contexts; HTTP-backed implementations bridge internally.
//!
//! Callers that can tolerate a degraded signal use
//! [`AmenityCounter::counts_or_zero`], which logs the failure and
//! substitutes zero counts so one dead fetch never aborts a whole batch.

use geo::Coord;
use thiserror::Error;

use crate::area::AmenityCounts;

/// A count request: position plus search radius.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use enclave_core::AmenityQuery;
///
/// let query = AmenityQuery::new(Coord { x: -118.25, y: 34.05 }, 1500)?;
/// assert_eq!(query.radius_m, 1500);
/// # Ok::<(), enclave_core::CountError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmenityQuery {
    /// Query position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Search radius in meters; typical values are 1000-3500.
    pub radius_m: u32,
}

impl AmenityQuery {
    /// Validate and construct a query.
    ///
    /// # Errors
    /// Returns [`CountError::InvalidRadius`] for a zero radius and
    /// [`CountError::InvalidCoordinate`] for positions outside WGS84
    /// bounds.
    pub fn new(location: Coord<f64>, radius_m: u32) -> Result<Self, CountError> {
        if radius_m == 0 {
            return Err(CountError::InvalidRadius { radius_m });
        }
        if !(-90.0..=90.0).contains(&location.y) || !(-180.0..=180.0).contains(&location.x) {
            return Err(CountError::InvalidCoordinate {
                lat: location.y,
                lon: location.x,
            });
        }
        Ok(Self {
            location,
            radius_m,
        })
    }
}

/// Errors from [`AmenityCounter::count_amenities`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CountError {
    /// The search radius was zero.
    #[error("search radius must be positive, got {radius_m}")]
    InvalidRadius {
        /// Rejected radius in meters.
        radius_m: u32,
    },
    /// The position was outside WGS84 bounds.
    #[error("coordinates ({lat}, {lon}) are outside WGS84 bounds")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} failed with HTTP status {status}")]
    HttpStatus {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport-level failure description.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse count response: {message}")]
    Parse {
        /// Parse failure description.
        message: String,
    },
}

/// Count amenities of the three tracked classes around a position.
///
/// Results are deterministic up to the live state of the external data
/// source; implementations are expected to cache by the query triple so
/// repeated scoring passes within a session never refetch.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use enclave_core::{AmenityCounter, AmenityCounts, AmenityQuery, CountError};
///
/// struct TenOfEach;
///
/// impl AmenityCounter for TenOfEach {
///     fn count_amenities(&self, _query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
///         Ok(AmenityCounts::new(10, 10, 10))
///     }
/// }
///
/// let query = AmenityQuery::new(Coord { x: 0.0, y: 0.0 }, 1500)?;
/// assert_eq!(TenOfEach.count_amenities(&query)?.parks, 10);
/// # Ok::<(), CountError>(())
/// ```
pub trait AmenityCounter {
    /// Return raw counts for the query, or the failure that prevented it.
    fn count_amenities(&self, query: &AmenityQuery) -> Result<AmenityCounts, CountError>;

    /// Return raw counts, degrading to all-zero on failure.
    ///
    /// The failure is logged through the `log` facade and never escapes;
    /// callers proceed with a zero signal instead of aborting.
    fn counts_or_zero(&self, query: &AmenityQuery) -> AmenityCounts {
        match self.count_amenities(query) {
            Ok(counts) => counts,
            Err(err) => {
                log::warn!(
                    "amenity count at ({lat}, {lon}) degraded to zero: {err}",
                    lat = query.location.y,
                    lon = query.location.x,
                );
                AmenityCounts::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingCounter;
    use rstest::rstest;

    #[test]
    fn query_rejects_zero_radius() {
        let err = AmenityQuery::new(Coord { x: 0.0, y: 0.0 }, 0).unwrap_err();
        assert_eq!(err, CountError::InvalidRadius { radius_m: 0 });
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(0.0, -181.0)]
    fn query_rejects_out_of_bounds_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let err = AmenityQuery::new(Coord { x: lon, y: lat }, 1500).unwrap_err();
        assert!(matches!(err, CountError::InvalidCoordinate { .. }));
    }

    #[test]
    fn counts_or_zero_degrades_on_failure() {
        let query = AmenityQuery::new(Coord { x: -118.25, y: 34.05 }, 1500).expect("valid query");
        let counts = FailingCounter.counts_or_zero(&query);
        assert_eq!(counts, AmenityCounts::ZERO);
    }
}
