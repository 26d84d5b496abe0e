//! Content-addressed cache for amenity counts.
//!
//! Counts are deterministic per (lat, lon, radius) up to the live state of
//! the data source, so the cache key is exactly that triple, with
//! coordinates quantized to micro-degrees to make equality sound. The
//! cache is injected into [`super::HttpAmenityCounter`] as a dependency,
//! which keeps invalidation and testability explicit; tests pre-seed one
//! to keep a counter off the network entirely.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use enclave_core::{AmenityCounts, AmenityQuery};

/// Micro-degree quantization factor.
const MICRO_DEG: f64 = 1_000_000.0;

/// Cache key: quantized position plus radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountKey {
    /// Latitude in micro-degrees.
    pub lat_udeg: i64,
    /// Longitude in micro-degrees.
    pub lon_udeg: i64,
    /// Search radius in meters.
    pub radius_m: u32,
}

impl CountKey {
    /// Derive the key for a query.
    ///
    /// Positions a hair's breadth apart (under one micro-degree, roughly
    /// a tenth of a meter) share a key; that is the intended granularity.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "WGS84 bounds keep quantized coordinates far inside i64 range"
    )]
    pub fn for_query(query: &AmenityQuery) -> Self {
        Self {
            lat_udeg: (query.location.y * MICRO_DEG).round() as i64,
            lon_udeg: (query.location.x * MICRO_DEG).round() as i64,
            radius_m: query.radius_m,
        }
    }
}

/// Shared, cloneable count cache.
///
/// Clones share the same storage, so a cache handed to a counter can be
/// inspected or pre-seeded through any other clone.
#[derive(Debug, Clone, Default)]
pub struct CountCache {
    inner: Arc<Mutex<HashMap<CountKey, AmenityCounts>>>,
}

impl CountCache {
    /// Construct an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up cached counts for a key.
    ///
    /// A poisoned lock reads as a miss; the counter then refetches, which
    /// is safe because entries are idempotent.
    #[must_use]
    pub fn get(&self, key: &CountKey) -> Option<AmenityCounts> {
        self.inner
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).copied())
    }

    /// Store counts for a key, replacing any previous entry.
    pub fn insert(&self, key: CountKey, counts: AmenityCounts) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.insert(key, counts);
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |guard| guard.len())
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn query(lat: f64, lon: f64, radius_m: u32) -> AmenityQuery {
        AmenityQuery::new(Coord { x: lon, y: lat }, radius_m).expect("valid query")
    }

    #[test]
    fn identical_queries_share_a_key() {
        let a = CountKey::for_query(&query(34.0736, -118.4004, 1500));
        let b = CountKey::for_query(&query(34.0736, -118.4004, 1500));
        assert_eq!(a, b);
    }

    #[test]
    fn radius_is_part_of_the_key() {
        let near = CountKey::for_query(&query(34.0736, -118.4004, 1500));
        let wide = CountKey::for_query(&query(34.0736, -118.4004, 3000));
        assert_ne!(near, wide);
    }

    #[test]
    fn distinct_positions_get_distinct_keys() {
        let downtown = CountKey::for_query(&query(34.0407, -118.2468, 1500));
        let venice = CountKey::for_query(&query(33.9850, -118.4695, 1500));
        assert_ne!(downtown, venice);
    }

    #[test]
    fn clones_share_storage() {
        let cache = CountCache::new();
        let handle = cache.clone();
        let key = CountKey::for_query(&query(34.0, -118.0, 1500));
        handle.insert(key, AmenityCounts::new(1, 2, 3));
        assert_eq!(cache.get(&key), Some(AmenityCounts::new(1, 2, 3)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_keys_read_as_none() {
        let cache = CountCache::new();
        let key = CountKey::for_query(&query(34.0, -118.0, 1500));
        assert_eq!(cache.get(&key), None);
        assert!(cache.is_empty());
    }
}
