//! Facade crate for the Enclave neighborhood recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the
//! Overpass-backed amenity counter behind a feature flag.

#![forbid(unsafe_code)]

pub use enclave_core::{
    AmenityClass, AmenityCounter, AmenityCounts, AmenityQuery, AmenityScores, Area, AreaError,
    BatchMeans, Catalog, CatalogError, CountError, Dimension, EnrichmentReport, Explanation,
    NormalizeError, NormalizeStrategy, PipelineError, Preset, RankedArea, StaticAttributes,
    WeightError, WeightProfile, match_percentage, match_score, normalize_batch, pipeline, rank,
    rank_contributions, threshold_reasons,
};

#[cfg(feature = "overpass")]
pub use enclave_data::{CountCache, CountKey, HttpAmenityCounter, OverpassConfig};
