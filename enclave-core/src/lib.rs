//! Core domain types and scoring pipeline for the Enclave engine.
//!
//! Enclave recommends residential neighborhoods: it enriches a static
//! [`Catalog`] of candidate [`Area`]s with amenity counts from a spatial
//! data source, normalizes the raw counts onto a common 0-10 scale, and
//! ranks the areas against a user [`WeightProfile`].
//!
//! The crate is deliberately presentation-free. Maps, tables, sliders, and
//! preset menus live with callers; the core consumes explicit value
//! objects and returns plain data.
//!
//! # Examples
//!
//! ```
//! use enclave_core::{
//!     AmenityCounter, AmenityCounts, AmenityQuery, Catalog, CountError, NormalizeStrategy,
//!     Preset, pipeline, rank,
//! };
//!
//! struct DozenOfEach;
//!
//! impl AmenityCounter for DozenOfEach {
//!     fn count_amenities(&self, _query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
//!         Ok(AmenityCounts::new(12, 12, 12))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::los_angeles()?;
//!
//! // Load once: fetch, barrier, normalize.
//! let areas = pipeline::load(catalog, &DozenOfEach, NormalizeStrategy::CriticalMass)?;
//!
//! // Score as often as the weights change; no refetch happens.
//! let ranked = rank(&areas, &Preset::NightlifeCulture.weights());
//! assert_eq!(ranked.len(), areas.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod area;
pub mod catalog;
pub mod counter;
pub mod dimension;
pub mod explain;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod score;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use area::{
    ATTRIBUTE_MAX, AmenityCounts, AmenityScores, Area, AreaError, DEFAULT_RADIUS_M,
    StaticAttributes,
};
pub use catalog::{Catalog, CatalogError};
pub use counter::{AmenityCounter, AmenityQuery, CountError};
pub use dimension::{AmenityClass, Dimension};
pub use explain::{BatchMeans, Explanation, rank_contributions, threshold_reasons};
pub use normalize::{NormalizeError, NormalizeStrategy, normalize_batch};
pub use pipeline::{EnrichmentReport, PipelineError};
pub use profile::{MAX_WEIGHT, Preset, WeightError, WeightProfile};
pub use score::{RankedArea, match_percentage, match_score, rank};
