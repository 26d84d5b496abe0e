//! Overpass-backed amenity counting.
//!
//! This module implements [`enclave_core::AmenityCounter`] against an
//! Overpass API endpoint. One QL request per area asks for three
//! tag-filtered spatial searches with count-only output, so raw geometries
//! never cross the wire.
//!
//! # Architecture
//!
//! The counter trait is synchronous to keep the core embeddable in
//! synchronous contexts. [`HttpAmenityCounter`] bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally,
//! and consults an injected [`CountCache`] before touching the network so
//! repeated scoring passes never refetch.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use enclave_core::{AmenityCounter, AmenityQuery};
//! use enclave_data::overpass::HttpAmenityCounter;
//!
//! let counter = HttpAmenityCounter::new("https://overpass-api.de/api/interpreter")?;
//! let query = AmenityQuery::new(Coord { x: -118.25, y: 34.05 }, 1500)?;
//!
//! // Degrades to zero counts on failure instead of erroring out.
//! let counts = counter.counts_or_zero(&query);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cache;
mod counter;
mod response;

pub use cache::{CountCache, CountKey};
pub use counter::{
    CounterBuildError, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, HttpAmenityCounter, OverpassConfig,
};
pub use response::{OverpassElement, OverpassResponse};
