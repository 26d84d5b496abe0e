//! Data-plane implementations for the Enclave engine.
//!
//! The crate currently houses one provider: the Overpass-backed
//! [`overpass::HttpAmenityCounter`], which implements the core's
//! [`enclave_core::AmenityCounter`] trait over HTTP with an injected
//! count cache.

#![forbid(unsafe_code)]

pub mod overpass;

pub use overpass::{
    CountCache, CountKey, CounterBuildError, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT,
    HttpAmenityCounter, OverpassConfig,
};
