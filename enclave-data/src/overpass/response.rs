//! Overpass API response types for count-only queries.
//!
//! A query with three `out count` statements yields an `elements` sequence
//! holding one count block per statement, in request order. Each block
//! carries a `tags` mapping whose `total` field is a stringified integer.
//!
//! Overpass exposes no identifier correlating a count block to the
//! statement that produced it, so extraction is positional: first block
//! nightlife, second parks, third transit. This matches the request built
//! by [`super::HttpAmenityCounter`] and is a documented limitation of the
//! count output, not a general Overpass contract.

use std::collections::HashMap;

use serde::Deserialize;

use enclave_core::AmenityCounts;

/// Marker value of `type` on count blocks.
const COUNT_ELEMENT_TYPE: &str = "count";

/// Tag carrying a block's aggregate total.
const TOTAL_TAG: &str = "total";

/// Top-level Overpass response payload.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    /// Response elements; count blocks for count-only queries.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

impl OverpassResponse {
    /// Extract the three class counts by block position.
    ///
    /// Non-count elements are skipped; a missing or malformed block
    /// contributes 0 rather than failing the whole extraction.
    #[must_use]
    pub fn totals(&self) -> AmenityCounts {
        let mut blocks = self
            .elements
            .iter()
            .filter(|element| element.element_type.as_deref() == Some(COUNT_ELEMENT_TYPE));
        let nightlife = blocks.next().map_or(0, OverpassElement::total);
        let parks = blocks.next().map_or(0, OverpassElement::total);
        let transit = blocks.next().map_or(0, OverpassElement::total);
        AmenityCounts::new(nightlife, parks, transit)
    }
}

/// One element of an Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    /// Element kind; `"count"` for aggregate blocks.
    #[serde(rename = "type")]
    pub element_type: Option<String>,
    /// Tag mapping; count blocks put their totals here.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl OverpassElement {
    /// Parse this block's `total` tag, defaulting to 0 when the tag is
    /// absent or not an integer.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.tags
            .get(TOTAL_TAG)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }
}
