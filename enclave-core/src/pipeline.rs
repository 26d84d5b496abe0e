//! The load pipeline: fetch, barrier, normalize.
//!
//! [`load`] runs once per session. Each area's counts are fetched first; a
//! failed fetch degrades that one area to zero counts and the pipeline
//! continues. Only when the whole batch is in does normalization run,
//! because the batch-relative strategy needs every column value. A batch
//! where every fetch failed, or an empty batch, is a hard stop: scoring
//! never runs over an invalid collection.
//!
//! Re-scoring on a weight change calls [`crate::rank`] directly; nothing
//! here re-runs.

use thiserror::Error;

use crate::area::Area;
use crate::catalog::Catalog;
use crate::counter::{AmenityCounter, AmenityQuery};
use crate::normalize::{NormalizeError, NormalizeStrategy, normalize_batch};

/// Outcome of the fetch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Areas whose counts were fetched successfully.
    pub fetched: usize,
    /// Areas degraded to zero counts after a failed fetch.
    pub degraded: usize,
}

/// Errors from the load pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// No areas were supplied.
    #[error("cannot load an empty area batch")]
    EmptyBatch,
    /// Every fetch in the batch failed.
    ///
    /// One dead area degrades silently; a fully dead batch means the data
    /// source is unusable and scoring zeros would present garbage as valid.
    #[error("all {attempted} amenity fetches failed")]
    AllFetchesFailed {
        /// Number of areas attempted.
        attempted: usize,
    },
    /// Normalization rejected the enriched batch.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fetch raw counts for every area, degrading failures to zero.
///
/// Failures are logged through the `log` facade and counted in the report;
/// they never abort the remaining areas.
///
/// # Errors
/// Returns [`PipelineError::EmptyBatch`] for an empty slice and
/// [`PipelineError::AllFetchesFailed`] when no fetch succeeded.
pub fn enrich<C>(areas: &mut [Area], counter: &C) -> Result<EnrichmentReport, PipelineError>
where
    C: AmenityCounter + ?Sized,
{
    if areas.is_empty() {
        return Err(PipelineError::EmptyBatch);
    }
    let mut report = EnrichmentReport {
        fetched: 0,
        degraded: 0,
    };
    for area in areas.iter_mut() {
        let query = AmenityQuery {
            location: area.location,
            radius_m: area.radius_m,
        };
        match counter.count_amenities(&query) {
            Ok(counts) => {
                area.counts = counts;
                report.fetched += 1;
            }
            Err(err) => {
                log::warn!(
                    "amenity fetch for '{name}' failed, continuing with zero counts: {err}",
                    name = area.name,
                );
                area.counts = crate::AmenityCounts::ZERO;
                report.degraded += 1;
            }
        }
    }
    if report.fetched == 0 {
        return Err(PipelineError::AllFetchesFailed {
            attempted: report.degraded,
        });
    }
    Ok(report)
}

/// Run the whole load phase: enrich the catalog, then normalize.
///
/// Returns the enriched areas, ready to be scored any number of times with
/// [`crate::rank`] as the weight vector changes.
///
/// # Errors
/// Propagates [`enrich`] failures and [`NormalizeError`] from the batch
/// normalization that follows the fetch barrier.
pub fn load<C>(
    catalog: Catalog,
    counter: &C,
    strategy: NormalizeStrategy,
) -> Result<Vec<Area>, PipelineError>
where
    C: AmenityCounter + ?Sized,
{
    let mut areas = catalog.into_areas();
    let report = enrich(&mut areas, counter)?;
    if report.degraded > 0 {
        log::info!(
            "{degraded} of {total} areas degraded to zero counts",
            degraded = report.degraded,
            total = areas.len(),
        );
    }
    normalize_batch(&mut areas, strategy)?;
    Ok(areas)
}
