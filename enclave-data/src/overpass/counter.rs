//! HTTP-backed `AmenityCounter` using the Overpass API.
//!
//! One POST per query carries an Overpass QL program with three
//! tag-filtered searches and count-only output. The synchronous
//! [`AmenityCounter`] trait is implemented by blocking on async HTTP
//! internally; the counter owns a Tokio runtime reused across calls.
//!
//! # Runtime behaviour
//!
//! When called from outside any Tokio runtime, the counter uses its own
//! stored runtime. When called from within an existing multi-threaded
//! Tokio runtime (detected via [`Handle::try_current()`] and
//! [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
//! [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside
//! a `current_thread` runtime it falls back to its own runtime.

use std::time::Duration;

use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use enclave_core::{AmenityCounter, AmenityCounts, AmenityQuery, CountError};

use super::cache::{CountCache, CountKey};
use super::response::OverpassResponse;

/// Default public Overpass endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "enclave-engine/0.1";

/// Default request timeout in seconds, mirrored into the QL header.
const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Errors raised while building an [`HttpAmenityCounter`].
#[derive(Debug, thiserror::Error)]
pub enum CounterBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpAmenityCounter`].
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Overpass interpreter endpoint.
    pub endpoint: String,
    /// Request timeout; also written into the QL `[timeout:]` header.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration with the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Overpass-backed amenity counter with an injected count cache.
pub struct HttpAmenityCounter {
    client: Client,
    config: OverpassConfig,
    runtime: Runtime,
    cache: CountCache,
}

impl std::fmt::Debug for HttpAmenityCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAmenityCounter")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("cache", &self.cache)
            .finish()
    }
}

impl HttpAmenityCounter {
    /// Create a counter with default configuration and a fresh cache.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, CounterBuildError> {
        Self::with_config(OverpassConfig::new(endpoint))
    }

    /// Create a counter with explicit configuration and a fresh cache.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, CounterBuildError> {
        Self::with_cache(config, CountCache::new())
    }

    /// Create a counter around an injected cache.
    ///
    /// The cache is consulted before every request and updated after every
    /// successful fetch. Handing in a shared cache lets callers pre-seed
    /// counts or observe what was fetched.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_cache(config: OverpassConfig, cache: CountCache) -> Result<Self, CounterBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(CounterBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CounterBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
            cache,
        })
    }

    /// The cache this counter consults.
    #[must_use]
    pub const fn cache(&self) -> &CountCache {
        &self.cache
    }

    /// Build the Overpass QL program for a query.
    ///
    /// Three statements in fixed order (nightlife venues, parks and
    /// recreation grounds, transit stops), each scoped to
    /// `(around:radius,lat,lon)` with count-only output. The response is
    /// correlated back to the statements by position.
    fn build_program(&self, query: &AmenityQuery) -> String {
        let lat = query.location.y;
        let lon = query.location.x;
        let radius = query.radius_m;
        let timeout = self.config.timeout.as_secs();
        format!(
            "[out:json][timeout:{timeout}];\
             (\
             node[\"amenity\"~\"^(bar|pub|nightclub)$\"](around:{radius},{lat},{lon});\
             way[\"amenity\"~\"^(bar|pub|nightclub)$\"](around:{radius},{lat},{lon});\
             );\
             out count;\
             (\
             node[\"leisure\"=\"park\"](around:{radius},{lat},{lon});\
             way[\"leisure\"=\"park\"](around:{radius},{lat},{lon});\
             way[\"landuse\"=\"recreation_ground\"](around:{radius},{lat},{lon});\
             );\
             out count;\
             (\
             node[\"highway\"=\"bus_stop\"](around:{radius},{lat},{lon});\
             node[\"railway\"=\"subway_entrance\"](around:{radius},{lat},{lon});\
             node[\"railway\"=\"station\"](around:{radius},{lat},{lon});\
             );\
             out count;"
        )
    }

    /// Fetch counts asynchronously, bypassing the cache.
    async fn fetch_counts_async(&self, query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
        let url = &self.config.endpoint;
        let program = self.build_program(query);

        let response = self
            .client
            .post(url)
            .body(program)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let payload: OverpassResponse =
            response.json().await.map_err(|err| CountError::Parse {
                message: err.to_string(),
            })?;

        Ok(payload.totals())
    }

    /// Convert a reqwest error to a `CountError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> CountError {
        if error.is_timeout() {
            return CountError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return CountError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        CountError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn block_on_fetch(&self, query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        let future = self.fetch_counts_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl AmenityCounter for HttpAmenityCounter {
    /// Return counts for the query, consulting the cache first.
    ///
    /// Cache entries are keyed by the quantized (lat, lon, radius) triple;
    /// a hit never touches the network.
    fn count_amenities(&self, query: &AmenityQuery) -> Result<AmenityCounts, CountError> {
        let key = CountKey::for_query(query);
        if let Some(counts) = self.cache.get(&key) {
            log::debug!(
                "count cache hit for ({lat}, {lon}) r={radius}",
                lat = query.location.y,
                lon = query.location.x,
                radius = query.radius_m,
            );
            return Ok(counts);
        }

        let counts = self.block_on_fetch(query)?;
        self.cache.insert(key, counts);
        Ok(counts)
    }
}
