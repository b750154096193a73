//! HTTP-based `BoundaryFetcher` for GeoJSON endpoints.
//!
//! The [`BoundaryFetcher`] trait is synchronous so the resolver stays
//! embeddable. This fetcher bridges async `reqwest` calls to it by blocking
//! on a Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use mapstory_core::{BoundaryFetcher, SourceCatalog};
//! use mapstory_data::http::HttpBoundaryFetcher;
//!
//! let fetcher = HttpBoundaryFetcher::new()?;
//! let catalog = SourceCatalog::default();
//! if let Some(source) = catalog.country_primary.first() {
//!     let dataset = fetcher.fetch(source)?;
//!     println!("{} regions", dataset.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use log::debug;
use mapstory_core::{BoundaryDataset, BoundaryFetcher, BoundarySource, FetchError};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::geojson::decode_feature_collection;

/// Errors raised while constructing an [`HttpBoundaryFetcher`].
#[derive(Debug, Error)]
pub enum FetcherBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for boundary requests.
pub const DEFAULT_USER_AGENT: &str = "mapstory-boundaries/0.1";

/// Default per-source timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`HttpBoundaryFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBoundaryFetcherConfig {
    /// Time allowed for one source, from connect to the last body byte.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpBoundaryFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpBoundaryFetcherConfig {
    /// Set the per-source timeout.
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

/// Fetches GeoJSON boundary payloads over HTTP.
///
/// A response counts as a success only with a 2xx status and a body that
/// decodes to at least one polygon feature. Anything else becomes a
/// [`FetchError`], and the resolver moves to the next source.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the fetcher blocks on its own runtime. Inside a
/// multi-threaded runtime it borrows that runtime's handle through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// falls back to its own runtime, which blocks the caller's executor for the
/// duration of the request.
pub struct HttpBoundaryFetcher {
    client: Client,
    config: HttpBoundaryFetcherConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpBoundaryFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBoundaryFetcher")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpBoundaryFetcher {
    /// Create a fetcher with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, FetcherBuildError> {
        Self::with_config(HttpBoundaryFetcherConfig::default())
    }

    /// Create a fetcher with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpBoundaryFetcherConfig) -> Result<Self, FetcherBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(FetcherBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FetcherBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpBoundaryFetcherConfig {
        &self.config
    }

    async fn fetch_async(&self, url: &str) -> Result<BoundaryDataset, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        debug!("Received {} bytes from {url}", body.len());

        decode_feature_collection(&body).map_err(|err| FetchError::Parse {
            url: url.to_owned(),
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_owned(),
                timeout_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl BoundaryFetcher for HttpBoundaryFetcher {
    fn fetch(&self, source: &BoundarySource) -> Result<BoundaryDataset, FetchError> {
        let future = self.fetch_async(&source.url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
