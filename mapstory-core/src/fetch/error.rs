use thiserror::Error;

/// Errors from [`crate::fetch::BoundaryFetcher::fetch`].
///
/// Transport failures and malformed payloads share one type; the resolver
/// answers every variant by moving to the next source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The body was not a usable boundary payload.
    #[error("malformed boundary payload from {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// What was wrong with the payload.
        message: String,
    },
}

impl FetchError {
    /// URL of the request that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Http { url, .. }
            | Self::Network { url, .. }
            | Self::Parse { url, .. } => url,
        }
    }

    /// Whether the failure happened while decoding rather than transporting.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
