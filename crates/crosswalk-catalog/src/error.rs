//! Catalog client error types.

/// Errors from catalog API calls.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Catalog returned a non-2xx status.
    #[error("catalog {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Login succeeded at the HTTP level but the response carried no
    /// token under either accepted field name. Configuration error on
    /// the catalog side; fatal for the call that needed headers.
    #[error("login response contained no token field (checked `token` and `access_token`)")]
    MissingToken,
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}
