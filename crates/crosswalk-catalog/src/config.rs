//! Catalog client configuration.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for [`CatalogClient`](crate::CatalogClient).
///
/// Custom `Debug` implementation redacts the `password` field to
/// prevent credential leakage in log output.
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    pub base_url: Url,
    /// Account email used for the credential exchange.
    pub email: String,
    /// Account password. Zeroized on drop.
    pub password: Zeroizing<String>,
    /// Per-request timeout in seconds (default: 15).
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CatalogConfig {
    /// Create a configuration with the default 15-second timeout. The
    /// password arrives already wrapped so it never transits as a bare
    /// `String`.
    pub fn new(base_url: Url, email: impl Into<String>, password: Zeroizing<String>) -> Self {
        Self {
            base_url,
            email: email.into(),
            password,
            timeout_secs: 15,
        }
    }
}
