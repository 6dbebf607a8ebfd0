//! Environment-driven service configuration.

use zeroize::Zeroizing;

use crosswalk_core::Confidence;

/// Default acceptance threshold for the initial batch and remaps.
const DEFAULT_THRESHOLD: f64 = 0.85;

/// Runtime configuration, read once at startup.
///
/// Custom `Debug` implementation redacts the credential fields to
/// prevent leakage in log output.
pub struct AppConfig {
    /// Socket address the API listens on.
    pub bind_addr: String,
    /// Postgres connection string.
    pub database_url: String,
    /// Vendor catalog base URL.
    pub catalog_base_url: url::Url,
    /// Catalog account email.
    pub catalog_email: String,
    /// Catalog account password. Zeroized on drop.
    pub catalog_password: Zeroizing<String>,
    /// Matching backend base URL.
    pub matcher_base_url: String,
    /// Matching backend API key.
    pub matcher_api_key: String,
    /// Matching backend model identifier.
    pub matcher_model: String,
    /// Minimum confidence for a candidate mapping to be persisted.
    pub threshold: Confidence,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &"[REDACTED]")
            .field("catalog_base_url", &self.catalog_base_url)
            .field("catalog_email", &self.catalog_email)
            .field("catalog_password", &"[REDACTED]")
            .field("matcher_base_url", &self.matcher_base_url)
            .field("matcher_api_key", &"[REDACTED]")
            .field("matcher_model", &self.matcher_model)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails on any missing required variable, an unparseable catalog
    /// URL, or a threshold outside `[0.0, 1.0]`.
    pub fn from_env() -> anyhow::Result<Self> {
        let threshold = match std::env::var("CROSSWALK_THRESHOLD") {
            Ok(raw) => Confidence::new(raw.parse::<f64>()?)?,
            Err(_) => Confidence::new(DEFAULT_THRESHOLD)?,
        };

        Ok(Self {
            bind_addr: std::env::var("CROSSWALK_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: require("DATABASE_URL")?,
            catalog_base_url: require("CATALOG_BASE_URL")?.parse()?,
            catalog_email: require("CATALOG_EMAIL")?,
            catalog_password: Zeroizing::new(require("CATALOG_PASSWORD")?),
            matcher_base_url: require("MATCHER_BASE_URL")?,
            matcher_api_key: require("MATCHER_API_KEY")?,
            matcher_model: std::env::var("MATCHER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            threshold,
        })
    }
}

fn require(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("missing required env var {name}"))
}
