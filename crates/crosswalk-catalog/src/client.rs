//! The authenticated catalog client.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::time::Duration;
use zeroize::Zeroizing;

use chrono::Utc;
use crosswalk_core::{ControlRecord, ProductId};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::normalize::{self, FlatControl, ProductDetail};
use crate::token::{compute_expiry, AuthToken, LoginResponse};
use crate::types::{AccessGrant, ProductSummary};

/// Authenticated HTTP client for one catalog base URL.
///
/// Holds exactly one bearer token for all outbound calls. Refresh is
/// lazy: the token is checked on every request and replaced by the
/// first caller that observes it stale. Designed to be shared via
/// `Arc` across async tasks.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: Zeroizing<String>,
    token: RwLock<Option<AuthToken>>,
}

impl CatalogClient {
    /// Build a client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CatalogError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            email: config.email,
            password: config.password,
            token: RwLock::new(None),
        })
    }

    /// Exchange credentials for a fresh bearer token and store it.
    ///
    /// # Errors
    ///
    /// Non-2xx responses and transport failures propagate; a 2xx
    /// response without a token field is [`CatalogError::MissingToken`].
    pub async fn login(&self) -> Result<(), CatalogError> {
        let endpoint = "/login";
        let url = format!("{}{endpoint}", self.base_url);
        let body = serde_json::json!({
            "email": self.email,
            "password": *self.password,
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                endpoint: endpoint.into(),
                source,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let login: LoginResponse =
            resp.json().await.map_err(|source| CatalogError::Deserialization {
                endpoint: endpoint.into(),
                source,
            })?;

        let bearer = login.bearer().ok_or(CatalogError::MissingToken)?.to_string();
        let expires_at = compute_expiry(Utc::now(), &bearer, login.expires_in);
        tracing::debug!(%expires_at, "catalog login succeeded");
        *self.token.write() = Some(AuthToken { bearer, expires_at });
        Ok(())
    }

    /// Return a usable bearer string, logging in first iff no token
    /// exists or the stored one has reached its expiry. This is the only
    /// refresh trigger in the system.
    async fn bearer_token(&self) -> Result<String, CatalogError> {
        let now = Utc::now();
        if let Some(token) = self.token.read().as_ref() {
            if token.is_fresh(now) {
                return Ok(token.bearer.clone());
            }
        }
        // Stale or absent. Concurrent observers may each land here and
        // log in redundantly; tolerated, see crate docs.
        self.login().await?;
        self.token
            .read()
            .as_ref()
            .map(|t| t.bearer.clone())
            .ok_or(CatalogError::MissingToken)
    }

    /// `GET {base}{path}`, parsed as JSON. Non-2xx is a hard failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let bearer = self.bearer_token().await?;
        let url = format!("{}{path}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                endpoint: path.into(),
                source,
            })?;

        Self::parse_response(resp, path).await
    }

    /// `POST {base}{path}` with a JSON body, parsed as JSON.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, CatalogError> {
        let bearer = self.bearer_token().await?;
        let url = format!("{}{path}", self.base_url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                endpoint: path.into(),
                source,
            })?;

        Self::parse_response(resp, path).await
    }

    async fn parse_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: &str,
    ) -> Result<T, CatalogError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }
        resp.json().await.map_err(|source| CatalogError::Deserialization {
            endpoint: endpoint.into(),
            source,
        })
    }

    // ── Typed catalog operations ─────────────────────────────────────

    /// `GET /products/request-access/` — access grants for this account.
    pub async fn request_access(&self) -> Result<Vec<AccessGrant>, CatalogError> {
        self.get_json("/products/request-access/").await
    }

    /// `GET /products/` — the full product listing.
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        self.get_json("/products/").await
    }

    /// `GET /products/{id}/` — nested questionnaire shape.
    pub async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        self.get_json(&format!("/products/{id}/")).await
    }

    /// `GET /products/{id}/questionnaire/` — flat control list shape.
    pub async fn flat_questionnaire(&self, id: ProductId) -> Result<Vec<FlatControl>, CatalogError> {
        self.get_json(&format!("/products/{id}/questionnaire/")).await
    }

    /// Fetch all controls of a product, normalized regardless of which
    /// questionnaire shape this catalog deployment serves.
    ///
    /// The nested detail endpoint is tried first; a 404 there counts as
    /// an empty questionnaire, since flat-shape-only deployments do not
    /// serve it at all. When it yields no controls, the flat endpoint is
    /// the fallback; a 404 there means the product genuinely has none.
    pub async fn fetch_controls(&self, id: ProductId) -> Result<Vec<ControlRecord>, CatalogError> {
        let controls = match self.product_detail(id).await {
            Ok(detail) => normalize::from_detail(id, &detail),
            Err(CatalogError::Api { status: 404, .. }) => Vec::new(),
            Err(e) => return Err(e),
        };
        if !controls.is_empty() {
            return Ok(controls);
        }

        match self.flat_questionnaire(id).await {
            Ok(flat) => Ok(normalize::from_flat(id, &flat)),
            Err(CatalogError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
