//! Wire types for the catalog's product listing endpoints.

use serde::Deserialize;

/// One row of `GET /products/request-access/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessGrant {
    pub product_id: String,
    pub status: String,
}

impl AccessGrant {
    /// Case-insensitive approval check.
    pub fn is_approved(&self) -> bool {
        self.status.eq_ignore_ascii_case("approved")
    }
}

/// One row of `GET /products/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    /// Absent means free: products without the flag are not mapped.
    #[serde(default = "default_is_free")]
    pub is_free: bool,
    /// Everything else the catalog sends, kept as product metadata.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_is_free() -> bool {
    true
}
