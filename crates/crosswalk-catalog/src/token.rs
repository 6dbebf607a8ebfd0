//! Bearer token state and expiry computation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

/// Safety margin subtracted from every computed expiry. Absorbs clock
/// skew between us and the catalog, plus in-flight request latency.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Fallback token lifetime when the response carries no expiry signal.
const DEFAULT_LIFETIME_SECS: i64 = 3600;

/// The process-wide bearer token plus the instant it stops being usable.
///
/// `expires_at` already has the 60-second margin applied, so freshness
/// is a plain `now < expires_at` check.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub bearer: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Whether the token is still usable at `now`. Reaching the expiry
    /// instant exactly counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Wire shape of the login response. Some catalog deployments use
/// `token`, others `access_token`; `expires_in` is optional on both.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl LoginResponse {
    /// The bearer string, whichever field it arrived under.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().or(self.access_token.as_deref())
    }
}

/// Compute the effective expiry for a freshly issued token.
///
/// Precedence: explicit `expires_in` seconds, then the token's own JWT
/// `exp` claim, then a one-hour default — each minus the 60-second
/// margin.
pub fn compute_expiry(now: DateTime<Utc>, bearer: &str, expires_in: Option<i64>) -> DateTime<Utc> {
    let margin = Duration::seconds(EXPIRY_MARGIN_SECS);
    if let Some(secs) = expires_in {
        return now + Duration::seconds(secs) - margin;
    }
    if let Some(exp) = jwt_exp(bearer) {
        return exp - margin;
    }
    now + Duration::seconds(DEFAULT_LIFETIME_SECS) - margin
}

/// Best-effort extraction of the `exp` claim from a JWT-shaped token.
///
/// Returns `None` for anything that is not three dot-delimited parts
/// whose middle part base64-decodes to a JSON object with a numeric
/// `exp`. Opaque tokens are expected here, not an error.
fn jwt_exp(bearer: &str) -> Option<DateTime<Utc>> {
    let mut parts = bearer.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    // Tolerate padded payloads; the engine itself is no-pad.
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.as_object()?.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}
