//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps storage and upstream-catalog failures to HTTP status codes with
//! JSON error bodies. Internal error detail is logged, never returned
//! to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type for the Crosswalk API surface.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// The vendor catalog returned an error or is unreachable (502).
    #[error("upstream catalog error: {0}")]
    Upstream(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream catalog error"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<crosswalk_catalog::CatalogError> for AppError {
    fn from(err: crosswalk_catalog::CatalogError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<crosswalk_core::ValidationError> for AppError {
    fn from(err: crosswalk_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(err: AppError) -> (StatusCode, ErrorBody) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                use http_body_util::BodyExt;
                resp.into_body().collect().await.unwrap().to_bytes()
            });
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn not_found_maps_to_404_with_message() {
        let (status, body) = body_of(AppError::NotFound("product x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("product x"));
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let (status, body) = body_of(AppError::Internal("pool exhausted at 10.0.0.3".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("10.0.0.3"));
    }

    #[test]
    fn upstream_maps_to_502_without_detail() {
        let (status, body) = body_of(AppError::Upstream("login refused".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error.code, "UPSTREAM_ERROR");
        assert!(!body.error.message.contains("login refused"));
    }
}
