//! Validation errors for domain-primitive construction.

use thiserror::Error;

/// Errors raised when a domain value fails validation at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Confidence score outside `[0.0, 1.0]` or not finite.
    #[error("confidence must be a finite value in [0.0, 1.0], got {0}")]
    ConfidenceOutOfRange(f64),

    /// A string that was expected to be a UUID-shaped identifier.
    #[error("invalid identifier {0:?}: {1}")]
    InvalidIdentifier(String, String),
}
