//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout Crosswalk.
//! Each identifier is a distinct type — you cannot pass a [`ProductId`]
//! where a [`ControlId`] is expected, which matters here because both
//! are UUIDs on the wire and a control id used as a product id would
//! silently match nothing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Identifier of a vendor product (the owner of a questionnaire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Create a new random product identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a product identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the string is
    /// not UUID-shaped. Catalog responses occasionally carry junk ids;
    /// callers skip those items rather than aborting ingestion.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ValidationError::InvalidIdentifier(s.to_string(), e.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// Identifier of a single compliance control (questionnaire item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(Uuid);

impl ControlId {
    /// Create a new random control identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a control identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the string is
    /// not UUID-shaped.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ValidationError::InvalidIdentifier(s.to_string(), e.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ControlId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ControlId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ControlId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_unique() {
        let a = ProductId::new();
        let b = ProductId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn control_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = ControlId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn parse_rejects_non_uuid() {
        assert!(ControlId::parse("not-a-uuid").is_err());
        assert!(ProductId::parse("12345").is_err());
        assert!(ControlId::parse("").is_err());
    }

    #[test]
    fn parse_accepts_uuid_string() {
        let uuid = Uuid::new_v4();
        let id = ControlId::parse(&uuid.to_string()).unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn serde_transparent() {
        let id = ProductId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
