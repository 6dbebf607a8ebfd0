//! Domain records shared across the catalog, matcher, and persistence
//! layers. These mirror the storage schema: products own controls,
//! mappings are directed rows over an undirected relation.

use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::identity::{ControlId, ProductId};

/// A vendor product discovered from the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    /// Free-form catalog metadata. Refreshed on re-sync, never merged.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A single compliance control (questionnaire item) owned by a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub id: ControlId,
    pub product_id: ProductId,
    /// The semantic content the matcher operates on.
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A persisted directed mapping row. Symmetric relations are stored as
/// two rows with swapped endpoints and equal confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub source_id: ControlId,
    pub target_id: ControlId,
    pub confidence: Confidence,
}

impl MappingRecord {
    /// The reverse row of this mapping: endpoints swapped, same score.
    pub fn reversed(&self) -> Self {
        Self {
            source_id: self.target_id,
            target_id: self.source_id,
            confidence: self.confidence,
        }
    }
}

/// A candidate equivalence proposed by the matching backend, before
/// threshold filtering. Structurally identical to [`MappingRecord`] but
/// kept distinct: a candidate has not been accepted yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateMapping {
    pub source_id: ControlId,
    pub target_id: ControlId,
    pub confidence: Confidence,
}

impl CandidateMapping {
    /// Promote an accepted candidate into a mapping row.
    pub fn into_mapping(self) -> MappingRecord {
        MappingRecord {
            source_id: self.source_id,
            target_id: self.target_id,
            confidence: self.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_swaps_endpoints_and_keeps_confidence() {
        let m = MappingRecord {
            source_id: ControlId::new(),
            target_id: ControlId::new(),
            confidence: Confidence::new(0.93).unwrap(),
        };
        let r = m.reversed();
        assert_eq!(r.source_id, m.target_id);
        assert_eq!(r.target_id, m.source_id);
        assert_eq!(r.confidence, m.confidence);
        assert_eq!(r.reversed(), m);
    }

    #[test]
    fn control_record_deserializes_without_metadata() {
        let raw = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "product_id": uuid::Uuid::new_v4(),
            "text": "Data encrypted at rest",
        });
        let c: ControlRecord = serde_json::from_value(raw).unwrap();
        assert!(c.metadata.is_null());
    }
}
