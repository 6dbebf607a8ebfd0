//! # Questionnaire Normalization
//!
//! Two questionnaire shapes exist in the wild: `GET /products/{id}/`
//! returns nested sections with child items, while
//! `GET /products/{id}/questionnaire/` returns a flat control list.
//! Both funnel through this module into the same [`ControlRecord`]
//! form, so no caller ever branches on catalog shape.
//!
//! Items with non-UUID identifiers are skipped with a warning; a junk
//! id never aborts the surrounding product's ingestion.

use serde::Deserialize;
use serde_json::json;

use crosswalk_core::{ControlId, ControlRecord, ProductId};

/// Nested shape: `GET /products/{id}/`.
#[derive(Debug, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub questionnaire: Vec<Section>,
}

/// One questionnaire section with its child controls.
#[derive(Debug, Deserialize)]
pub struct Section {
    /// Section heading, carried into each child's metadata.
    pub question: Option<String>,
    #[serde(default)]
    pub children: Vec<SectionItem>,
}

/// One control inside a nested section.
#[derive(Debug, Deserialize)]
pub struct SectionItem {
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub description: Option<String>,
}

/// Flat shape: `GET /products/{id}/questionnaire/`.
#[derive(Debug, Deserialize)]
pub struct FlatControl {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Normalize the nested sectioned shape into control records.
pub fn from_detail(product_id: ProductId, detail: &ProductDetail) -> Vec<ControlRecord> {
    let mut controls = Vec::new();
    for section in &detail.questionnaire {
        for item in &section.children {
            let id = match ControlId::parse(&item.id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(%product_id, error = %e, "skipping control with invalid id");
                    continue;
                }
            };
            controls.push(ControlRecord {
                id,
                product_id,
                text: item.question.clone(),
                metadata: json!({
                    "type": item.item_type,
                    "description": item.description,
                    "section": section.question,
                }),
            });
        }
    }
    controls
}

/// Normalize the flat shape into control records.
pub fn from_flat(product_id: ProductId, items: &[FlatControl]) -> Vec<ControlRecord> {
    let mut controls = Vec::new();
    for item in items {
        let id = match ControlId::parse(&item.id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(%product_id, error = %e, "skipping control with invalid id");
                continue;
            }
        };
        controls.push(ControlRecord {
            id,
            product_id,
            text: item.text.clone(),
            metadata: item.metadata.clone(),
        });
    }
    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn nested_shape_flattens_sections() {
        let c1 = Uuid::new_v4();
        let c2 = Uuid::new_v4();
        let detail: ProductDetail = serde_json::from_value(json!({
            "questionnaire": [
                {
                    "question": "Encryption",
                    "children": [
                        {"id": c1.to_string(), "question": "Data encrypted at rest", "type": "boolean", "description": "AES-256"},
                    ]
                },
                {
                    "question": "Access",
                    "children": [
                        {"id": c2.to_string(), "question": "MFA required"},
                    ]
                }
            ]
        }))
        .unwrap();

        let pid = ProductId::new();
        let controls = from_detail(pid, &detail);
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].id, ControlId::from_uuid(c1));
        assert_eq!(controls[0].text, "Data encrypted at rest");
        assert_eq!(controls[0].metadata["section"], "Encryption");
        assert_eq!(controls[0].metadata["type"], "boolean");
        assert_eq!(controls[1].metadata["section"], "Access");
        assert!(controls[1].metadata["type"].is_null());
    }

    #[test]
    fn invalid_ids_are_skipped_not_fatal() {
        let good = Uuid::new_v4();
        let detail: ProductDetail = serde_json::from_value(json!({
            "questionnaire": [{
                "question": "S",
                "children": [
                    {"id": "not-a-uuid", "question": "junk"},
                    {"id": good.to_string(), "question": "keep me"},
                ]
            }]
        }))
        .unwrap();

        let controls = from_detail(ProductId::new(), &detail);
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].text, "keep me");
    }

    #[test]
    fn both_shapes_normalize_identically() {
        let pid = ProductId::new();
        let id = Uuid::new_v4();

        let detail: ProductDetail = serde_json::from_value(json!({
            "questionnaire": [{
                "question": null,
                "children": [{"id": id.to_string(), "question": "Password policy"}]
            }]
        }))
        .unwrap();
        let flat: Vec<FlatControl> = serde_json::from_value(json!([
            {"id": id.to_string(), "text": "Password policy"}
        ]))
        .unwrap();

        let nested = from_detail(pid, &detail);
        let flat = from_flat(pid, &flat);
        assert_eq!(nested[0].id, flat[0].id);
        assert_eq!(nested[0].product_id, flat[0].product_id);
        assert_eq!(nested[0].text, flat[0].text);
    }

    #[test]
    fn missing_questionnaire_yields_no_controls() {
        let detail: ProductDetail = serde_json::from_value(json!({})).unwrap();
        assert!(from_detail(ProductId::new(), &detail).is_empty());
    }
}
