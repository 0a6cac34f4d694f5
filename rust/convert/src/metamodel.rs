// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Metamodel document: the auxiliary JSON describing object property schemas
//! that accompanies a converted model.
//!
//! A missing or malformed metamodel is never fatal; conversion proceeds
//! without it and a warning is emitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Metamodel JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub meta_objects: Vec<MetaObject>,
    #[serde(default)]
    pub property_sets: Vec<PropertySet>,
}

/// One object in the metamodel tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub property_set_ids: Vec<String>,
}

/// A named set of properties referenced by objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySet {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl MetaModel {
    /// Property sets referenced by `object`, in document order.
    pub fn property_sets_for(&self, object: &MetaObject) -> Vec<&PropertySet> {
        self.property_sets
            .iter()
            .filter(|ps| object.property_set_ids.iter().any(|id| *id == ps.id))
            .collect()
    }
}

/// Load a metamodel, degrading to `None` with a warning on any failure.
pub async fn load_optional(path: &Path) -> Option<MetaModel> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Metamodel file not found");
            eprintln!("Warning: metamodel file not found at {}", path.display());
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(metamodel) => Some(metamodel),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse metamodel JSON");
            eprintln!("Warning: failed to parse metamodel JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "duplex",
        "projectId": "p1",
        "metaObjects": [
            {"id": "w1", "name": "Wall-001", "type": "IfcWall", "propertySetIds": ["ps1"]},
            {"id": "s1", "name": "Slab-001", "type": "IfcSlab"}
        ],
        "propertySets": [
            {"id": "ps1", "name": "Pset_WallCommon", "properties": [
                {"name": "IsExternal", "value": true}
            ]}
        ]
    }"#;

    #[test]
    fn parses_sample_document() {
        let mm: MetaModel = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(mm.id, "duplex");
        assert_eq!(mm.meta_objects.len(), 2);
        assert_eq!(mm.meta_objects[0].object_type, "IfcWall");
        assert_eq!(mm.property_sets_for(&mm.meta_objects[0]).len(), 1);
        assert!(mm.property_sets_for(&mm.meta_objects[1]).is_empty());
    }

    #[test]
    fn tolerates_unknown_fields() {
        let mm: MetaModel =
            serde_json::from_str(r#"{"id": "x", "schemaVersion": 3, "extras": {}}"#).unwrap();
        assert_eq!(mm.id, "x");
        assert!(mm.meta_objects.is_empty());
    }

    #[tokio::test]
    async fn malformed_document_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();
        assert!(load_optional(&path).await.is_none());
    }

    #[tokio::test]
    async fn missing_document_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_optional(&dir.path().join("absent.json")).await.is_none());
    }
}
