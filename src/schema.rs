//! Collection descriptor emitted next to the documents. The ingestion job uses
//! it to create the vector collection and its payload indexes; nothing here
//! talks to a store.

use serde::{Deserialize, Serialize};

use crate::config::CollectionConfig;

/// Payload paths worth an index, with the index kind the store should build.
const PAYLOAD_INDEXES: &[(&str, &str)] = &[
    ("category", "keyword"),
    ("type", "keyword"),
    ("variant", "keyword"),
    ("payload.tags", "keyword"),
    ("payload.structure.layout", "keyword"),
    ("payload.structure.density", "keyword"),
    ("payload.content.media_type", "keyword"),
    ("payload.content.cta_count", "integer"),
    ("payload.semantic.industries", "keyword"),
    ("payload.semantic.intents", "keyword"),
    ("payload.semantic.funnel_stages", "keyword"),
    ("payload.semantic.urgency", "keyword"),
    ("payload.quality.complexity", "keyword"),
    ("payload.quality.completeness", "float"),
    ("payload.quality.reusability", "float"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub vectors: VectorParams,
    pub payload_indexes: Vec<PayloadIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorParams {
    pub size: u32,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadIndex {
    pub field: String,
    pub schema: String,
}

pub fn collection_schema(config: &CollectionConfig) -> CollectionSchema {
    CollectionSchema {
        name: config.name.clone(),
        vectors: VectorParams {
            size: config.vector_size,
            distance: config.distance.clone(),
        },
        payload_indexes: PAYLOAD_INDEXES
            .iter()
            .map(|(field, schema)| PayloadIndex {
                field: field.to_string(),
                schema: schema.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{assemble, PresetEntry, Provenance};
    use serde_json::json;

    #[test]
    fn test_default_descriptor() {
        let schema = collection_schema(&CollectionConfig::default());
        assert_eq!(schema.name, "ui_blocks");
        assert_eq!(schema.vectors.size, 1536);
        assert_eq!(schema.vectors.distance, "Cosine");
        assert!(schema.payload_indexes.iter().any(|i| i.field == "payload.tags"));
    }

    #[test]
    fn test_indexed_fields_exist_on_documents() {
        let entry = PresetEntry::from_value(&json!({ "type": "hero.split", "props": {} })).unwrap();
        let doc = assemble(
            &entry,
            "hero",
            Provenance {
                file: "hero/presets.ts".to_string(),
                export: "heroPresets".to_string(),
                index: 0,
            },
        );
        let value = serde_json::to_value(&doc).unwrap();

        for index in collection_schema(&CollectionConfig::default()).payload_indexes {
            let found = index
                .field
                .split('.')
                .try_fold(&value, |node, key| node.get(key));
            assert!(found.is_some(), "missing indexed field {}", index.field);
        }
    }
}
