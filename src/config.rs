//! Indexer configuration.
//!
//! Every field has a default so a config file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{IndexerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexerConfig {
    /// File name suffixes that mark a preset source file
    pub file_suffixes: Vec<String>,
    /// Export name suffixes that mark a preset array
    pub export_suffixes: Vec<String>,
    /// Per-category artifact is written as `<category>/<category><suffix>`
    pub category_file_suffix: String,
    pub combined_file_name: String,
    pub schema_file_name: String,
    pub summary_file_name: String,
    pub collection: CollectionConfig,
    /// Fan files out over the rayon pool
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionConfig {
    pub name: String,
    pub vector_size: u32,
    pub distance: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            file_suffixes: vec!["presets.ts".to_string(), "presets.tsx".to_string()],
            export_suffixes: vec!["Preset".to_string(), "Presets".to_string()],
            category_file_suffix: "-blocks.json".to_string(),
            combined_file_name: "all-blocks.json".to_string(),
            schema_file_name: "collection-schema.json".to_string(),
            summary_file_name: "summary.json".to_string(),
            collection: CollectionConfig::default(),
            parallel: true,
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "ui_blocks".to_string(),
            vector_size: 1536,
            distance: "Cosine".to_string(),
        }
    }
}

impl IndexerConfig {
    /// Load a JSON config file. Missing keys fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))?;
        let config: IndexerConfig =
            serde_json::from_str(&data).map_err(|e| IndexerError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.file_suffixes.iter().all(|s| s.is_empty()) {
            return Err(IndexerError::Config {
                path: path.to_path_buf(),
                message: "fileSuffixes must contain at least one non-empty suffix".to_string(),
            });
        }
        if self.export_suffixes.iter().all(|s| s.is_empty()) {
            return Err(IndexerError::Config {
                path: path.to_path_buf(),
                message: "exportSuffixes must contain at least one non-empty suffix".to_string(),
            });
        }
        if self.collection.vector_size == 0 {
            return Err(IndexerError::Config {
                path: path.to_path_buf(),
                message: "collection.vectorSize must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_preset_file(&self, file_name: &str) -> bool {
        self.file_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && file_name.ends_with(suffix.as_str()))
    }

    pub fn is_preset_export(&self, export_name: &str) -> bool {
        self.export_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && export_name.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexer.json");
        fs::write(&path, r#"{ "exportSuffixes": ["Variants"], "parallel": false }"#).unwrap();

        let config = IndexerConfig::from_file(&path).unwrap();
        assert_eq!(config.export_suffixes, vec!["Variants".to_string()]);
        assert!(!config.parallel);
        assert_eq!(config.combined_file_name, "all-blocks.json");
        assert_eq!(config.collection.vector_size, 1536);
    }

    #[test]
    fn test_rejects_empty_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexer.json");
        fs::write(&path, r#"{ "fileSuffixes": [] }"#).unwrap();

        let err = IndexerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, IndexerError::Config { .. }));
    }

    #[test]
    fn test_suffix_matching() {
        let config = IndexerConfig::default();
        assert!(config.is_preset_file("presets.ts"));
        assert!(config.is_preset_file("hero.presets.tsx"));
        assert!(!config.is_preset_file("Hero.tsx"));
        assert!(config.is_preset_export("heroPresets"));
        assert!(config.is_preset_export("fooPreset"));
        assert!(!config.is_preset_export("heroDefaults"));
    }
}
