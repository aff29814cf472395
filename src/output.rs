//! Artifact emission. Any failure here is fatal for the run.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::IndexerConfig;
use crate::document::BlockDocument;
use crate::error::{IndexerError, Result};
use crate::pipeline::{CategoryIndex, RunSummary};
use crate::schema::collection_schema;

/// Write the per-category files, the combined file, the collection schema and
/// the run summary. Returns the paths written, in that order.
pub fn write_artifacts(
    out_dir: &Path,
    index: &CategoryIndex,
    summary: &RunSummary,
    config: &IndexerConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| IndexerError::io(out_dir, e))?;
    let mut written = Vec::new();

    for (category, documents) in index {
        let dir = out_dir.join(category);
        fs::create_dir_all(&dir).map_err(|e| IndexerError::io(&dir, e))?;
        let path = dir.join(format!("{}{}", category, config.category_file_suffix));
        write_json(&path, documents)?;
        written.push(path);
    }

    let all: Vec<&BlockDocument> = index.values().flatten().collect();
    let path = out_dir.join(&config.combined_file_name);
    write_json(&path, &all)?;
    written.push(path);

    let path = out_dir.join(&config.schema_file_name);
    write_json(&path, &collection_schema(&config.collection))?;
    written.push(path);

    let path = out_dir.join(&config.summary_file_name);
    write_json(&path, summary)?;
    written.push(path);

    Ok(written)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| IndexerError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| IndexerError::io(path, e))?;
    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}
