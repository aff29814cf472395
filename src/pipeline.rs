//! Indexing driver: locate, index each file, group by category, emit.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{info, info_span, warn};

use crate::config::IndexerConfig;
use crate::discovery::{find_preset_files, index_file, EntryFailure, FileFailure, FileOutcome};
use crate::document::BlockDocument;
use crate::error::Result;
use crate::output::write_artifacts;

/// Documents grouped by category. Categories iterate in name order; documents
/// keep file order, then export order, then entry order.
pub type CategoryIndex = BTreeMap<String, Vec<BlockDocument>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_indexed: usize,
    pub files_failed: usize,
    pub documents: usize,
    /// Document count per category
    pub categories: BTreeMap<String, usize>,
    pub failures: Vec<FileFailure>,
    pub skipped_entries: Vec<EntryFailure>,
    /// Documents dropped because an earlier document in the same category
    /// already carried the id
    pub duplicate_ids: Vec<DuplicateId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateId {
    pub id: String,
    pub category: String,
    pub file: String,
    pub export: String,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IndexResult {
    pub index: CategoryIndex,
    pub summary: RunSummary,
}

/// Index every preset file under `root` without writing anything.
pub fn index_directory(root: &Path, config: &IndexerConfig) -> IndexResult {
    let _span = info_span!("index", root = %root.display()).entered();

    let files = find_preset_files(root, config);
    info!(count = files.len(), "found preset files");

    // `collect` on an indexed parallel iterator keeps input order.
    let outcomes: Vec<FileOutcome> = if config.parallel {
        files
            .par_iter()
            .map(|path| index_file(path, root, config))
            .collect()
    } else {
        files
            .iter()
            .map(|path| index_file(path, root, config))
            .collect()
    };

    let mut result = IndexResult::default();
    result.summary.files_scanned = files.len();

    // First occurrence in walk order keeps the id.
    let mut seen: HashMap<String, HashSet<String>> = HashMap::new();

    for outcome in outcomes {
        let FileOutcome {
            category,
            documents,
            failure,
            skipped_entries,
            ..
        } = outcome;

        result.summary.skipped_entries.extend(skipped_entries);
        if let Some(failure) = failure {
            result.summary.failures.push(failure);
            continue;
        }

        result.summary.files_indexed += 1;
        for doc in documents {
            let ids = seen.entry(category.clone()).or_default();
            if ids.insert(doc.id.clone()) {
                result.index.entry(category.clone()).or_default().push(doc);
                continue;
            }

            warn!(
                id = %doc.id,
                category = %category,
                file = %doc.source.file,
                export = %doc.source.export,
                index = doc.source.index,
                "dropping preset with an id already used in its category"
            );
            result.summary.duplicate_ids.push(DuplicateId {
                id: doc.id,
                category: category.clone(),
                file: doc.source.file,
                export: doc.source.export,
                index: doc.source.index,
            });
        }
    }

    result.summary.files_failed = result.summary.failures.len();
    result.summary.categories = result
        .index
        .iter()
        .map(|(category, docs)| (category.clone(), docs.len()))
        .collect();
    result.summary.documents = result.summary.categories.values().sum();

    if result.summary.files_failed > 0 {
        warn!(failed = result.summary.files_failed, "some preset files were skipped");
    }
    info!(
        files = result.summary.files_indexed,
        documents = result.summary.documents,
        categories = result.summary.categories.len(),
        "indexing complete"
    );

    result
}

/// Index `root` and write all artifacts under `out_dir`.
pub fn run(root: &Path, out_dir: &Path, config: &IndexerConfig) -> Result<RunSummary> {
    let result = index_directory(root, config);
    write_artifacts(out_dir, &result.index, &result.summary, config)?;
    Ok(result.summary)
}
