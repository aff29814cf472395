//! # Preset Indexer
//!
//! Static semantic indexing for UI-block preset files. Preset sources are
//! parsed, never executed: exported preset arrays are partially evaluated into
//! JSON, every entry is analyzed (structure, content, semantics, quality) and
//! turned into a [`BlockDocument`] ready for embedding and vector search.
//!
//! ## Pipeline
//!
//! 1. **Locate**: walk the root for `*presets.ts(x)` files ([`discovery`]).
//! 2. **Evaluate**: build a per-file constant table and evaluate each
//!    `export const xPresets = [...]` array ([`constants`], [`static_eval`]).
//! 3. **Analyze**: structure, content, semantic classification and scoring.
//! 4. **Assemble**: id, embedding text, tags and payload ([`document`]).
//! 5. **Emit**: per-category JSON, the combined file, the collection schema
//!    and a run summary ([`output`]).
//!
//! A file that fails to read or parse is reported and skipped; it never stops
//! the run. Only artifact emission errors are fatal.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod config;
pub mod constants;
pub mod content;
pub mod discovery;
pub mod document;
pub mod error;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod quality;
pub mod schema;
pub mod semantic;
pub mod static_eval;
pub mod structure;
pub mod tags;
mod values;

#[cfg(test)]
mod safety_tests;

pub use config::IndexerConfig;
pub use document::{BlockDocument, PresetEntry, Provenance};
pub use error::{IndexerError, Result};
pub use pipeline::{index_directory, run, CategoryIndex, DuplicateId, IndexResult, RunSummary};
pub use tags::{create_tag, parse_tag, Tag};

/// Node bridge: index `root`, write artifacts to `out`, return the run
/// summary as JSON.
#[cfg(feature = "napi")]
#[napi]
pub fn index_presets_native(root: String, out: String) -> napi::Result<String> {
    let config = IndexerConfig::default();
    let summary = run(
        std::path::Path::new(&root),
        std::path::Path::new(&out),
        &config,
    )
    .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    serde_json::to_string(&summary)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}
