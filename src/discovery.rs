//! Discovery Module for the Preset Indexer
//!
//! Recursively scans a directory for preset source files, parses each one and
//! extracts the exported preset arrays. Every file is independent: it builds
//! its own constant table and produces its own [`FileOutcome`].

use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPattern, Declaration, Expression, Program, Statement};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::IndexerConfig;
use crate::constants::{build_table, ConstantTable};
use crate::document::{assemble, BlockDocument, PresetEntry, Provenance};
use crate::parse::parse_program;
use crate::static_eval::{evaluate, unwrap_transparent};

/// Fallback when the parent directory has no usable name (e.g. a root of `.`).
pub const UNCATEGORIZED: &str = "uncategorized";

// ═══════════════════════════════════════════════════════════════════════════════
// OUTCOME TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct PresetArray {
    pub export_name: String,
    pub entries: Vec<Value>,
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// A preset entry that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFailure {
    pub file: String,
    pub export: String,
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: String,
    pub category: String,
    pub documents: Vec<BlockDocument>,
    pub failure: Option<FileFailure>,
    pub skipped_entries: Vec<EntryFailure>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE DISCOVERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Recursively find preset files, sorted by name at every level so the
/// walk order is reproducible.
pub fn find_preset_files(root: &Path, config: &IndexerConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| config.is_preset_file(name))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files
}

/// Name of the immediate parent directory. Files directly under `root` take
/// the root directory's own name.
pub fn category_for(path: &Path, root: &Path) -> String {
    let parent = match path.parent() {
        Some(parent) if parent != root => parent,
        _ => root,
    };

    parent
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRESET EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Named exports whose name carries a preset suffix and whose initializer is
/// an array literal. Everything else in the file is ignored.
pub fn extract_preset_arrays(
    program: &Program<'_>,
    constants: &ConstantTable,
    config: &IndexerConfig,
) -> Vec<PresetArray> {
    let mut arrays = Vec::new();

    for stmt in &program.body {
        let Statement::ExportNamedDeclaration(export) = stmt else {
            continue;
        };
        let Some(Declaration::VariableDeclaration(var_decl)) = &export.declaration else {
            continue;
        };

        for decl in &var_decl.declarations {
            let BindingPattern::BindingIdentifier(id) = &decl.id else {
                continue;
            };
            let name = id.name.as_str();
            if !config.is_preset_export(name) {
                continue;
            }
            let Some(init) = &decl.init else {
                continue;
            };
            if !matches!(unwrap_transparent(init), Expression::ArrayExpression(_)) {
                continue;
            }

            if let Value::Array(entries) = evaluate(init, constants) {
                arrays.push(PresetArray {
                    export_name: name.to_string(),
                    entries,
                });
            }
        }
    }

    arrays
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-FILE INDEXING
// ═══════════════════════════════════════════════════════════════════════════════

/// Index one file. Never fails: read and parse errors land in
/// [`FileOutcome::failure`], bad entries in [`FileOutcome::skipped_entries`].
pub fn index_file(path: &Path, root: &Path, config: &IndexerConfig) -> FileOutcome {
    let file = display_path(path, root);
    let category = category_for(path, root);

    let mut outcome = FileOutcome {
        file: file.clone(),
        category: category.clone(),
        documents: Vec::new(),
        failure: None,
        skipped_entries: Vec::new(),
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warn!(file = %file, error = %e, "failed to read preset file");
            outcome.failure = Some(FileFailure {
                file,
                message: format!("Failed to read file: {}", e),
            });
            return outcome;
        }
    };

    let allocator = Allocator::default();
    let program = match parse_program(&allocator, &source, path) {
        Ok(program) => program,
        Err(e) => {
            warn!(file = %file, error = %e, "skipping preset file that failed to parse");
            outcome.failure = Some(FileFailure {
                file,
                message: e.to_string(),
            });
            return outcome;
        }
    };

    let constants = build_table(&program);
    debug!(file = %file, constants = constants.len(), "built constant table");

    for array in extract_preset_arrays(&program, &constants, config) {
        for (index, value) in array.entries.iter().enumerate() {
            match PresetEntry::from_value(value) {
                Some(entry) => {
                    let source = Provenance {
                        file: file.clone(),
                        export: array.export_name.clone(),
                        index,
                    };
                    outcome.documents.push(assemble(&entry, &category, source));
                }
                None => {
                    warn!(
                        file = %file,
                        export = %array.export_name,
                        index,
                        "skipping preset entry without a type"
                    );
                    outcome.skipped_entries.push(EntryFailure {
                        file: file.clone(),
                        export: array.export_name.clone(),
                        index,
                        message: "entry is not an object with a non-empty `type`".to_string(),
                    });
                }
            }
        }
    }

    debug!(file = %file, documents = outcome.documents.len(), "indexed preset file");
    outcome
}
