//! Parse Module for the Preset Indexer
//!
//! Thin front end over `oxc_parser`. Preset sources are TypeScript modules,
//! `.tsx`/`.jsx` files additionally enable JSX.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, Program};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

use crate::error::{IndexerError, Result};

pub fn source_type_for(path: &Path) -> SourceType {
    let jsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "tsx" || ext == "jsx")
        .unwrap_or(false);

    SourceType::default()
        .with_typescript(true)
        .with_module(true)
        .with_jsx(jsx)
}

/// Parse a whole module. Any reported syntax error fails the file.
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    path: &Path,
) -> Result<Program<'a>> {
    let ret = Parser::new(allocator, source, source_type_for(path)).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = if ret.errors.is_empty() {
            "parser aborted".to_string()
        } else {
            ret.errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        };
        return Err(IndexerError::parse(path, message));
    }

    Ok(ret.program)
}

/// Parse a single TypeScript expression, e.g. `{ ...base, title: "T" }`.
pub fn parse_expression<'a>(allocator: &'a Allocator, source: &'a str) -> Result<Expression<'a>> {
    let source_type = SourceType::default()
        .with_typescript(true)
        .with_module(true);

    Parser::new(allocator, source, source_type)
        .parse_expression()
        .map_err(|errors| {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            IndexerError::parse("<expression>", message)
        })
}
