//! Per-file constant table.
//!
//! Collects module-scope `const`/`let`/`var` bindings so identifier references
//! inside preset arrays resolve to literal data. Declarations are processed in
//! file order, which lets a later constant spread or reference an earlier one.

use oxc_ast::ast::{BindingPattern, Declaration, Program, Statement, VariableDeclaration};
use serde_json::Value;
use std::collections::HashMap;

use crate::static_eval::{evaluate, is_literal_evaluable};

/// Name -> evaluated value for one source file. Never shared across files.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    values: HashMap<String, Value>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the constant table from a program's top-level declarations.
pub fn build_table(program: &Program<'_>) -> ConstantTable {
    let mut table = ConstantTable::new();

    for stmt in &program.body {
        match stmt {
            Statement::VariableDeclaration(var_decl) => collect_declaration(var_decl, &mut table),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(var_decl)) = &export.declaration {
                    collect_declaration(var_decl, &mut table);
                }
            }
            // function bodies, blocks and everything else stay out of scope
            _ => {}
        }
    }

    table
}

fn collect_declaration(var_decl: &VariableDeclaration<'_>, table: &mut ConstantTable) {
    for decl in &var_decl.declarations {
        let BindingPattern::BindingIdentifier(id) = &decl.id else {
            continue;
        };
        let Some(init) = &decl.init else {
            continue;
        };
        if !is_literal_evaluable(init) {
            continue;
        }

        let value = evaluate(init, table);
        table.insert(id.name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_program;
    use oxc_allocator::Allocator;
    use serde_json::json;
    use std::path::Path;

    fn table_for(source: &str) -> ConstantTable {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source, Path::new("test/presets.ts")).unwrap();
        build_table(&program)
    }

    #[test]
    fn test_later_constants_see_earlier_ones() {
        let table = table_for(
            r#"
            const base = { badge: "New" };
            const hero = { ...base, title: "Launch" };
            export const defaults = { ...hero, size: 2 };
            "#,
        );

        assert_eq!(table.get("base"), Some(&json!({ "badge": "New" })));
        assert_eq!(
            table.get("defaults"),
            Some(&json!({ "badge": "New", "title": "Launch", "size": 2 }))
        );
    }

    #[test]
    fn test_forward_reference_falls_back_to_name() {
        let table = table_for(
            r#"
            const first = { icon: second };
            const second = "star";
            "#,
        );

        assert_eq!(table.get("first"), Some(&json!({ "icon": "second" })));
    }

    #[test]
    fn test_nested_declarations_are_ignored() {
        let table = table_for(
            r#"
            function build() {
                const hidden = { a: 1 };
                return hidden;
            }
            if (true) {
                const alsoHidden = 2;
            }
            const visible = 3;
            "#,
        );

        assert!(!table.contains("hidden"));
        assert!(!table.contains("alsoHidden"));
        assert_eq!(table.get("visible"), Some(&json!(3)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_non_literal_initializers_are_skipped() {
        let table = table_for(
            r#"
            const computed = makeContent();
            const { destructured } = source;
            let pending;
            const typed = { a: 1 } as const;
            "#,
        );

        assert!(!table.contains("computed"));
        assert!(!table.contains("destructured"));
        assert!(!table.contains("pending"));
        assert_eq!(table.get("typed"), Some(&json!({ "a": 1 })));
    }
}
