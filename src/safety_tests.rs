//! Safety Gate Tests for the Preset Indexer
//!
//! These tests verify invariants that must hold regardless of input:
//! - Evaluation never executes code and never mutates the constant table
//! - Output is deterministic across runs and across parallel/sequential modes
//! - Constant tables never leak between files

#[cfg(test)]
mod tests {
    use crate::config::IndexerConfig;
    use crate::constants::{build_table, ConstantTable};
    use crate::parse::{parse_expression, parse_program};
    use crate::pipeline::index_directory;
    use crate::static_eval::evaluate;
    use crate::structure::{density_for, Layout};
    use oxc_allocator::Allocator;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, relative: &str, source: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // EVALUATOR PURITY
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_evaluation_is_repeatable() {
        let mut constants = ConstantTable::new();
        constants.insert("base", json!({ "badge": "X" }));

        let allocator = Allocator::default();
        let expr = parse_expression(&allocator, "({ ...base, items: [1, `a${x}b`, base.badge] })")
            .unwrap();

        let first = evaluate(&expr, &constants);
        let second = evaluate(&expr, &constants);
        assert_eq!(first, second);
        assert_eq!(constants.len(), 1);
        assert_eq!(constants.get("base"), Some(&json!({ "badge": "X" })));
    }

    #[test]
    fn test_side_effecting_expressions_degrade_to_null() {
        let cases = [
            "fetch('/api')",
            "new Date()",
            "window.location",
            "(() => 1)()",
            "x = 5",
            "a ? b : c",
        ];

        for source in cases {
            let allocator = Allocator::default();
            let expr = parse_expression(&allocator, source).unwrap();
            assert_eq!(
                evaluate(&expr, &ConstantTable::new()),
                Value::Null,
                "{} should not be evaluated",
                source
            );
        }
    }

    #[test]
    fn test_table_only_holds_literal_initializers() {
        let source = r#"
            const a = { x: 1 };
            let b = compute();
            var c = [a, "y"];
            function f() { const hidden = 1; }
            export const d = `t${a}`;
        "#;
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source, Path::new("x/presets.ts")).unwrap();
        let table = build_table(&program);

        assert!(table.contains("a"));
        assert!(!table.contains("b"));
        assert_eq!(table.get("c"), Some(&json!([{ "x": 1 }, "y"])));
        assert!(!table.contains("hidden"));
        assert!(table.contains("d"));
    }

    #[test]
    fn test_constants_do_not_leak_between_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a/presets.ts",
            r#"
            const shared = { badge: "From A" };
            export const aPresets = [{ type: "hero.centered", props: { content: { ...shared } } }];
            "#,
        );
        write(
            dir.path(),
            "b/presets.ts",
            r#"export const bPresets = [{ type: "hero.centered", props: { content: { title: shared } } }];"#,
        );

        let result = index_directory(dir.path(), &IndexerConfig::default());
        let b = &result.index["b"][0];
        assert_eq!(b.payload.usage.default_props["content"]["title"], "shared");
        assert_eq!(result.index["a"][0].payload.usage.default_props["content"]["badge"], "From A");
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // DETERMINISM
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_parallel_and_sequential_agree() {
        let dir = tempfile::tempdir().unwrap();
        for (i, category) in ["hero", "cta", "pricing", "features", "footer"].iter().enumerate() {
            let source = format!(
                r#"export const {c}Presets = [
                    {{ type: "{c}.grid", variant: "v{i}", props: {{ content: {{ title: "Title {i}" }} }} }},
                    {{ type: "{c}.split", props: {{ leftMedia: true }} }},
                ];"#,
                c = category,
                i = i
            );
            write(dir.path(), &format!("{}/presets.ts", category), &source);
        }

        let parallel = index_directory(dir.path(), &IndexerConfig::default());
        let sequential = index_directory(
            dir.path(),
            &IndexerConfig {
                parallel: false,
                ..IndexerConfig::default()
            },
        );

        assert_eq!(
            serde_json::to_string(&parallel.index).unwrap(),
            serde_json::to_string(&sequential.index).unwrap()
        );
        assert_eq!(parallel.summary, sequential.summary);
        assert_eq!(parallel.summary.documents, 10);
    }

    #[test]
    fn test_density_is_total() {
        for layout in [Layout::Grid, Layout::Split, Layout::Centered, Layout::Stack] {
            for block_type in ["hero.grid", "stats.split", "cta", "logos.cloud", ""] {
                let density = density_for(layout, block_type);
                assert!(!density.as_str().is_empty());
            }
        }
    }
}
