//! Static Expression Evaluator for the Preset Indexer
//!
//! Reduces an `oxc` expression to a JSON value without executing anything.
//! Only literal data is understood: primitives, arrays, objects with spreads,
//! template literals, TypeScript annotation wrappers and identifiers that
//! resolve through the file's [`ConstantTable`]. Every other construct
//! evaluates to `null`, so evaluation cannot fail.

use oxc_ast::ast::{
    ArrayExpression, Expression, ObjectExpression, ObjectPropertyKind, PropertyKey, TemplateLiteral,
};
use serde_json::{Map, Number, Value};

use crate::constants::ConstantTable;

/// Substituted for every `${...}` interpolation in a template literal.
pub const TEMPLATE_PLACEHOLDER: &str = "{{dynamic}}";

// Largest integer an f64 represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Evaluate an expression against a constant table.
pub fn evaluate(expr: &Expression<'_>, constants: &ConstantTable) -> Value {
    match unwrap_transparent(expr) {
        Expression::StringLiteral(lit) => Value::String(lit.value.to_string()),
        Expression::NumericLiteral(lit) => number_value(lit.value),
        Expression::BooleanLiteral(lit) => Value::Bool(lit.value),
        Expression::NullLiteral(_) => Value::Null,
        Expression::TemplateLiteral(tpl) => Value::String(evaluate_template(tpl)),
        Expression::ArrayExpression(arr) => evaluate_array(arr, constants),
        Expression::ObjectExpression(obj) => evaluate_object(obj, constants),
        Expression::Identifier(ident) => constants
            .get(ident.name.as_str())
            .cloned()
            .unwrap_or_else(|| Value::String(ident.name.to_string())),
        _ => Value::Null,
    }
}

/// True when the expression's root is a construct [`evaluate`] understands.
/// Calls, `new`, member access and the like are not.
pub fn is_literal_evaluable(expr: &Expression<'_>) -> bool {
    matches!(
        unwrap_transparent(expr),
        Expression::StringLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::TemplateLiteral(_)
            | Expression::ArrayExpression(_)
            | Expression::ObjectExpression(_)
            | Expression::Identifier(_)
    )
}

/// Strip parentheses and type-level wrappers (`as`, `satisfies`, `!`, `<T>x`).
pub fn unwrap_transparent<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(e) => unwrap_transparent(&e.expression),
        Expression::TSAsExpression(e) => unwrap_transparent(&e.expression),
        Expression::TSSatisfiesExpression(e) => unwrap_transparent(&e.expression),
        Expression::TSNonNullExpression(e) => unwrap_transparent(&e.expression),
        Expression::TSTypeAssertion(e) => unwrap_transparent(&e.expression),
        Expression::TSInstantiationExpression(e) => unwrap_transparent(&e.expression),
        _ => expr,
    }
}

/// JS numbers are doubles; integral values are kept as JSON integers so
/// `3` serializes as `3`, not `3.0`.
pub fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn evaluate_template(tpl: &TemplateLiteral<'_>) -> String {
    let mut result = String::new();

    for (i, quasi) in tpl.quasis.iter().enumerate() {
        match &quasi.value.cooked {
            Some(cooked) => result.push_str(cooked.as_str()),
            None => result.push_str(quasi.value.raw.as_str()),
        }
        // quasis always outnumber expressions by one
        if i < tpl.expressions.len() {
            result.push_str(TEMPLATE_PLACEHOLDER);
        }
    }

    result
}

fn evaluate_array(arr: &ArrayExpression<'_>, constants: &ConstantTable) -> Value {
    let items = arr
        .elements
        .iter()
        .map(|elem| match elem.as_expression() {
            Some(e) => evaluate(e, constants),
            // holes and spread elements
            None => Value::Null,
        })
        .collect();

    Value::Array(items)
}

fn evaluate_object(obj: &ObjectExpression<'_>, constants: &ConstantTable) -> Value {
    let mut map = Map::new();

    for prop in &obj.properties {
        match prop {
            ObjectPropertyKind::ObjectProperty(p) => {
                if let Some(key) = property_key(&p.key, p.computed, constants) {
                    map.insert(key, evaluate(&p.value, constants));
                }
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                if let Value::Object(source) = evaluate(&spread.argument, constants) {
                    // later wins; an existing key keeps its original position
                    for (key, value) in source {
                        map.insert(key, value);
                    }
                }
            }
        }
    }

    Value::Object(map)
}

fn property_key(
    key: &PropertyKey<'_>,
    computed: bool,
    constants: &ConstantTable,
) -> Option<String> {
    if let PropertyKey::StaticIdentifier(id) = key {
        return Some(id.name.to_string());
    }

    let expr = key.as_expression()?;
    if computed && !is_literal_evaluable(expr) {
        return None;
    }

    match evaluate(expr, constants) {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
