//! Conditional step expression parsing and evaluation.
//!
//! The grammar is a single comparison: `{{<path>}} <op> <literal>` with
//! `<op>` one of `>`, `<`, `>=`, `<=`, `==`, `!=`. Anything else evaluates to
//! false; evaluation never fails.
//!
//! The literal is a number when its whole text parses as a finite number and a
//! string otherwise, with surrounding quote characters stripped. The left side
//! is the value reached by walking `<path>` through the context, or the
//! verbatim reference text when the walk fails.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::resolve::{ExecutionContext, render_value};

static CONDITION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{(.+?)\}\}\s*([<>=!]+)\s*(.+?)\s*$").expect("valid condition pattern"));

/// Supported comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl ComparisonOperator {
    /// Parses an operator token; unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            ">=" => Some(Self::GreaterOrEqual),
            "<=" => Some(Self::LessOrEqual),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::LessThan => ordering == Ordering::Less,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
        }
    }
}

/// Right-hand literal after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Literal::Number(number),
            _ => Literal::Text(trimmed.trim_matches(|character| character == '"' || character == '\'').to_string()),
        }
    }
}

/// A parsed single-comparison condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Reference path without delimiters, trimmed.
    pub path: String,
    pub operator: ComparisonOperator,
    pub literal: Literal,
}

/// Parses a condition, returning `None` when it does not match the grammar.
pub fn parse_condition(expression: &str) -> Option<Comparison> {
    let captures = CONDITION_PATTERN.captures(expression.trim())?;
    let path = captures[1].trim();
    if path.is_empty() {
        return None;
    }
    let operator = ComparisonOperator::parse(&captures[2])?;
    Some(Comparison {
        path: path.to_string(),
        operator,
        literal: Literal::coerce(&captures[3]),
    })
}

/// Evaluates a condition against the context. Malformed conditions are false.
pub fn evaluate_condition(expression: &str, context: &ExecutionContext) -> bool {
    let Some(comparison) = parse_condition(expression) else {
        return false;
    };

    let left = match context.lookup(&comparison.path) {
        Some(value) => Operand::from_value(value, &comparison.literal),
        None => Operand::Text(format!("{{{{{}}}}}", comparison.path)),
    };

    let ordering = match (&left, &comparison.literal) {
        (Operand::Number(left), Literal::Number(right)) => left.partial_cmp(right),
        (Operand::Text(left), Literal::Text(right)) => Some(left.as_str().cmp(right.as_str())),
        _ => None,
    };

    match ordering {
        Some(ordering) => comparison.operator.accepts(ordering),
        None => comparison.operator == ComparisonOperator::NotEqual,
    }
}

enum Operand {
    Number(f64),
    Text(String),
}

impl Operand {
    fn from_value(value: &Value, literal: &Literal) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map(Operand::Number).unwrap_or_else(|| Operand::Text(number.to_string())),
            Value::String(text) => match (literal, text.trim().parse::<f64>()) {
                (Literal::Number(_), Ok(number)) if number.is_finite() => Operand::Number(number),
                _ => Operand::Text(text.clone()),
            },
            other => Operand::Text(render_value(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(b: Value) -> ExecutionContext {
        ExecutionContext::from(json!({"a": {"b": b}, "scan": {"level": "LOW", "safe": true}}).as_object().cloned().unwrap())
    }

    #[test]
    fn numeric_comparison_against_context_value() {
        assert!(evaluate_condition("{{a.b}} > 80", &context(json!(85))));
        assert!(!evaluate_condition("{{a.b}} > 80", &context(json!(70))));
    }

    #[test]
    fn every_operator_is_supported() {
        let ctx = context(json!(80));
        assert!(evaluate_condition("{{a.b}} >= 80", &ctx));
        assert!(evaluate_condition("{{a.b}} <= 80", &ctx));
        assert!(evaluate_condition("{{a.b}} == 80", &ctx));
        assert!(evaluate_condition("{{a.b}} != 81", &ctx));
        assert!(evaluate_condition("{{a.b}} < 80.5", &ctx));
        assert!(!evaluate_condition("{{a.b}} > 80", &ctx));
    }

    #[test]
    fn unsupported_operator_is_false() {
        assert!(!evaluate_condition("{{a.b}} ~~ 80", &context(json!(85))));
        assert!(!evaluate_condition("{{a.b}} => 80", &context(json!(85))));
        assert!(!evaluate_condition("{{a.b}} === 85", &context(json!(85))));
    }

    #[test]
    fn unparseable_conditions_are_false() {
        let ctx = context(json!(85));
        assert!(!evaluate_condition("", &ctx));
        assert!(!evaluate_condition("a.b > 80", &ctx));
        assert!(!evaluate_condition("{{a.b}}", &ctx));
        assert!(!evaluate_condition("{{}} > 1", &ctx));
    }

    #[test]
    fn trailing_text_becomes_a_single_text_literal() {
        let ctx = context(json!(85));
        let comparison = parse_condition("{{a.b}} != 5 && {{a.b}} < 0").expect("single comparison");
        assert_eq!(comparison.operator, ComparisonOperator::NotEqual);
        assert_eq!(comparison.literal, Literal::Text("5 && {{a.b}} < 0".into()));

        // A number never orders against text, but it is always unequal to it.
        assert!(!evaluate_condition("{{a.b}} > 80 && {{a.b}} < 90", &ctx));
        assert!(evaluate_condition("{{a.b}} != 5 && {{a.b}} < 0", &ctx));
    }

    #[test]
    fn string_literals_strip_quotes() {
        let ctx = context(json!(1));
        assert!(evaluate_condition("{{scan.level}} == \"LOW\"", &ctx));
        assert!(evaluate_condition("{{scan.level}} == 'LOW'", &ctx));
        assert!(evaluate_condition("{{scan.level}} != HIGH", &ctx));
    }

    #[test]
    fn numeric_strings_compare_numerically() {
        assert!(evaluate_condition("{{a.b}} > 9", &context(json!("10"))));
    }

    #[test]
    fn booleans_compare_as_text() {
        assert!(evaluate_condition("{{scan.safe}} == true", &context(json!(1))));
    }

    #[test]
    fn unresolved_left_side_only_satisfies_not_equal() {
        let ctx = context(json!(85));
        assert!(!evaluate_condition("{{missing.path}} > 80", &ctx));
        assert!(!evaluate_condition("{{missing.path}} == 80", &ctx));
        assert!(evaluate_condition("{{missing.path}} != 80", &ctx));
    }

    #[test]
    fn mismatched_kinds_are_not_equal() {
        let ctx = context(json!(85));
        assert!(!evaluate_condition("{{a.b}} == \"85\"", &ctx));
        assert!(!evaluate_condition("{{a.b}} > \"80\"", &ctx));
    }

    #[test]
    fn parse_condition_exposes_parts() {
        let parsed = parse_condition("  {{ a.b }} >= 'x' ").expect("parsed");
        assert_eq!(parsed.path, "a.b");
        assert_eq!(parsed.operator, ComparisonOperator::GreaterOrEqual);
        assert_eq!(parsed.literal, Literal::Text("x".into()));
    }
}
