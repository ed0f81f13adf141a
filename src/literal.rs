//! Typing of literal tokens in INSERT value lists and UPDATE assignments.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

// Decimal notation only; rejects `inf`, `NaN` and hex that `f64::from_str` or
// looser parsers would accept.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("number pattern")
});

/// Turn one trimmed token into a [`Value`].
///
/// - `'text'` is a string with the quotes stripped (no escape processing)
/// - a decimal numeric literal is an integer when it fits `i64`, else a float
/// - `true` / `false` / `null` in any case are booleans and null
/// - anything else is kept verbatim as a string
///
/// ```
/// use sql_odata::{literal::parse_literal, Value};
///
/// assert_eq!(parse_literal("'Acme'"), Value::String("Acme".into()));
/// assert_eq!(parse_literal("1000"), Value::Integer(1000));
/// assert_eq!(parse_literal("TRUE"), Value::Boolean(true));
/// assert_eq!(parse_literal("Acme"), Value::String("Acme".into()));
/// ```
pub fn parse_literal(token: &str) -> Value {
    let token = token.trim();

    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Value::String(token[1..token.len() - 1].to_string());
    }

    if NUMBER.is_match(token) {
        if let Ok(n) = token.parse::<i64>() {
            return Value::Integer(n);
        }
        if let Ok(n) = token.parse::<f64>()
            && n.is_finite()
        {
            return Value::Float(n);
        }
    }

    if token.eq_ignore_ascii_case("true") {
        Value::Boolean(true)
    } else if token.eq_ignore_ascii_case("false") {
        Value::Boolean(false)
    } else if token.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        Value::String(token.to_string())
    }
}
