//! Predicates behind the validation chain rules.
//!
//! Values are inspected the way a loosely typed JSON client sends them:
//! `"12.5"` and `12.5` are both numeric and `"true"` is a boolean.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use validator::ValidateLength;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());

/// String form a rule sees; missing and null become `""`.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric reading of a value, or `None` when it has none.
///
/// Blank strings and null read as 0, booleans as 1 and 0.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn is_present(value: Option<&Value>) -> bool {
    !to_text(value).is_empty()
}

pub fn is_numeric(value: Option<&Value>) -> bool {
    NUMERIC.is_match(&to_text(value))
}

/// Integer literal that fits in an `i32`.
pub fn is_int(value: Option<&Value>) -> bool {
    let text = to_text(value);
    INTEGER.is_match(&text) && text.trim_start_matches('+').parse::<i32>().is_ok()
}

pub fn is_boolean(value: Option<&Value>) -> bool {
    matches!(to_text(value).as_str(), "true" | "false" | "1" | "0")
}

pub fn to_bool(value: Option<&Value>) -> Option<bool> {
    match to_text(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn is_positive(value: Option<&Value>) -> bool {
    to_number(value).is_some_and(|n| n > 0.0)
}

/// At most `max` characters.
pub fn max_chars(value: Option<&Value>, max: u64) -> bool {
    to_text(value).validate_length(None, Some(max), None)
}
