use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

static LEADING_FLOAT: OnceLock<Regex> = OnceLock::new();

fn leading_float() -> &'static Regex {
    LEADING_FLOAT.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("leading float pattern compiles")
    })
}

/// Loose string form used when comparing match keys and parsing numbers.
///
/// Mirrors how a dynamically typed record would stringify: `null` becomes
/// `"null"`, arrays join their elements with commas, and objects collapse to
/// `"[object Object]"`.
pub fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Displayable form of a resolved value. Structures render as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        scalar => loose_string(scalar),
    }
}

/// Parses the longest numeric prefix of `text`, ignoring leading whitespace.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let candidate = leading_float().find(text.trim_start())?.as_str();
    match candidate.trim_start_matches(&['+', '-'][..]) {
        "Infinity" if candidate.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => candidate.parse().ok(),
    }
}

/// Numeric reading of a resolved value, or `None` when it is not a number.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        other => parse_leading_float(&loose_string(other)),
    }
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }

    match number.as_f64() {
        Some(float) if float == 0.0 => "0".to_string(),
        Some(float) if float.fract() == 0.0 && float.abs() < 1e21 => format!("{float:.0}"),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}
