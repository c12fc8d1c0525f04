use serde_json::Value;

const TRUE_TOKENS: [&str; 4] = ["yes", "true", "y", "1"];
const FALSE_TOKENS: [&str; 4] = ["no", "false", "n", "0"];

/// Coerces a yes/no style answer. Unrecognized tokens yield `None`.
pub fn normalize_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(raw) => bool_from_str(raw),
        _ => None,
    }
}

/// Coerces a numeric answer, parsing trimmed strings.
pub fn normalize_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(raw) => number_from_str(raw),
        _ => None,
    }
}

/// Lower-cases free-text answers. Scalars are rendered as text first.
pub fn normalize_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.to_lowercase()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn bool_from_str(raw: &str) -> Option<bool> {
    let token = raw.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn number_from_str(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
