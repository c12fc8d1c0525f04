use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::domain::{Answers, RawAnswers, RequiredField};
use super::normalizer::{bool_from_str, number_from_str};

static KEY_VALUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+)\s*:\s*(.+)$").expect("valid key/value line regex")
});

/// Reads `Key: value` lines such as `Age: 42` or `Diet: high sugar`.
///
/// Lines that do not look like a key/value pair are skipped. A repeated key
/// keeps its last value.
pub(crate) fn parse_key_value_lines(text: &str) -> Answers {
    let mut answers = Answers::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some(captures) = KEY_VALUE_LINE.captures(line) else {
            continue;
        };
        let key = captures[1].to_lowercase();
        let raw = captures[2].trim();

        match RequiredField::from_key(&key) {
            Some(RequiredField::Age) => answers.age = number_from_str(raw),
            Some(RequiredField::Smoker) => answers.smoker = bool_from_str(raw),
            Some(RequiredField::Exercise) => answers.exercise = Some(raw.to_lowercase()),
            Some(RequiredField::Diet) => answers.diet = Some(raw.to_lowercase()),
            None => {
                answers.extra.insert(key, Value::String(raw.to_string()));
            }
        }
    }

    answers
}

/// Interprets the text as a JSON object. Anything else (invalid JSON, arrays,
/// scalars) returns `None` so the caller can fall back to line parsing.
///
/// A present `exercise` or `diet` key always counts as answered; falsy values
/// such as `null`, `false` or `0` become an empty string.
pub(crate) fn parse_json_object(text: &str) -> Option<Answers> {
    let Value::Object(object) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };
    let raw: RawAnswers = object.into_iter().collect();

    let mut answers = Answers::from_raw(&raw);
    if let Some(value) = raw.0.get(RequiredField::Exercise.key()) {
        answers.exercise = Some(json_text(value));
    }
    if let Some(value) = raw.0.get(RequiredField::Diet.key()) {
        answers.diet = Some(json_text(value));
    }
    Some(answers)
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(number) if number.as_f64() == Some(0.0) => String::new(),
        Value::String(raw) => raw.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}
