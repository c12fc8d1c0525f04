use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalizer::{normalize_bool, normalize_number, normalize_text};

/// Untyped answers exactly as a client submitted them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(pub BTreeMap<String, Value>);

impl RawAnswers {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

impl FromIterator<(String, Value)> for RawAnswers {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The four answers every assessment relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Age,
    Smoker,
    Exercise,
    Diet,
}

impl RequiredField {
    pub const ALL: [RequiredField; 4] = [Self::Age, Self::Smoker, Self::Exercise, Self::Diet];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Smoker => "smoker",
            Self::Exercise => "exercise",
            Self::Diet => "diet",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Canonical answer set: typed recognized fields plus verbatim extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Answers {
    /// Runs every recognized key through its normalizer; other keys pass through untouched.
    pub fn from_raw(raw: &RawAnswers) -> Self {
        let mut answers = Self::default();
        for (key, value) in &raw.0 {
            match RequiredField::from_key(key) {
                Some(RequiredField::Age) => answers.age = normalize_number(value),
                Some(RequiredField::Smoker) => answers.smoker = normalize_bool(value),
                Some(RequiredField::Exercise) => answers.exercise = normalize_text(value),
                Some(RequiredField::Diet) => answers.diet = normalize_text(value),
                None => {
                    answers.extra.insert(key.clone(), value.clone());
                }
            }
        }
        answers
    }

    pub fn is_present(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::Age => self.age.is_some(),
            RequiredField::Smoker => self.smoker.is_some(),
            RequiredField::Exercise => self.exercise.is_some(),
            RequiredField::Diet => self.diet.is_some(),
        }
    }

    /// Required fields without a usable value, in [`RequiredField::ALL`] order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| !self.is_present(*field))
            .collect()
    }
}
