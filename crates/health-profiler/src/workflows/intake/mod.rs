//! Questionnaire intake: turns structured answers, pasted text, or OCR output
//! into a canonical [`Answers`] record with a completeness estimate.

pub mod domain;
mod normalizer;
mod parser;

pub use domain::{Answers, RawAnswers, RequiredField};
pub use normalizer::{normalize_bool, normalize_number, normalize_text};

use serde::{Deserialize, Serialize};
use tracing::debug;

const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.98;
const INCOMPLETE_REASON: &str = ">50% fields missing";

/// The three ways answers can arrive. The first non-empty one is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeRequest {
    pub answers: Option<RawAnswers>,
    pub text_input: Option<String>,
    pub ocr_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Ok,
    IncompleteProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub answers: Answers,
    pub missing_fields: Vec<RequiredField>,
    pub confidence: f64,
    pub status: ProfileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ParseResult {
    pub fn is_complete(&self) -> bool {
        self.status == ProfileStatus::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputSource {
    Answers,
    Json,
    Text,
    Ocr,
    Empty,
}

/// Builds the canonical answer set and scores how complete it is.
pub fn parse_inputs(request: &IntakeRequest) -> ParseResult {
    let (answers, source) = base_answers(request);

    let missing_fields = answers.missing_fields();
    let total = RequiredField::ALL.len();
    let present = total - missing_fields.len();
    let confidence = (present as f64 / total as f64).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    let (status, reason) = if missing_fields.len() * 2 > total {
        (
            ProfileStatus::IncompleteProfile,
            Some(INCOMPLETE_REASON.to_string()),
        )
    } else {
        (ProfileStatus::Ok, None)
    };

    debug!(?source, missing = missing_fields.len(), confidence, "parsed intake");

    ParseResult {
        answers,
        missing_fields,
        confidence,
        status,
        reason,
    }
}

fn base_answers(request: &IntakeRequest) -> (Answers, InputSource) {
    if let Some(raw) = request.answers.as_ref().filter(|raw| !raw.is_empty()) {
        return (Answers::from_raw(raw), InputSource::Answers);
    }

    if let Some(text) = non_empty(&request.text_input) {
        return match parser::parse_json_object(text) {
            Some(answers) => (answers, InputSource::Json),
            None => (parser::parse_key_value_lines(text), InputSource::Text),
        };
    }

    if let Some(text) = non_empty(&request.ocr_text) {
        return (parser::parse_key_value_lines(text), InputSource::Ocr);
    }

    (Answers::default(), InputSource::Empty)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
