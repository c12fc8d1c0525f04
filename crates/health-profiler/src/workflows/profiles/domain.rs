use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::assessment::{Assessment, FactorsResult, RecommendationResult, RiskResult};
use super::super::intake::{IntakeRequest, ParseResult, RawAnswers};

/// Session used when a submission does not name one.
pub const ANONYMOUS_SESSION: &str = "anon";

/// Identifier wrapper for generated profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Questionnaire submission as posted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    #[serde(default)]
    pub answers: Option<RawAnswers>,
    #[serde(default)]
    pub text_input: Option<String>,
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub persist: bool,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ProfileSubmission {
    pub fn intake_request(&self) -> IntakeRequest {
        IntakeRequest {
            answers: self.answers.clone(),
            text_input: self.text_input.clone(),
            ocr_text: self.ocr_text.clone(),
        }
    }

    pub fn session(&self) -> &str {
        self.session_id
            .as_deref()
            .filter(|session| !session.is_empty())
            .unwrap_or(ANONYMOUS_SESSION)
    }
}

/// Everything produced for one submission. Incomplete submissions only carry
/// the parse result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfile {
    pub id: ProfileId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub parse: ParseResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorsResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_notes: Option<String>,
}

impl FullProfile {
    pub fn incomplete(id: ProfileId, created_at: DateTime<Utc>, parse: ParseResult) -> Self {
        Self {
            id,
            created_at,
            parse,
            factors: None,
            risk: None,
            recommendation: None,
            ai_notes: None,
        }
    }

    pub fn assessed(
        id: ProfileId,
        created_at: DateTime<Utc>,
        parse: ParseResult,
        assessment: Assessment,
        ai_notes: String,
    ) -> Self {
        Self {
            id,
            created_at,
            parse,
            factors: Some(assessment.factors),
            risk: Some(assessment.risk),
            recommendation: Some(assessment.recommendation),
            ai_notes: Some(ai_notes),
        }
    }
}

/// Thumbs-up/down on the advice shown for a set of factors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub helpful: bool,
    #[serde(default)]
    pub factors: Option<Vec<String>>,
}

/// Feedback that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFeedback {
    pub session_id: String,
    pub factors: Vec<String>,
    pub helpful: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing sessionId or factors")]
pub struct FeedbackRejection;

impl FeedbackSubmission {
    pub fn validate(self) -> Result<SessionFeedback, FeedbackRejection> {
        let session_id = self
            .session_id
            .filter(|session| !session.is_empty())
            .ok_or(FeedbackRejection)?;
        let factors = self.factors.ok_or(FeedbackRejection)?;

        Ok(SessionFeedback {
            session_id,
            factors,
            helpful: self.helpful,
        })
    }
}
