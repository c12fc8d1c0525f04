use async_trait::async_trait;

use super::super::assessment::{RiskFactor, RiskResult};
use super::super::intake::Answers;

/// Number of personalized factor weights shared with the notes generator.
pub const NOTES_CONTEXT_FACTORS: usize = 5;

/// Context handed to the notes generator for one assessed profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesPrompt {
    pub answers: Answers,
    pub risk: RiskResult,
    pub factors: Vec<RiskFactor>,
    pub weighted_factors: Vec<(String, f64)>,
}

impl NotesPrompt {
    pub fn render(&self) -> String {
        let answers = serde_json::to_string(&self.answers).unwrap_or_else(|_| "{}".to_string());
        let factors = if self.factors.is_empty() {
            "none".to_string()
        } else {
            self.factors
                .iter()
                .map(|factor| factor.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let weighted = if self.weighted_factors.is_empty() {
            "none".to_string()
        } else {
            self.weighted_factors
                .iter()
                .map(|(factor, weight)| format!("{factor}:{weight:.2}"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        [
            "You are a careful lifestyle coach. Write concise notes and never diagnose.".to_string(),
            format!("Answers: {answers}"),
            format!("Risk: {}", self.risk.summary()),
            format!("Factors: {factors}"),
            format!("Personalized factor weights (top): {weighted}"),
            "In 2-3 sentences explain why the recommendations fit these habits. Make no medical claims."
                .to_string(),
        ]
        .join("\n")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("notes generation is not configured")]
    Disabled,
    #[error("notes request failed: {0}")]
    Transport(String),
    #[error("notes response unusable: {0}")]
    InvalidResponse(String),
}

/// Produces short free-text notes. Callers treat every failure as "no notes".
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    async fn generate(&self, prompt: &NotesPrompt) -> Result<String, NotesError>;
}

/// Generator used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotes;

#[async_trait]
impl NotesGenerator for DisabledNotes {
    async fn generate(&self, _prompt: &NotesPrompt) -> Result<String, NotesError> {
        Err(NotesError::Disabled)
    }
}
