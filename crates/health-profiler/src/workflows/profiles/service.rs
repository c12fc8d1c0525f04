use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::super::assessment::{assess, Assessment};
use super::super::intake::{parse_inputs, Answers};
use super::super::personalization::adjust_weights;
use super::domain::{
    FeedbackRejection, FeedbackSubmission, FullProfile, ProfileId, ProfileSubmission,
};
use super::notes::{NotesError, NotesGenerator, NotesPrompt, NOTES_CONTEXT_FACTORS};
use super::repository::{ProfileStore, StoreError};

const DEFAULT_NOTES_TIMEOUT: Duration = Duration::from_secs(15);

/// Service composing intake, assessment, personalization, and persistence.
pub struct ProfilingService<S, N> {
    store: Arc<S>,
    notes: Arc<N>,
    notes_timeout: Duration,
}

impl<S, N> ProfilingService<S, N>
where
    S: ProfileStore + 'static,
    N: NotesGenerator + 'static,
{
    pub fn new(store: Arc<S>, notes: Arc<N>) -> Self {
        Self {
            store,
            notes,
            notes_timeout: DEFAULT_NOTES_TIMEOUT,
        }
    }

    pub fn with_notes_timeout(mut self, timeout: Duration) -> Self {
        self.notes_timeout = timeout;
        self
    }

    /// Parse, assess, and optionally persist one submission.
    ///
    /// Incomplete submissions skip assessment and notes entirely.
    pub async fn process(
        &self,
        submission: ProfileSubmission,
    ) -> Result<FullProfile, ProfilingServiceError> {
        let parse = parse_inputs(&submission.intake_request());
        let id = ProfileId::generate();
        let created_at = Utc::now();

        let profile = if parse.is_complete() {
            let assessment = assess(&parse.answers);
            let notes = self
                .notes_for(submission.session(), &parse.answers, &assessment)
                .await?;
            FullProfile::assessed(id, created_at, parse, assessment, notes)
        } else {
            debug!(missing = parse.missing_fields.len(), "skipping assessment");
            FullProfile::incomplete(id, created_at, parse)
        };

        if submission.persist {
            self.store.save_profile(profile.clone())?;
            info!(profile_id = %profile.id, "profile persisted");
        }

        Ok(profile)
    }

    /// Fold thumbs-up/down feedback into the session's factor weights.
    pub fn record_feedback(
        &self,
        feedback: FeedbackSubmission,
    ) -> Result<BTreeMap<String, f64>, ProfilingServiceError> {
        let feedback = feedback.validate()?;

        let current = self.store.get_weights(&feedback.session_id)?;
        let updated = adjust_weights(current, &feedback.factors, feedback.helpful);
        let factor_weights = updated.factor_weights.clone();
        self.store.set_weights(&feedback.session_id, updated)?;

        debug!(
            session_id = %feedback.session_id,
            factors = feedback.factors.len(),
            helpful = feedback.helpful,
            "feedback recorded"
        );
        Ok(factor_weights)
    }

    pub fn list_profiles(&self) -> Result<Vec<FullProfile>, ProfilingServiceError> {
        Ok(self.store.list_profiles()?)
    }

    async fn notes_for(
        &self,
        session_id: &str,
        answers: &Answers,
        assessment: &Assessment,
    ) -> Result<String, ProfilingServiceError> {
        let weights = self.store.get_weights(session_id)?;
        let prompt = NotesPrompt {
            answers: answers.clone(),
            risk: assessment.risk.clone(),
            factors: assessment.factors.factors.clone(),
            weighted_factors: weights.top_weighted(NOTES_CONTEXT_FACTORS),
        };

        let pending = self.notes.generate(&prompt);
        let notes = match tokio::time::timeout(self.notes_timeout, pending).await {
            Ok(Ok(text)) => text,
            Ok(Err(NotesError::Disabled)) => String::new(),
            Ok(Err(error)) => {
                warn!(%error, "notes generation failed");
                String::new()
            }
            Err(_) => {
                let timeout_ms = self.notes_timeout.as_millis() as u64;
                warn!(timeout_ms, "notes generation timed out");
                String::new()
            }
        };

        Ok(notes)
    }
}

/// Error raised by the profiling service.
#[derive(Debug, thiserror::Error)]
pub enum ProfilingServiceError {
    #[error(transparent)]
    InvalidFeedback(#[from] FeedbackRejection),
    #[error(transparent)]
    Store(#[from] StoreError),
}
