use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::intake::RawAnswers;
use crate::workflows::personalization::PersonalizationWeights;
use crate::workflows::profiles::domain::{FullProfile, ProfileSubmission};
use crate::workflows::profiles::notes::{NotesError, NotesGenerator, NotesPrompt};
use crate::workflows::profiles::repository::{
    ProfileStore, StoreError, PROFILE_RETENTION_LIMIT,
};
use crate::workflows::profiles::{profile_router, ProfilingService};

pub(super) fn raw_answers(value: Value) -> RawAnswers {
    serde_json::from_value(value).expect("raw answers")
}

pub(super) fn high_risk_submission() -> ProfileSubmission {
    ProfileSubmission {
        answers: Some(raw_answers(json!({
            "age": 42,
            "smoker": true,
            "exercise": "rarely",
            "diet": "high sugar"
        }))),
        session_id: Some("session-a".to_string()),
        ..ProfileSubmission::default()
    }
}

pub(super) fn healthy_text_submission() -> ProfileSubmission {
    ProfileSubmission {
        text_input: Some("Age: 70\nSmoker: no\nExercise: daily\nDiet: balanced".to_string()),
        ..ProfileSubmission::default()
    }
}

pub(super) fn incomplete_submission() -> ProfileSubmission {
    ProfileSubmission {
        ocr_text: Some("Diet: balanced\nblurred line".to_string()),
        ..ProfileSubmission::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    profiles: Arc<Mutex<VecDeque<FullProfile>>>,
    weights: Arc<Mutex<HashMap<String, PersonalizationWeights>>>,
}

impl MemoryStore {
    pub(super) fn session_count(&self) -> usize {
        self.weights.lock().expect("weights mutex poisoned").len()
    }
}

impl ProfileStore for MemoryStore {
    fn get_weights(&self, session_id: &str) -> Result<PersonalizationWeights, StoreError> {
        let mut guard = self.weights.lock().expect("weights mutex poisoned");
        Ok(guard.entry(session_id.to_string()).or_default().clone())
    }

    fn set_weights(
        &self,
        session_id: &str,
        weights: PersonalizationWeights,
    ) -> Result<(), StoreError> {
        let mut guard = self.weights.lock().expect("weights mutex poisoned");
        guard.insert(session_id.to_string(), weights);
        Ok(())
    }

    fn save_profile(&self, profile: FullProfile) -> Result<(), StoreError> {
        let mut guard = self.profiles.lock().expect("profiles mutex poisoned");
        guard.push_front(profile);
        guard.truncate(PROFILE_RETENTION_LIMIT);
        Ok(())
    }

    fn list_profiles(&self) -> Result<Vec<FullProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profiles mutex poisoned");
        Ok(guard.iter().cloned().collect())
    }
}

pub(super) struct UnavailableStore;

impl ProfileStore for UnavailableStore {
    fn get_weights(&self, _session_id: &str) -> Result<PersonalizationWeights, StoreError> {
        Err(StoreError::Unavailable("kv offline".to_string()))
    }

    fn set_weights(
        &self,
        _session_id: &str,
        _weights: PersonalizationWeights,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("kv offline".to_string()))
    }

    fn save_profile(&self, _profile: FullProfile) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("kv offline".to_string()))
    }

    fn list_profiles(&self) -> Result<Vec<FullProfile>, StoreError> {
        Err(StoreError::Unavailable("kv offline".to_string()))
    }
}

/// Returns a canned note and remembers every prompt it was given.
#[derive(Default, Clone)]
pub(super) struct ScriptedNotes {
    prompts: Arc<Mutex<Vec<NotesPrompt>>>,
}

impl ScriptedNotes {
    pub(super) fn prompts(&self) -> Vec<NotesPrompt> {
        self.prompts.lock().expect("prompts mutex poisoned").clone()
    }
}

#[async_trait]
impl NotesGenerator for ScriptedNotes {
    async fn generate(&self, prompt: &NotesPrompt) -> Result<String, NotesError> {
        self.prompts
            .lock()
            .expect("prompts mutex poisoned")
            .push(prompt.clone());
        Ok("Cutting back on sugar and walking daily both help.".to_string())
    }
}

pub(super) struct FailingNotes;

#[async_trait]
impl NotesGenerator for FailingNotes {
    async fn generate(&self, _prompt: &NotesPrompt) -> Result<String, NotesError> {
        Err(NotesError::Transport("connection reset".to_string()))
    }
}

pub(super) struct SlowNotes;

#[async_trait]
impl NotesGenerator for SlowNotes {
    async fn generate(&self, _prompt: &NotesPrompt) -> Result<String, NotesError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

pub(super) fn build_service() -> (
    ProfilingService<MemoryStore, ScriptedNotes>,
    Arc<MemoryStore>,
    Arc<ScriptedNotes>,
) {
    let store = Arc::new(MemoryStore::default());
    let notes = Arc::new(ScriptedNotes::default());
    let service = ProfilingService::new(store.clone(), notes.clone());
    (service, store, notes)
}

pub(super) fn profile_router_with_service(
    service: ProfilingService<MemoryStore, ScriptedNotes>,
) -> axum::Router {
    profile_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
