use health_profiler::workflows::personalization::PersonalizationWeights;
use health_profiler::workflows::profiles::{
    FullProfile, ProfileStore, StoreError, PROFILE_RETENTION_LIMIT,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store: newest profiles first, one weight map per session.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    profiles: Arc<Mutex<VecDeque<FullProfile>>>,
    weights: Arc<Mutex<HashMap<String, PersonalizationWeights>>>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable(format!("{what} mutex poisoned")))
}

impl ProfileStore for InMemoryProfileStore {
    fn get_weights(&self, session_id: &str) -> Result<PersonalizationWeights, StoreError> {
        let mut guard = lock(&self.weights, "weights")?;
        Ok(guard.entry(session_id.to_string()).or_default().clone())
    }

    fn set_weights(
        &self,
        session_id: &str,
        weights: PersonalizationWeights,
    ) -> Result<(), StoreError> {
        let mut guard = lock(&self.weights, "weights")?;
        guard.insert(session_id.to_string(), weights);
        Ok(())
    }

    fn save_profile(&self, profile: FullProfile) -> Result<(), StoreError> {
        let mut guard = lock(&self.profiles, "profiles")?;
        guard.push_front(profile);
        guard.truncate(PROFILE_RETENTION_LIMIT);
        Ok(())
    }

    fn list_profiles(&self) -> Result<Vec<FullProfile>, StoreError> {
        let guard = lock(&self.profiles, "profiles")?;
        Ok(guard.iter().cloned().collect())
    }
}
